//! Auth module: password hashing, token issue/verification and the role permission table.
//!
//! Login looks users up through the same `UserRepository` the user service writes to.

pub mod domain;
pub mod errors;
pub mod password;
pub mod permissions;
pub mod service;

pub use permissions::{Permission, Scope};
pub use service::AuthService;
