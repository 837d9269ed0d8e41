//! Users: domain inputs, repository abstraction and the service enforcing id/email rules.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::UserService;
