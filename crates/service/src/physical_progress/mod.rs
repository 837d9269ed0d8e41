//! Physical progress records: routine/measurement checks and per-user date lookups.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::PhysicalProgressService;
