//! Gym sessions: schedule/capacity rules, coach checks, attendance and time-based lookups.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::GymSessionService;
