//! Reservations: reference checks against users and sessions, status/date defaults.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::ReservationService;
