//! SeaORM entities for the gym collections plus connection helpers.
//!
//! Each entity module owns its table model and the embedded documents stored in JSON columns.
//! Related records are referenced by id string only; nothing cascades.

pub mod errors;
pub mod db;
pub mod user;
pub mod gym_session;
pub mod reservation;
pub mod physical_progress;
pub mod report;

#[cfg(test)]
mod tests;
