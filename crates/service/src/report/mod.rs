//! Coach reports with per-session metric entries.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::ReportService;
