use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("duplicate: {0}")]
    Duplicate(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    /// Failures outside the store, such as password hashing.
    #[error("internal error: {0}")]
    Internal(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn required(field: &str) -> Self { Self::Validation(format!("{} cannot be null or empty", field)) }

    /// Map a store error, turning unique-index violations into `Duplicate`.
    pub fn from_db(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Duplicate(msg),
            _ => Self::Db(err.to_string()),
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) | ServiceError::Model(_) => 2001,
            ServiceError::Duplicate(_) => 2002,
            ServiceError::NotFound(_) => 2003,
            ServiceError::Db(_) => 2100,
            ServiceError::Internal(_) => 2101,
        }
    }
}

/// Reject missing or blank required string fields. The value is kept as sent.
pub(crate) fn require_text(value: Option<String>, field: &str) -> Result<String, ServiceError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ServiceError::required(field)),
    }
}

/// Reject blank ids on lookups/deletes that take an id path segment.
pub(crate) fn require_id(id: &str, entity: &str) -> Result<(), ServiceError> {
    if id.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{} id cannot be null or empty", entity)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_keeps_value_and_rejects_blank() {
        assert_eq!(require_text(Some("  Ana ".into()), "name").unwrap(), "  Ana ");
        assert!(matches!(require_text(Some("   ".into()), "name"), Err(ServiceError::Validation(_))));
        assert!(matches!(require_text(None, "name"), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn codes_are_distinct_per_kind() {
        let codes = [
            ServiceError::Validation(String::new()).code(),
            ServiceError::Duplicate(String::new()).code(),
            ServiceError::NotFound(String::new()).code(),
            ServiceError::Db(String::new()).code(),
            ServiceError::Internal(String::new()).code(),
        ];
        let mut sorted = codes.to_vec();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }

    #[test]
    fn plain_db_errors_stay_opaque() {
        let e = ServiceError::from_db(DbErr::Custom("boom".into()));
        assert!(matches!(e, ServiceError::Db(_)));
    }
}
