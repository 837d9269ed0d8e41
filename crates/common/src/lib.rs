//! Shared types and utilities used by the server binary and the HTTP crate.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn envelope_serializes_all_fields() {
        let body = serde_json::to_value(types::ApiResponse::ok("found", 3)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "found");
        assert_eq!(body["data"], 3);

        let empty = serde_json::to_value(types::ApiResponse::<()>::failure("missing")).unwrap();
        assert_eq!(empty["success"], false);
        assert!(empty["data"].is_null());
    }
}
