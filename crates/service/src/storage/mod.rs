//! Storage helpers shared by the repository implementations.

pub mod memory;

pub use memory::MemoryCollection;

/// Caller-supplied id when present and non-blank, otherwise a fresh UUIDv4 string.
pub fn id_or_generate(id: Option<String>) -> String {
    match id {
        Some(id) if !id.trim().is_empty() => id,
        _ => uuid::Uuid::new_v4().to_string(),
    }
}
