//! Core type definitions for Replicant.
//!
//! This crate defines the small, storage-agnostic types shared by every
//! other crate in the workspace:
//! - Entity identifiers (serial id, UUID v7 identity, revision pointer)
//! - Validated locale codes
//!
//! Content shapes (translations, comment policy, type configuration) live in
//! `replicant-model`.

mod ids;
mod locale;

pub use ids::{EntityId, EntityUuid, RevisionId};
pub use locale::{Locale, MAX_LOCALE_LEN};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid entity id: {0}")]
    InvalidId(String),

    #[error("invalid locale: {0}")]
    InvalidLocale(String),
}
