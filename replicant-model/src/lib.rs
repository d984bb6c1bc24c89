//! Content entity model for Replicant.
//!
//! Defines the shapes every other crate exchanges:
//! - [`ContentEntity`] — a translatable content item (identity, bundle, translations)
//! - [`Translation`] — one locale's projection: title, comment policy, publication, workflow
//! - [`CommentPolicy`] — disabled / read-only / open
//! - [`EntityTypeConfig`] — per-bundle policy flags such as workflow support
//! - [`EntityValidator`] — optional save-time validation hook for storage backends

mod entity;
mod handler;
mod schema;
mod translation;

pub use entity::{ContentEntity, ModelError};
pub use handler::EntityValidator;
pub use schema::{EntityTypeConfig, WorkflowSettings};
pub use translation::{CommentPolicy, Translation};
