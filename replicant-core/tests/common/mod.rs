//! Shared fixtures for replication tests.

#![allow(dead_code)]

use replicant_core::{Replicator, ReplicatorConfig, SnapshotReader, SourceEntity};
use replicant_model::{CommentPolicy, ContentEntity, EntityTypeConfig, EntityValidator, Translation};
use replicant_storage::MemoryStore;
use replicant_types::{EntityId, EntityUuid, Locale, RevisionId};
use serde_json::json;
use std::sync::Arc;

pub const SOURCE_ID: u64 = 42;

pub fn loc(code: &str) -> Locale {
    Locale::parse(code).unwrap()
}

/// Routes `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Published article 42 with `en` (default, comments open) and `fr` translations.
pub fn source_entity() -> ContentEntity {
    let mut entity = ContentEntity::new(
        "node",
        "article",
        Translation::new(loc("en"), "Title EN")
            .with_comment_policy(CommentPolicy::Open)
            .with_published(true)
            .with_workflow_state("published")
            .with_field("body", json!({"value": "<p>Spring menu</p>", "format": "basic_html"})),
    )
    .with_translation(
        Translation::new(loc("fr"), "Titre FR")
            .with_comment_policy(CommentPolicy::ReadOnly)
            .with_published(true)
            .with_workflow_state("published")
            .with_field("body", json!({"value": "<p>Menu de printemps</p>", "format": "basic_html"})),
    );
    for t in entity.translations.values_mut() {
        t.published_at = Some(1_700_000_000_000);
    }
    entity.id = Some(EntityId::new(SOURCE_ID));
    entity.uuid = Some(EntityUuid::new());
    entity.revision_id = Some(RevisionId::new(7));
    entity.created_at = Some(1_600_000_000_000);
    entity.modified_at = Some(1_700_000_000_000);
    entity
}

pub fn workflow_type() -> EntityTypeConfig {
    EntityTypeConfig::with_workflow("article", ["draft", "published", "template"])
}

/// Store holding the source; `article` has no workflow.
pub fn plain_store() -> Arc<MemoryStore> {
    let store = MemoryStore::new().with_type(EntityTypeConfig::plain("article"));
    store.insert(source_entity()).unwrap();
    Arc::new(store)
}

/// Store holding the source; `article` has a workflow.
pub fn workflow_store() -> Arc<MemoryStore> {
    let store = MemoryStore::new().with_type(workflow_type());
    store.insert(source_entity()).unwrap();
    Arc::new(store)
}

/// Store whose saves are always rejected.
pub fn rejecting_store() -> Arc<MemoryStore> {
    struct RejectAll;
    impl EntityValidator for RejectAll {
        fn validate(&self, _entity: &ContentEntity) -> Result<(), String> {
            Err("body field is required".into())
        }
    }
    let store = MemoryStore::new()
        .with_type(EntityTypeConfig::plain("article"))
        .with_validator(Box::new(RejectAll));
    store.insert(source_entity()).unwrap();
    Arc::new(store)
}

pub fn replicator(store: &Arc<MemoryStore>) -> Replicator {
    init_tracing();
    Replicator::new(store.clone(), store.clone(), ReplicatorConfig::default())
}

pub fn load_source(store: &MemoryStore, locale: Option<&Locale>) -> SourceEntity {
    SnapshotReader::new(store, store, "node")
        .load(EntityId::new(SOURCE_ID), locale)
        .unwrap()
}

/// Byte-exact JSON of what the store holds for `id`.
pub fn stored_json(store: &MemoryStore, id: u64) -> String {
    store.export_json(EntityId::new(id)).unwrap().unwrap()
}
