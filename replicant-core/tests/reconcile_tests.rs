mod common;

use common::*;
use pretty_assertions::assert_eq;
use replicant_core::{
    OverrideReconciler, Replica, ReplicateError, ReplicationEngine, ReplicationOverrides,
    ReplicatorConfig,
};
use replicant_model::CommentPolicy;
use replicant_storage::MemoryStore;

fn replica_from(store: &MemoryStore) -> Replica {
    let source = load_source(store, None);
    ReplicationEngine::new(store).replicate(&source)
}

fn apply(store: &MemoryStore, overrides: ReplicationOverrides) -> Result<Replica, ReplicateError> {
    let config = ReplicatorConfig::default();
    OverrideReconciler::new(&config).apply(replica_from(store), &overrides)
}

fn field_of(err: ReplicateError) -> &'static str {
    match err {
        ReplicateError::Validation { field, .. } => field,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ── Locale scoping ───────────────────────────────────────────────

#[test]
fn title_override_targets_requested_locale_only() {
    let store = plain_store();
    let replica = apply(
        &store,
        ReplicationOverrides::new()
            .for_locale(loc("fr"))
            .with_title("Nouveau Titre"),
    )
    .unwrap();

    assert_eq!(replica.translation(&loc("fr")).unwrap().title, "Nouveau Titre");
    assert_eq!(replica.translation(&loc("en")).unwrap().title, "Title EN");
    assert_eq!(replica.applied().target_locale, Some(loc("fr")));
}

#[test]
fn overrides_default_to_default_locale() {
    let store = plain_store();
    let replica = apply(
        &store,
        ReplicationOverrides::new()
            .with_title("Spring Template")
            .with_comment_policy(CommentPolicy::Disabled),
    )
    .unwrap();

    let en = replica.translation(&loc("en")).unwrap();
    assert_eq!(en.title, "Spring Template");
    assert_eq!(en.comment_policy, CommentPolicy::Disabled);
    assert_eq!(replica.applied().target_locale, Some(loc("en")));
}

#[test]
fn comment_policy_is_never_broadcast() {
    let store = plain_store();
    let before = replica_from(&store);
    let replica = apply(
        &store,
        ReplicationOverrides::new().with_comment_policy(CommentPolicy::Disabled),
    )
    .unwrap();

    assert_eq!(
        replica.translation(&loc("fr")),
        before.translation(&loc("fr"))
    );
}

#[test]
fn absent_comment_policy_keeps_replicated_value() {
    let store = plain_store();
    let replica = apply(&store, ReplicationOverrides::new().with_title("Copy")).unwrap();
    assert_eq!(
        replica.translation(&loc("en")).unwrap().comment_policy,
        CommentPolicy::Open
    );
    assert!(!replica.applied().comment_policy);
}

#[test]
fn empty_overrides_change_nothing() {
    let store = plain_store();
    let before = replica_from(&store);
    let replica = apply(&store, ReplicationOverrides::new()).unwrap();
    assert_eq!(replica.entity(), before.entity());
}

#[test]
fn unknown_target_locale_is_rejected() {
    let store = plain_store();
    let err = apply(
        &store,
        ReplicationOverrides::new()
            .for_locale(loc("de"))
            .with_title("Titel"),
    )
    .unwrap_err();
    assert_eq!(field_of(err), "target_locale");
}

// ── Title rules ──────────────────────────────────────────────────

#[test]
fn title_is_trimmed() {
    let store = plain_store();
    let replica = apply(&store, ReplicationOverrides::new().with_title("  Padded  ")).unwrap();
    assert_eq!(replica.translation(&loc("en")).unwrap().title, "Padded");
}

#[test]
fn blank_title_is_rejected() {
    let store = plain_store();
    let err = apply(&store, ReplicationOverrides::new().with_title("   ")).unwrap_err();
    assert_eq!(field_of(err), "title");
}

#[test]
fn overlong_title_is_rejected() {
    let store = plain_store();
    let long = "é".repeat(256);
    let err = apply(&store, ReplicationOverrides::new().with_title(long)).unwrap_err();
    assert_eq!(field_of(err), "title");
}

#[test]
fn title_at_limit_is_accepted() {
    let store = plain_store();
    let exact = "é".repeat(255);
    let replica = apply(&store, ReplicationOverrides::new().with_title(exact.clone())).unwrap();
    assert_eq!(replica.translation(&loc("en")).unwrap().title, exact);
}

// ── Workflow gating ──────────────────────────────────────────────

#[test]
fn workflow_override_is_dropped_without_workflow() {
    let store = plain_store();
    let replica = apply(
        &store,
        ReplicationOverrides::new().with_workflow_state("template"),
    )
    .unwrap();

    assert!(replica
        .entity()
        .translations
        .values()
        .all(|t| t.workflow_state.is_none()));
    assert!(replica.applied().dropped_workflow_state);
    assert!(replica.applied().workflow_state.is_none());
}

#[test]
fn workflow_override_applies_to_target_only() {
    let store = workflow_store();
    let replica = apply(
        &store,
        ReplicationOverrides::new()
            .for_locale(loc("fr"))
            .with_workflow_state("template"),
    )
    .unwrap();

    assert_eq!(
        replica.translation(&loc("fr")).unwrap().workflow_state.as_deref(),
        Some("template")
    );
    assert_eq!(
        replica.translation(&loc("en")).unwrap().workflow_state.as_deref(),
        Some("published")
    );
    assert_eq!(replica.applied().workflow_state.as_deref(), Some("template"));
}

#[test]
fn disallowed_workflow_state_is_rejected() {
    let store = workflow_store();
    let err = apply(
        &store,
        ReplicationOverrides::new().with_workflow_state("archived"),
    )
    .unwrap_err();
    assert_eq!(field_of(err), "workflow_state");
}

#[test]
fn disallowed_workflow_state_is_ignored_without_workflow() {
    let store = plain_store();
    assert!(apply(
        &store,
        ReplicationOverrides::new().with_workflow_state("archived"),
    )
    .is_ok());
}

// ── Publication ──────────────────────────────────────────────────

#[test]
fn reconciled_replica_stays_unpublished() {
    let store = workflow_store();
    let replica = apply(
        &store,
        ReplicationOverrides::new()
            .with_title("T")
            .with_comment_policy(CommentPolicy::Open)
            .with_workflow_state("published"),
    )
    .unwrap();
    assert!(replica.entity().translations.values().all(|t| !t.published));
}
