//! Replication engine for Replicant.
//!
//! Turns an existing content entity into an independent, unpublished copy
//! (a *template* or *working copy*) with caller-chosen overrides:
//!
//! 1. [`SnapshotReader`] loads the source and captures its title.
//! 2. [`ReplicationEngine::replicate`] deep-copies every translation, strips
//!    identity and publication state.
//! 3. [`OverrideReconciler`] applies title, comment policy and workflow state
//!    to exactly one translation.
//! 4. [`ReplicationEngine::persist`] saves the replica with a single call.
//! 5. [`ResultNotifier`] derives the confirmation message and redirect locator.
//!
//! [`Replicator`] wires these together over the collaborator traits from
//! `replicant-storage`. The source entity is never written.

mod config;
mod error;
mod notify;
mod prefill;
mod reconcile;
mod replicate;
mod replicator;
mod request;
mod snapshot;

pub use config::ReplicatorConfig;
pub use error::{ReplicateError, ReplicateResult};
pub use notify::{ReplicationResult, ResultNotifier};
pub use prefill::{OverridePrefill, ReplicationPreset};
pub use reconcile::OverrideReconciler;
pub use replicate::{AppliedOverrides, PersistedReplica, Replica, ReplicationEngine};
pub use replicator::Replicator;
pub use request::{ReplicationOverrides, ReplicationRequest};
pub use snapshot::{SnapshotReader, SourceEntity};
