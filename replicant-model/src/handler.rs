use crate::ContentEntity;

/// Optional save-time validation for storage backends.
///
/// Backends run every registered validator before persisting an entity and
/// reject the write on the first `Err`. Most bundles need none.
///
/// Implement this for checks the model cannot express on its own, e.g.
/// required fields in `Translation::fields` or bundle-specific title rules.
pub trait EntityValidator: Send + Sync {
    /// Validate an entity before it is persisted.
    /// Return `Err(message)` to reject the write.
    fn validate(&self, entity: &ContentEntity) -> Result<(), String> {
        let _ = entity;
        Ok(())
    }
}
