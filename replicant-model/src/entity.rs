use crate::Translation;
use replicant_types::{EntityId, EntityUuid, Locale, RevisionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structural problems with an entity's translation set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("default locale {0} has no translation")]
    MissingDefaultTranslation(Locale),

    #[error("translation stored under {key} claims locale {actual}")]
    LocaleMismatch { key: Locale, actual: Locale },
}

/// A translatable content item.
///
/// Identity fields (`id`, `uuid`, `revision_id`) and timestamps are owned by
/// the storage backend: they are `None` until the entity has been saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<EntityUuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<RevisionId>,
    /// Entity kind used in paths, e.g. `"node"`.
    pub kind: String,
    /// Content type; keys the [`EntityTypeConfig`](crate::EntityTypeConfig).
    pub bundle: String,
    pub default_locale: Locale,
    pub translations: BTreeMap<Locale, Translation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<i64>,
}

impl ContentEntity {
    /// Creates an unsaved entity whose only translation is `default`.
    pub fn new(kind: impl Into<String>, bundle: impl Into<String>, default: Translation) -> Self {
        let default_locale = default.locale.clone();
        let mut translations = BTreeMap::new();
        translations.insert(default_locale.clone(), default);
        Self {
            id: None,
            uuid: None,
            revision_id: None,
            kind: kind.into(),
            bundle: bundle.into(),
            default_locale,
            translations,
            created_at: None,
            modified_at: None,
        }
    }

    /// Adds or replaces the translation for `translation.locale`.
    #[must_use]
    pub fn with_translation(mut self, translation: Translation) -> Self {
        self.add_translation(translation);
        self
    }

    pub fn add_translation(&mut self, translation: Translation) {
        self.translations
            .insert(translation.locale.clone(), translation);
    }

    pub fn translation(&self, locale: &Locale) -> Option<&Translation> {
        self.translations.get(locale)
    }

    pub fn translation_mut(&mut self, locale: &Locale) -> Option<&mut Translation> {
        self.translations.get_mut(locale)
    }

    pub fn has_translation(&self, locale: &Locale) -> bool {
        self.translations.contains_key(locale)
    }

    /// The default-locale translation, if the entity is well formed.
    pub fn default_translation(&self) -> Option<&Translation> {
        self.translations.get(&self.default_locale)
    }

    /// Locales in ascending order.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.translations.keys()
    }

    /// Whether the entity has been saved (carries a storage id).
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Checks that every translation is keyed by its own locale and that the
    /// default locale is present.
    pub fn check_translations(&self) -> Result<(), ModelError> {
        for (key, translation) in &self.translations {
            if *key != translation.locale {
                return Err(ModelError::LocaleMismatch {
                    key: key.clone(),
                    actual: translation.locale.clone(),
                });
            }
        }
        if !self.translations.contains_key(&self.default_locale) {
            return Err(ModelError::MissingDefaultTranslation(
                self.default_locale.clone(),
            ));
        }
        Ok(())
    }
}
