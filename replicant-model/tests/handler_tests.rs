use replicant_model::{ContentEntity, EntityValidator, Translation};
use replicant_types::Locale;
use serde_json::json;

fn make_entity(title: &str) -> ContentEntity {
    ContentEntity::new(
        "node",
        "article",
        Translation::new(Locale::parse("en").unwrap(), title),
    )
}

// ── Default implementation ───────────────────────────────────────

struct NoOpValidator;
impl EntityValidator for NoOpValidator {}

#[test]
fn default_validate_accepts_any_entity() {
    assert!(NoOpValidator.validate(&make_entity("anything")).is_ok());
}

#[test]
fn default_validate_accepts_empty_title() {
    assert!(NoOpValidator.validate(&make_entity("")).is_ok());
}

// ── Custom validators ────────────────────────────────────────────

struct TitleValidator;
impl EntityValidator for TitleValidator {
    fn validate(&self, entity: &ContentEntity) -> Result<(), String> {
        for t in entity.translations.values() {
            if t.title.trim().is_empty() {
                return Err(format!("{}: title cannot be empty", t.locale));
            }
        }
        Ok(())
    }
}

#[test]
fn custom_validate_rejects_blank_title() {
    let err = TitleValidator.validate(&make_entity(" ")).unwrap_err();
    assert_eq!(err, "en: title cannot be empty");
}

#[test]
fn custom_validate_checks_every_translation() {
    let entity = make_entity("Fine")
        .with_translation(Translation::new(Locale::parse("fr").unwrap(), ""));
    let err = TitleValidator.validate(&entity).unwrap_err();
    assert_eq!(err, "fr: title cannot be empty");
}

struct RequiredBodyValidator;
impl EntityValidator for RequiredBodyValidator {
    fn validate(&self, entity: &ContentEntity) -> Result<(), String> {
        let default = entity
            .default_translation()
            .ok_or_else(|| "no default translation".to_string())?;
        if default.fields.contains_key("body") {
            Ok(())
        } else {
            Err("body is required".to_string())
        }
    }
}

#[test]
fn custom_validate_reads_extra_fields() {
    let missing = make_entity("No body");
    assert_eq!(
        RequiredBodyValidator.validate(&missing).unwrap_err(),
        "body is required"
    );

    let mut present = make_entity("Body");
    present
        .translation_mut(&Locale::parse("en").unwrap())
        .unwrap()
        .fields
        .insert("body".into(), json!({"value": "text"}));
    assert!(RequiredBodyValidator.validate(&present).is_ok());
}

// ── Trait object safety ──────────────────────────────────────────

#[test]
fn validators_work_as_trait_objects() {
    let validators: Vec<Box<dyn EntityValidator>> =
        vec![Box::new(NoOpValidator), Box::new(TitleValidator)];

    let entity = make_entity("Test");
    for v in &validators {
        assert!(v.validate(&entity).is_ok());
    }
}
