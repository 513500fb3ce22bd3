//! Payload validation for create and update requests.
//!
//! Both schemas share the same per-field rules; they differ only in which
//! fields must be present. Validation works on the raw JSON body so every
//! problem (missing field, wrong type, rule violation) is reported with the
//! name of the offending field, and all problems are collected in one pass.

use estate_core::{FieldError, ServiceError};
use serde_json::Value;

use crate::model::{NewProperty, PropertyPatch};

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Which set of presence rules to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// All fields required except `description`.
    Create,
    /// All fields optional; same rules when present.
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    City,
    Price,
    Surface,
    Description,
}

impl Field {
    const ALL: [Field; 5] = [
        Field::Title,
        Field::City,
        Field::Price,
        Field::Surface,
        Field::Description,
    ];

    fn key(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::City => "city",
            Field::Price => "price",
            Field::Surface => "surface",
            Field::Description => "description",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::City => "City",
            Field::Price => "Price",
            Field::Surface => "Surface",
            Field::Description => "Description",
        }
    }

    fn is_numeric(self) -> bool {
        matches!(self, Field::Price | Field::Surface)
    }
}

impl Schema {
    fn requires(self, field: Field) -> bool {
        self == Schema::Create && field != Field::Description
    }

    /// Check `body` against this schema.
    ///
    /// On success returns a normalized payload holding only recognized
    /// fields; unknown keys are dropped.
    pub fn check(self, body: &Value) -> Result<PropertyPatch, Vec<FieldError>> {
        let Some(obj) = body.as_object() else {
            return Err(vec![FieldError::body("Expected a JSON object")]);
        };

        let mut errors = Vec::new();
        let mut patch = PropertyPatch::default();

        for field in Field::ALL {
            match obj.get(field.key()) {
                None if self.requires(field) => {
                    errors.push(FieldError::new(
                        field.key(),
                        format!("{} is required", field.label()),
                    ));
                }
                None => {}
                Some(value) if field.is_numeric() => match check_number(field, value) {
                    Ok(n) => match field {
                        Field::Price => patch.price = Some(n),
                        _ => patch.surface = Some(n),
                    },
                    Err(e) => errors.push(e),
                },
                Some(value) => match check_text(field, value) {
                    Ok(s) => match field {
                        Field::Title => patch.title = Some(s),
                        Field::City => patch.city = Some(s),
                        _ => patch.description = Some(s),
                    },
                    Err(e) => errors.push(e),
                },
            }
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

fn check_text(field: Field, value: &Value) -> Result<String, FieldError> {
    let Some(s) = value.as_str() else {
        return Err(FieldError::new(
            field.key(),
            format!("{} must be a string", field.label()),
        ));
    };
    match field {
        Field::Title | Field::City if s.is_empty() => Err(FieldError::new(
            field.key(),
            format!("{} is required", field.label()),
        )),
        Field::Title if s.chars().count() > TITLE_MAX_CHARS => Err(FieldError::new(
            field.key(),
            format!("Title must contain at most {TITLE_MAX_CHARS} characters"),
        )),
        _ => Ok(s.to_string()),
    }
}

fn check_number(field: Field, value: &Value) -> Result<f64, FieldError> {
    let n = value.as_f64().filter(|n| n.is_finite()).ok_or_else(|| {
        FieldError::new(field.key(), format!("{} must be a number", field.label()))
    })?;
    if n <= 0.0 {
        return Err(FieldError::new(
            field.key(),
            format!("{} must be positive", field.label()),
        ));
    }
    Ok(n)
}

/// Validate a create body into a [`NewProperty`].
pub fn validate_create(body: &Value) -> Result<NewProperty, ServiceError> {
    let patch = Schema::Create.check(body).map_err(ServiceError::Validation)?;
    match patch {
        PropertyPatch {
            title: Some(title),
            city: Some(city),
            price: Some(price),
            surface: Some(surface),
            description,
        } => Ok(NewProperty {
            title,
            city,
            price,
            surface,
            description,
        }),
        _ => Err(ServiceError::Internal(
            "create schema accepted an incomplete payload".into(),
        )),
    }
}

/// Validate an update body into a [`PropertyPatch`].
pub fn validate_update(body: &Value) -> Result<PropertyPatch, ServiceError> {
    Schema::Update.check(body).map_err(ServiceError::Validation)
}
