//! Property form: local validation and server error merging.

use std::collections::BTreeMap;

use estate_core::FieldError;
use property::model::{NewProperty, Property, PropertyPatch};
use property::validate::TITLE_MAX_CHARS;

/// Field-name → message, as displayed next to each input.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    City,
    Price,
    Surface,
    Description,
}

impl FormField {
    /// Wire name, matching `path[0]` of server validation details.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::City => "city",
            FormField::Price => "price",
            FormField::Surface => "surface",
            FormField::Description => "description",
        }
    }
}

/// Raw form inputs. Numbers are kept as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub title: String,
    pub city: String,
    pub price: String,
    pub surface: String,
    pub description: String,
}

impl FormFields {
    pub fn from_property(p: &Property) -> Self {
        Self {
            title: p.title.clone(),
            city: p.city.clone(),
            price: p.price.to_string(),
            surface: p.surface.to_string(),
            description: p.description.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::City => self.city = value,
            FormField::Price => self.price = value,
            FormField::Surface => self.surface = value,
            FormField::Description => self.description = value,
        }
    }

    /// Patch sent when editing. The description is always sent so that
    /// clearing the input clears the stored text.
    pub fn to_patch(&self) -> Result<PropertyPatch, FieldErrors> {
        let payload = validate_form(self)?;
        let mut patch = PropertyPatch::from(payload);
        patch.description = Some(self.description.trim().to_string());
        Ok(patch)
    }
}

/// Unparsable numbers read as zero, so they fail the positivity rule.
fn parse_amount(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Check the form the way the server would, with trimmed text.
pub fn validate_form(fields: &FormFields) -> Result<NewProperty, FieldErrors> {
    let mut errors = FieldErrors::new();
    let title = fields.title.trim();
    let city = fields.city.trim();
    let price = parse_amount(&fields.price);
    let surface = parse_amount(&fields.surface);

    if title.is_empty() {
        errors.insert("title".into(), "Le titre est requis".into());
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.insert(
            "title".into(),
            format!("Le titre ne doit pas dépasser {TITLE_MAX_CHARS} caractères"),
        );
    }
    if city.is_empty() {
        errors.insert("city".into(), "La ville est requise".into());
    }
    if price <= 0.0 {
        errors.insert("price".into(), "Le prix doit être positif".into());
    }
    if surface <= 0.0 {
        errors.insert("surface".into(), "La surface doit être positive".into());
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    let description = fields.description.trim();
    Ok(NewProperty {
        title: title.to_string(),
        city: city.to_string(),
        price,
        surface,
        description: (!description.is_empty()).then(|| description.to_string()),
    })
}

/// Fold server validation details into the displayed errors, keyed by
/// the first path segment. Body-level details have no field and are skipped.
pub fn merge_server_errors(errors: &mut FieldErrors, details: &[FieldError]) {
    for detail in details {
        if let Some(field) = detail.field() {
            errors.insert(field.to_string(), detail.message.clone());
        }
    }
}
