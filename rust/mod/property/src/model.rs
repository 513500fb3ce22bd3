use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Property: one real-estate listing.
///
/// `id` and `created_at` are assigned once by the service and never change.
/// `updated_at` is refreshed on every update and is never earlier than
/// `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Unique identifier: primary key.
    pub id: String,

    /// Listing title (1..=100 characters).
    pub title: String,

    pub city: String,

    /// Asking price, strictly positive.
    pub price: f64,

    /// Living surface in square meters, strictly positive.
    pub surface: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Price per square meter, rounded to the nearest unit.
    pub fn price_per_m2(&self) -> f64 {
        (self.price / self.surface).round()
    }
}

/// Validated create payload: every field of a property except the ones the
/// service assigns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub title: String,
    pub city: String,
    pub price: f64,
    pub surface: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewProperty {
    /// Build the stored record, copying caller fields verbatim.
    pub fn into_property(self, id: String, at: DateTime<Utc>) -> Property {
        Property {
            id,
            title: self.title,
            city: self.city,
            price: self.price,
            surface: self.surface,
            description: self.description,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Validated partial update. `None` means "not supplied, leave untouched".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertyPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.city.is_none()
            && self.price.is_none()
            && self.surface.is_none()
            && self.description.is_none()
    }

    /// Overwrite each supplied field on `record`.
    ///
    /// Leaves `id`, `created_at` and `updated_at` alone; the caller owns
    /// timestamp bookkeeping.
    pub fn apply_to(&self, record: &mut Property) {
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(city) = &self.city {
            record.city = city.clone();
        }
        if let Some(price) = self.price {
            record.price = price;
        }
        if let Some(surface) = self.surface {
            record.surface = surface;
        }
        if let Some(description) = &self.description {
            record.description = Some(description.clone());
        }
    }
}

impl From<NewProperty> for PropertyPatch {
    fn from(p: NewProperty) -> Self {
        Self {
            title: Some(p.title),
            city: Some(p.city),
            price: Some(p.price),
            surface: Some(p.surface),
            description: p.description,
        }
    }
}
