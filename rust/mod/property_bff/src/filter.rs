//! Client-side list filter.
//!
//! Criteria are kept as the raw text the user typed. An empty or
//! unparsable input leaves that criterion unset.

use property::model::Property;

/// Which filter input changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    City,
    MaxPrice,
    MinSurface,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub city: String,
    pub max_price: String,
    pub min_surface: String,
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

impl ListFilter {
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::City => self.city = value,
            FilterField::MaxPrice => self.max_price = value,
            FilterField::MinSurface => self.min_surface = value,
        }
    }

    /// Case-insensitive city substring, price ceiling, surface floor.
    pub fn matches(&self, property: &Property) -> bool {
        let city = self.city.trim().to_lowercase();
        if !city.is_empty() && !property.city.to_lowercase().contains(&city) {
            return false;
        }
        if parse_number(&self.max_price).is_some_and(|max| property.price > max) {
            return false;
        }
        if parse_number(&self.min_surface).is_some_and(|min| property.surface < min) {
            return false;
        }
        true
    }

    /// The matching properties, order preserved.
    pub fn apply(&self, properties: &[Property]) -> Vec<Property> {
        properties
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}
