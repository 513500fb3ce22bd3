use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use estate_core::{ServiceError, new_id, now};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::Property;
use crate::store::RecordStore;
use crate::validate::validate_create;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("cannot read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("seed file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("seed file must contain a JSON array of properties")]
    NotAnArray,

    #[error("seed record #{index}: {message}")]
    InvalidRecord { index: usize, message: String },

    #[error("seed record #{index}: duplicate id '{id}'")]
    DuplicateId { index: usize, id: String },

    #[error("record store: {0}")]
    Store(#[from] ServiceError),
}

/// SeedLoader reads the static dataset the record store starts from.
///
/// The file is a JSON array of property records:
///
/// ```text
/// [
///   {"id": "1", "title": "Loft", "city": "Paris", "price": 300000,
///    "surface": 45, "createdAt": "2024-01-15T10:00:00Z", "updatedAt": "..."},
///   ...
/// ]
/// ```
///
/// Each record must pass the create schema. `id` may be a string or a
/// number and is generated when absent; timestamps default to load time.
pub struct SeedLoader;

impl SeedLoader {
    /// Parse the seed file. A missing file yields an empty dataset.
    pub fn load(path: &Path) -> Result<Vec<Property>, SeedError> {
        if !path.is_file() {
            warn!("seed file {:?} does not exist, starting empty", path);
            return Ok(Vec::new());
        }

        let data = fs::read(path)?;
        let value: Value = serde_json::from_slice(&data)?;
        let records = Self::parse(&value)?;
        debug!("SeedLoader: parsed {} records from {:?}", records.len(), path);
        Ok(records)
    }

    /// Load the seed file into `store`, replacing its contents.
    /// Returns the number of records loaded.
    pub fn load_into(path: &Path, store: &dyn RecordStore) -> Result<usize, SeedError> {
        let records = Self::load(path)?;
        let count = records.len();
        store.replace_all(records)?;
        info!("Loaded {} properties from {}", count, path.display());
        Ok(count)
    }

    /// Turn a parsed seed document into records.
    pub fn parse(value: &Value) -> Result<Vec<Property>, SeedError> {
        let items = value.as_array().ok_or(SeedError::NotAnArray)?;
        let loaded_at = now();
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let payload = validate_create(item).map_err(|e| SeedError::InvalidRecord {
                index,
                message: e.to_string(),
            })?;

            let id = match item.get("id") {
                Some(Value::String(s)) if !s.is_empty() => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                None | Some(Value::Null) => new_id(),
                Some(_) => {
                    return Err(SeedError::InvalidRecord {
                        index,
                        message: "id must be a non-empty string or a number".into(),
                    });
                }
            };
            if !seen.insert(id.clone()) {
                return Err(SeedError::DuplicateId { index, id });
            }

            let created_at = Self::timestamp(item, "createdAt", index)?.unwrap_or(loaded_at);
            let mut record = payload.into_property(id, created_at);
            if let Some(updated_at) = Self::timestamp(item, "updatedAt", index)? {
                if updated_at < created_at {
                    warn!(
                        "seed record #{}: updatedAt precedes createdAt, using createdAt",
                        index
                    );
                } else {
                    record.updated_at = updated_at;
                }
            }
            records.push(record);
        }

        Ok(records)
    }

    fn timestamp(
        item: &Value,
        key: &str,
        index: usize,
    ) -> Result<Option<DateTime<Utc>>, SeedError> {
        match item.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
                .map(|t| Some(t.with_timezone(&Utc)))
                .map_err(|e| SeedError::InvalidRecord {
                    index,
                    message: format!("{key}: {e}"),
                }),
            Some(_) => Err(SeedError::InvalidRecord {
                index,
                message: format!("{key} must be an ISO-8601 string"),
            }),
        }
    }
}
