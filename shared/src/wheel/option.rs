//! Wheel sectors and where they come from.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Identifier of a sector as the content API reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for OptionId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for OptionId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelOption {
    pub label: String,
    pub identifier: OptionId,
}

impl WheelOption {
    pub fn new(label: impl Into<String>, identifier: impl Into<OptionId>) -> Self {
        Self {
            label: label.into(),
            identifier: identifier.into(),
        }
    }
}

/// Ordered sectors of one wheel. Source order is kept as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    options: Vec<WheelOption>,
}

impl OptionSet {
    pub fn new(options: Vec<WheelOption>) -> Self {
        Self { options }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WheelOption> {
        self.options.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WheelOption> {
        self.options.iter()
    }

    pub fn as_slice(&self) -> &[WheelOption] {
        &self.options
    }
}

#[derive(Debug, Error)]
pub enum OptionSourceError {
    #[error("collection payload is not a list")]
    NotAList,
    #[error("invalid collection JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Field names tried, in order, for a sector label.
pub const DEFAULT_LABEL_FIELDS: &[&str] = &["nombre", "name", "title", "label"];

/// Picks the sectors for a wheel: caller-supplied options win, the remote
/// collection is the fallback. Empty when neither has anything.
pub fn resolve_options(
    explicit: Option<Vec<WheelOption>>,
    collection: Option<Vec<WheelOption>>,
) -> OptionSet {
    match explicit {
        Some(options) if !options.is_empty() => OptionSet::new(options),
        _ => OptionSet::new(collection.unwrap_or_default()),
    }
}

pub fn options_from_collection_str(
    body: &str,
    label_fields: &[&str],
) -> Result<Vec<WheelOption>, OptionSourceError> {
    let payload: Value = serde_json::from_str(body)?;
    options_from_collection(&payload, label_fields)
}

/// Extracts sectors from a content-API collection. Accepts `{ "data": [...] }`
/// or a bare array; entries may nest their fields under `attributes`.
pub fn options_from_collection(
    payload: &Value,
    label_fields: &[&str],
) -> Result<Vec<WheelOption>, OptionSourceError> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(OptionSourceError::NotAList),
        },
        _ => return Err(OptionSourceError::NotAList),
    };

    let mut options = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let entry = flatten_entry(item);
        let identifier = entry
            .get("id")
            .or_else(|| entry.get("documentId"))
            .and_then(option_id);
        let label = label_fields
            .iter()
            .find_map(|field| entry.get(*field).and_then(label_text));

        match (label, identifier) {
            (Some(label), Some(identifier)) => options.push(WheelOption { label, identifier }),
            _ => log::warn!("Skipping collection item {} without label or id", position),
        }
    }
    Ok(options)
}

/// Lifts `attributes` into the entry itself and unwraps nested
/// `{ "data": ... }` relations the same way.
pub fn flatten_entry(item: &Value) -> Map<String, Value> {
    let Value::Object(map) = item else {
        return Map::new();
    };

    let mut flat = Map::new();
    for (key, value) in map {
        if key == "attributes" {
            if let Value::Object(attributes) = value {
                for (attr_key, attr_value) in attributes {
                    flat.insert(attr_key.clone(), flatten_relation(attr_value));
                }
            }
        } else {
            flat.insert(key.clone(), flatten_relation(value));
        }
    }
    flat
}

fn flatten_relation(value: &Value) -> Value {
    match value {
        Value::Object(map) if map.len() == 1 && map.contains_key("data") => match &map["data"] {
            Value::Array(items) => Value::Array(
                items.iter().map(|item| Value::Object(flatten_entry(item))).collect(),
            ),
            Value::Object(_) => Value::Object(flatten_entry(&map["data"])),
            other => other.clone(),
        },
        other => other.clone(),
    }
}

fn option_id(value: &Value) -> Option<OptionId> {
    match value {
        Value::Number(n) => n.as_i64().map(OptionId::Number),
        Value::String(s) if !s.is_empty() => Some(OptionId::Text(s.clone())),
        _ => None,
    }
}

fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
