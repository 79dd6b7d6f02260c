// ABOUTME: Recursive schema descriptor for structured generation output
// ABOUTME: Serializes to the Gemini responseSchema format and validates payloads explicitly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fit Elite

//! # Schema Descriptors
//!
//! A [`Schema`] plays two roles: it is sent to the generation service as the
//! `responseSchema` constraint, and it is the validator ingestion runs over
//! the payload that comes back. The service is trusted to attempt
//! conformance, never to achieve it, so the same descriptor checks the
//! response before any domain record is built.

use serde_json::{json, Map, Value};

use crate::errors::IngestionError;

/// Recursive descriptor of an expected output shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// A JSON string
    String,
    /// A JSON number
    Number,
    /// An ordered list whose items all match the inner node
    Array(Box<Schema>),
    /// An object with named properties and a set of required names
    Object {
        /// Property name to expected shape, in declaration order
        properties: Vec<(String, Schema)>,
        /// Names that must be present for the payload to be accepted
        required: Vec<String>,
    },
}

impl Schema {
    /// Build an array node
    #[must_use]
    pub fn array(items: Self) -> Self {
        Self::Array(Box::new(items))
    }

    /// Build an object node from `(name, shape)` pairs and required names
    #[must_use]
    pub fn object(properties: Vec<(&str, Self)>, required: &[&str]) -> Self {
        Self::Object {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_owned(), schema))
                .collect(),
            required: required.iter().map(|name| (*name).to_owned()).collect(),
        }
    }

    /// Serialize to the generation service's schema wire format
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::String => json!({ "type": "STRING" }),
            Self::Number => json!({ "type": "NUMBER" }),
            Self::Array(items) => json!({ "type": "ARRAY", "items": items.to_value() }),
            Self::Object {
                properties,
                required,
            } => {
                let mut props = Map::new();
                for (name, schema) in properties {
                    props.insert(name.clone(), schema.to_value());
                }
                json!({ "type": "OBJECT", "properties": props, "required": required })
            }
        }
    }

    /// Validate a payload against this descriptor
    ///
    /// `path` is the location of `value` within the overall payload; pass
    /// `""` for the root. Error paths use dotted/indexed notation, e.g.
    /// `exercises[1].muscleGroup`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestionError::MissingField`] for an absent required
    /// property and [`IngestionError::TypeMismatch`] for a shape violation.
    pub fn validate(&self, value: &Value, path: &str) -> Result<(), IngestionError> {
        match self {
            Self::String => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(mismatch(path, "string"))
                }
            }
            Self::Number => {
                if value.is_number() {
                    Ok(())
                } else {
                    Err(mismatch(path, "number"))
                }
            }
            Self::Array(items) => {
                let entries = value.as_array().ok_or_else(|| mismatch(path, "list"))?;
                for (index, entry) in entries.iter().enumerate() {
                    items.validate(entry, &format!("{path}[{index}]"))?;
                }
                Ok(())
            }
            Self::Object {
                properties,
                required,
            } => {
                let map = value.as_object().ok_or_else(|| mismatch(path, "object"))?;
                for name in required {
                    if !map.contains_key(name) {
                        return Err(IngestionError::MissingField(join(path, name)));
                    }
                }
                for (name, schema) in properties {
                    if let Some(entry) = map.get(name) {
                        schema.validate(entry, &join(path, name))?;
                    }
                }
                Ok(())
            }
        }
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_owned()
    } else {
        format!("{path}.{name}")
    }
}

fn mismatch(path: &str, expected: &'static str) -> IngestionError {
    let field = if path.is_empty() {
        "$".to_owned()
    } else {
        path.to_owned()
    };
    IngestionError::TypeMismatch { field, expected }
}
