//! Canonical error type with an open extension-field map.
//!
//! A [`CanonicalError`] carries a `name` tag, a human-readable message, and
//! arbitrary key-value fields lifted off whatever value it was normalized
//! from.  Use [`CanonicalError::new`] and the `with_*` builders to construct
//! errors fluently.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// `name` tag given to errors that carry no more specific identity.
pub const DEFAULT_NAME: &str = "Error";

/// Message carried by the default fallback error.
pub const UNKNOWN_MESSAGE: &str = "Unknown Error";

/// Extension fields attached to a [`CanonicalError`].
///
/// `BTreeMap` keeps serialized output deterministic.
pub type FieldMap = BTreeMap<String, Value>;

fn default_name() -> String {
    DEFAULT_NAME.to_owned()
}

// ---------------------------------------------------------------------------
// CanonicalError
// ---------------------------------------------------------------------------

/// The unified error representation.
///
/// Every canonical error has a human-readable message.  The `name` tag
/// preserves subtype identity across normalization (a value that was already
/// a `"DatabaseError"` stays one), and `fields` holds whatever named data
/// the source value carried next to its message.
///
/// Extension fields are flattened into the serialized form:
///
/// ```
/// use cerr_core::CanonicalError;
///
/// let err = CanonicalError::new("RPC failed").with_field("code", "INVALID_REQUEST");
/// let json = serde_json::to_string(&err).unwrap();
/// assert_eq!(json, r#"{"name":"Error","message":"RPC failed","code":"INVALID_REQUEST"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize, JsonSchema)]
#[error("{name}: {message}")]
pub struct CanonicalError {
    /// Error class tag; `"Error"` unless the source declared one.
    #[serde(default = "default_name")]
    pub name: String,
    /// Human-readable description.
    pub message: String,
    /// Named fields carried over from the source value.
    #[serde(flatten)]
    pub fields: FieldMap,
}

impl CanonicalError {
    /// Create a new error with the given message, the default name, and no
    /// extension fields.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: default_name(),
            message: message.into(),
            fields: FieldMap::new(),
        }
    }

    /// The default fallback error: `"Unknown Error"`.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_MESSAGE)
    }

    /// Set the error's `name` tag.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach a key-value pair to the extension fields.
    ///
    /// The value is converted via [`serde_json::to_value`]; if serialisation
    /// fails, the entry is silently skipped.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.fields.insert(key.into(), v);
        }
        self
    }

    /// Look up an extension field by name.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Shallow-copy a source object's entries onto this error.
    ///
    /// The `message` entry is skipped (it is already this error's message).
    /// A string `name` entry replaces the `name` tag instead of landing in
    /// the field map; a non-string one is dropped.  Everything else is
    /// inserted last-write-wins.
    pub fn merge_fields(&mut self, source: &Map<String, Value>) {
        for (key, value) in source {
            match key.as_str() {
                "message" => {}
                // A non-string name cannot become the tag, and keeping it in
                // the field map would duplicate the flattened "name" key.
                "name" => {
                    if let Some(name) = value.as_str() {
                        self.name = name.to_owned();
                    }
                }
                _ => {
                    self.fields.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

impl Default for CanonicalError {
    fn default() -> Self {
        Self::unknown()
    }
}

impl From<&str> for CanonicalError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for CanonicalError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
