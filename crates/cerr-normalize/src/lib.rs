// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

use serde_json::Value;

pub use cerr_core::CanonicalError;

// ── Input model ─────────────────────────────────────────────────────────

/// An unknown failure value, before normalization.
///
/// Rust has no open dynamic values, so the possible shapes are tagged
/// explicitly: a payload of arbitrary deserialized data, a value that is
/// already a canonical error, or nothing at all.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorLike {
    /// The failure carried no value.
    Absent,
    /// Deserialized data of arbitrary shape: primitives, arrays, objects,
    /// nested structures.
    Payload(Value),
    /// An error that is already canonical, whatever its `name` tag.
    /// Normalization passes it through untouched.
    Canonical(CanonicalError),
}

impl From<Value> for ErrorLike {
    fn from(value: Value) -> Self {
        Self::Payload(value)
    }
}

impl From<Option<Value>> for ErrorLike {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(v) => Self::Payload(v),
            None => Self::Absent,
        }
    }
}

impl From<CanonicalError> for ErrorLike {
    fn from(err: CanonicalError) -> Self {
        Self::Canonical(err)
    }
}

impl From<&str> for ErrorLike {
    fn from(s: &str) -> Self {
        Self::Payload(Value::String(s.to_owned()))
    }
}

impl From<String> for ErrorLike {
    fn from(s: String) -> Self {
        Self::Payload(Value::String(s))
    }
}

// ── Entry points ────────────────────────────────────────────────────────

/// Normalize `value` with the default `"Unknown Error"` fallback.
///
/// ```
/// use cerr_normalize::normalize;
/// use serde_json::json;
///
/// assert_eq!(normalize(json!(null)).message, "Unknown Error");
/// assert_eq!(normalize("out of disk").message, "out of disk");
/// assert_eq!(
///     normalize(json!({"status": 404, "statusText": "Not Found"})).message,
///     "404 Not Found",
/// );
/// ```
pub fn normalize(value: impl Into<ErrorLike>) -> CanonicalError {
    normalize_with(value, CanonicalError::unknown())
}

/// Normalize `value`, resolving to `fallback` when no recognizer claims it.
///
/// Total over all inputs: always returns exactly one canonical error, never
/// panics, never mutates the input.  When the fallback is selected it is
/// returned by value, so the caller gets back the very instance it passed
/// in.  A [`ErrorLike::Canonical`] input is likewise returned by move.
pub fn normalize_with(value: impl Into<ErrorLike>, fallback: CanonicalError) -> CanonicalError {
    match value.into() {
        ErrorLike::Absent => fallback,
        ErrorLike::Canonical(err) => err,
        ErrorLike::Payload(payload) => classify(&payload, fallback),
    }
}

// ── Recognizer chain ────────────────────────────────────────────────────

/// Outcome of one recognizer.
enum Verdict {
    /// Recognizer claimed the value and produced a concrete error.
    Match(CanonicalError),
    /// Recognizer claimed the value but resolved it to the fallback.
    UseFallback,
    /// Recognizer does not apply; try the next one.
    Decline,
}

/// Runs the payload recognizers in priority order, short-circuiting on the
/// first that claims the value.
fn classify(value: &Value, fallback: CanonicalError) -> CanonicalError {
    const CHAIN: [fn(&Value) -> Verdict; 4] = [
        from_primitive,
        from_response,
        from_message_object,
        from_rpc_wrapper,
    ];
    for recognize in CHAIN {
        match recognize(value) {
            Verdict::Match(err) => return err,
            Verdict::UseFallback => return fallback,
            Verdict::Decline => {}
        }
    }
    fallback
}

/// Primitives: strings become the message verbatim; null, numbers,
/// booleans, and arrays have no extractable message and take the fallback.
/// Objects are left for the structural recognizers.
fn from_primitive(value: &Value) -> Verdict {
    match value {
        Value::String(s) => Verdict::Match(CanonicalError::new(s)),
        Value::Object(_) => Verdict::Decline,
        _ => Verdict::UseFallback,
    }
}

/// HTTP-response-like objects: `"<status> <statusText>"`.
fn from_response(value: &Value) -> Verdict {
    match as_response_like(value) {
        Some(parts) => Verdict::Match(CanonicalError::new(format!(
            "{} {}",
            parts.status, parts.status_text
        ))),
        None => Verdict::Decline,
    }
}

/// Objects carrying a `message` entry: the entry becomes the message and
/// every sibling entry is shallow-copied onto the result.
fn from_message_object(value: &Value) -> Verdict {
    if !has_message_field(value) {
        return Verdict::Decline;
    }
    let (Some(obj), Some(raw)) = (value.as_object(), value.get("message")) else {
        return Verdict::Decline;
    };
    let mut err = CanonicalError::new(coerce_message(raw));
    err.merge_fields(obj);
    Verdict::Match(err)
}

/// RPC wrappers: `{"error": <payload>}`.  The nested payload is re-run
/// through the primitive and message-object recognizers; an unrecognizable
/// nested shape declines, leaving the terminal fallback to the outer chain.
fn from_rpc_wrapper(value: &Value) -> Verdict {
    let Some(obj) = value.as_object() else {
        return Verdict::Decline;
    };
    let Some(inner) = obj.get("error") else {
        return Verdict::Decline;
    };
    match from_primitive(inner) {
        Verdict::Decline => from_message_object(inner),
        verdict => verdict,
    }
}

fn coerce_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Shape extractors ────────────────────────────────────────────────────

/// The response surface recognized by [`as_response_like`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseParts<'a> {
    /// HTTP status code.
    pub status: u64,
    /// Status reason phrase.
    pub status_text: &'a str,
}

/// Extract an HTTP-response-like surface: an object with a numeric `status`
/// and a string `statusText`.
#[must_use]
pub fn as_response_like(value: &Value) -> Option<ResponseParts<'_>> {
    let obj = value.as_object()?;
    let status = obj.get("status")?.as_u64()?;
    let status_text = obj.get("statusText")?.as_str()?;
    Some(ResponseParts { status, status_text })
}

/// Whether `value` is an object carrying a `message` entry.
#[must_use]
pub fn has_message_field(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| obj.contains_key("message"))
}

// ── Tests ───────────────────────────────────────────────────────────────
