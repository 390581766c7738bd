//! Tagged value format for sending rich values over plain JSON.
//!
//! JSON has no date type: a timestamp written with `serde_json` arrives on the
//! other side as a string and nothing in the payload says it was ever a date.
//! This module wraps the plain JSON in an envelope that records which paths
//! held a non-JSON value so the decoder can restore them:
//!
//! ```json
//! {
//!   "json": [{"id": 1, "created_at": "2024-05-01T09:00:00Z", "completed_at": null}],
//!   "meta": {"values": {"0.created_at": ["Date"]}}
//! }
//! ```
//!
//! Paths are dot-joined object keys and array indices from the root; a literal
//! `.` or `\` inside a key is escaped with a backslash, and an empty key is
//! written as `\0`. `meta` is left out when nothing needed a tag.
//!
//! ## Tags
//!
//! - **`Date`**: an RFC 3339 string decoded to [`Rich::Date`]
//! - **`number`**: `"NaN"`, `"Infinity"` or `"-Infinity"` decoded to [`Rich::Float`]
//!
//! Types opt in through [`Tagged`]:
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use tasklist::libs::tagged;
//!
//! let deadlines = vec![Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()), None];
//! let text = tagged::stringify(&deadlines)?;
//! let back: Vec<Option<chrono::DateTime<Utc>>> = tagged::parse(&text)?;
//! assert_eq!(back, deadlines);
//! # Ok::<(), tasklist::libs::tagged::TaggedError>(())
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use thiserror::Error;

const TAG_DATE: &str = "Date";
const TAG_NUMBER: &str = "number";

/// Errors raised while encoding or decoding tagged values.
#[derive(Debug, Error)]
pub enum TaggedError {
    #[error("malformed tagged payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown value tag '{tag}' at '{path}'")]
    UnknownTag { path: String, tag: String },
    #[error("expected exactly one tag at '{0}'")]
    TagCount(String),
    #[error("tagged path '{0}' does not exist in the payload")]
    PathNotFound(String),
    #[error("invalid {tag} value at '{path}': {reason}")]
    InvalidTaggedValue { path: String, tag: String, reason: String },
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: &'static str },
    #[error("missing field '{0}'")]
    MissingField(String),
}

/// A JSON-like value tree that also carries dates and non-finite floats.
#[derive(Debug, Clone, PartialEq)]
pub enum Rich {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Rich>),
    Object(BTreeMap<String, Rich>),
}

impl Rich {
    fn kind(&self) -> &'static str {
        match self {
            Rich::Null => "null",
            Rich::Bool(_) => "bool",
            Rich::Int(_) => "integer",
            Rich::Float(_) => "float",
            Rich::String(_) => "string",
            Rich::Date(_) => "date",
            Rich::Array(_) => "array",
            Rich::Object(_) => "object",
        }
    }

    fn mismatch(&self, expected: &'static str) -> TaggedError {
        TaggedError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// Removes `name` from an object map, failing when it is absent.
    pub fn take_field(fields: &mut BTreeMap<String, Rich>, name: &str) -> Result<Rich, TaggedError> {
        fields.remove(name).ok_or_else(|| TaggedError::MissingField(name.to_string()))
    }

    /// Unwraps an object, failing on any other kind of value.
    pub fn into_object(self) -> Result<BTreeMap<String, Rich>, TaggedError> {
        match self {
            Rich::Object(fields) => Ok(fields),
            other => Err(other.mismatch("object")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    json: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Meta {
    #[serde(default)]
    values: BTreeMap<String, Vec<String>>,
}

/// Conversion between a Rust type and a [`Rich`] tree.
pub trait Tagged: Sized {
    fn to_rich(&self) -> Rich;

    fn from_rich(value: Rich) -> Result<Self, TaggedError>;
}

/// Encodes a value into the tagged envelope text.
pub fn stringify<T: Tagged>(value: &T) -> Result<String, TaggedError> {
    Ok(serde_json::to_string(&encode(&value.to_rich()))?)
}

/// Decodes tagged envelope text back into a typed value.
pub fn parse<T: Tagged>(text: &str) -> Result<T, TaggedError> {
    let envelope: Value = serde_json::from_str(text)?;
    T::from_rich(decode(envelope)?)
}

/// Builds the `{json, meta}` envelope for a value tree.
pub fn encode(value: &Rich) -> Value {
    let mut values = BTreeMap::new();
    let json = encode_node(value, &mut Vec::new(), &mut values);
    let meta = if values.is_empty() { None } else { Some(Meta { values }) };

    // Envelope only holds JSON values and string maps, which always serialize.
    serde_json::to_value(Envelope { json, meta }).unwrap_or(Value::Null)
}

/// Restores a value tree from a `{json, meta}` envelope.
pub fn decode(envelope: Value) -> Result<Rich, TaggedError> {
    let envelope: Envelope = serde_json::from_value(envelope)?;
    let mut root = plain(envelope.json);

    for (path, tags) in envelope.meta.unwrap_or_default().values {
        let [tag] = tags.as_slice() else {
            return Err(TaggedError::TagCount(path));
        };
        let segments = split_path(&path);
        let node = locate(&mut root, &segments).ok_or_else(|| TaggedError::PathNotFound(path.clone()))?;
        *node = restore(node, tag, &path)?;
    }

    Ok(root)
}

fn encode_node(value: &Rich, path: &mut Vec<String>, values: &mut BTreeMap<String, Vec<String>>) -> Value {
    match value {
        Rich::Null => Value::Null,
        Rich::Bool(flag) => Value::Bool(*flag),
        Rich::Int(number) => Value::from(*number),
        Rich::Float(number) => match Number::from_f64(*number) {
            Some(number) => Value::Number(number),
            None => {
                values.insert(join_path(path), vec![TAG_NUMBER.to_string()]);
                let text = if number.is_nan() {
                    "NaN"
                } else if number.is_sign_positive() {
                    "Infinity"
                } else {
                    "-Infinity"
                };
                Value::String(text.to_string())
            }
        },
        Rich::String(text) => Value::String(text.clone()),
        Rich::Date(date) => {
            values.insert(join_path(path), vec![TAG_DATE.to_string()]);
            Value::String(date.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
        Rich::Array(items) => {
            let mut encoded = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                encoded.push(encode_node(item, path, values));
                path.pop();
            }
            Value::Array(encoded)
        }
        Rich::Object(fields) => {
            let mut encoded = Map::new();
            for (key, item) in fields {
                path.push(escape_segment(key));
                encoded.insert(key.clone(), encode_node(item, path, values));
                path.pop();
            }
            Value::Object(encoded)
        }
    }
}

fn plain(value: Value) -> Rich {
    match value {
        Value::Null => Rich::Null,
        Value::Bool(flag) => Rich::Bool(flag),
        Value::Number(number) => match number.as_i64() {
            Some(int) => Rich::Int(int),
            None => Rich::Float(number.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(text) => Rich::String(text),
        Value::Array(items) => Rich::Array(items.into_iter().map(plain).collect()),
        Value::Object(fields) => Rich::Object(fields.into_iter().map(|(key, item)| (key, plain(item))).collect()),
    }
}

fn restore(node: &Rich, tag: &str, path: &str) -> Result<Rich, TaggedError> {
    let invalid = |reason: String| TaggedError::InvalidTaggedValue {
        path: path.to_string(),
        tag: tag.to_string(),
        reason,
    };

    let Rich::String(text) = node else {
        return Err(invalid(format!("expected a string, found {}", node.kind())));
    };

    match tag {
        TAG_DATE => DateTime::parse_from_rfc3339(text)
            .map(|date| Rich::Date(date.with_timezone(&Utc)))
            .map_err(|e| invalid(e.to_string())),
        TAG_NUMBER => match text.as_str() {
            "NaN" => Ok(Rich::Float(f64::NAN)),
            "Infinity" => Ok(Rich::Float(f64::INFINITY)),
            "-Infinity" => Ok(Rich::Float(f64::NEG_INFINITY)),
            other => Err(invalid(format!("'{}' is not a special number", other))),
        },
        other => Err(TaggedError::UnknownTag {
            path: path.to_string(),
            tag: other.to_string(),
        }),
    }
}

fn locate<'a>(root: &'a mut Rich, segments: &[String]) -> Option<&'a mut Rich> {
    let mut node = root;
    for segment in segments {
        node = match node {
            Rich::Array(items) => items.get_mut(segment.parse::<usize>().ok()?)?,
            Rich::Object(fields) => fields.get_mut(segment)?,
            _ => return None,
        };
    }
    Some(node)
}

// An empty key is written as `\0` so it never collides with the root path.
fn escape_segment(key: &str) -> String {
    if key.is_empty() {
        return "\\0".to_string();
    }
    key.replace('\\', "\\\\").replace('.', "\\.")
}

fn join_path(path: &[String]) -> String {
    path.join(".")
}

fn split_path(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('0') | None => {}
                Some(escaped) => current.push(escaped),
            },
            '.' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);
    segments
}

impl Tagged for bool {
    fn to_rich(&self) -> Rich {
        Rich::Bool(*self)
    }

    fn from_rich(value: Rich) -> Result<Self, TaggedError> {
        match value {
            Rich::Bool(flag) => Ok(flag),
            other => Err(other.mismatch("bool")),
        }
    }
}

impl Tagged for i64 {
    fn to_rich(&self) -> Rich {
        Rich::Int(*self)
    }

    fn from_rich(value: Rich) -> Result<Self, TaggedError> {
        match value {
            Rich::Int(number) => Ok(number),
            other => Err(other.mismatch("integer")),
        }
    }
}

impl Tagged for String {
    fn to_rich(&self) -> Rich {
        Rich::String(self.clone())
    }

    fn from_rich(value: Rich) -> Result<Self, TaggedError> {
        match value {
            Rich::String(text) => Ok(text),
            other => Err(other.mismatch("string")),
        }
    }
}

impl Tagged for DateTime<Utc> {
    fn to_rich(&self) -> Rich {
        Rich::Date(*self)
    }

    fn from_rich(value: Rich) -> Result<Self, TaggedError> {
        match value {
            Rich::Date(date) => Ok(date),
            other => Err(other.mismatch("date")),
        }
    }
}

impl<T: Tagged> Tagged for Option<T> {
    fn to_rich(&self) -> Rich {
        match self {
            Some(value) => value.to_rich(),
            None => Rich::Null,
        }
    }

    fn from_rich(value: Rich) -> Result<Self, TaggedError> {
        match value {
            Rich::Null => Ok(None),
            other => T::from_rich(other).map(Some),
        }
    }
}

impl<T: Tagged> Tagged for Vec<T> {
    fn to_rich(&self) -> Rich {
        Rich::Array(self.iter().map(Tagged::to_rich).collect())
    }

    fn from_rich(value: Rich) -> Result<Self, TaggedError> {
        match value {
            Rich::Array(items) => items.into_iter().map(T::from_rich).collect(),
            other => Err(other.mismatch("array")),
        }
    }
}
