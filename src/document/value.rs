use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::ser::{Error as _, SerializeMap as _, SerializeSeq as _};

use crate::document::path::FieldPath;
use crate::foundation::error::{ClipcheckError, ClipcheckResult};

/// Object representation. Keys are kept sorted so every traversal is deterministic.
pub type Map = BTreeMap<String, Value>;

/// Untyped template tree.
///
/// Numbers are stored as `f64` so that a tree built in code can hold values JSON cannot express
/// (NaN, infinities). Such a tree refuses to serialize, and the structural validator reports it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// Parse a document from JSON text.
    pub fn from_json_str(text: &str) -> ClipcheckResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| ClipcheckError::serde(format!("parse template JSON: {e}")))
    }

    /// Parse a document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ClipcheckResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ClipcheckError::serde(format!("parse template JSON: {e}")))
    }

    /// Parse a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ClipcheckResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ClipcheckError::io(format!("open template JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view. Booleans are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Member lookup; `None` for missing keys and for non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|m| m.get(key))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(m) => !m.is_empty(),
        }
    }

    /// JSON type name used in messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            // `as_f64` only fails for arbitrary-precision numbers; those surface as non-finite.
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(m) => {
                Value::Object(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if !n.is_finite() => {
                Err(S::Error::custom(format!("number {n} is not representable in JSON")))
            }
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// Callbacks for [`walk`]. Every method has an empty default so a visitor only implements what
/// it looks at.
pub trait Visitor {
    /// Called for every object key, with the path of the object holding it.
    fn visit_key(&mut self, _path: &FieldPath, _key: &str) {}

    /// Called for every string leaf. `key` is the member name when the string sits directly
    /// under an object key, `None` inside arrays or at the root.
    fn visit_str(&mut self, _path: &FieldPath, _key: Option<&str>, _value: &str) {}

    /// Called for every number leaf.
    fn visit_number(&mut self, _path: &FieldPath, _value: f64) {}
}

/// Depth-first, document-order traversal of `value` rooted at `path`.
///
/// `path` is restored to its original length before returning.
pub fn walk<V: Visitor + ?Sized>(value: &Value, path: &mut FieldPath, visitor: &mut V) {
    walk_inner(value, None, path, visitor);
}

fn walk_inner<V: Visitor + ?Sized>(
    value: &Value,
    key: Option<&str>,
    path: &mut FieldPath,
    visitor: &mut V,
) {
    match value {
        Value::Null | Value::Bool(_) => {}
        Value::Number(n) => visitor.visit_number(path, *n),
        Value::String(s) => visitor.visit_str(path, key, s),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                path.push_index(i);
                walk_inner(item, None, path, visitor);
                path.pop();
            }
        }
        Value::Object(m) => {
            for (k, v) in m {
                visitor.visit_key(path, k);
                path.push_field(k);
                walk_inner(v, Some(k), path, visitor);
                path.pop();
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/value.rs"]
mod tests;
