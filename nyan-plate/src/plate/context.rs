//! Context data model
//!
//!     A [Context] is a record of keys bound to [Value]s. Values are strings, booleans,
//!     nested records, or ordered lists of records. It is what templates render against and
//!     what extraction rebuilds.
//!
//!     Keys are kept in a sorted map: the data model carries no key order, and equal
//!     contexts compare equal regardless of how they were assembled.
//!
//!     Host data (JSON, or YAML read through serde) converts in with [Context::from_json].
//!     Numbers are turned into their text form and `null` entries are dropped, since the
//!     markup has no way to express either.

use super::grammar::is_valid_key;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A single bound value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Text(String),
    List(Vec<Context>),
    Record(Context),
}

impl Value {
    /// Text written into markup for scalar values
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Text(text) => Some(text.clone()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::List(_) | Value::Record(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Context]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Context> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Whether a boolean attribute named `attribute` should be emitted
    ///
    /// Truthy means the boolean `true`, or text equal to the attribute's own name
    /// (`checked: "checked"`), which is how form state is often stored.
    pub fn is_truthy_for(&self, attribute: &str) -> bool {
        match self {
            Value::Bool(flag) => *flag,
            Value::Text(text) => text == attribute,
            Value::List(_) | Value::Record(_) => false,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<Context> for Value {
    fn from(record: Context) -> Self {
        Value::Record(record)
    }
}

impl From<Vec<Context>> for Value {
    fn from(items: Vec<Context>) -> Self {
        Value::List(items)
    }
}

/// A record of bound values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Context {
    entries: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Bind `value` at `key`, returning the previous binding
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Fold `other` into this record; keys in `other` win
    pub fn merge(&mut self, other: Context) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert host data into a context
    pub fn from_json(value: serde_json::Value) -> Result<Self, ContextError> {
        Self::try_from(value)
    }

    /// Parse JSON text into a context
    pub fn from_json_str(text: &str) -> Result<Self, ContextError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|err| ContextError::Parse(err.to_string()))?;
        Self::from_json(value)
    }

    fn from_object(object: serde_json::Map<String, serde_json::Value>) -> Result<Self, ContextError> {
        let mut context = Context::new();
        for (key, value) in object {
            if !is_valid_key(&key) {
                return Err(ContextError::InvalidKey(key));
            }
            let converted = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::Bool(flag) => Value::Bool(flag),
                serde_json::Value::Number(number) => Value::Text(number.to_string()),
                serde_json::Value::String(text) => Value::Text(text),
                serde_json::Value::Object(nested) => Value::Record(Self::from_object(nested)?),
                serde_json::Value::Array(items) => {
                    let mut records = Vec::with_capacity(items.len());
                    for (index, item) in items.into_iter().enumerate() {
                        match item {
                            serde_json::Value::Object(nested) => {
                                records.push(Self::from_object(nested)?)
                            }
                            other => {
                                return Err(ContextError::ListItemNotAnObject {
                                    key,
                                    index,
                                    found: json_kind(&other),
                                })
                            }
                        }
                    }
                    Value::List(records)
                }
            };
            context.entries.insert(key, converted);
        }
        Ok(context)
    }
}

impl TryFrom<serde_json::Value> for Context {
    type Error = ContextError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(object) => Self::from_object(object),
            other => Err(ContextError::NotAnObject(json_kind(&other))),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Context::new();
        for (key, value) in iter {
            context.insert(key, value);
        }
        context
    }
}

impl IntoIterator for Context {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Error converting host data into a [Context]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// Host data could not be parsed at all
    Parse(String),
    /// The top level was not an object
    NotAnObject(&'static str),
    /// A list held something other than records
    ListItemNotAnObject {
        key: String,
        index: usize,
        found: &'static str,
    },
    /// A key that no directive could ever bind
    InvalidKey(String),
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ContextError::NotAnObject(found) => {
                write!(f, "Context must be an object, found {}", found)
            }
            ContextError::ListItemNotAnObject { key, index, found } => write!(
                f,
                "List '{}' item {} must be an object, found {}",
                key, index, found
            ),
            ContextError::InvalidKey(key) => {
                write!(f, "Invalid key '{}': keys must match \\w+", key)
            }
        }
    }
}

impl std::error::Error for ContextError {}
