//! Fluent assertions over contexts

use crate::plate::context::{Context, Value};

/// Start asserting on a context
pub fn assert_context(context: &Context) -> ContextAssertion<'_> {
    ContextAssertion {
        context,
        path: "context".to_string(),
    }
}

pub struct ContextAssertion<'a> {
    pub(crate) context: &'a Context,
    pub(crate) path: String,
}

fn summarize(context: &Context) -> String {
    context
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value.kind_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl<'a> ContextAssertion<'a> {
    fn value(&self, key: &str) -> &'a Value {
        match self.context.get(key) {
            Some(value) => value,
            None => panic!(
                "{}: expected key '{}', found [{}]",
                self.path,
                key,
                summarize(self.context)
            ),
        }
    }

    /// Assert the number of keys
    pub fn key_count(self, expected: usize) -> Self {
        assert_eq!(
            self.context.len(),
            expected,
            "{}: expected {} keys, found [{}]",
            self.path,
            expected,
            summarize(self.context)
        );
        self
    }

    pub fn has_key(self, key: &str) -> Self {
        self.value(key);
        self
    }

    pub fn lacks_key(self, key: &str) -> Self {
        assert!(
            !self.context.contains_key(key),
            "{}: expected no key '{}'",
            self.path,
            key
        );
        self
    }

    /// Assert a text binding
    pub fn text(self, key: &str, expected: &str) -> Self {
        match self.value(key) {
            Value::Text(actual) => assert_eq!(
                actual, expected,
                "{}.{}: expected text {:?}, found {:?}",
                self.path, key, expected, actual
            ),
            other => panic!(
                "{}.{}: expected text, found {}",
                self.path,
                key,
                other.kind_name()
            ),
        }
        self
    }

    /// Assert a boolean binding
    pub fn flag(self, key: &str, expected: bool) -> Self {
        match self.value(key) {
            Value::Bool(actual) => assert_eq!(
                *actual, expected,
                "{}.{}: expected {}, found {}",
                self.path, key, expected, actual
            ),
            other => panic!(
                "{}.{}: expected bool, found {}",
                self.path,
                key,
                other.kind_name()
            ),
        }
        self
    }

    fn list(&self, key: &str) -> &'a [Context] {
        match self.value(key) {
            Value::List(items) => items,
            other => panic!(
                "{}.{}: expected list, found {}",
                self.path,
                key,
                other.kind_name()
            ),
        }
    }

    /// Assert the length of a list binding
    pub fn list_len(self, key: &str, expected: usize) -> Self {
        let actual = self.list(key).len();
        assert_eq!(
            actual, expected,
            "{}.{}: expected {} items, found {}",
            self.path, key, expected, actual
        );
        self
    }

    /// Assert on one record of a list binding
    pub fn item<F>(self, key: &str, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ContextAssertion<'a>),
    {
        let items = self.list(key);
        assert!(
            index < items.len(),
            "{}.{}: item index {} out of bounds ({} items)",
            self.path,
            key,
            index,
            items.len()
        );
        assertion(ContextAssertion {
            context: &items[index],
            path: format!("{}.{}[{}]", self.path, key, index),
        });
        self
    }

    /// Assert on a nested record binding
    pub fn record<F>(self, key: &str, assertion: F) -> Self
    where
        F: FnOnce(ContextAssertion<'a>),
    {
        match self.value(key) {
            Value::Record(record) => assertion(ContextAssertion {
                context: record,
                path: format!("{}.{}", self.path, key),
            }),
            other => panic!(
                "{}.{}: expected record, found {}",
                self.path,
                key,
                other.kind_name()
            ),
        }
        self
    }
}
