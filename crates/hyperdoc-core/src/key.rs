use crate::{
    document::Document,
    traits::{KeyProducer, KeySource},
    value::Value,
};
use std::collections::BTreeSet;

///
/// KeyPayload
///
/// Explicit ordered mapping from route placeholder name to scalar value,
/// the unit of exchange between a key producer and a route template.
/// Insertion replaces an existing entry with the same name.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyPayload {
    fields: Vec<(&'static str, Value)>,
}

impl KeyPayload {
    #[must_use]
    pub const fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &'static str, value: impl Into<Value>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Unordered field-name set, compared against template placeholders.
    #[must_use]
    pub fn names(&self) -> BTreeSet<&str> {
        self.fields.iter().map(|(n, _)| *n).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(n, v)| (*n, v))
    }
}

///
/// PropertyKeyProducer
///
/// Builtin producer for the common single-placeholder case: the payload
/// field is read from one named instance property, or taken verbatim
/// from the caller-supplied key.
///

pub struct PropertyKeyProducer {
    placeholder: &'static str,
    property: &'static str,
}

impl PropertyKeyProducer {
    #[must_use]
    pub const fn new(placeholder: &'static str, property: &'static str) -> Self {
        Self {
            placeholder,
            property,
        }
    }
}

impl KeyProducer for PropertyKeyProducer {
    fn from_instance(&self, instance: &Document) -> KeyPayload {
        match instance.property(self.property) {
            Some(value) => KeyPayload::empty().with(self.placeholder, value.clone()),
            None => KeyPayload::empty(),
        }
    }

    fn from_key(&self, key: KeySource<'_>) -> KeyPayload {
        match key {
            KeySource::Key(value) => KeyPayload::empty().with(self.placeholder, value.clone()),
            KeySource::Query(_) => KeyPayload::empty(),
        }
    }
}

///
/// UnkeyedProducer
///
/// Builtin producer for placeholder-free routes (collections, query
/// endpoints). Always emits an empty payload.
///

pub struct UnkeyedProducer;

impl KeyProducer for UnkeyedProducer {
    fn from_instance(&self, _instance: &Document) -> KeyPayload {
        KeyPayload::empty()
    }

    fn from_key(&self, _key: KeySource<'_>) -> KeyPayload {
        KeyPayload::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_same_name() {
        let mut payload = KeyPayload::empty().with("key", 1i64);
        payload.insert("key", 2i64);

        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("key"), Some(&Value::Int(2)));
    }

    #[test]
    fn names_are_unordered_and_deduplicated() {
        let payload = KeyPayload::empty().with("b", 1i64).with("a", 2i64);
        let names: Vec<&str> = payload.names().into_iter().collect();

        assert_eq!(names, vec!["a", "b"]);
    }
}
