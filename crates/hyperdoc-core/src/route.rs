//! Module: route
//! Responsibility: route templates and the type → binding registry.
//! Does not own: reference resolution or query-string encoding.
//! Boundary: populated once during startup wiring, read-only afterwards.

use crate::{
    error::Error,
    key::KeyPayload,
    traits::{DocumentKind, KeyProducer, KeySource},
    value::Value,
};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

///
/// RouteError
///
/// Registration-time faults. These never occur mid-render; a registry
/// that passed startup wiring raises only [`Error`] variants afterwards.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum RouteError {
    #[error("route template '{template}' has an unclosed placeholder")]
    UnclosedPlaceholder { template: String },

    #[error("route template '{template}' has a stray '}}'")]
    UnmatchedClose { template: String },

    #[error("route template '{template}' has an empty placeholder")]
    EmptyPlaceholder { template: String },

    #[error("route template '{template}' repeats placeholder '{name}'")]
    DuplicatePlaceholder { template: String, name: String },

    #[error("document type '{path}' is already bound to a route")]
    DuplicateBinding { path: &'static str },
}

///
/// Segment
///

#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

///
/// RouteTemplate
///
/// Parsed route template with named `{placeholder}` tokens. Placeholder
/// names must exactly match the field names the bound key producer
/// emits; the check runs on every expansion.
///

#[derive(Clone, Debug)]
pub struct RouteTemplate {
    raw: String,
    segments: Vec<Segment>,
    placeholders: BTreeSet<String>,
}

impl RouteTemplate {
    pub fn parse(template: impl Into<String>) -> Result<Self, RouteError> {
        let raw = template.into();
        let mut segments = Vec::new();
        let mut placeholders = BTreeSet::new();
        let mut literal = String::new();
        let mut chars = raw.chars();

        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(inner) => name.push(inner),
                            None => {
                                return Err(RouteError::UnclosedPlaceholder { template: raw });
                            }
                        }
                    }
                    if name.is_empty() {
                        return Err(RouteError::EmptyPlaceholder { template: raw });
                    }
                    if !placeholders.insert(name.clone()) {
                        return Err(RouteError::DuplicatePlaceholder {
                            template: raw,
                            name,
                        });
                    }
                    segments.push(Segment::Placeholder(name));
                }
                '}' => return Err(RouteError::UnmatchedClose { template: raw }),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            raw,
            segments,
            placeholders,
        })
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn placeholders(&self) -> &BTreeSet<String> {
        &self.placeholders
    }

    /// Expand the template with a key-producer payload.
    ///
    /// The payload's field set must exactly equal the placeholder set,
    /// and every value must have a textual route form; any mismatch is
    /// an [`Error::InvalidKeyProducerOutput`] attributed to `path`.
    pub fn expand(&self, payload: &KeyPayload, path: &'static str) -> Result<String, Error> {
        let produced = payload.names();
        let expected: BTreeSet<&str> = self.placeholders.iter().map(String::as_str).collect();
        if produced != expected {
            return Err(self.mismatch(path, &produced));
        }

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    // exact-set check above guarantees presence
                    let value = payload.get(name).unwrap_or(&Value::Null);
                    match value.route_text() {
                        Some(text) => out.push_str(&text),
                        None => return Err(self.mismatch(path, &produced)),
                    }
                }
            }
        }

        Ok(out)
    }

    fn mismatch(&self, path: &'static str, produced: &BTreeSet<&str>) -> Error {
        let join = |names: Vec<&str>| names.join(", ");

        Error::InvalidKeyProducerOutput {
            path,
            expected: join(self.placeholders.iter().map(String::as_str).collect()),
            found: join(produced.iter().copied().collect()),
        }
    }
}

///
/// RouteBinding
/// One document type's route template plus its key producer.
///

pub struct RouteBinding {
    template: RouteTemplate,
    producer: Box<dyn KeyProducer>,
}

impl RouteBinding {
    #[must_use]
    pub const fn template(&self) -> &RouteTemplate {
        &self.template
    }

    #[must_use]
    pub fn producer(&self) -> &dyn KeyProducer {
        self.producer.as_ref()
    }
}

///
/// RouteRegistry
///
/// Explicit registration table: document type path → route binding.
/// At most one binding per type. Populated during startup wiring and
/// read-only afterwards, so concurrent renders may share one instance
/// without locking.
///

#[derive(Default)]
pub struct RouteRegistry {
    bindings: BTreeMap<&'static str, RouteBinding>,
}

impl RouteRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Bind a document kind to a route template and key producer.
    pub fn register<K: DocumentKind>(
        &mut self,
        template: &str,
        producer: impl KeyProducer + 'static,
    ) -> Result<(), RouteError> {
        let template = RouteTemplate::parse(template)?;
        if self.bindings.contains_key(K::PATH) {
            return Err(RouteError::DuplicateBinding { path: K::PATH });
        }

        tracing::debug!(path = K::PATH, template = template.raw(), "route bound");
        self.bindings.insert(
            K::PATH,
            RouteBinding {
                template,
                producer: Box::new(producer),
            },
        );

        Ok(())
    }

    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&RouteBinding> {
        self.bindings.get(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Startup self-check: run each probe key through its binding's key
    /// producer and validate the payload against the bound template, so
    /// producer/template mismatches surface at wiring time instead of at
    /// first render.
    pub fn self_check<'a>(
        &self,
        probes: impl IntoIterator<Item = (&'static str, &'a Value)>,
    ) -> Result<(), Error> {
        for (path, key) in probes {
            let binding = self
                .lookup(path)
                .ok_or(Error::UnregisteredRoute { path })?;
            let payload = binding.producer().from_key(KeySource::Key(key));
            binding.template().expand(&payload, path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{key::PropertyKeyProducer, traits::Path};

    struct Customer;
    impl Path for Customer {
        const PATH: &'static str = "customer";
    }
    impl DocumentKind for Customer {}

    #[test]
    fn parse_extracts_placeholders() {
        let template = RouteTemplate::parse("Customers/{key}/orders/{order}").unwrap();
        let names: Vec<&str> = template.placeholders().iter().map(String::as_str).collect();
        assert_eq!(names, ["key", "order"]);
    }

    #[test]
    fn parse_rejects_malformed_templates() {
        assert!(matches!(
            RouteTemplate::parse("Customers/{key"),
            Err(RouteError::UnclosedPlaceholder { .. })
        ));
        assert!(matches!(
            RouteTemplate::parse("Customers/{}"),
            Err(RouteError::EmptyPlaceholder { .. })
        ));
        assert!(matches!(
            RouteTemplate::parse("a/{k}/{k}"),
            Err(RouteError::DuplicatePlaceholder { .. })
        ));
        assert!(matches!(
            RouteTemplate::parse("a}b"),
            Err(RouteError::UnmatchedClose { .. })
        ));
    }

    #[test]
    fn expand_substitutes_in_template_order() {
        let template = RouteTemplate::parse("Customers/{key}").unwrap();
        let payload = KeyPayload::empty().with("key", 42i64);
        assert_eq!(template.expand(&payload, "customer").unwrap(), "Customers/42");
    }

    #[test]
    fn expand_requires_exact_field_set() {
        let template = RouteTemplate::parse("Customers/{key}").unwrap();

        let missing = KeyPayload::empty();
        assert!(matches!(
            template.expand(&missing, "customer"),
            Err(Error::InvalidKeyProducerOutput { .. })
        ));

        let extra = KeyPayload::empty().with("key", 1i64).with("other", 2i64);
        assert!(matches!(
            template.expand(&extra, "customer"),
            Err(Error::InvalidKeyProducerOutput { .. })
        ));
    }

    #[test]
    fn expand_rejects_null_placeholder_values() {
        let template = RouteTemplate::parse("Customers/{key}").unwrap();
        let payload = KeyPayload::empty().with("key", Value::Null);
        assert!(matches!(
            template.expand(&payload, "customer"),
            Err(Error::InvalidKeyProducerOutput { .. })
        ));
    }

    #[test]
    fn duplicate_binding_is_rejected() {
        let mut registry = RouteRegistry::new();
        registry
            .register::<Customer>("Customers/{key}", PropertyKeyProducer::new("key", "id"))
            .unwrap();
        let err = registry
            .register::<Customer>("Other/{key}", PropertyKeyProducer::new("key", "id"))
            .unwrap_err();
        assert_eq!(err, RouteError::DuplicateBinding { path: "customer" });
    }

    #[test]
    fn self_check_catches_producer_template_mismatch() {
        let mut registry = RouteRegistry::new();
        registry
            .register::<Customer>("Customers/{id}", PropertyKeyProducer::new("key", "id"))
            .unwrap();

        let probe = Value::Int(1);
        let err = registry.self_check([("customer", &probe)]).unwrap_err();
        assert!(matches!(err, Error::InvalidKeyProducerOutput { .. }));
    }

    #[test]
    fn self_check_passes_for_consistent_bindings() {
        let mut registry = RouteRegistry::new();
        registry
            .register::<Customer>("Customers/{key}", PropertyKeyProducer::new("key", "id"))
            .unwrap();

        let probe = Value::Int(1);
        registry.self_check([("customer", &probe)]).unwrap();
    }
}
