use crate::{
    document::Document,
    query::Query,
    traits::DocumentKind,
    value::Value,
};
use thiserror::Error as ThisError;

///
/// MissingKeyError
///
/// A key-only or query-keyed reference was constructed with a null key.
/// Raised at construction time so it cannot leak into a partially built
/// render.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[error("reference to '{target}' constructed with a null key")]
pub struct MissingKeyError {
    pub target: &'static str,
}

///
/// Reference
///
/// Typed pointer to another document. Exactly one variant is active;
/// resolution dispatches on the variant (no inheritance, no downcasts).
///
/// - `Direct` owns an instance; its identity is derived from the
///   instance itself.
/// - `KeyOnly` names a target type plus a caller-supplied key; no
///   instance is materialized.
/// - `QueryKeyed` names a target type plus a structured query serialized
///   into the URI's query string.
/// - `External` carries a literal pre-built URI and never consults the
///   route registry.
///

#[derive(Debug)]
pub enum Reference {
    Direct(Box<Document>),
    External(String),
    KeyOnly {
        target: &'static str,
        key: Value,
    },
    QueryKeyed {
        target: &'static str,
        query: Box<dyn Query>,
    },
}

impl Reference {
    #[must_use]
    pub fn direct(instance: Document) -> Self {
        Self::Direct(Box::new(instance))
    }

    #[must_use]
    pub fn external(uri: impl Into<String>) -> Self {
        Self::External(uri.into())
    }

    pub fn key_only<K: DocumentKind>(key: impl Into<Value>) -> Result<Self, MissingKeyError> {
        let key = key.into();
        if key.is_null() {
            return Err(MissingKeyError { target: K::PATH });
        }

        Ok(Self::KeyOnly {
            target: K::PATH,
            key,
        })
    }

    #[must_use]
    pub fn query_keyed<K: DocumentKind>(query: impl Query + 'static) -> Self {
        Self::QueryKeyed {
            target: K::PATH,
            query: Box::new(query),
        }
    }

    pub(crate) fn query_keyed_boxed(target: &'static str, query: Box<dyn Query>) -> Self {
        Self::QueryKeyed { target, query }
    }

    /// Target document-type path, when the reference has one.
    /// External references carry no type; direct references report the
    /// instance's declared type.
    #[must_use]
    pub fn target(&self) -> Option<&'static str> {
        match self {
            Self::Direct(doc) => Some(doc.path()),
            Self::External(_) => None,
            Self::KeyOnly { target, .. } | Self::QueryKeyed { target, .. } => Some(*target),
        }
    }

    /// Materialized instance, present only on direct references.
    #[must_use]
    pub fn instance(&self) -> Option<&Document> {
        match self {
            Self::Direct(doc) => Some(doc),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Path;

    struct Customer;
    impl Path for Customer {
        const PATH: &'static str = "customer";
    }
    impl DocumentKind for Customer {}

    #[test]
    fn null_key_is_rejected_at_construction() {
        let err = Reference::key_only::<Customer>(Value::Null).unwrap_err();
        assert_eq!(err, MissingKeyError { target: "customer" });
    }

    #[test]
    fn key_only_reports_its_target() {
        let reference = Reference::key_only::<Customer>(42i64).unwrap();
        assert_eq!(reference.target(), Some("customer"));
        assert!(reference.instance().is_none());
    }

    #[test]
    fn external_has_no_target() {
        assert_eq!(Reference::external("https://x/y").target(), None);
    }
}
