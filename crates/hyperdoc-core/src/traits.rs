use crate::{document::Document, key::KeyPayload, query::Query, value::Value};

// ============================================================================
// DOCUMENT KINDS
// ============================================================================
//
// These traits define *what a document type is*, not what data an
// instance contains. Kinds are marker types; instances are `Document`s
// carrying the kind's `PATH`.
//

///
/// Path
/// Fully-qualified document-type path.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// DocumentKind
///
/// Marker for renderable document types. `CLASSES` is the default
/// classification tag list stamped onto new instances; individual
/// instances may append further tags.
///

pub trait DocumentKind: Path + 'static {
    const CLASSES: &'static [&'static str] = &[];
}

// ============================================================================
// KEY PRODUCTION
// ============================================================================

///
/// KeySource
///
/// The identity input handed to a key producer: either an opaque
/// caller-supplied key or the query object of a query-keyed reference.
///

pub enum KeySource<'a> {
    Key(&'a Value),
    Query(&'a dyn Query),
}

///
/// KeyProducer
///
/// Per-document-type strategy translating domain identity into route
/// placeholder values. Stateless and pure; one boxed instance per route
/// binding, constructed at startup and reused across renders.
///
/// A producer never fails: the payload it emits is validated against the
/// bound template's placeholder set at resolution time, so a producer
/// that cannot derive a field simply omits it and the mismatch surfaces
/// as a configuration error.
///

pub trait KeyProducer: Send + Sync {
    /// Derive placeholder values from a materialized instance.
    fn from_instance(&self, instance: &Document) -> KeyPayload;

    /// Derive placeholder values from an unmaterialized key or query.
    fn from_key(&self, key: KeySource<'_>) -> KeyPayload;
}
