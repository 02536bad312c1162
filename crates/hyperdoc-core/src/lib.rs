//! Core engine for hyperdoc: typed documents, references, route bindings,
//! relation dictionaries, and the machinery that turns a reference into a
//! concrete URI. Rendering to the wire format lives in the `hyperdoc` crate.

pub mod document;
pub mod error;
pub mod key;
pub mod query;
pub mod reference;
pub mod relation;
pub mod resolve;
pub mod route;
pub mod traits;
pub mod value;

pub use error::Error;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, resolvers, or codecs are re-exported here.
///

pub mod prelude {
    pub use crate::{
        document::{Action, Document, Method, ParamModel, SchemaProvider},
        key::KeyPayload,
        query::{PageSpec, Query, QueryObject, QueryResult, QueryValue},
        reference::Reference,
        relation::{RelationDictionary, RelationSet, rel},
        route::RouteRegistry,
        traits::{DocumentKind, KeyProducer, KeySource, Path},
        value::{Value, ValueEnum},
    };
}
