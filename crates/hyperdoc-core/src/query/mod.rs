//! Query vocabulary: the `Query` trait, its declarative encoding tree,
//! the deterministic query-string codec, and pagination-link synthesis.

mod encode;
mod navigate;
mod result;

pub use encode::{QueryEncodeError, encode};
pub use navigate::NavigationQueryBuilder;
pub use result::QueryResult;

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

///
/// PageSpec
/// Offset/limit pagination window carried by a query.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageSpec {
    pub offset: u32,
    pub limit: u32,
}

impl PageSpec {
    #[must_use]
    pub const fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }
}

///
/// Query
///
/// A structured query object that keys a query-keyed reference.
///
/// Implementations are declarative carriers: `to_object` projects the
/// query into the codec's encoding tree, and `with_page` clones the
/// query with only its pagination window changed (never aliasing the
/// original, so synthesized navigation links cannot disturb the
/// caller's query).
///

pub trait Query: Debug + Send + Sync {
    /// Current pagination window, if the query pages at all.
    fn page(&self) -> Option<PageSpec>;

    /// Clone with the pagination window replaced (`None` strips paging).
    fn with_page(&self, page: Option<PageSpec>) -> Box<dyn Query>;

    /// Declarative encoding tree consumed by the query-string codec.
    fn to_object(&self) -> QueryObject;
}

///
/// QueryValue
///
/// One node of a query's encoding tree. Collections encode as repeated
/// `key=value` pairs; nested objects flatten with dotted names; null
/// scalars are omitted entirely.
///

#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
    List(Vec<QueryValue>),
    Object(QueryObject),
    Scalar(Value),
}

///
/// QueryObject
///
/// Ordered field list for one (possibly nested) query object. Field
/// order is declaration order and is preserved by the codec, which keeps
/// generated links stable and testable.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryObject {
    fields: Vec<(String, QueryValue)>,
}

impl QueryObject {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a scalar field.
    #[must_use]
    pub fn scalar(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields
            .push((name.into(), QueryValue::Scalar(value.into())));
        self
    }

    /// Append a collection field.
    #[must_use]
    pub fn list<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items = values
            .into_iter()
            .map(|v| QueryValue::Scalar(v.into()))
            .collect();
        self.fields.push((name.into(), QueryValue::List(items)));
        self
    }

    /// Append a nested object field.
    #[must_use]
    pub fn object(mut self, name: impl Into<String>, value: Self) -> Self {
        self.fields.push((name.into(), QueryValue::Object(value)));
        self
    }

    /// Append a pagination window as `offset`/`limit` fields.
    #[must_use]
    pub fn page(self, page: Option<PageSpec>) -> Self {
        match page {
            Some(p) => self.scalar("offset", p.offset).scalar("limit", p.limit),
            None => self,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
