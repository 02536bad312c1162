use crate::{
    query::{NavigationQueryBuilder, Query},
    reference::Reference,
    relation::{RelationDictionary, RelationSet},
    traits::DocumentKind,
};

///
/// QueryResult
///
/// Paged query outcome: the matching entity references, the total match
/// count, the originating query, and a relation dictionary populated
/// post hoc with synthesized navigation references.
///

#[derive(Debug)]
pub struct QueryResult {
    target: &'static str,
    entities: Vec<Reference>,
    total: u64,
    query: Box<dyn Query>,
    navigation: RelationDictionary,
}

impl QueryResult {
    #[must_use]
    pub fn new<K: DocumentKind>(
        entities: Vec<Reference>,
        total: u64,
        query: impl Query + 'static,
    ) -> Self {
        Self {
            target: K::PATH,
            entities,
            total,
            query: Box::new(query),
            navigation: RelationDictionary::new(),
        }
    }

    #[must_use]
    pub const fn target(&self) -> &'static str {
        self.target
    }

    #[must_use]
    pub fn entities(&self) -> &[Reference] {
        &self.entities
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn query(&self) -> &dyn Query {
        self.query.as_ref()
    }

    #[must_use]
    pub const fn navigation(&self) -> &RelationDictionary {
        &self.navigation
    }

    /// Fold synthesized navigation references into the relation
    /// dictionary. Single-relation slots; repeat calls replace the same
    /// slots, so the operation is idempotent.
    pub fn populate_navigation(&mut self) {
        for (name, reference) in
            NavigationQueryBuilder::build(self.query.as_ref(), self.total, self.target)
        {
            self.navigation.add(RelationSet::single(name), reference);
        }
    }
}
