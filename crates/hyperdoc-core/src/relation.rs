use crate::reference::Reference;
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// rel
///
/// Standard relation vocabulary shared by callers and the navigation
/// builder, so generated and hand-written links agree on spelling.
///

pub mod rel {
    pub const ALL: &str = "all";
    pub const COLLECTION: &str = "collection";
    pub const FIRST: &str = "first";
    pub const ITEM: &str = "item";
    pub const LAST: &str = "last";
    pub const NEXT: &str = "next";
    pub const PREVIOUS: &str = "previous";
    pub const SELF: &str = "self";
}

///
/// EmptyRelationSetError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[error("a relation set must contain at least one relation name")]
pub struct EmptyRelationSetError;

///
/// RelationSet
///
/// Ordered relation-name list plus its canonical (unordered,
/// deduplicated) form. Output preserves the caller's order; lookup and
/// collision use the canonical form only.
///

#[derive(Clone, Debug)]
pub struct RelationSet {
    names: Vec<String>,
    canonical: BTreeSet<String>,
}

impl RelationSet {
    pub fn new<I, S>(names: I) -> Result<Self, EmptyRelationSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        let mut canonical = BTreeSet::new();
        for name in names {
            let name = name.into();
            if canonical.insert(name.clone()) {
                ordered.push(name);
            }
        }

        if ordered.is_empty() {
            return Err(EmptyRelationSetError);
        }

        Ok(Self {
            names: ordered,
            canonical,
        })
    }

    /// Single-relation set; infallible since the name is given.
    #[must_use]
    pub fn single(name: impl Into<String>) -> Self {
        let name = name.into();

        Self {
            canonical: BTreeSet::from([name.clone()]),
            names: vec![name],
        }
    }

    /// Caller-ordered relation names, deduplicated.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub const fn canonical(&self) -> &BTreeSet<String> {
        &self.canonical
    }
}

impl PartialEq for RelationSet {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for RelationSet {}

///
/// RelationDictionary
///
/// Insertion-ordered slots keyed by canonical relation set. Adding an
/// entry whose relation set is set-equal to an existing slot replaces
/// that slot in place (count unchanged, position retained); otherwise a
/// new slot is appended. Enumeration order is first-insertion order of
/// distinct canonical sets.
///

#[derive(Debug, Default)]
pub struct RelationDictionary {
    slots: Vec<(RelationSet, Reference)>,
}

impl RelationDictionary {
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn add(&mut self, relations: RelationSet, reference: Reference) {
        match self
            .slots
            .iter_mut()
            .find(|(set, _)| set.canonical() == relations.canonical())
        {
            Some(slot) => *slot = (relations, reference),
            None => self.slots.push((relations, reference)),
        }
    }

    #[must_use]
    pub fn get(&self, relations: &RelationSet) -> Option<&Reference> {
        self.slots
            .iter()
            .find(|(set, _)| set.canonical() == relations.canonical())
            .map(|(_, reference)| reference)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RelationSet, &Reference)> {
        self.slots.iter().map(|(set, reference)| (set, reference))
    }
}
