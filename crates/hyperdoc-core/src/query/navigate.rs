use crate::{
    query::{PageSpec, Query},
    reference::Reference,
    relation::rel,
};

///
/// NavigationQueryBuilder
///
/// Synthesizes First/Previous/Next/Last/All references for a paged
/// query result. Pure pagination math over already-known counts; no
/// repository or network access.
///

pub struct NavigationQueryBuilder;

impl NavigationQueryBuilder {
    /// Compute navigation references for `query` over a result of
    /// `total` rows targeting document type `target`.
    ///
    /// Every emitted reference clones the original query, mutating only
    /// its pagination window. `all` is always present (paging stripped);
    /// `first`/`previous` only when there is a page before the current
    /// one; `next`/`last` only when rows remain past the current page.
    #[must_use]
    pub fn build(
        query: &dyn Query,
        total: u64,
        target: &'static str,
    ) -> Vec<(&'static str, Reference)> {
        let mut refs = vec![(
            rel::ALL,
            Reference::query_keyed_boxed(target, query.with_page(None)),
        )];

        let Some(page) = query.page() else {
            return refs;
        };
        if page.limit == 0 {
            return refs;
        }

        let offset = u64::from(page.offset);
        let limit = u64::from(page.limit);
        let at = |offset: u64| -> Option<Reference> {
            let offset = u32::try_from(offset).ok()?;
            Some(Reference::query_keyed_boxed(
                target,
                query.with_page(Some(PageSpec::new(offset, page.limit))),
            ))
        };

        if offset > 0 {
            if let Some(first) = at(0) {
                refs.push((rel::FIRST, first));
            }
            if let Some(previous) = at(offset.saturating_sub(limit)) {
                refs.push((rel::PREVIOUS, previous));
            }
        }

        if offset + limit < total {
            if let Some(next) = at(offset + limit) {
                refs.push((rel::NEXT, next));
            }
            // start of the last full or partial page
            let last_offset = ((total - 1) / limit) * limit;
            if let Some(last) = at(last_offset) {
                refs.push((rel::LAST, last));
            }
        }

        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryObject;

    #[derive(Clone, Debug)]
    struct ListQuery {
        term: String,
        page: Option<PageSpec>,
    }

    impl Query for ListQuery {
        fn page(&self) -> Option<PageSpec> {
            self.page
        }

        fn with_page(&self, page: Option<PageSpec>) -> Box<dyn Query> {
            Box::new(Self {
                term: self.term.clone(),
                page,
            })
        }

        fn to_object(&self) -> QueryObject {
            QueryObject::new()
                .scalar("term", self.term.as_str())
                .page(self.page)
        }
    }

    fn query(offset: u32) -> ListQuery {
        ListQuery {
            term: "ice".to_string(),
            page: Some(PageSpec::new(offset, 10)),
        }
    }

    fn offsets(refs: &[(&'static str, Reference)]) -> Vec<(&'static str, Option<u32>)> {
        refs.iter()
            .map(|(name, reference)| {
                let page = match reference {
                    Reference::QueryKeyed { query, .. } => query.page(),
                    other => panic!("navigation emitted a non-query reference: {other:?}"),
                };
                (*name, page.map(|p| p.offset))
            })
            .collect()
    }

    #[test]
    fn middle_page_emits_all_four_directions() {
        let refs = NavigationQueryBuilder::build(&query(10), 25, "customer");
        assert_eq!(
            offsets(&refs),
            vec![
                ("all", None),
                ("first", Some(0)),
                ("previous", Some(0)),
                ("next", Some(20)),
                ("last", Some(20)),
            ]
        );
    }

    #[test]
    fn first_page_omits_first_and_previous() {
        let refs = NavigationQueryBuilder::build(&query(0), 25, "customer");
        assert_eq!(
            offsets(&refs),
            vec![("all", None), ("next", Some(10)), ("last", Some(20))]
        );
    }

    #[test]
    fn last_page_omits_next_and_last() {
        let refs = NavigationQueryBuilder::build(&query(20), 25, "customer");
        assert_eq!(
            offsets(&refs),
            vec![("all", None), ("first", Some(0)), ("previous", Some(10))]
        );
    }

    #[test]
    fn exact_multiple_total_points_last_at_final_full_page() {
        let refs = NavigationQueryBuilder::build(&query(0), 30, "customer");
        assert_eq!(
            offsets(&refs),
            vec![("all", None), ("next", Some(10)), ("last", Some(20))]
        );
    }

    #[test]
    fn unpaged_query_emits_only_all() {
        let unpaged = ListQuery {
            term: "ice".to_string(),
            page: None,
        };
        let refs = NavigationQueryBuilder::build(&unpaged, 25, "customer");
        assert_eq!(offsets(&refs), vec![("all", None)]);
    }

    #[test]
    fn zero_limit_emits_only_all() {
        let degenerate = ListQuery {
            term: "ice".to_string(),
            page: Some(PageSpec::new(5, 0)),
        };
        let refs = NavigationQueryBuilder::build(&degenerate, 25, "customer");
        assert_eq!(offsets(&refs), vec![("all", None)]);
    }

    #[test]
    fn navigation_never_mutates_the_original_query() {
        let original = query(10);
        let _ = NavigationQueryBuilder::build(&original, 25, "customer");
        assert_eq!(original.page, Some(PageSpec::new(10, 10)));
    }
}
