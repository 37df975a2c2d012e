//! Staged query builder.
//!
//! [`QueryBuilder`] owns the specification while the four refinement
//! stages run, each consuming and returning the builder so calls chain.
//! The stages are pure, synchronous transformations of the in-memory
//! specification; none of them can fail, and none of them touch the
//! backing store.

use super::params::{ParamValue, RawParams};
use super::spec::{
    FilterOp, Predicate, Projection, SortDirection, SortKey, TourQuery, DEFAULT_SORT_FIELD,
    RESERVED_PARAMS,
};

/// Default page number when `page` is absent or unusable.
pub const DEFAULT_PAGE: u64 = 1;
/// Default page size when `limit` is absent or unusable.
pub const DEFAULT_LIMIT: u64 = 100;

/// Parse a positive-integer parameter with an explicit fallback rule:
/// the value must parse as an integer strictly greater than zero,
/// otherwise `default` is returned. Absent, malformed, zero, and negative
/// values all fall back; no error is ever raised.
pub fn parse_positive_or(raw: Option<&str>, default: u64) -> u64 {
    match raw.and_then(|s| s.trim().parse::<u64>().ok()) {
        Some(n) if n > 0 => n,
        _ => default,
    }
}

/// Builds a [`TourQuery`] from a raw parameter map.
///
/// Stages are designed to run in the fixed order
/// `filter → sort → limit_fields → paginate`; each reads only its own
/// parameters, so skipping a stage leaves that aspect of the initial
/// handle untouched.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    query: TourQuery,
    params: RawParams,
}

impl QueryBuilder {
    /// Wrap an initial queryable handle and the request's parameter map.
    /// Construction performs no validation and cannot fail.
    pub fn new(query: TourQuery, params: RawParams) -> Self {
        Self { query, params }
    }

    /// Translate every non-reserved parameter into a conjunctive filter
    /// predicate. Plain values become equality predicates; nested
    /// `field[op]=value` entries become comparison predicates, with
    /// unrecognized operator tokens passed through for the execution
    /// layer to reject. With no non-reserved parameters the filter is
    /// match-all.
    pub fn filter(mut self) -> Self {
        let mut predicates = Vec::new();
        for (name, value) in self.params.iter() {
            if RESERVED_PARAMS.contains(&name) {
                continue;
            }
            match value {
                ParamValue::Single(v) => {
                    predicates.push(Predicate::new(name, FilterOp::Eq, v.as_str()));
                }
                ParamValue::Nested(ops) => {
                    for (token, v) in ops {
                        predicates.push(Predicate::new(
                            name,
                            FilterOp::from_token(token),
                            v.as_str(),
                        ));
                    }
                }
            }
        }
        self.query.predicates = predicates;
        self
    }

    /// Apply the `sort` parameter: a comma-separated field list, each
    /// optionally prefixed with `-` for descending order, in
    /// left-to-right priority. Absent (or empty) falls back to newest
    /// first, keeping pagination deterministic.
    pub fn sort(mut self) -> Self {
        let keys: Vec<SortKey> = self
            .params
            .get_single("sort")
            .map(parse_sort_keys)
            .unwrap_or_default();

        self.query.sort = if keys.is_empty() {
            vec![SortKey::desc(DEFAULT_SORT_FIELD)]
        } else {
            keys
        };
        self
    }

    /// Apply the `fields` parameter: a comma-separated inclusion set (the
    /// record identifier is always retained). Absent falls back to
    /// returning everything except the store's internal revision counter.
    pub fn limit_fields(mut self) -> Self {
        let fields: std::collections::BTreeSet<String> = self
            .params
            .get_single("fields")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        self.query.projection = if fields.is_empty() {
            Projection::ExcludeInternal
        } else {
            let mut fields = fields;
            fields.insert("id".to_string());
            Projection::Include(fields)
        };
        self
    }

    /// Apply `page` and `limit` via [`parse_positive_or`] and compute the
    /// skip window: `skip = (page - 1) * limit`. No upper bound is put on
    /// `limit`; a page past the end of the result set executes to an
    /// empty sequence rather than an error.
    pub fn paginate(mut self) -> Self {
        let page = parse_positive_or(self.params.get_single("page"), DEFAULT_PAGE);
        let limit = parse_positive_or(self.params.get_single("limit"), DEFAULT_LIMIT);
        self.query.skip = (page - 1).saturating_mul(limit);
        self.query.limit = limit;
        self
    }

    /// Hand back the refined queryable handle for the caller to execute.
    pub fn into_query(self) -> TourQuery {
        self.query
    }
}

fn parse_sort_keys(raw: &str) -> Vec<SortKey> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty() && *f != "-")
        .map(|field| match field.strip_prefix('-') {
            Some(name) => SortKey::desc(name),
            None => SortKey::asc(field),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn build(pairs: &[(&str, &str)]) -> TourQuery {
        let params = RawParams::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        QueryBuilder::new(TourQuery::default(), params)
            .filter()
            .sort()
            .limit_fields()
            .paginate()
            .into_query()
    }

    #[test]
    fn reserved_only_params_yield_match_all() {
        let query = build(&[
            ("page", "2"),
            ("sort", "price"),
            ("limit", "5"),
            ("fields", "name"),
        ]);
        assert!(query.is_match_all());
    }

    #[test]
    fn reserved_keys_never_become_predicates() {
        let query = build(&[("page", "2"), ("difficulty", "easy"), ("limit", "5")]);
        assert_eq!(query.predicates.len(), 1);
        assert_eq!(query.predicates[0].field, "difficulty");
    }

    #[test]
    fn plain_params_become_equality_predicates() {
        let query = build(&[("difficulty", "easy")]);
        assert_eq!(
            query.predicates,
            vec![Predicate::new("difficulty", FilterOp::Eq, "easy")]
        );
    }

    #[test]
    fn nested_tokens_map_to_range_operators() {
        let query = build(&[("price[gte]", "100"), ("duration[lt]", "10")]);
        assert!(query
            .predicates
            .contains(&Predicate::new("price", FilterOp::Gte, "100")));
        assert!(query
            .predicates
            .contains(&Predicate::new("duration", FilterOp::Lt, "10")));
    }

    #[test]
    fn unknown_nested_tokens_pass_through() {
        let query = build(&[("price[between]", "100")]);
        assert_eq!(
            query.predicates,
            vec![Predicate::new(
                "price",
                FilterOp::Other("between".to_string()),
                "100"
            )]
        );
    }

    #[test]
    fn sort_parses_multi_key_priority() {
        let query = build(&[("sort", "-ratingsAverage,price")]);
        assert_eq!(
            query.sort,
            vec![SortKey::desc("ratingsAverage"), SortKey::asc("price")]
        );
    }

    #[test]
    fn absent_sort_defaults_to_newest_first() {
        let query = build(&[]);
        assert_eq!(query.sort, vec![SortKey::desc("createdAt")]);
    }

    #[test]
    fn empty_sort_value_falls_back_to_default() {
        let query = build(&[("sort", " , ")]);
        assert_eq!(query.sort, vec![SortKey::desc("createdAt")]);
    }

    #[test]
    fn fields_become_inclusion_projection_with_id() {
        let query = build(&[("fields", "name,price")]);
        match query.projection {
            Projection::Include(fields) => {
                assert!(fields.contains("name"));
                assert!(fields.contains("price"));
                assert!(fields.contains("id"));
                assert_eq!(fields.len(), 3);
            }
            other => panic!("expected inclusion projection, got {:?}", other),
        }
    }

    #[test]
    fn absent_fields_defaults_to_excluding_internal() {
        let query = build(&[]);
        assert_eq!(query.projection, Projection::ExcludeInternal);
    }

    #[test]
    fn paginate_computes_skip_window() {
        let query = build(&[("page", "2"), ("limit", "5")]);
        assert_eq!(query.skip, 5);
        assert_eq!(query.limit, 5);
    }

    #[test]
    fn paginate_defaults() {
        let query = build(&[]);
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, 100);
    }

    #[test]
    fn malformed_page_and_limit_fall_back() {
        assert_eq!(parse_positive_or(Some("abc"), 1), 1);
        assert_eq!(parse_positive_or(Some("0"), 1), 1);
        assert_eq!(parse_positive_or(Some("-3"), 100), 100);
        assert_eq!(parse_positive_or(Some(" 7 "), 100), 7);
        assert_eq!(parse_positive_or(None, 100), 100);
    }

    #[test]
    fn stages_chain_in_any_subset() {
        // A skipped stage leaves the initial handle's aspect untouched.
        let params = RawParams::from_pairs([("limit".to_string(), "5".to_string())]);
        let query = QueryBuilder::new(TourQuery::default(), params)
            .paginate()
            .into_query();
        assert_eq!(query.limit, 5);
        assert_eq!(query.sort, vec![SortKey::desc("createdAt")]);
    }

    proptest! {
        #[test]
        fn parse_positive_never_panics(raw in ".*", default in 1u64..10_000) {
            let parsed = parse_positive_or(Some(&raw), default);
            prop_assert!(parsed > 0);
        }

        #[test]
        fn pagination_window_matches_formula(page in 1u64..1000, limit in 1u64..1000) {
            let page_s = page.to_string();
            let limit_s = limit.to_string();
            let query = build(&[("page", page_s.as_str()), ("limit", limit_s.as_str())]);
            prop_assert_eq!(query.skip, (page - 1) * limit);
            prop_assert_eq!(query.limit, limit);
        }
    }
}
