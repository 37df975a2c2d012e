//! The data-fetch specification produced by the query pipeline.
//!
//! A [`TourQuery`] is a lazily-executed, chainable specification of a
//! fetch against the tour collection: a conjunctive predicate list, a
//! multi-key sort order, a field projection, and a skip/limit window. It
//! is executed only when handed to the repository layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Parameter names consumed by the builder itself rather than treated as
/// filter predicates.
pub const RESERVED_PARAMS: [&str; 4] = ["page", "sort", "limit", "fields"];

/// Field used for the implicit default sort (most recently created first).
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

/// Comparison applied by a filter predicate.
///
/// The four range tokens map 1:1 onto the store's native comparisons.
/// Unrecognized tokens are carried through unchanged; rejecting them is
/// the execution layer's responsibility, not the builder's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    Eq,
    Gte,
    Gt,
    Lte,
    Lt,
    Other(String),
}

impl FilterOp {
    pub fn from_token(token: &str) -> Self {
        match token {
            "gte" => FilterOp::Gte,
            "gt" => FilterOp::Gt,
            "lte" => FilterOp::Lte,
            "lt" => FilterOp::Lt,
            other => FilterOp::Other(other.to_string()),
        }
    }
}

/// One conjunct of the filter: `field <op> value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: String,
    pub op: FilterOp,
    /// Raw parameter value; coerced against the record field's type at
    /// execution time.
    pub value: String,
}

impl Predicate {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One key of the multi-key sort order. Earlier keys take priority; ties
/// are broken by the next key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Field projection applied to every returned record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    /// Return all fields except the store's internal revision counter.
    /// This is the cosmetic default, not a security control.
    ExcludeInternal,
    /// Return exactly this set of fields (the record identifier is always
    /// retained).
    Include(BTreeSet<String>),
}

impl Default for Projection {
    fn default() -> Self {
        Projection::ExcludeInternal
    }
}

/// A complete, lazily-executed fetch specification over the tour
/// collection.
///
/// The default value matches the outcome of running the pipeline with no
/// parameters: match-all filter, newest-first sort, default projection,
/// first page of 100 records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourQuery {
    pub predicates: Vec<Predicate>,
    pub sort: Vec<SortKey>,
    pub projection: Projection,
    pub skip: u64,
    pub limit: u64,
}

impl Default for TourQuery {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
            sort: vec![SortKey::desc(DEFAULT_SORT_FIELD)],
            projection: Projection::default(),
            skip: 0,
            limit: super::builder::DEFAULT_LIMIT,
        }
    }
}

impl TourQuery {
    /// True when no predicate restricts the result set.
    pub fn is_match_all(&self) -> bool {
        self.predicates.is_empty()
    }
}
