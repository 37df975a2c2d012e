//! In-memory document store.
//!
//! `LocalRepository` keeps every record behind a `parking_lot::RwLock`
//! and executes [`TourQuery`] specifications entirely in memory: the
//! secret-record guard, conjunctive predicate evaluation, stable
//! multi-key sorting, the skip/limit window, and field projection.
//!
//! The secret-record invariant is enforced here, not in the query
//! builder: every read path and both aggregation reports run over
//! [`LocalRepository::visible`], so a record flagged secret is never
//! observable through this backend.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use parking_lot::RwLock;
use serde_json::Value;

use crate::api::{DifficultyStats, MonthlyPlanEntry, TourId};
use crate::db::models::{Document, StoredTour, ID_FIELD, REVISION_FIELD};
use crate::db::repository::{
    ErrorContext, ReportRepository, RepositoryError, RepositoryResult, TourRepository,
};
use crate::models::tour::TourDraft;
use crate::models::{Tour, TourPatch};
use crate::query::{FilterOp, Predicate, Projection, SortDirection, TourQuery};

/// In-memory repository backend.
#[derive(Default)]
pub struct LocalRepository {
    tours: RwLock<BTreeMap<TourId, StoredTour>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load seed records from a JSON file holding an array of tour
    /// drafts. Each draft goes through the same validation as a create
    /// request and gets a fresh id and creation timestamp.
    pub fn seed_from_file(&self, path: &Path) -> RepositoryResult<usize> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            ))
        })?;
        let drafts: Vec<TourDraft> = serde_json::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to parse seed file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut count = 0;
        for draft in drafts {
            let tour = draft
                .into_tour(TourId::generate(), Utc::now())
                .map_err(|e| {
                    RepositoryError::validation_with_context(
                        e.to_string(),
                        ErrorContext::new("seed_from_file").with_entity("tour"),
                    )
                })?;
            self.store_new(tour)?;
            count += 1;
        }
        log::info!("Seeded {} tours from {}", count, path.display());
        Ok(count)
    }

    /// Snapshot of the non-secret records. Every read path and report
    /// goes through here; this is the non-bypassable guard.
    fn visible(&self) -> Vec<StoredTour> {
        self.tours
            .read()
            .values()
            .filter(|stored| !stored.tour.secret)
            .cloned()
            .collect()
    }

    fn store_new(&self, tour: Tour) -> RepositoryResult<Document> {
        let mut tours = self.tours.write();
        if tours.values().any(|stored| stored.tour.name == tour.name) {
            return Err(RepositoryError::validation_with_context(
                format!("A tour named '{}' already exists", tour.name),
                ErrorContext::new("insert_tour")
                    .with_entity("tour")
                    .with_details("unique name constraint"),
            ));
        }
        let stored = StoredTour::new(tour);
        let doc = default_projection(stored.to_document());
        tours.insert(stored.tour.id, stored);
        Ok(doc)
    }
}

#[async_trait]
impl TourRepository for LocalRepository {
    async fn find_tours(&self, query: &TourQuery) -> RepositoryResult<Vec<Document>> {
        let mut docs: Vec<Document> = Vec::new();
        for stored in self.visible() {
            let doc = stored.to_document();
            if matches_all(&doc, &query.predicates)? {
                docs.push(doc);
            }
        }

        // Stable sort: records tied on every key keep their store order,
        // so identical queries against an unchanged dataset return
        // records in the same order.
        docs.sort_by(|a, b| compare_documents(a, b, query));

        let docs: Vec<Document> = docs
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .map(|doc| project(doc, &query.projection))
            .collect();

        log::debug!(
            "find_tours matched {} document(s) (skip={}, limit={})",
            docs.len(),
            query.skip,
            query.limit
        );
        Ok(docs)
    }

    async fn get_tour(&self, id: TourId) -> RepositoryResult<Document> {
        let tours = self.tours.read();
        match tours.get(&id) {
            Some(stored) if !stored.tour.secret => {
                Ok(default_projection(stored.to_document()))
            }
            _ => Err(not_found(id, "get_tour")),
        }
    }

    async fn insert_tour(&self, tour: Tour) -> RepositoryResult<Document> {
        self.store_new(tour)
    }

    async fn update_tour(&self, id: TourId, patch: TourPatch) -> RepositoryResult<Document> {
        let mut tours = self.tours.write();

        let current = match tours.get(&id) {
            Some(stored) if !stored.tour.secret => stored.clone(),
            _ => return Err(not_found(id, "update_tour")),
        };

        let mut updated = current.tour.clone();
        patch.apply_to(&mut updated).map_err(|e| {
            RepositoryError::validation_with_context(
                e.to_string(),
                ErrorContext::new("update_tour")
                    .with_entity("tour")
                    .with_entity_id(id),
            )
        })?;

        if tours
            .values()
            .any(|stored| stored.tour.id != id && stored.tour.name == updated.name)
        {
            return Err(RepositoryError::validation_with_context(
                format!("A tour named '{}' already exists", updated.name),
                ErrorContext::new("update_tour")
                    .with_entity("tour")
                    .with_details("unique name constraint"),
            ));
        }

        let stored = StoredTour {
            tour: updated,
            revision: current.revision + 1,
        };
        let doc = default_projection(stored.to_document());
        tours.insert(id, stored);
        Ok(doc)
    }

    async fn delete_tour(&self, id: TourId) -> RepositoryResult<()> {
        let mut tours = self.tours.write();
        match tours.get(&id) {
            Some(stored) if !stored.tour.secret => {
                tours.remove(&id);
                Ok(())
            }
            _ => Err(not_found(id, "delete_tour")),
        }
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl ReportRepository for LocalRepository {
    async fn difficulty_stats(&self) -> RepositoryResult<Vec<DifficultyStats>> {
        struct Group {
            num_tours: u64,
            num_ratings: u64,
            rating_sum: f64,
            price_sum: f64,
            min_price: f64,
            max_price: f64,
        }

        let mut groups: BTreeMap<String, Group> = BTreeMap::new();
        for stored in self.visible() {
            let tour = &stored.tour;
            if tour.ratings_average < 4.5 {
                continue;
            }
            let key = tour.difficulty.as_str().to_uppercase();
            let group = groups.entry(key).or_insert(Group {
                num_tours: 0,
                num_ratings: 0,
                rating_sum: 0.0,
                price_sum: 0.0,
                min_price: f64::INFINITY,
                max_price: f64::NEG_INFINITY,
            });
            group.num_tours += 1;
            group.num_ratings += tour.ratings_quantity;
            group.rating_sum += tour.ratings_average;
            group.price_sum += tour.price;
            group.min_price = group.min_price.min(tour.price);
            group.max_price = group.max_price.max(tour.price);
        }

        Ok(groups
            .into_iter()
            .map(|(difficulty, g)| DifficultyStats {
                difficulty,
                num_tours: g.num_tours,
                num_ratings: g.num_ratings,
                avg_rating: g.rating_sum / g.num_tours as f64,
                avg_price: g.price_sum / g.num_tours as f64,
                min_price: g.min_price,
                max_price: g.max_price,
            })
            .collect())
    }

    async fn monthly_plan(&self, year: i32) -> RepositoryResult<Vec<MonthlyPlanEntry>> {
        struct Month {
            num_tour_starts: u64,
            tours: Vec<String>,
        }

        // Unwind the start dates: one entry per (tour, start date) pair
        // falling inside the requested year.
        let mut months: BTreeMap<u32, Month> = BTreeMap::new();
        for stored in self.visible() {
            let tour = &stored.tour;
            for start in &tour.start_dates {
                if start.year() != year {
                    continue;
                }
                let month = months.entry(start.month()).or_insert(Month {
                    num_tour_starts: 0,
                    tours: Vec::new(),
                });
                month.num_tour_starts += 1;
                month.tours.push(tour.name.clone());
            }
        }

        Ok(months
            .into_iter()
            .take(12)
            .map(|(month, m)| MonthlyPlanEntry {
                month,
                num_tour_starts: m.num_tour_starts,
                tours: m.tours,
            })
            .collect())
    }
}

fn not_found(id: TourId, operation: &str) -> RepositoryError {
    RepositoryError::not_found_with_context(
        "No tour found with that ID",
        ErrorContext::new(operation)
            .with_entity("tour")
            .with_entity_id(id),
    )
}

// ---------------------------------------------------------------------------
// Query execution
// ---------------------------------------------------------------------------

fn matches_all(doc: &Document, predicates: &[Predicate]) -> RepositoryResult<bool> {
    for predicate in predicates {
        if !matches(doc, predicate)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matches(doc: &Document, predicate: &Predicate) -> RepositoryResult<bool> {
    let value = doc.get(&predicate.field).unwrap_or(&Value::Null);
    // Missing fields and incomparable types yield None: the record
    // simply does not match.
    let ordering = compare_to_param(value, &predicate.value);

    Ok(match &predicate.op {
        FilterOp::Other(token) => {
            return Err(RepositoryError::query(format!(
                "Unsupported filter operator '{}' on field '{}'",
                token, predicate.field
            )));
        }
        FilterOp::Eq => ordering == Some(Ordering::Equal),
        FilterOp::Gte => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        FilterOp::Gt => ordering == Some(Ordering::Greater),
        FilterOp::Lte => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        FilterOp::Lt => ordering == Some(Ordering::Less),
    })
}

/// Compare a document field against a raw parameter string, coercing the
/// parameter to the field's type.
///
/// - Numbers: the parameter must parse as f64
/// - Strings: lexicographic comparison (RFC 3339 timestamps order
///   chronologically this way)
/// - Booleans: the parameter must parse as bool
fn compare_to_param(value: &Value, raw: &str) -> Option<Ordering> {
    match value {
        Value::Number(n) => {
            let field = n.as_f64()?;
            let param: f64 = raw.trim().parse().ok()?;
            field.partial_cmp(&param)
        }
        Value::String(s) => Some(s.as_str().cmp(raw)),
        Value::Bool(b) => {
            let param: bool = raw.parse().ok()?;
            Some(b.cmp(&param))
        }
        _ => None,
    }
}

/// Order two field values for sorting. Null (and missing fields) sort
/// before everything; mismatched types are treated as ties so the sort
/// stays stable.
fn value_ordering(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn compare_documents(a: &Document, b: &Document, query: &TourQuery) -> Ordering {
    for key in &query.sort {
        let left = a.get(&key.field).unwrap_or(&Value::Null);
        let right = b.get(&key.field).unwrap_or(&Value::Null);
        let ordering = match key.direction {
            SortDirection::Ascending => value_ordering(left, right),
            SortDirection::Descending => value_ordering(right, left),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn project(doc: Document, projection: &Projection) -> Document {
    match projection {
        Projection::ExcludeInternal => default_projection(doc),
        Projection::Include(fields) => doc
            .into_iter()
            .filter(|(key, _)| fields.contains(key) || key == ID_FIELD)
            .collect(),
    }
}

fn default_projection(mut doc: Document) -> Document {
    doc.remove(REVISION_FIELD);
    doc
}
