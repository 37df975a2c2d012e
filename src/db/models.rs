//! Shared data types for the database layer.

use serde_json::Value;

use crate::models::Tour;

/// A tour record rendered as a JSON object, the unit returned by every
/// read-path query. Projection is applied to documents, not to [`Tour`]
/// structs, so a query can restrict the returned fields.
pub type Document = serde_json::Map<String, Value>;

/// Name of the internal revision counter included in stored documents.
/// Hidden by the default projection.
pub const REVISION_FIELD: &str = "revision";

/// Field name of the record identifier, always retained by inclusion
/// projections.
pub const ID_FIELD: &str = "id";

/// A record as held by the store: the tour plus internal bookkeeping.
#[derive(Debug, Clone)]
pub struct StoredTour {
    pub tour: Tour,
    /// Bumped on every update.
    pub revision: u64,
}

impl StoredTour {
    pub fn new(tour: Tour) -> Self {
        Self { tour, revision: 0 }
    }

    /// Render the record as a full document: every tour field in
    /// camelCase, the derived `durationWeeks` virtual, and the internal
    /// revision counter. Projection happens afterwards.
    pub fn to_document(&self) -> Document {
        let mut doc = match serde_json::to_value(&self.tour) {
            Ok(Value::Object(map)) => map,
            // Tour serializes to an object by construction.
            _ => Document::new(),
        };
        doc.insert(
            "durationWeeks".to_string(),
            serde_json::json!(self.tour.duration_weeks()),
        );
        doc.insert(REVISION_FIELD.to_string(), serde_json::json!(self.revision));
        doc
    }
}
