//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::tour::Difficulty;
pub use crate::models::tour::Tour;
pub use crate::models::tour::TourDraft;
pub use crate::models::tour::TourPatch;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tour identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TourId(pub Uuid);

impl TourId {
    pub fn new(value: Uuid) -> Self {
        TourId(value)
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        TourId(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for TourId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One row of the grouped difficulty statistics report.
///
/// Groups are keyed by uppercased difficulty name and only include tours
/// with an average rating of at least 4.5.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyStats {
    /// Uppercased difficulty name acting as the group key
    pub difficulty: String,
    /// Number of tours in the group
    pub num_tours: u64,
    /// Sum of ratings counts across the group
    pub num_ratings: u64,
    /// Average of the tours' average ratings
    pub avg_rating: f64,
    /// Average price across the group
    pub avg_price: f64,
    /// Cheapest tour in the group
    pub min_price: f64,
    /// Most expensive tour in the group
    pub max_price: f64,
}

/// One row of the monthly start-date plan report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPlanEntry {
    /// Month index within the requested year (1-12)
    pub month: u32,
    /// Number of tour starts in that month
    pub num_tour_starts: u64,
    /// Names of the tours starting in that month
    pub tours: Vec<String>,
}
