//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST
//! API. Request payloads reuse the model types directly; responses wrap
//! their data in the `{ status, results?, data: { ... } }` envelope.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{DifficultyStats, MonthlyPlanEntry};
pub use crate::db::models::Document;
pub use crate::models::{TourDraft, TourPatch};

fn success() -> String {
    "success".to_string()
}

/// Envelope for list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourListResponse {
    pub status: String,
    /// Number of records in this page
    pub results: usize,
    pub data: TourListData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourListData {
    pub tours: Vec<Document>,
}

impl TourListResponse {
    pub fn new(tours: Vec<Document>) -> Self {
        Self {
            status: success(),
            results: tours.len(),
            data: TourListData { tours },
        }
    }
}

/// Envelope for single-record responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleTourResponse {
    pub status: String,
    pub data: SingleTourData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleTourData {
    pub tour: Document,
}

impl SingleTourResponse {
    pub fn new(tour: Document) -> Self {
        Self {
            status: success(),
            data: SingleTourData { tour },
        }
    }
}

/// Envelope for the difficulty statistics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub status: String,
    pub data: StatsData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsData {
    pub stats: Vec<DifficultyStats>,
}

impl StatsResponse {
    pub fn new(stats: Vec<DifficultyStats>) -> Self {
        Self {
            status: success(),
            data: StatsData { stats },
        }
    }
}

/// Envelope for the monthly plan report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPlanResponse {
    pub status: String,
    pub data: MonthlyPlanData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPlanData {
    pub plan: Vec<MonthlyPlanEntry>,
}

impl MonthlyPlanResponse {
    pub fn new(plan: Vec<MonthlyPlanEntry>) -> Self {
        Self {
            status: success(),
            data: MonthlyPlanData { plan },
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
