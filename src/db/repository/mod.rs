//! Repository traits: the abstract interface between the service layer
//! and a storage backend.
//!
//! The read path is expressed entirely through [`crate::query::TourQuery`]
//! specifications; implementations execute them and hand back projected
//! JSON documents. Implementations must also uphold the secret-record
//! invariant: no read-path operation or report may ever observe a record
//! flagged secret.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::{DifficultyStats, MonthlyPlanEntry, TourId};
use crate::db::models::Document;
use crate::models::{Tour, TourPatch};
use crate::query::TourQuery;

/// Repository trait for tour CRUD operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait TourRepository: Send + Sync {
    /// Execute a query specification and return the matching records as
    /// projected documents, in query order.
    async fn find_tours(&self, query: &TourQuery) -> RepositoryResult<Vec<Document>>;

    /// Fetch a single record by identifier.
    ///
    /// # Returns
    /// * `Ok(Document)` - The record with the default projection applied
    /// * `Err(RepositoryError::NotFound)` - If no visible record has this ID
    async fn get_tour(&self, id: TourId) -> RepositoryResult<Document>;

    /// Insert a validated record.
    ///
    /// # Returns
    /// * `Ok(Document)` - The stored record
    /// * `Err(RepositoryError::Validation)` - If the name is already taken
    async fn insert_tour(&self, tour: Tour) -> RepositoryResult<Document>;

    /// Apply a partial update to an existing record. The patched record
    /// is re-validated before it replaces the stored one, and the
    /// internal revision counter is bumped.
    async fn update_tour(&self, id: TourId, patch: TourPatch) -> RepositoryResult<Document>;

    /// Delete a record by identifier.
    async fn delete_tour(&self, id: TourId) -> RepositoryResult<()>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}

/// Repository trait for the fixed aggregation reports.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Grouped statistics by difficulty over tours rated at least 4.5:
    /// count, summed ratings, average rating, average/min/max price.
    async fn difficulty_stats(&self) -> RepositoryResult<Vec<DifficultyStats>>;

    /// Monthly start-date histogram for one calendar year: per-month
    /// start count and tour-name list, sorted by month index, at most 12
    /// entries.
    async fn monthly_plan(&self, year: i32) -> RepositoryResult<Vec<MonthlyPlanEntry>>;
}

/// Convenience supertrait for backends implementing the full surface.
pub trait FullRepository: TourRepository + ReportRepository {}

impl<T: TourRepository + ReportRepository> FullRepository for T {}
