//! High-level business logic functions.
//!
//! These free functions work with any repository implementation and are
//! the layer the HTTP handlers (and tests) call into. List operations run
//! the full query pipeline — filter → sort → field projection →
//! pagination — before handing the specification to the repository for
//! execution.

use chrono::Utc;

use crate::api::{DifficultyStats, MonthlyPlanEntry, TourId};
use crate::db::models::Document;
use crate::db::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{TourDraft, TourPatch};
use crate::query::{QueryBuilder, RawParams, TourQuery};

/// Preset parameters for the curated "top 5 cheap" listing alias.
const TOP_TOURS_LIMIT: &str = "5";
const TOP_TOURS_SORT: &str = "-ratingsAverage,price";
const TOP_TOURS_FIELDS: &str = "name,price,ratingsAverage,summary,difficulty";

/// List tours according to the request's query parameters.
pub async fn list_tours(
    repo: &dyn FullRepository,
    params: RawParams,
) -> RepositoryResult<Vec<Document>> {
    let query = QueryBuilder::new(TourQuery::default(), params)
        .filter()
        .sort()
        .limit_fields()
        .paginate()
        .into_query();
    repo.find_tours(&query).await
}

/// Curated listing: the five best-rated tours, cheapest first among
/// equals, restricted to the preview field set. Caller-supplied filter
/// parameters still apply; the preset overrides `limit`, `sort`, and
/// `fields`.
pub async fn top_tours(
    repo: &dyn FullRepository,
    mut params: RawParams,
) -> RepositoryResult<Vec<Document>> {
    params.set("limit", TOP_TOURS_LIMIT);
    params.set("sort", TOP_TOURS_SORT);
    params.set("fields", TOP_TOURS_FIELDS);
    list_tours(repo, params).await
}

/// Fetch a single tour by identifier.
pub async fn get_tour(repo: &dyn FullRepository, id: TourId) -> RepositoryResult<Document> {
    repo.get_tour(id).await
}

/// Validate a draft and store it as a new tour.
pub async fn create_tour(
    repo: &dyn FullRepository,
    draft: TourDraft,
) -> RepositoryResult<Document> {
    let tour = draft
        .into_tour(TourId::generate(), Utc::now())
        .map_err(|e| {
            RepositoryError::validation_with_context(
                e.to_string(),
                ErrorContext::new("create_tour").with_entity("tour"),
            )
        })?;
    repo.insert_tour(tour).await
}

/// Apply a partial update to an existing tour.
pub async fn update_tour(
    repo: &dyn FullRepository,
    id: TourId,
    patch: TourPatch,
) -> RepositoryResult<Document> {
    repo.update_tour(id, patch).await
}

/// Delete a tour by identifier.
pub async fn delete_tour(repo: &dyn FullRepository, id: TourId) -> RepositoryResult<()> {
    repo.delete_tour(id).await
}

/// Grouped difficulty statistics report.
pub async fn difficulty_stats(
    repo: &dyn FullRepository,
) -> RepositoryResult<Vec<DifficultyStats>> {
    repo.difficulty_stats().await
}

/// Monthly start-date plan report for one calendar year.
pub async fn monthly_plan(
    repo: &dyn FullRepository,
    year: i32,
) -> RepositoryResult<Vec<MonthlyPlanEntry>> {
    repo.monthly_plan(year).await
}

/// Check that the backing store is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}
