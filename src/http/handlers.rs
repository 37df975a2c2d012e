//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{
    HealthResponse, MonthlyPlanResponse, SingleTourResponse, StatsResponse, TourDraft,
    TourListResponse, TourPatch,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::TourId;
use crate::db::services as db_services;
use crate::query::RawParams;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store
/// is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Tour CRUD
// =============================================================================

/// GET /v1/tours
///
/// List tours. Non-reserved query parameters filter the collection
/// (`difficulty=easy`, `price[lte]=1000`); `sort`, `fields`, `page`, and
/// `limit` control ordering, projection, and pagination.
pub async fn list_tours(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> HandlerResult<TourListResponse> {
    let params = RawParams::from_pairs(params);
    let tours = db_services::list_tours(state.repository.as_ref(), params).await?;
    Ok(Json(TourListResponse::new(tours)))
}

/// GET /v1/tours/top-5-cheap
///
/// Curated listing: the five best-rated tours, cheapest first among
/// equals, restricted to a preview field set.
pub async fn top_tours(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> HandlerResult<TourListResponse> {
    let params = RawParams::from_pairs(params);
    let tours = db_services::top_tours(state.repository.as_ref(), params).await?;
    Ok(Json(TourListResponse::new(tours)))
}

/// GET /v1/tours/{id}
pub async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HandlerResult<SingleTourResponse> {
    let tour = db_services::get_tour(state.repository.as_ref(), TourId::new(id)).await?;
    Ok(Json(SingleTourResponse::new(tour)))
}

/// POST /v1/tours
///
/// Create a tour. Responds 201 with the stored record, or 400 with the
/// accumulated validation messages.
pub async fn create_tour(
    State(state): State<AppState>,
    Json(draft): Json<TourDraft>,
) -> Result<(StatusCode, Json<SingleTourResponse>), AppError> {
    let tour = db_services::create_tour(state.repository.as_ref(), draft).await?;
    Ok((StatusCode::CREATED, Json(SingleTourResponse::new(tour))))
}

/// PATCH /v1/tours/{id}
///
/// Partially update a tour; the patched record is re-validated before it
/// is stored.
pub async fn update_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<TourPatch>,
) -> HandlerResult<SingleTourResponse> {
    let tour =
        db_services::update_tour(state.repository.as_ref(), TourId::new(id), patch).await?;
    Ok(Json(SingleTourResponse::new(tour)))
}

/// DELETE /v1/tours/{id}
///
/// Responds 204 with an empty body on success.
pub async fn delete_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    db_services::delete_tour(state.repository.as_ref(), TourId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Aggregation Reports
// =============================================================================

/// GET /v1/tours/stats
///
/// Grouped difficulty statistics over tours rated at least 4.5.
pub async fn tour_stats(State(state): State<AppState>) -> HandlerResult<StatsResponse> {
    let stats = db_services::difficulty_stats(state.repository.as_ref()).await?;
    Ok(Json(StatsResponse::new(stats)))
}

/// GET /v1/tours/monthly-plan/{year}
///
/// Monthly start-date histogram for one calendar year.
pub async fn monthly_plan(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> HandlerResult<MonthlyPlanResponse> {
    let plan = db_services::monthly_plan(state.repository.as_ref(), year).await?;
    Ok(Json(MonthlyPlanResponse::new(plan)))
}
