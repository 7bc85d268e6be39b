//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::warn;

use crate::domain::NearestStopInfo;
use crate::planner::{PlanError, RoutePlanner};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/trip/plan", post(plan_trip))
        .route("/stops/nearest", get(nearest_stop))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan a trip through a set of destinations.
async fn plan_trip(
    State(state): State<AppState>,
    Json(req): Json<PlanTripRequest>,
) -> Result<Json<PlanTripResponse>, AppError> {
    let origin = req.origin.to_domain().map_err(|e| AppError::BadRequest {
        message: format!("invalid origin: {e}"),
    })?;

    let destinations = req
        .destinations
        .into_iter()
        .map(|d| {
            let id = d.id.clone();
            d.to_domain().map_err(|e| AppError::BadRequest {
                message: format!("invalid destination {id}: {e}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mode = crate::domain::RouteMode::parse(&req.mode).ok_or_else(|| AppError::BadRequest {
        message: format!("invalid mode: {} (expected driving or transit)", req.mode),
    })?;

    let planner = RoutePlanner::new(
        state.osrm.as_ref(),
        state.stops.as_ref(),
        state.directions.as_deref(),
        state.config.as_ref(),
    );

    let plan = planner
        .plan(origin, destinations, mode)
        .await
        .map_err(AppError::from)?;

    Ok(Json(PlanTripResponse::from_plan(&plan)))
}

/// Find the stop nearest to a coordinate.
async fn nearest_stop(
    State(state): State<AppState>,
    Query(req): Query<NearestStopRequest>,
) -> Result<Json<NearestStopResponse>, AppError> {
    let position = crate::domain::Coordinate::new(req.lat, req.lon).map_err(|e| {
        AppError::BadRequest {
            message: format!("invalid position: {e}"),
        }
    })?;

    let limit = stop_limit(req.limit, state.config.max_nearby_stops);

    let ranked = state.stops.nearest_n(position, limit);
    if ranked.is_empty() {
        return Err(AppError::NotFound {
            message: "no stops loaded".to_string(),
        });
    }

    let stops = ranked
        .into_iter()
        .map(|(stop, distance_km)| {
            StopInfoResult::from_info(&NearestStopInfo {
                name: stop.name.clone(),
                position: stop.position,
                distance_km,
            })
        })
        .collect();

    Ok(Json(NearestStopResponse { stops }))
}

/// Clamp a requested result count to the configured cap, always
/// returning at least 1 even when the cap itself is zero.
fn stop_limit(requested: Option<usize>, cap: usize) -> usize {
    requested.unwrap_or(1).min(cap).max(1)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::NoDestinations => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
