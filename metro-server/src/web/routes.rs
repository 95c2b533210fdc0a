//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderValue, Method, StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::{Local, NaiveTime, Timelike};
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use crate::domain::parse_hhmm;
use crate::network::NetworkError;
use crate::planner::{RouteError, RouteRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// Browsers may call the API with credentials from `allowed_origin` only.
pub fn create_router(state: AppState, allowed_origin: HeaderValue) -> Router {
    let api = Router::new()
        .route("/lines", get(list_lines))
        .route("/stations", get(list_stations))
        .route("/line", post(add_line))
        .route("/line/:line_id", delete(delete_line))
        .route("/path/shortest", get(shortest_path))
        .route("/path/least-transfer", get(least_transfer_path));

    Router::new()
        .route("/health", get(health))
        .nest("/api/subway", api)
        .layer(cors(allowed_origin))
        .with_state(state)
}

fn cors(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All lines, ordered by id.
async fn list_lines(State(state): State<AppState>) -> Json<Vec<LineResponse>> {
    let lines = state.metro.lines().await;
    Json(lines.iter().map(LineResponse::from).collect())
}

/// All stations, ordered by name.
async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationResponse>> {
    let stations = state.metro.stations().await;
    Json(stations.iter().map(StationResponse::from).collect())
}

async fn add_line(
    State(state): State<AppState>,
    Json(req): Json<LineEditRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = req.line_id.trim().to_string();
    state.metro.add_line(req.into()).await?;
    Ok(Json(MessageResponse {
        message: format!("line {id} added"),
    }))
}

async fn delete_line(
    State(state): State<AppState>,
    Path(line_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    match state.metro.delete_line(&line_id).await {
        Some(line) => Ok(Json(MessageResponse {
            message: format!("line {} deleted", line.id()),
        })),
        None => Err(AppError::NotFound {
            message: format!("unknown line: {line_id}"),
        }),
    }
}

async fn shortest_path(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let request = route_request(query)?;
    let itinerary = state.metro.shortest_time_path(&request).await?;
    Ok(Json(ItineraryResponse::from(&itinerary)))
}

async fn least_transfer_path(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let request = route_request(query)?;
    let itinerary = state.metro.least_transfer_path(&request).await?;
    Ok(Json(ItineraryResponse::from(&itinerary)))
}

/// Validate path query parameters.
fn route_request(query: PathQuery) -> Result<RouteRequest, AppError> {
    let start = query.start.trim();
    let end = query.end.trim();
    if start.is_empty() || end.is_empty() {
        return Err(AppError::BadRequest {
            message: "start and end stations are required".to_string(),
        });
    }

    let query_time = match query.query_time.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => parse_hhmm(s).map_err(|e| AppError::BadRequest {
            message: format!("invalid queryTime {s:?}: {e}"),
        })?,
        _ => current_minute(),
    };

    Ok(RouteRequest::new(start, end, query.day_type, query_time))
}

/// Local wall-clock time, truncated to the minute.
fn current_minute() -> NaiveTime {
    let now = Local::now().time();
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::NoRoute { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
            RouteError::InvalidItinerary(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<NetworkError> for AppError {
    fn from(e: NetworkError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
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

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
