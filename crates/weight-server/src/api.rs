use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use application::TimeWindow;
use application::query::{ItemHistory, SessionView, TransactionView};
use domain::weighing::parse_weighing_time;
use domain::{Direction, DomainError, WeighingReceipt, WeighingRequest, WeightUnit};

use crate::error::ApiError;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/db-check", get(db_check))
        .route("/weight", post(record_weight).get(list_weights))
        .route("/session/{id}", get(get_session))
        .route("/item/{id}", get(get_item))
        .route("/unknown", get(get_unknown))
        .route("/containers", get(get_containers))
        .route("/transactions", get(get_transactions))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Body of `POST /weight` as sent by the scale terminals
#[derive(Debug, Deserialize)]
pub struct WeighingPayload {
    pub direction: Option<String>,
    pub truck: Option<String>,
    pub containers: Option<ContainerList>,
    pub weight: Option<f64>,
    pub unit: Option<String>,
    pub force: Option<bool>,
    pub produce: Option<String>,
    pub datetime: Option<String>,
}

/// Terminals send either a JSON array or a comma-delimited string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ContainerList {
    Ids(Vec<String>),
    Delimited(String),
}

impl ContainerList {
    fn into_ids(self) -> Vec<String> {
        match self {
            Self::Ids(ids) => ids,
            Self::Delimited(raw) => raw.split(',').map(str::to_string).collect(),
        }
    }
}

impl TryFrom<WeighingPayload> for WeighingRequest {
    type Error = DomainError;

    fn try_from(payload: WeighingPayload) -> Result<Self, Self::Error> {
        let direction = payload
            .direction
            .as_deref()
            .ok_or_else(|| DomainError::Validation("direction is required".into()))
            .and_then(Direction::parse)?;
        let weight = payload
            .weight
            .ok_or_else(|| DomainError::Validation("weight is required".into()))?;
        let unit = match payload.unit.as_deref() {
            Some(unit) => WeightUnit::parse(unit)?,
            None => WeightUnit::Kg,
        };
        let timestamp = payload
            .datetime
            .as_deref()
            .ok_or_else(|| DomainError::Validation("datetime is required".into()))
            .and_then(parse_weighing_time)?;

        WeighingRequest::new(
            direction,
            payload.truck,
            payload.containers.map(ContainerList::into_ids).unwrap_or_default(),
            weight,
            unit,
            payload.force.unwrap_or(false),
            payload.produce,
            timestamp,
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub filter: Option<String>,
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "OK" }))
}

async fn db_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "db": "connected" }))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "db": "error", "detail": e.to_string() })),
        ),
    }
}

async fn record_weight(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WeighingPayload>, JsonRejection>,
) -> Result<Json<WeighingReceipt>, ApiError> {
    let Json(payload) =
        payload.map_err(|e| DomainError::Validation(format!("Invalid body: {}", e.body_text())))?;
    let request = WeighingRequest::try_from(payload)?;
    let receipt = state.weighings.record(request).await?;
    Ok(Json(receipt))
}

async fn list_weights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> Result<Json<Vec<TransactionView>>, ApiError> {
    let directions = Direction::parse_filter(params.filter.as_deref())?;
    let window = TimeWindow::today(Utc::now())
        .with_bounds(params.from.as_deref(), params.to.as_deref());
    let views = state.queries.list_transactions(window, &directions).await?;
    Ok(Json(views))
}

async fn get_session(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionView>, ApiError> {
    let session_id: i64 = id
        .trim()
        .parse()
        .map_err(|_| DomainError::Validation(format!("session id '{id}' is not a number")))?;
    let view = state.queries.session(session_id).await?;
    Ok(Json(view))
}

async fn get_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> Result<Json<ItemHistory>, ApiError> {
    let window = TimeWindow::this_month(Utc::now())
        .with_bounds(params.from.as_deref(), params.to.as_deref());
    let history = state.queries.item(&id, window).await?;
    Ok(Json(history))
}

async fn get_unknown(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.queries.unknown_containers().await?))
}

async fn get_containers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let containers = state.queries.all_containers().await?;
    Ok(Json(json!({
        "count": containers.len(),
        "containers": containers,
    })))
}

async fn get_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = state.queries.all_records().await?;
    Ok(Json(json!({
        "count": transactions.len(),
        "transactions": transactions,
    })))
}
