use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use vacpoints_app::calculator_service::{QuoteOutcome, ResortDetails, StayRequest};
use vacpoints_app::error::AppError;
use vacpoints_core::classify::{Bucket, CoverageReport};
use vacpoints_core::pricing::PricingTable;
use vacpoints_core::quote::{Comparison, QuoteTerms, RoomSummary, WeeklyCostTable};
use vacpoints_core::resort::ResortInfo;
use vacpoints_ports::outbound::QuoteExporter;

use crate::error::{ok, ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct Classification {
    pub date: NaiveDate,
    pub bucket: Option<Bucket>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub room: String,
    #[serde(flatten)]
    pub stay: StayRequest,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub rooms: Vec<String>,
    #[serde(flatten)]
    pub stay: StayRequest,
}

pub async fn list_resorts(State(state): State<AppState>) -> ApiResult<Vec<ResortInfo>> {
    Ok(ok(state.calculator.list_resorts().await?))
}

pub async fn get_resort(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<ResortDetails> {
    Ok(ok(state.calculator.resort_info(&id).await?))
}

pub async fn classify(
    Path(id): Path<String>,
    Query(query): Query<ClassifyQuery>,
    State(state): State<AppState>,
) -> ApiResult<Classification> {
    let bucket = state.calculator.classify(&id, query.date).await?;
    Ok(ok(Classification {
        date: query.date,
        bucket,
    }))
}

pub async fn coverage(
    Path((id, year)): Path<(String, i32)>,
    State(state): State<AppState>,
) -> ApiResult<CoverageReport> {
    Ok(ok(state.calculator.coverage(&id, year).await?))
}

pub async fn pricing_table(
    Path((id, year)): Path<(String, i32)>,
    State(state): State<AppState>,
) -> ApiResult<PricingTable> {
    Ok(ok(state.calculator.pricing_table(&id, year).await?))
}

pub async fn quote(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> ApiResult<QuoteOutcome> {
    let outcome = state
        .calculator
        .quote(&id, &req.room, &req.stay, Utc::now())
        .await?;
    Ok(ok(outcome))
}

pub async fn quote_csv(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .calculator
        .quote(&id, &req.room, &req.stay, Utc::now())
        .await?;
    let body = state
        .exporter
        .export(&outcome.quote)
        .map_err(AppError::from)?;
    let disposition = format!(
        "attachment; filename=\"{}-{}.csv\"",
        id,
        outcome.quote.stay.checkin()
    );
    Ok((
        [
            (header::CONTENT_TYPE, state.exporter.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

pub async fn compare(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> ApiResult<Comparison> {
    let comparison = state
        .calculator
        .compare(&id, &req.rooms, &req.stay, Utc::now())
        .await?;
    Ok(ok(comparison))
}

pub async fn room_summary(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<StayRequest>,
) -> ApiResult<Vec<RoomSummary>> {
    Ok(ok(state
        .calculator
        .room_summary(&id, &req, Utc::now())
        .await?))
}

pub async fn weekly_costs(
    Path((id, year)): Path<(String, i32)>,
    State(state): State<AppState>,
    Json(terms): Json<QuoteTerms>,
) -> ApiResult<WeeklyCostTable> {
    Ok(ok(state.calculator.weekly_costs(&id, year, &terms).await?))
}
