//! Resort data editor. Every mutation goes through `EditorService`, which validates
//! the whole resort before it is stored.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use vacpoints_app::error::AppError;
use vacpoints_core::calendar::DateRange;
use vacpoints_core::ids::ResortId;
use vacpoints_core::resort::{DayCategory, HolidayWeek, Season};
use vacpoints_ports::outbound::DatasetSource;
use vacpoints_ports::types::ImportSummary;

use crate::error::{ok, ApiError, ApiResult, Envelope};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateResortRequest {
    pub name: String,
    pub timezone: String,
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: ResortId,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResortRequest {
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub timezone: String,
}

#[derive(Debug, Deserialize)]
pub struct YearRequest {
    pub year: i32,
}

#[derive(Debug, Deserialize)]
pub struct CopyYearRequest {
    pub from: i32,
    pub to: i32,
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub to: String,
}

#[derive(Debug, Deserialize)]
pub struct RoomPointsRequest {
    pub room: String,
    pub points: u32,
}

#[derive(Debug, Deserialize)]
pub struct FullWeekRequest {
    pub room: String,
    pub points: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RenameRoomRequest {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct Renamed {
    pub tables: usize,
}

fn parse_timezone(name: &str) -> Result<Tz, ApiError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ApiError::BadRequest(format!("unknown timezone: {name}")))
}

pub async fn create_resort(
    State(state): State<AppState>,
    Json(req): Json<CreateResortRequest>,
) -> Result<(StatusCode, Json<Envelope<Created>>), ApiError> {
    let timezone = parse_timezone(&req.timezone)?;
    let id = state.editor.create_resort(&req.name, timezone).await?;
    Ok((StatusCode::CREATED, ok(Created { id })))
}

pub async fn update_resort(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<UpdateResortRequest>,
) -> ApiResult<()> {
    let timezone = parse_timezone(&req.timezone)?;
    state
        .editor
        .update_details(&id, &req.name, req.full_name, req.address, timezone)
        .await?;
    Ok(ok(()))
}

pub async fn delete_resort(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<()> {
    state.editor.delete_resort(&id).await?;
    Ok(ok(()))
}

pub async fn add_year(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<YearRequest>,
) -> ApiResult<()> {
    state.editor.add_year(&id, req.year).await?;
    Ok(ok(()))
}

pub async fn copy_year(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<CopyYearRequest>,
) -> ApiResult<()> {
    state.editor.copy_year(&id, req.from, req.to).await?;
    Ok(ok(()))
}

pub async fn remove_year(
    Path((id, year)): Path<(String, i32)>,
    State(state): State<AppState>,
) -> ApiResult<()> {
    state.editor.remove_year(&id, year).await?;
    Ok(ok(()))
}

pub async fn upsert_season(
    Path((id, year)): Path<(String, i32)>,
    State(state): State<AppState>,
    Json(season): Json<Season>,
) -> ApiResult<()> {
    state.editor.upsert_season(&id, year, season).await?;
    Ok(ok(()))
}

pub async fn remove_season(
    Path((id, year, season)): Path<(String, i32, String)>,
    State(state): State<AppState>,
) -> ApiResult<()> {
    state.editor.remove_season(&id, year, &season).await?;
    Ok(ok(()))
}

pub async fn rename_season(
    Path((id, year, season)): Path<(String, i32, String)>,
    State(state): State<AppState>,
    Json(req): Json<RenameRequest>,
) -> ApiResult<()> {
    state
        .editor
        .rename_season(&id, year, &season, &req.to)
        .await?;
    Ok(ok(()))
}

pub async fn add_season_period(
    Path((id, year, season)): Path<(String, i32, String)>,
    State(state): State<AppState>,
    Json(period): Json<DateRange>,
) -> ApiResult<()> {
    state
        .editor
        .add_season_period(&id, year, &season, period)
        .await?;
    Ok(ok(()))
}

pub async fn remove_season_period(
    Path((id, year, season)): Path<(String, i32, String)>,
    State(state): State<AppState>,
    Json(period): Json<DateRange>,
) -> ApiResult<()> {
    state
        .editor
        .remove_season_period(&id, year, &season, period)
        .await?;
    Ok(ok(()))
}

pub async fn set_day_category(
    Path((id, year, season)): Path<(String, i32, String)>,
    State(state): State<AppState>,
    Json(category): Json<DayCategory>,
) -> ApiResult<()> {
    state
        .editor
        .set_day_category(&id, year, &season, category)
        .await?;
    Ok(ok(()))
}

pub async fn remove_day_category(
    Path((id, year, season, rate_class)): Path<(String, i32, String, String)>,
    State(state): State<AppState>,
) -> ApiResult<()> {
    state
        .editor
        .remove_day_category(&id, year, &season, &rate_class)
        .await?;
    Ok(ok(()))
}

pub async fn set_room_points(
    Path((id, year, season, rate_class)): Path<(String, i32, String, String)>,
    State(state): State<AppState>,
    Json(req): Json<RoomPointsRequest>,
) -> ApiResult<()> {
    state
        .editor
        .set_room_points(&id, year, &season, &rate_class, &req.room, req.points)
        .await?;
    Ok(ok(()))
}

pub async fn set_full_week(
    Path((id, year, season)): Path<(String, i32, String)>,
    State(state): State<AppState>,
    Json(req): Json<FullWeekRequest>,
) -> ApiResult<()> {
    state
        .editor
        .set_full_week(&id, year, &season, &req.room, req.points)
        .await?;
    Ok(ok(()))
}

pub async fn upsert_holiday(
    Path((id, year)): Path<(String, i32)>,
    State(state): State<AppState>,
    Json(holiday): Json<HolidayWeek>,
) -> ApiResult<()> {
    state.editor.upsert_holiday(&id, year, holiday).await?;
    Ok(ok(()))
}

pub async fn move_holiday(
    Path((id, year, name)): Path<(String, i32, String)>,
    State(state): State<AppState>,
    Json(dates): Json<DateRange>,
) -> ApiResult<()> {
    state.editor.move_holiday(&id, year, &name, dates).await?;
    Ok(ok(()))
}

pub async fn remove_holiday(
    Path((id, year, name)): Path<(String, i32, String)>,
    State(state): State<AppState>,
) -> ApiResult<()> {
    state.editor.remove_holiday(&id, year, &name).await?;
    Ok(ok(()))
}

pub async fn set_holiday_points(
    Path((id, year, name)): Path<(String, i32, String)>,
    State(state): State<AppState>,
    Json(req): Json<RoomPointsRequest>,
) -> ApiResult<()> {
    state
        .editor
        .set_holiday_points(&id, year, &name, &req.room, req.points)
        .await?;
    Ok(ok(()))
}

pub async fn rename_room_type(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<RenameRoomRequest>,
) -> ApiResult<Renamed> {
    let tables = state
        .editor
        .rename_room_type(&id, &req.from, &req.to)
        .await?;
    Ok(ok(Renamed { tables }))
}

pub async fn import_dataset(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<ImportSummary> {
    let dataset = state.dataset.parse(&body).map_err(AppError::from)?;
    Ok(ok(state.editor.import_dataset(dataset).await?))
}

pub async fn export_dataset(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let dataset = state.editor.export_dataset().await?;
    let body = state.dataset.export(&dataset).map_err(AppError::from)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resorts.json\"",
            ),
        ],
        body,
    ))
}
