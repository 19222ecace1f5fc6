use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::Value;

use crate::routes::{calculator, editor, navigation, settings};
use crate::state::AppState;

pub fn create_router(app_state: AppState) -> Router {
    let resort_routes = Router::new()
        .route("/", get(calculator::list_resorts))
        .route("/:id", get(calculator::get_resort))
        .route("/:id/classify", get(calculator::classify))
        .route("/:id/coverage/:year", get(calculator::coverage))
        .route("/:id/pricing/:year", get(calculator::pricing_table))
        .route("/:id/quote", post(calculator::quote))
        .route("/:id/quote.csv", post(calculator::quote_csv))
        .route("/:id/compare", post(calculator::compare))
        .route("/:id/summary", post(calculator::room_summary))
        .route("/:id/weekly/:year", post(calculator::weekly_costs));

    let year = "/resorts/:id/years/:year";
    let season = "/resorts/:id/years/:year/seasons/:season";
    let holiday = "/resorts/:id/years/:year/holidays/:name";
    let editor_routes = Router::new()
        .route("/resorts", post(editor::create_resort))
        .route(
            "/resorts/:id",
            put(editor::update_resort).delete(editor::delete_resort),
        )
        .route("/resorts/:id/years", post(editor::add_year))
        .route("/resorts/:id/years/copy", post(editor::copy_year))
        .route("/resorts/:id/rooms/rename", post(editor::rename_room_type))
        .route(year, delete(editor::remove_year))
        .route(&format!("{year}/seasons"), put(editor::upsert_season))
        .route(season, delete(editor::remove_season))
        .route(&format!("{season}/rename"), post(editor::rename_season))
        .route(
            &format!("{season}/periods"),
            post(editor::add_season_period).delete(editor::remove_season_period),
        )
        .route(&format!("{season}/categories"), put(editor::set_day_category))
        .route(
            &format!("{season}/categories/:rate_class"),
            delete(editor::remove_day_category),
        )
        .route(
            &format!("{season}/categories/:rate_class/points"),
            put(editor::set_room_points),
        )
        .route(&format!("{season}/full-week"), put(editor::set_full_week))
        .route(&format!("{year}/holidays"), put(editor::upsert_holiday))
        .route(holiday, delete(editor::remove_holiday))
        .route(&format!("{holiday}/move"), post(editor::move_holiday))
        .route(&format!("{holiday}/points"), put(editor::set_holiday_points))
        .route("/import", post(editor::import_dataset))
        .route("/export", get(editor::export_dataset));

    let api_routes = Router::new()
        .nest("/resorts", resort_routes)
        .nest("/editor", editor_routes)
        .route("/navigation", post(navigation::navigate))
        .route(
            "/settings/:name",
            get(settings::get_profile).put(settings::put_profile),
        );

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .with_state(app_state)
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({"status": "ok", "success": true}))
}
