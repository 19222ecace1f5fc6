use axum::extract::{Path, State};
use axum::Json;

use vacpoints_core::settings::Profile;

use crate::error::{ok, ApiResult};
use crate::state::AppState;

pub async fn get_profile(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Profile> {
    Ok(ok(state.settings.load(&name).await?))
}

pub async fn put_profile(
    Path(name): Path<String>,
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> ApiResult<Profile> {
    Ok(ok(state.settings.save(&name, profile).await?))
}
