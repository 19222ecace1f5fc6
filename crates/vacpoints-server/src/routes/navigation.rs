use axum::Json;
use serde::{Deserialize, Serialize};

use vacpoints_app::navigation::{NavAction, Navigation, View};
use vacpoints_core::quote::UserMode;

use crate::error::{ok, ApiResult};

/// The shell keeps its own view; the server only checks and applies transitions.
#[derive(Debug, Deserialize)]
pub struct NavigationRequest {
    #[serde(default)]
    pub view: View,
    #[serde(flatten)]
    pub action: NavAction,
}

#[derive(Debug, Serialize)]
pub struct NavigationState {
    pub view: View,
    pub mode: Option<UserMode>,
}

pub async fn navigate(Json(req): Json<NavigationRequest>) -> ApiResult<NavigationState> {
    let mut nav = Navigation::resume(req.view);
    let view = nav.dispatch(req.action)?;
    Ok(ok(NavigationState {
        view,
        mode: view.mode(),
    }))
}
