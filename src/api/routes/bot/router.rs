//! Router for the bot API

use std::sync::Arc;

use axum::{Json, Router, extract::State, extract::rejection::JsonRejection, routing::post};
use tracing::Instrument;
use uuid::Uuid;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

/// Reply to the last turn of the posted history
async fn bot_handler(
    State(state): State<SharedState>,
    payload: Result<Json<public::BotRequest>, JsonRejection>,
) -> Result<Json<public::BotResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let span = tracing::info_span!("replay", request_id = %Uuid::new_v4());
    let reply = async {
        tracing::info!("Received history with {} turns", payload.history.len());
        state
            .replayer
            .reply(&payload.history)
            .await
            .map_err(ApiError::from)
    }
    .instrument(span)
    .await?;

    Ok(Json(public::BotResponse { reply }))
}

/// Create the bot router
pub fn router() -> Router<SharedState> {
    Router::new().route("/bot", post(bot_handler))
}
