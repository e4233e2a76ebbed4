use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::Instrument;

use crate::errors::AppError;
use crate::models::BotRequest;
use crate::state::AppState;

pub async fn handle_bot(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BotRequest>, JsonRejection>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("bot_request", %request_id);

    async move {
        let Json(request) = match payload {
            Ok(payload) => payload,
            Err(rejection) => {
                return AppError::Validation(rejection.body_text()).into_response();
            }
        };

        tracing::info!(
            user_id = request.user_id().unwrap_or("anonymous"),
            chars = request.transcript.len(),
            "handling transcript"
        );

        let now = chrono::Local::now().naive_local();
        match state.pipeline.process(&request, now).await {
            Ok(response) => {
                tracing::info!(intent = %response.intent(), "transcript processed");
                Json(response).into_response()
            }
            Err(e) => e.into_response(),
        }
    }
    .instrument(span)
    .await
}
