use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::{ChatRequest, HealthResponse, ReactionRequest};
use crate::service::analysis_service::AnalysisService;

const CHAT_FAILURE: &str = "Failed to generate response";
const REACTION_FAILURE: &str = "Failed to generate reaction";

/// POST `/api/chat`: one chatbot turn
pub async fn chat_handler(
    State(svc): State<AnalysisService>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_body(rejection, CHAT_FAILURE),
    };
    debug!("Chat turn with {} byte message", request.message.len());

    match svc.chat(request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => err.into_response_with(CHAT_FAILURE),
    }
}

/// POST `/api/meme`: meme reaction to an analysed report
pub async fn meme_handler(
    State(svc): State<AnalysisService>,
    payload: Result<Json<ReactionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_body(rejection, REACTION_FAILURE),
    };
    debug!(risk_score = ?request.risk_score, "Reaction requested");

    match svc.react(request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => err.into_response_with(REACTION_FAILURE),
    }
}

/// GET `/health`
pub async fn health_handler(State(svc): State<AnalysisService>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        model: svc.model().to_string(),
        prompt_version: svc.prompt_version().to_string(),
    })
}

fn invalid_body(rejection: JsonRejection, public_message: &str) -> Response {
    warn!("Rejected request body: {rejection}");
    AppError::InvalidBody { message: rejection.body_text() }.into_response_with(public_message)
}
