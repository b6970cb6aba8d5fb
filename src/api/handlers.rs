// src/api/handlers.rs

use crate::api::{types::*, ApiState, SESSION_HEADER};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Session token sent by the client, if any.
fn session_from(headers: &HeaderMap) -> Option<&str> {
    headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok())
}

/// Attach the session token so the client can reuse it.
fn with_session<T: IntoResponse>(token: &str, body: T) -> Response {
    let mut response = body.into_response();
    match HeaderValue::from_str(token) {
        Ok(value) => {
            response.headers_mut().insert(SESSION_HEADER, value);
        }
        Err(e) => tracing::warn!("Session token not representable as a header: {e}"),
    }
    response
}

/// POST /api/v1/scenario/suggest — Analyze a scenario with AI or the fallback coach.
pub async fn suggest(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(body): Json<SuggestRequest>,
) -> Result<Response, ApiError> {
    if body.scenario.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Scenario cannot be empty".into(),
            }),
        ));
    }

    let outcome = state
        .service
        .analyze_scenario(session_from(&headers), &body.scenario)
        .await;

    let token = outcome.session_token.clone();
    let response = SuggestResponse::from_outcome(body.scenario, outcome);
    Ok(with_session(&token, Json(response)))
}

/// POST /api/v1/scenario/opt-in
pub async fn opt_in(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    let outcome = state.service.opt_in(session_from(&headers));
    let message = if outcome.success {
        "AI analysis enabled"
    } else {
        "Failed to enable AI"
    };
    with_session(
        &outcome.session_token,
        Json(ToggleResponse {
            success: outcome.success,
            message: message.into(),
            usage: outcome.usage,
        }),
    )
}

/// POST /api/v1/scenario/opt-out
pub async fn opt_out(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    let outcome = state.service.opt_out(session_from(&headers));
    let message = if outcome.success {
        "AI analysis disabled"
    } else {
        "Failed to disable AI"
    };
    with_session(
        &outcome.session_token,
        Json(ToggleResponse {
            success: outcome.success,
            message: message.into(),
            usage: outcome.usage,
        }),
    )
}

/// GET /api/v1/scenario/usage — Quota position of the caller's session.
pub async fn usage(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    let status = state.service.usage_status(session_from(&headers));
    with_session(
        &status.session_token,
        Json(UsageResponse {
            usage: status.usage,
            ai_status: status.ai_status,
            can_use_ai: status.can_use_ai,
        }),
    )
}

/// GET /api/v1/scenario/coaching-tips
pub async fn coaching_tips(State(state): State<ApiState>) -> Json<TipsResponse> {
    Json(TipsResponse {
        tips: state.service.coaching_tips(),
    })
}

/// GET /api/v1/health — Simple health check.
pub async fn health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "providers": state.service.chain().available_ids(),
    }))
}
