use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::models::{AdhocSessionRequest, JoinSessionRequest, JoinSessionResponse};
use crate::state::AppState;

/// Session routes under /api/v1/sessions
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/join", post(join_session))
        .route("/adhoc", post(start_adhoc_session))
}

/// Path the existing web client already calls
pub fn legacy_routes() -> Router<AppState> {
    Router::new().route("/bbb-join", post(join_session))
}

/// Parse a JSON body that must be an object.
///
/// Parsed by hand so a malformed payload gets the uniform `{error}` shape
/// instead of axum's plain-text rejection. Arrays and scalars carry no named
/// fields, so they are read as an empty request and fail validation.
fn parse_object<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T> {
    match serde_json::from_slice::<Value>(body)? {
        object @ Value::Object(_) => Ok(serde_json::from_value(object)?),
        _ => Ok(T::default()),
    }
}

/// POST /api/v1/sessions/join - Create or reuse the course room and return a join URL
async fn join_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<JoinSessionResponse>> {
    let request: JoinSessionRequest = parse_object(&body)?;
    let response = state.provisioner.join_course_session(&request).await?;

    tracing::info!(meeting_id = %response.meeting_id, "Course session join URL issued");

    Ok(Json(response))
}

/// POST /api/v1/sessions/adhoc - Start a one-off room
async fn start_adhoc_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<JoinSessionResponse>> {
    let request: AdhocSessionRequest = parse_object(&body)?;
    let response = state.provisioner.start_adhoc_session(&request).await?;

    tracing::info!(meeting_id = %response.meeting_id, "Ad-hoc session join URL issued");

    Ok(Json(response))
}
