use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    dto::{
        bracket::BracketView,
        pick::{PickResponse, RecordPickRequest},
    },
    models::Actor,
    services::picks,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/challenges/{challenge_id}/bracket",
    params(
        ("challenge_id" = Uuid, Path, description = "Challenge ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The actor's bracket projected from their picks", body = BracketView),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Challenge not found or actor is not a participant")
    ),
    tag = "picks"
)]
pub async fn get_bracket(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(challenge_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let view =
        picks::bracket_view(state.store.as_ref(), &actor, challenge_id, Utc::now()).await?;

    Ok(Json(view).into_response())
}

#[utoipa::path(
    get,
    path = "/api/challenges/{challenge_id}/picks",
    params(
        ("challenge_id" = Uuid, Path, description = "Challenge ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Stored picks of the actor", body = Vec<PickResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Actor is not a participant")
    ),
    tag = "picks"
)]
pub async fn list_picks(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(challenge_id): Path<Uuid>,
) -> Result<Json<Vec<PickResponse>>, WebError> {
    let stored = picks::list_picks(state.store.as_ref(), &actor, challenge_id).await?;

    Ok(Json(stored.into_iter().map(PickResponse::from).collect()))
}

#[utoipa::path(
    put,
    path = "/api/challenges/{challenge_id}/picks",
    params(
        ("challenge_id" = Uuid, Path, description = "Challenge ID")
    ),
    request_body = RecordPickRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pick stored, returns the refreshed bracket", body = BracketView),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Match not found in this challenge"),
        (status = 422, description = "Winner is not a contestant of the projected match"),
        (status = 423, description = "Challenge has started, picks are locked")
    ),
    tag = "picks"
)]
pub async fn record_pick(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(challenge_id): Path<Uuid>,
    Json(req): Json<RecordPickRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let view = picks::record_pick(
        state.store.as_ref(),
        &actor,
        challenge_id,
        &req,
        Utc::now(),
    )
    .await?;

    Ok(Json(view).into_response())
}
