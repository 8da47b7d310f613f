use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    dto::tournament_match::{
        DeclareResultRequest, MatchFilter, MatchResponse, UpdatePlayersRequest,
    },
    models::Actor,
    services::results,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/challenges/{challenge_id}/matches",
    params(
        ("challenge_id" = Uuid, Path, description = "Challenge ID"),
        MatchFilter
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Official matches ordered by round and position", body = Vec<MatchResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Challenge not found")
    ),
    tag = "matches"
)]
pub async fn list_matches(
    State(state): State<AppState>,
    Path(challenge_id): Path<Uuid>,
    Query(filter): Query<MatchFilter>,
) -> Result<Json<Vec<MatchResponse>>, WebError> {
    let matches = results::list_matches(state.store.as_ref(), challenge_id, filter.round).await?;

    let response: Vec<MatchResponse> = matches.into_iter().map(MatchResponse::from).collect();

    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/challenges/{challenge_id}/matches/{match_id}/result",
    params(
        ("challenge_id" = Uuid, Path, description = "Challenge ID"),
        ("match_id" = Uuid, Path, description = "Match ID")
    ),
    request_body = DeclareResultRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Result declared and winner advanced", body = MatchResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Actor is not the challenge admin"),
        (status = 404, description = "Match not found in this challenge"),
        (status = 422, description = "Winner is not a contestant of the match")
    ),
    tag = "matches"
)]
pub async fn declare_result(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((challenge_id, match_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<DeclareResultRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = results::declare_result(
        state.store.as_ref(),
        &actor,
        challenge_id,
        match_id,
        &req.winner,
    )
    .await?;

    Ok(Json(MatchResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/challenges/{challenge_id}/matches/{match_id}/result",
    params(
        ("challenge_id" = Uuid, Path, description = "Challenge ID"),
        ("match_id" = Uuid, Path, description = "Match ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Result cleared", body = MatchResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Actor is not the challenge admin"),
        (status = 404, description = "Match not found in this challenge")
    ),
    tag = "matches"
)]
pub async fn reset_result(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((challenge_id, match_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let updated =
        results::reset_result(state.store.as_ref(), &actor, challenge_id, match_id).await?;

    Ok(Json(MatchResponse::from(updated)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/challenges/{challenge_id}/matches/{match_id}/players",
    params(
        ("challenge_id" = Uuid, Path, description = "Challenge ID"),
        ("match_id" = Uuid, Path, description = "Match ID")
    ),
    request_body = UpdatePlayersRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Players updated", body = MatchResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Actor is not the challenge admin"),
        (status = 404, description = "Match not found in this challenge"),
        (status = 409, description = "Match already has a result"),
        (status = 422, description = "Both slots hold the same player")
    ),
    tag = "matches"
)]
pub async fn set_players(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((challenge_id, match_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdatePlayersRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated =
        results::set_players(state.store.as_ref(), &actor, challenge_id, match_id, &req).await?;

    Ok(Json(MatchResponse::from(updated)).into_response())
}
