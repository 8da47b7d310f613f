use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::challenge::{ChallengeResponse, CreateChallengeRequest},
    models::{Actor, Participant},
    services::setup,
};

use crate::error::WebError;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/challenges",
    request_body = CreateChallengeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Challenge created with its full match grid", body = ChallengeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "A player appears twice in the draw")
    ),
    tag = "challenges"
)]
pub async fn create_challenge(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<CreateChallengeRequest>,
) -> Result<Response, WebError> {
    let challenge = setup::create_challenge(state.store.as_ref(), &actor, &req).await?;

    Ok((StatusCode::CREATED, Json(ChallengeResponse::from(challenge))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/join/{code}",
    params(
        ("code" = String, Path, description = "Challenge invite code")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Membership of the actor", body = Participant),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Unknown invite code")
    ),
    tag = "challenges"
)]
pub async fn join_challenge(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(code): Path<String>,
) -> Result<Response, WebError> {
    let participant = setup::join_challenge(state.store.as_ref(), &actor, &code).await?;

    Ok(Json(participant).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::testing::{TestApp, body_json};

    fn create(app: &TestApp, user: Uuid, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/challenges")
            .header(header::AUTHORIZATION, app.bearer(user))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn draw(start: &str, end: &str, matches: usize) -> Value {
        json!({
            "name": "Friends",
            "tournament": "Australian Open 2024",
            "start_date": start,
            "end_date": end,
            "first_round": 5,
            "draw": (0..matches)
                .map(|i| json!({ "player1": format!("P{}", 2 * i), "player2": format!("P{}", 2 * i + 1) }))
                .collect::<Vec<_>>(),
        })
    }

    #[tokio::test]
    async fn test_create_and_join() {
        let app = TestApp::new().await;
        let creator = Uuid::new_v4();

        let response = app
            .router
            .clone()
            .oneshot(create(&app, creator, draw("2099-01-23", "2099-01-28", 4)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["created_by"], json!(creator));
        let code = body["invite_code"].as_str().unwrap().to_string();

        let joiner = Uuid::new_v4();
        let join = Request::builder()
            .method(Method::POST)
            .uri(format!("/api/join/{}", code))
            .header(header::AUTHORIZATION, app.bearer(joiner))
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(join).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["user_id"], json!(joiner));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_dates() {
        let app = TestApp::new().await;
        let response = app
            .router
            .clone()
            .oneshot(create(&app, Uuid::new_v4(), draw("2099-01-23", "2099-01-01", 4)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_uneven_draw() {
        let app = TestApp::new().await;
        let response = app
            .router
            .clone()
            .oneshot(create(&app, Uuid::new_v4(), draw("2099-01-23", "2099-01-28", 3)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_reports_field_details() {
        let app = TestApp::new().await;
        let mut body = draw("2099-01-23", "2099-01-28", 4);
        body["name"] = json!("");
        body["first_round"] = json!(i32::MAX);

        let response = app
            .router
            .clone()
            .oneshot(create(&app, Uuid::new_v4(), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], json!("Validation failed"));
        assert_eq!(body["details"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_join_unknown_code() {
        let app = TestApp::new().await;
        let join = Request::builder()
            .method(Method::POST)
            .uri("/api/join/ZZZZZZZZ")
            .header(header::AUTHORIZATION, app.bearer(Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(join).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
