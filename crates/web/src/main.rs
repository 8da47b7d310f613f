use std::sync::Arc;

use anyhow::Context;
use storage::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod state;
#[cfg(test)]
mod testing;

use config::Config;
use middleware::auth::JwtAuth;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::challenges::handlers::create_challenge,
        features::challenges::handlers::join_challenge,
        features::matches::handlers::list_matches,
        features::matches::handlers::declare_result,
        features::matches::handlers::reset_result,
        features::matches::handlers::set_players,
        features::picks::handlers::get_bracket,
        features::picks::handlers::list_picks,
        features::picks::handlers::record_pick,
    ),
    components(
        schemas(
            storage::dto::challenge::CreateChallengeRequest,
            storage::dto::challenge::DrawMatchRequest,
            storage::dto::challenge::ChallengeResponse,
            storage::dto::tournament_match::DeclareResultRequest,
            storage::dto::tournament_match::UpdatePlayersRequest,
            storage::dto::tournament_match::MatchResponse,
            storage::dto::pick::RecordPickRequest,
            storage::dto::pick::PickResponse,
            storage::dto::bracket::BracketView,
            storage::dto::bracket::RoundView,
            storage::dto::bracket::MatchView,
            storage::models::MatchStatus,
            storage::models::Participant,
        )
    ),
    tags(
        (name = "challenges", description = "Challenge creation and invites"),
        (name = "matches", description = "Official matches and admin results"),
        (name = "picks", description = "Participant picks and projected brackets"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting bracket challenge API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let auth = JwtAuth::new(&config.jwt_secret, config.jwt_audience.as_deref());
    let state = AppState::new(Arc::new(db), auth);

    let app = features::api_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);

    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/challenges",
            "/api/join/{code}",
            "/api/challenges/{challenge_id}/matches",
            "/api/challenges/{challenge_id}/matches/{match_id}/result",
            "/api/challenges/{challenge_id}/matches/{match_id}/players",
            "/api/challenges/{challenge_id}/bracket",
            "/api/challenges/{challenge_id}/picks",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {}",
                expected
            );
        }
    }
}
