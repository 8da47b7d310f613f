use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use importer::{ChallengeImporter, DrawImporter, DrawValidator, ImportContext};
use storage::{BracketStore, Database, MemoryStore, models::Actor, services::setup};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "import")]
#[command(about = "Bracket challenge draw importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a challenge and its match grid from a draw file
    Draw {
        file: PathBuf,

        #[arg(long)]
        validate_only: bool,

        /// Build the grid in memory and print it instead of writing to the database
        #[arg(long, conflicts_with = "validate_only")]
        dry_run: bool,

        #[arg(long)]
        created_by: Option<Uuid>,
    },
    /// Register a user in a challenge through its invite code
    Join {
        invite_code: String,

        #[arg(long)]
        user: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Draw {
            file,
            validate_only,
            dry_run,
            created_by,
        } => {
            handle_draw_import(
                file,
                validate_only,
                dry_run,
                created_by,
                cli.database_url.as_deref(),
            )
            .await?;
        }
        Commands::Join { invite_code, user } => {
            handle_join(&invite_code, user, cli.database_url.as_deref()).await?;
        }
    }

    Ok(())
}

async fn connect(database_url: Option<&str>) -> Result<Database, Box<dyn std::error::Error>> {
    let database_url = database_url.ok_or("DATABASE_URL is required (or pass --database-url)")?;

    tracing::info!("Connecting to database...");
    let db = Database::new(database_url).await?;
    db.run_migrations().await?;

    Ok(db)
}

async fn handle_draw_import(
    file: PathBuf,
    validate_only: bool,
    dry_run: bool,
    created_by: Option<Uuid>,
    database_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = file.to_string_lossy().to_string();

    if validate_only {
        tracing::info!("Loading draw from: {}", path);
        let draw = DrawImporter::load(&path).await?;
        tracing::info!(
            "Loaded challenge: {} (v{}, {} matches)",
            draw.challenge.name,
            draw.format_version,
            draw.matches.len()
        );

        tracing::info!("Validating draw...");
        let report = DrawValidator::validate(&draw)?;
        report.log_warnings();
        tracing::info!("✓ Validation successful!");
        return Ok(());
    }

    let store: Arc<dyn BracketStore> = if dry_run {
        tracing::info!("Dry run, nothing is written to the database");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(connect(database_url).await?)
    };
    let context = ImportContext { store };

    let challenge = DrawImporter::new()
        .created_by(created_by)
        .import(&path, &context)
        .await?;

    if dry_run {
        let matches = context.store.get_matches(challenge.challenge_id, None).await?;
        for m in &matches {
            tracing::info!(
                "  round {} #{}: {} vs {}",
                m.round,
                m.position,
                m.player1.as_deref().unwrap_or("TBD"),
                m.player2.as_deref().unwrap_or("TBD")
            );
        }
    }

    tracing::info!("✓ Import completed successfully!");
    tracing::info!("   Invite code: {}", challenge.invite_code);

    Ok(())
}

async fn handle_join(
    invite_code: &str,
    user: Uuid,
    database_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = connect(database_url).await?;

    let participant = setup::join_challenge(&db, &Actor::new(user), invite_code).await?;

    tracing::info!(
        "✓ User {} is participant {} of challenge {}",
        user,
        participant.participant_id,
        participant.challenge_id
    );

    Ok(())
}
