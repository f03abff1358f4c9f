use lms_server::{
    AppState, build_router,
    cli::{Cli, Commands},
    create_user::create_user,
    error::{Result as ServerErrorResult, ServerError},
    logger,
};

use lms_auth::{JwtAlgorithm, JwtValidator, TokenIssuer, TokenLifetimes};
use lms_config::Config;
use lms_db::UserRepository;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use sqlx::SqlitePool;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // .env is optional
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<PathBuf> = if let Some(ref filename) = config.logging.file {
        let log_dir = config.resolve_path(&config.logging.dir)?;

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting lms-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let pool = lms_db::connect(&config.database_path()?).await?;
    info!("Database connection established");

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config, pool).await?,
        Commands::CreateUser(args) => {
            let user = create_user(pool, args).await?;
            println!("Created user {} ({})", user.id, user.username);
        }
    }

    Ok(())
}

async fn serve(config: &Config, pool: SqlitePool) -> ServerErrorResult<()> {
    let algorithm = jwt_algorithm(config)?;
    info!("JWT: {} signing enabled", algorithm.name());

    let token_issuer = TokenIssuer::new(
        &algorithm,
        TokenLifetimes::from_secs(
            config.auth.access_token_lifetime_secs,
            config.auth.refresh_token_lifetime_secs,
        ),
    )?;
    let jwt_validator = JwtValidator::new(&algorithm, config.auth.leeway_secs)?;

    let users = Arc::new(UserRepository::new(pool.clone()));

    // Build application state
    let app_state = AppState {
        pool,
        token_issuer: Arc::new(token_issuer),
        jwt_validator: Arc::new(jwt_validator),
        credentials: users.clone(),
        identities: users,
    };

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

/// Signing keys from config; key files are resolved against the config directory
fn jwt_algorithm(config: &Config) -> ServerErrorResult<JwtAlgorithm> {
    if let Some(ref secret) = config.auth.jwt_secret {
        return Ok(JwtAlgorithm::HS256 {
            secret: secret.as_bytes().to_vec(),
        });
    }

    match (
        &config.auth.jwt_private_key_path,
        &config.auth.jwt_public_key_path,
    ) {
        (Some(private_path), Some(public_path)) => Ok(JwtAlgorithm::RS256 {
            private_key_pem: read_key_file(config, private_path)?,
            public_key_pem: read_key_file(config, public_path)?,
        }),
        _ => Err(ServerError::Config(lms_config::ConfigError::auth(
            "no JWT signing key configured",
        ))),
    }
}

fn read_key_file(config: &Config, relative: &str) -> ServerErrorResult<String> {
    let full_path = config.resolve_path(relative)?;
    std::fs::read_to_string(&full_path).map_err(|e| ServerError::JwtKeyFile {
        path: full_path.display().to_string(),
        source: e,
    })
}
