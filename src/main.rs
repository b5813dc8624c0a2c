use clap::Parser;
use daily_tracker::cli::{CliArgs, Commands};
use daily_tracker::deploy::{Blueprint, ensure_static_dir};
use daily_tracker::{Config, TrackerState, db::TrackerStorage, tracker_router};
use mimalloc::MiMalloc;
use std::path::Path;
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let outcome = match args.command() {
        Commands::Serve => serve(cfg).await,
        Commands::CheckManifest { path } => check_manifest(&path),
        Commands::PrepareStatic { dir } => ensure_static_dir(&dir).map(|created| {
            info!(path = %dir.display(), created, "static directory ready");
        }),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "exiting with failure");
            ExitCode::FAILURE
        }
    }
}

async fn serve(cfg: Config) -> Result<(), daily_tracker::TrackerError> {
    info!(
        database_url = %cfg.redacted_database_url(),
        static_dir = %cfg.static_dir.display(),
        loglevel = %cfg.loglevel,
        port = cfg.port
    );
    if cfg.uses_default_secret() {
        warn!("SECRET_KEY is not set; using the built-in development secret");
    }
    if cfg.uses_default_salt() {
        warn!("PASSWORD_SALT is not set; using the built-in development salt");
    }
    if !cfg.static_dir.join("index.html").is_file() {
        warn!(path = %cfg.static_dir.display(), "index.html not found; GET / will return 404");
    }

    let storage = TrackerStorage::connect(&cfg.database_url).await?;
    let state = TrackerState::new(storage, &cfg);
    let app = tracker_router(state);

    let addr = cfg.listen_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

fn check_manifest(path: &Path) -> Result<(), daily_tracker::TrackerError> {
    let summary = Blueprint::from_path(path)?.validate()?;
    info!(
        path = %path.display(),
        database = %summary.database,
        service = %summary.service,
        env_keys = %summary.env_keys.join(","),
        "blueprint is valid"
    );
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
