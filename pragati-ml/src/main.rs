//! pragati-ml - Collaboration and performance scoring microservice
//!
//! **Module Identity:**
//! - Name: pragati-ml (ML Engine)
//! - Port: 8001 (default)
//!
//! Scores chat collaboration signals, predicts performance and generates
//! career recommendations over HTTP. `pragati-ml train` fits the optional
//! performance model offline.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pragati_common::config::{resolve_config_path, ConfigOverrides, CONFIG_ENV_VAR};
use pragati_common::TomlConfig;
use pragati_ml::scoring::{
    fit_samples, load_predictor, load_training_samples, FitOptions, LexiconClassifier,
    PerformancePredictor, TextClassifier,
};
use pragati_ml::{build_router, cors_layer, db, AppState};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "pragati-ml")]
#[command(about = "Collaboration and performance scoring service")]
#[command(version)]
struct Cli {
    /// Bootstrap config file (TOML)
    #[arg(long, env = CONFIG_ENV_VAR, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    serve: ServeArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Interface to bind
    #[arg(long, env = "PRAGATI_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PRAGATI_PORT")]
    port: Option<u16>,

    /// SQLite database for analysis history
    #[arg(long, env = "PRAGATI_DATABASE")]
    database: Option<PathBuf>,

    /// Trained performance model (JSON)
    #[arg(long, env = "PRAGATI_MODEL_PATH")]
    model: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PRAGATI_LOG_LEVEL")]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fit the performance model from labelled snapshots
    Train {
        /// JSON array of snapshots, each with a `score` field
        #[arg(long)]
        samples: PathBuf,

        /// Where to write the fitted model
        #[arg(long)]
        out: PathBuf,

        #[arg(long, default_value_t = 0.05)]
        learning_rate: f64,

        #[arg(long, default_value_t = 2000)]
        epochs: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TomlConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?
        .apply(ConfigOverrides {
            host: cli.serve.host.clone(),
            port: cli.serve.port,
            database_path: cli.serve.database.clone(),
            model_path: cli.serve.model.clone(),
            log_level: cli.serve.log_level.clone(),
        })
        .context("Invalid configuration")?;

    init_tracing(&config.logging.level);

    info!(
        "Starting Pragati ML Engine (pragati-ml) v{}",
        env!("CARGO_PKG_VERSION")
    );
    match resolve_config_path(cli.config.as_deref()) {
        Some(path) if path.exists() => info!("Configuration: {}", path.display()),
        Some(path) => warn!(
            "Config file {} not found, using built-in defaults",
            path.display()
        ),
        None => info!("Configuration: built-in defaults"),
    }

    match cli.command {
        Some(Commands::Train {
            samples,
            out,
            learning_rate,
            epochs,
        }) => train(samples, out, FitOptions {
            learning_rate,
            epochs,
        }),
        None => serve(config).await,
    }
}

fn init_tracing(level: &str) {
    // RUST_LOG wins over the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn train(samples_path: PathBuf, out: PathBuf, options: FitOptions) -> Result<()> {
    let samples = load_training_samples(&samples_path)
        .with_context(|| format!("Failed to read samples from {}", samples_path.display()))?;
    info!("Training on {} samples from {}", samples.len(), samples_path.display());

    let model = fit_samples(&samples, options).context("Training failed")?;

    let mse = samples
        .iter()
        .map(|s| (model.predict(&s.snapshot.features()) - s.score).powi(2))
        .sum::<f64>()
        / samples.len() as f64;
    info!("Training mean squared error: {:.4}", mse);

    model
        .save(&out)
        .with_context(|| format!("Failed to write model to {}", out.display()))?;
    info!("Model written to {}", out.display());

    Ok(())
}

async fn serve(config: TomlConfig) -> Result<()> {
    let classifier: Arc<dyn TextClassifier> =
        Arc::new(LexiconClassifier::new().context("Failed to build sentiment classifier")?);

    let predictor: Arc<dyn PerformancePredictor> =
        Arc::from(load_predictor(config.model_path.as_deref()));
    info!("Performance predictor: {}", predictor.mode());

    let mut state = AppState::new(classifier, predictor);
    info!("Sentiment classifier: {}", state.sentiment().classifier_name());
    match &config.database_path {
        Some(path) => {
            let pool = db::init_database_pool(path)
                .await
                .with_context(|| format!("Failed to open database {}", path.display()))?;
            info!("✓ Analysis history stored in {}", path.display());
            state = state.with_database(pool);
        }
        None => info!("No database configured, analysis history disabled"),
    }

    let app = build_router(state)
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("pragati-ml listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
