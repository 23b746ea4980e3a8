//! BFAS profile service
//!
//! Serves the scoring and interpretation endpoints over HTTP.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use thiserror::Error;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bfas_profile::adapters::ai::{AnthropicProvider, DisabledAIProvider};
use bfas_profile::adapters::http::{app_router, AssessmentAppState};
use bfas_profile::application::{InterpretProfileHandler, ScoreAssessmentHandler};
use bfas_profile::config::{AppConfig, ConfigError, LogFormat, ServerConfig, ValidationError};
use bfas_profile::domain::assessment::{NormTableError, ProfileCalculator};
use bfas_profile::ports::{AIError, AIProvider};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to load norm tables: {0}")]
    Norms(#[from] NormTableError),

    #[error("failed to read knowledge base: {0}")]
    KnowledgeBase(#[source] std::io::Error),

    #[error("failed to initialize AI provider: {0}")]
    Provider(#[from] AIError),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let norms = config.scoring.load_norms()?;
    let knowledge_base = config
        .scoring
        .load_knowledge_base()
        .map_err(StartupError::KnowledgeBase)?
        .map(Arc::<str>::from);

    let scorer = ScoreAssessmentHandler::new(Arc::new(ProfileCalculator::new(norms)));
    let provider = build_provider(&config)?;
    let interpreter = InterpretProfileHandler::new(
        scorer.clone(),
        provider,
        knowledge_base,
        config.ai.max_tokens,
    )
    .with_deadline(config.ai.interpretation_timeout());
    let state = AssessmentAppState::new(scorer, Arc::new(interpreter));

    let app = app_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        %addr,
        environment = ?config.server.environment,
        version = env!("CARGO_PKG_VERSION"),
        "BFAS profile service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| server.log_level.clone().into());

    match server.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

fn build_provider(config: &AppConfig) -> Result<Arc<dyn AIProvider>, StartupError> {
    match config.ai.anthropic_config() {
        Some(anthropic) => {
            info!(model = %anthropic.model, "Narrative interpretation enabled");
            Ok(Arc::new(AnthropicProvider::new(anthropic)?))
        }
        None if !config.ai.enabled => {
            info!("Narrative interpretation disabled by configuration");
            Ok(Arc::new(DisabledAIProvider::new(
                "narrative interpretation is disabled",
            )))
        }
        None => {
            warn!("No Anthropic API key configured; interpretation will be unavailable");
            Ok(Arc::new(DisabledAIProvider::new(
                "no AI provider API key configured",
            )))
        }
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        if server.is_production() {
            return CorsLayer::new();
        }
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::list([axum::http::header::CONTENT_TYPE]))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
