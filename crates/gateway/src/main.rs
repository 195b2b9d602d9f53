//! Dataset Catalog API Gateway
//!
//! The entry point for all external API requests.
//! Handles:
//! - Request routing for the dataset endpoints
//! - CORS for the browser front end
//! - Observability (logging, metrics, tracing)

mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use catalog_common::{
    config::{AppConfig, ObservabilityConfig},
    db::DbPool,
    errors::AppError,
    metrics, DatasetService, Repository,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::{limit::ConcurrencyLimitLayer, ServiceBuilder};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
    pub datasets: DatasetService,
}

impl AppState {
    /// Connect to the database and wire the store into the service
    pub async fn build(config: AppConfig) -> Result<Self, AppError> {
        let db = DbPool::new(&config.database).await?;

        let store = Repository::new(db.clone()).with_batch_size(config.catalog.batch_size);
        let datasets = DatasetService::new(Arc::new(store), config.catalog.clone());

        Ok(Self {
            config: Arc::new(config),
            db,
            datasets,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match std::env::var("APP_CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path)?,
        Err(_) => AppConfig::load()?,
    };

    // Initialize tracing
    init_tracing(&config.observability);

    info!(
        service = %config.observability.service_name,
        "Starting Dataset Catalog gateway v{}",
        catalog_common::VERSION
    );

    // Initialize metrics
    if config.observability.metrics_port != 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .set_buckets(metrics::LATENCY_BUCKETS)?
            .with_http_listener(metrics_addr)
            .install()?;
        info!("Metrics exporter listening on {}", metrics_addr);
    }
    metrics::register_metrics();

    // Initialize database connection and services
    info!("Connecting to database...");
    let state = AppState::build(config).await?;

    let addr: SocketAddr = format!("{}:{}", state.config.server.host, state.config.server.port).parse()?;

    // Build the router
    let app = create_router(state);

    // Start the server
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logging {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    let server = &state.config.server;

    // CORS: only the configured front-end origins
    let origins: Vec<HeaderValue> = server
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // Batch saves are left out of the timeout: dropping one mid-way would
    // leave earlier chunks committed without reporting it.
    let timeout = TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        state.config.request_timeout(),
    );

    let middleware = ServiceBuilder::new()
        .layer(ConcurrencyLimitLayer::new(server.max_concurrent_requests));

    let body_limit = DefaultBodyLimit::max(server.max_body_bytes);

    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))

        // Dataset endpoints
        .route(
            "/api/datasets",
            get(handlers::datasets::list_datasets).post(handlers::datasets::create_dataset),
        )
        .route("/api/datasets/{id}", get(handlers::datasets::get_dataset))
        .layer(timeout)

        .route("/api/datasets/batch", post(handlers::datasets::create_datasets_in_batches))

        .layer(body_limit)
        .layer(middleware)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(propagate_id)
        .layer(request_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
