use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::catalog::facets::FacetOptions;
use crate::catalog::store::{open_store, CatalogStore, StoreConfig};
use crate::cli::ServeArgs;
use crate::core::selection::Selection;
use crate::matching::engine::{PlanConfig, PlanGenerator};
use crate::matching::predicate::Predicate;

/// Request body limit. Selections are a few short string lists.
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum in-flight requests
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Placeholder in the page template replaced by the facet options JSON
const FACET_OPTIONS_PLACEHOLDER: &str = "{{FACET_OPTIONS}}";

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub plan_config: PlanConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            plan_config: PlanConfig::default(),
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created, the store cannot
/// be opened, or the server fails to start.
pub fn run(args: ServeArgs, store_config: StoreConfig) -> anyhow::Result<()> {
    let rt = crate::cli::runtime()?;
    rt.block_on(async move { run_server(args, store_config).await })
}

/// Create the application router with all routes and middleware configured.
///
/// Rate limiting is added by [`run`] since it needs the peer address of a
/// real connection.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/generate_workout", post(generate_workout_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/static/css/styles.css", get(styles_css_handler))
        .route("/static/js/main.js", get(main_js_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    REQUEST_TIMEOUT,
                ))
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

async fn run_server(args: ServeArgs, store_config: StoreConfig) -> anyhow::Result<()> {
    // The process must not serve traffic without a working store
    let store = open_store(&store_config).await?;
    tracing::info!("Using {} catalog store", store.backend());

    let state = Arc::new(AppState::new(store));

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    let app = create_router(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let addr = format!("{}:{}", args.address, args.port);
    tracing::info!("Starting workout-planner web server at http://{addr}");

    let listener = TcpListener::bind(&addr).await?;

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Render the page template with the facet options embedded as JSON
pub fn render_index(options: &FacetOptions) -> Result<String, serde_json::Error> {
    // `<` is escaped so no value can close the surrounding script element
    let json = serde_json::to_string(options)?.replace('<', "\\u003c");
    Ok(include_str!("templates/index.html").replace(FACET_OPTIONS_PLACEHOLDER, &json))
}

/// Main page handler
async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let exercises = match state.store.query(&Predicate::always()).await {
        Ok(exercises) => exercises,
        Err(e) => return storage_error_response(&e.to_string()),
    };

    match render_index(&FacetOptions::from_exercises(&exercises)) {
        Ok(page) => Html(page).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(create_safe_error_response(
                "render_failed",
                "Unable to render page",
                Some(&e.to_string()),
            )),
        )
            .into_response(),
    }
}

/// Static CSS handler
async fn styles_css_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("static/css/styles.css"),
    )
}

/// Static JS handler
async fn main_js_handler() -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        include_str!("static/js/main.js"),
    )
}

/// Generate a workout plan from the selected facets
async fn generate_workout_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Selection>, JsonRejection>,
) -> Response {
    let selection = match payload {
        Ok(Json(selection)) => selection,
        Err(rejection) => {
            tracing::debug!("Rejected workout request: {rejection}");
            return (
                rejection.status(),
                Json(create_safe_error_response(
                    "invalid_request",
                    "Request body must be a JSON object with optional selected_types, selected_sports and selected_muscle_targets string arrays.",
                    None,
                )),
            )
                .into_response();
        }
    };

    let generator = PlanGenerator::with_config(state.store.as_ref(), state.plan_config.clone());
    match generator.generate(&selection).await {
        Ok(plan) => Json(plan).into_response(),
        Err(e) => storage_error_response(&e.to_string()),
    }
}

/// Return every exercise in the catalog
async fn catalog_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.store.query(&Predicate::always()).await {
        Ok(exercises) => Json(serde_json::json!({
            "count": exercises.len(),
            "exercises": exercises,
        }))
        .into_response(),
        Err(e) => storage_error_response(&e.to_string()),
    }
}

fn storage_error_response(internal: &str) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(create_safe_error_response(
            "storage_unavailable",
            "The exercise catalog is temporarily unavailable. Please try again later.",
            Some(internal),
        )),
    )
        .into_response()
}
