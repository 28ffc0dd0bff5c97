// Carbon Calc - Web Server
// REST boundary for the calculation service: start, update, fetch result.
// Validation and computation failures surface as {success, message} JSON
// with the status code derived from the core error kind.

use axum::{
    extract::{Path, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use carbon_calc::{
    CalcError, CalculationResult, CarbonCalculationService, ErrorKind, SqliteStore,
    StartCalcRequest, UpdateCalcInfoRequest,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    service: Arc<CarbonCalculationService>,
}

// ============================================================================
// Wire DTOs
// ============================================================================

#[derive(Serialize)]
struct StartCalcResponse {
    id: String,
}

#[derive(Serialize)]
struct UpdateCalcInfoResponse {
    success: bool,
}

#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

/// Map a core error to its transport representation.
fn error_response(err: CalcError) -> Response {
    let status = match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = ErrorResponse {
        success: false,
        message: err.to_string(),
    };

    (status, Json(body)).into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// POST /open/start-calc - Create a calculation, returns the generated id
async fn start_calc(
    State(state): State<AppState>,
    Json(request): Json<StartCalcRequest>,
) -> Response {
    match state.service.start_calculation(&request) {
        Ok(id) => (StatusCode::CREATED, Json(StartCalcResponse { id })).into_response(),
        Err(err) => error_response(err),
    }
}

/// PUT /open/info - Update usage inputs and recompute emissions
async fn update_info(
    State(state): State<AppState>,
    Json(request): Json<UpdateCalcInfoRequest>,
) -> Response {
    match state.service.update_info(&request) {
        Ok(success) => {
            (StatusCode::OK, Json(UpdateCalcInfoResponse { success })).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// GET /open/result/:id - Fetch the four computed emission values
async fn get_result(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.service.get_result(&id) {
        Ok(result) => (StatusCode::OK, Json::<CalculationResult>(result)).into_response(),
        Err(err) => error_response(err),
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let db_path =
        std::env::var("CARBON_CALC_DB").unwrap_or_else(|_| "carbon_calc.db".to_string());
    let port: u16 = std::env::var("CARBON_CALC_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    info!("Opening store at {db_path}");
    let store = SqliteStore::open(&db_path).expect("Failed to open calculation store");
    let service = Arc::new(CarbonCalculationService::new(Arc::new(store)));

    let state = AppState { service };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any)
        .max_age(Duration::from_secs(60 * 60));

    let open_routes = Router::new()
        .route("/start-calc", post(start_calc))
        .route("/info", put(update_info))
        .route("/result/:id", get(get_result))
        .with_state(state);

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/open", open_routes)
        .layer(cors);

    let address = format!("0.0.0.0:{port}");
    info!("Binding to {address}");

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .expect("Failed to bind to address");
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    info!("Server shutting down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
