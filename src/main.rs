use axum::{middleware, routing::get, Router};
use axum::extract::State;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use arbiter_authz::config;
use arbiter_authz::database::Database;
use arbiter_authz::handlers;
use arbiter_authz::middleware::auth::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting arbiter-authz in {:?} mode", config.environment);

    let db = Database::connect()
        .unwrap_or_else(|e| panic!("failed to configure database: {}", e));

    let app = app(db);

    // Allow tests or deployments to override port via env
    let port = std::env::var("ARBITER_AUTHZ_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("arbiter-authz listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(db: Database) -> Router {
    // Authorization queries require a verified token
    let protected = Router::new()
        .route("/api/authz/can/:object_id/:action", get(handlers::authz::can))
        .route(
            "/api/authz/can-create/:object_type",
            get(handlers::authz::can_create),
        )
        .route(
            "/api/authz/readable/:object_type",
            get(handlers::authz::readable),
        )
        .route("/api/auth/whoami", get(handlers::whoami::whoami))
        .layer(middleware::from_fn(jwt_auth_middleware));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(protected)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Arbiter Authorization Service",
            "version": version,
            "description": "RBAC policy evaluation for the solar-forecast data platform",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "can": "/api/authz/can/:object_id/:action (protected)",
                "can_create": "/api/authz/can-create/:object_type (protected)",
                "readable": "/api/authz/readable/:object_type (protected)",
                "whoami": "/api/auth/whoami (protected)",
            }
        }
    }))
}

async fn health(State(db): State<Database>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match db.health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
