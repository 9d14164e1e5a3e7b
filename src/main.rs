use axum::{middleware, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use leden_api::handlers;
use leden_api::middleware::jwt_auth_middleware;
use leden_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up LEDEN_JWT_SECRET etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = leden_api::config::config();
    tracing::info!("starting leden-api in {:?} mode", config.environment);

    let state = AppState::new(config);
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("LEDEN_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("leden-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected API behind JWT auth
        .merge(api_routes(state))
        // Global middleware; the browser client needs permissive CORS
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes(state: AppState) -> Router {
    use handlers::{auth, events, members, memberships, params, products};

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami))
        // Members
        .route("/api/members", get(members::list).post(members::create))
        .route(
            "/api/members/:id",
            get(members::get)
                .patch(members::update)
                .delete(members::remove),
        )
        // Memberships
        .route(
            "/api/memberships",
            get(memberships::list).post(memberships::create),
        )
        .route(
            "/api/memberships/:id",
            get(memberships::get)
                .patch(memberships::update)
                .delete(memberships::remove),
        )
        // Products
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/:id",
            get(products::get)
                .patch(products::update)
                .delete(products::remove),
        )
        // Events
        .route("/api/events", get(events::list).post(events::create))
        .route(
            "/api/events/:id",
            get(events::get).patch(events::update).delete(events::remove),
        )
        // Configuration parameters
        .route("/api/params", get(params::list))
        .route(
            "/api/params/:key",
            get(params::get).put(params::put).delete(params::remove),
        )
        .layer(middleware::from_fn(jwt_auth_middleware))
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "leden-api",
        "version": version,
        "description": "Membership administration backend for the club",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/api/auth/whoami (protected)",
            "members": "/api/members[/:id] (protected)",
            "memberships": "/api/memberships[/:id] (protected)",
            "products": "/api/products[/:id] (protected)",
            "events": "/api/events[/:id] (protected)",
            "params": "/api/params[/:key] (protected)",
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}
