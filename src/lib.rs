pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;

use axum::routing::{get, post};
use axum::Router;
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenService;
use crate::config::AppConfig;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: AppConfig,
    pub tokens: TokenService,
}

impl AppState {
    /// The token service is built here, from the configured secret; the
    /// secret is not read anywhere else.
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let tokens = TokenService::new(
            &config.security.jwt_secret,
            config.security.token_ttl_hours,
        );
        Self { pool, config, tokens }
    }
}

/// Assemble the full router: public routes merged with the token-gated
/// protected routes, wrapped in CORS and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public::{auth, health};

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/api/v1/auth/login", post(auth::login_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::forms;

    Router::new()
        .route(
            "/api/v1/kpa/forms",
            post(forms::form_create).get(forms::form_list),
        )
        .route("/api/v1/kpa/forms/:id", get(forms::form_show))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::jwt_auth_middleware,
        ))
}
