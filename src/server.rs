use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::JwtAuthority;
use crate::config::{AppConfig, Environment};
use crate::database::{DatabaseManager, MemoryRecipeStore, PgRecipeStore, RecipeStore};
use crate::handlers;
use crate::middleware::jwt_auth_middleware;

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
    pub jwt: Arc<JwtAuthority>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecipeStore>, jwt: JwtAuthority) -> Self {
        Self {
            store,
            jwt: Arc::new(jwt),
        }
    }

    /// Postgres when a database URL is configured and `memory` is false,
    /// otherwise the in-process store
    pub async fn from_config(config: &AppConfig, memory: bool) -> anyhow::Result<Self> {
        let jwt = JwtAuthority::from_config(&config.security);
        if config.security.jwt_secret.is_empty() {
            tracing::warn!("SECURITY_JWT_SECRET is not set; every authenticated request will be rejected");
        }

        let store: Arc<dyn RecipeStore> = match (&config.database.url, memory) {
            (Some(_), false) => {
                let pool = DatabaseManager::connect(&config.database).await?;
                DatabaseManager::migrate(&pool).await?;
                tracing::info!("Using Postgres recipe store");
                Arc::new(PgRecipeStore::new(pool))
            }
            _ => {
                tracing::warn!("Using in-memory recipe store; data will not survive a restart");
                Arc::new(MemoryRecipeStore::new())
            }
        };

        Ok(Self::new(store, jwt))
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        // Protected
        .merge(recipe_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(config));

    let router = if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn recipe_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::recipe;

    Router::new()
        .route(
            "/api/recipe/recipes",
            get(recipe::recipe_list).post(recipe::recipe_create),
        )
        .route(
            "/api/recipe/recipes/",
            get(recipe::recipe_list).post(recipe::recipe_create),
        )
        .route("/api/recipe/recipes/:id", get(recipe::recipe_retrieve))
        .route("/api/recipe/recipes/:id/", get(recipe::recipe_retrieve))
        // route_layer: unknown paths still 404 instead of 401
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !config.security.enable_cors {
        return CorsLayer::new();
    }
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &AppConfig, port: Option<u16>, memory: bool) -> anyhow::Result<()> {
    tracing::info!("Starting Recipe API in {:?} mode", config.environment);

    let state = AppState::from_config(config, memory).await?;
    let app = app(state, config);

    let bind_addr = format!("0.0.0.0:{}", port.unwrap_or(config.server.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Recipe API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Recipe API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
