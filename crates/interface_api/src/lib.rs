//! HTTP API Layer
//!
//! This crate provides the REST API for the rental core using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for leases, invoices, and advance rent
//! - **Middleware**: Authentication, audit logging, tracing
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{lease, invoice, advance, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let state = AppState { pool, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Lease routes, advance-rent operations nested under the lease
    let lease_routes = Router::new()
        .route("/", post(lease::create_lease))
        .route("/", get(lease::list_leases))
        .route("/:id", get(lease::get_lease))
        .route("/:id/advance-rent", post(advance::collect_advance))
        .route("/:id/advance-rent/apply", post(advance::retroactively_apply))
        .route("/:id/advance-rent/coverage", get(advance::check_coverage))
        .route("/:id/ledger", get(advance::list_ledger_entries))
        .route("/:id/invoices", post(invoice::create_invoice))
        .route("/:id/invoices", get(invoice::list_invoices));

    // Invoice routes addressed by invoice id
    let invoice_routes = Router::new()
        .route("/:id/cancel", post(invoice::cancel_invoice));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/leases", lease_routes)
        .nest("/invoices", invoice_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
