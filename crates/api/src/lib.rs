//! # leavedesk API
//!
//! The HTTP surface of the leave and shift workflow engine.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Resolve the caller and delegate to the workflow services
//! - **Middleware**: Caller identity extraction and error mapping
//! - **Config**: Environment configuration, including the leave policy
//!
//! Handlers are generic over the [`Store`] so the same router runs against
//! PostgreSQL in production and the in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers that delegate to the workflow services
pub mod handlers;
/// Caller identity and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
};
use chrono::{NaiveDate, NaiveDateTime};
use eyre::{Result, WrapErr};
use leavedesk_core::{
    clock::{Clock, SystemClock},
    policy::LeavePolicy,
    store::Store,
};
use leavedesk_db::{DbPool, PgStore};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::middleware::auth::{EMPLOYEE_ID_HEADER, EMPLOYEE_ROLE_HEADER};

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use leavedesk_api::{ApiState, app};
/// use leavedesk_core::{memory::InMemoryStore, policy::LeavePolicy};
///
/// let state = Arc::new(ApiState::new(InMemoryStore::new(), LeavePolicy::default()));
/// let router = app(state);
/// ```
pub struct ApiState<S> {
    pub store: S,
    pub policy: LeavePolicy,
    pub clock: Arc<dyn Clock>,
}

impl<S> ApiState<S> {
    pub fn new(store: S, policy: LeavePolicy) -> Self {
        Self {
            store,
            policy,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

/// Builds the application router with every resource merged in.
pub fn app<S: Store>(state: Arc<ApiState<S>>) -> Router {
    let router: Router<Arc<ApiState<S>>> = Router::new()
        // Health check endpoints
        .merge(routes::health::routes::<S>())
        // Employee directory
        .merge(routes::employees::routes::<S>())
        // Holiday calendar
        .merge(routes::holidays::routes::<S>())
        // Leave balance and leave requests
        .merge(routes::leave::routes::<S>())
        // Clock-in/clock-out and attendance history
        .merge(routes::attendance::routes::<S>())
        // Shift assignment and swaps
        .merge(routes::shifts::routes::<S>())
        .merge(routes::swaps::routes::<S>())
        // Manager dashboard
        .merge(routes::reports::routes::<S>());

    router.with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("Invalid API_CORS_ORIGINS entry")?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(EMPLOYEE_ID_HEADER),
            HeaderName::from_static(EMPLOYEE_ROLE_HEADER),
        ])
        .allow_origin(origins)
        .allow_credentials(true))
}

/// Starts the API server against PostgreSQL
///
/// Installs the tracing subscriber, wraps the pool in a [`PgStore`], applies
/// request tracing, the request timeout and (when configured) CORS, then
/// serves until the listener fails.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use leavedesk_api::{config::ApiConfig, start_server};
///
/// let config = ApiConfig::from_env()?;
/// let db_pool = leavedesk_db::create_pool(&config.database_url).await?;
/// start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(PgStore::new(db_pool), config.policy.clone()));

    let app = app(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
