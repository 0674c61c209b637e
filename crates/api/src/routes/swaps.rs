use axum::{
    Router,
    routing::{get, post, put},
};
use leavedesk_core::store::Store;
use std::sync::Arc;

use crate::{ApiState, handlers::swap};

pub fn routes<S: Store>() -> Router<Arc<ApiState<S>>> {
    Router::new()
        .route(
            "/api/shift-swaps",
            get(swap::my_requests::<S>).post(swap::create::<S>),
        )
        .route("/api/shift-swaps/team", get(swap::team_pending::<S>))
        .route("/api/shift-swaps/:id", put(swap::update::<S>))
        .route("/api/shift-swaps/:id/cancel", post(swap::cancel::<S>))
        .route("/api/shift-swaps/:id/approve", post(swap::approve::<S>))
        .route("/api/shift-swaps/:id/reject", post(swap::reject::<S>))
}
