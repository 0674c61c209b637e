use axum::{
    Router,
    routing::{get, post, put},
};
use leavedesk_core::store::Store;
use std::sync::Arc;

use crate::{
    ApiState,
    handlers::{balance, leave},
};

pub fn routes<S: Store>() -> Router<Arc<ApiState<S>>> {
    Router::new()
        .route("/api/leave-balance", get(balance::my_balance::<S>))
        .route(
            "/api/leave-requests",
            get(leave::my_requests::<S>).post(leave::submit::<S>),
        )
        .route("/api/leave-requests/team", get(leave::team_pending::<S>))
        .route("/api/leave-requests/:id", put(leave::update::<S>))
        .route("/api/leave-requests/:id/cancel", post(leave::cancel::<S>))
        .route("/api/leave-requests/:id/approve", post(leave::approve::<S>))
        .route("/api/leave-requests/:id/reject", post(leave::reject::<S>))
}
