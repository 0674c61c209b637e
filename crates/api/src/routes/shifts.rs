use axum::{
    Router,
    routing::{get, put},
};
use leavedesk_core::store::Store;
use std::sync::Arc;

use crate::{ApiState, handlers::shift};

pub fn routes<S: Store>() -> Router<Arc<ApiState<S>>> {
    Router::new()
        .route("/api/shifts", get(shift::my_shifts::<S>).post(shift::assign::<S>))
        .route("/api/shifts/team", get(shift::team_shifts::<S>))
        .route("/api/shifts/:id", put(shift::update::<S>))
}
