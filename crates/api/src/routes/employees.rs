use axum::{Router, routing::get};
use leavedesk_core::store::Store;
use std::sync::Arc;

use crate::{ApiState, handlers::employee};

pub fn routes<S: Store>() -> Router<Arc<ApiState<S>>> {
    Router::new()
        .route("/api/employees/me", get(employee::profile::<S>))
        .route("/api/employees/team", get(employee::team_members::<S>))
        .route("/api/employees/team/present", get(employee::present_today::<S>))
}
