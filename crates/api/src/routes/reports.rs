use axum::{Router, routing::get};
use leavedesk_core::store::Store;
use std::sync::Arc;

use crate::{ApiState, handlers::report};

pub fn routes<S: Store>() -> Router<Arc<ApiState<S>>> {
    Router::new().route("/api/reports/team", get(report::team_report::<S>))
}
