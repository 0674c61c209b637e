use axum::{
    Router,
    routing::{get, post},
};
use leavedesk_core::store::Store;
use std::sync::Arc;

use crate::{ApiState, handlers::attendance};

pub fn routes<S: Store>() -> Router<Arc<ApiState<S>>> {
    Router::new()
        .route("/api/attendance", get(attendance::between::<S>))
        .route("/api/attendance/clock-in", post(attendance::clock_in::<S>))
        .route("/api/attendance/clock-out", post(attendance::clock_out::<S>))
        .route("/api/attendance/week", get(attendance::week::<S>))
        .route("/api/attendance/team", get(attendance::team_between::<S>))
}
