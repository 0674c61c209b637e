use axum::{Router, routing::get};
use leavedesk_core::store::Store;
use std::sync::Arc;

use crate::{ApiState, handlers::holiday};

pub fn routes<S: Store>() -> Router<Arc<ApiState<S>>> {
    Router::new()
        .route(
            "/api/holidays",
            get(holiday::annual_holidays::<S>).post(holiday::add_holiday::<S>),
        )
        .route("/api/holidays/upcoming", get(holiday::upcoming_holidays::<S>))
}
