use axum::{Json, extract::State};
use leavedesk_core::{models::report::TeamReport, services, store::Store};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{auth::Manager, error_handling::AppError},
};

pub async fn team_report<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(manager_id): Manager,
) -> Result<Json<TeamReport>, AppError> {
    let report = services::report::team_report(&state.store, manager_id, state.today()).await?;
    Ok(Json(report))
}
