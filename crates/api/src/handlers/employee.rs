use axum::{Json, extract::State};
use leavedesk_core::{models::employee::Employee, services, store::Store};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{
        auth::{Caller, Manager},
        error_handling::AppError,
    },
};

pub async fn profile<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    caller: Caller,
) -> Result<Json<Employee>, AppError> {
    let employee = services::employee::profile(&state.store, caller.id).await?;
    Ok(Json(employee))
}

pub async fn team_members<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(manager_id): Manager,
) -> Result<Json<Vec<Employee>>, AppError> {
    let members = services::employee::team_members(&state.store, manager_id).await?;
    Ok(Json(members))
}

pub async fn present_today<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(manager_id): Manager,
) -> Result<Json<Vec<Employee>>, AppError> {
    let present = services::employee::present_today(&state.store, manager_id, state.today()).await?;
    Ok(Json(present))
}
