use axum::{
    Json,
    extract::{Path, State},
};
use leavedesk_core::{
    models::leave::{LeaveActionResponse, LeaveRequest, SubmitLeaveRequest, UpdateLeaveRequest},
    services,
    store::Store,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        auth::{Manager, Staff},
        error_handling::AppError,
    },
};

fn respond(message: &str, request: LeaveRequest) -> Json<LeaveActionResponse> {
    Json(LeaveActionResponse {
        message: message.to_string(),
        request,
    })
}

pub async fn my_requests<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
) -> Result<Json<Vec<LeaveRequest>>, AppError> {
    let requests = services::leave::my_requests(&state.store, employee_id, state.today()).await?;
    Ok(Json(requests))
}

pub async fn submit<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
    Json(payload): Json<SubmitLeaveRequest>,
) -> Result<Json<LeaveActionResponse>, AppError> {
    let request = services::leave::submit(
        &state.store,
        &state.policy,
        employee_id,
        payload,
        state.now(),
    )
    .await?;
    Ok(respond("Leave request submitted successfully", request))
}

pub async fn update<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeaveRequest>,
) -> Result<Json<LeaveActionResponse>, AppError> {
    let request = services::leave::update(
        &state.store,
        &state.policy,
        employee_id,
        id,
        payload,
        state.now(),
    )
    .await?;
    Ok(respond("Leave request updated successfully", request))
}

pub async fn cancel<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
    Path(id): Path<Uuid>,
) -> Result<Json<LeaveActionResponse>, AppError> {
    let request = services::leave::cancel(&state.store, employee_id, id, state.now()).await?;
    Ok(respond("Leave request cancelled successfully", request))
}

pub async fn team_pending<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(manager_id): Manager,
) -> Result<Json<Vec<LeaveRequest>>, AppError> {
    let requests = services::leave::team_pending(&state.store, manager_id, state.today()).await?;
    Ok(Json(requests))
}

pub async fn approve<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(manager_id): Manager,
    Path(id): Path<Uuid>,
) -> Result<Json<LeaveActionResponse>, AppError> {
    let request = services::leave::approve(&state.store, manager_id, id, state.now()).await?;
    Ok(respond("Leave request approved", request))
}

pub async fn reject<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(manager_id): Manager,
    Path(id): Path<Uuid>,
) -> Result<Json<LeaveActionResponse>, AppError> {
    let request = services::leave::reject(&state.store, manager_id, id, state.now()).await?;
    Ok(respond("Leave request rejected", request))
}
