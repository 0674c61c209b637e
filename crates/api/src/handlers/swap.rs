use axum::{
    Json,
    extract::{Path, State},
};
use leavedesk_core::{
    models::shift::{CreateSwapRequest, ShiftSwapRequest, SwapActionResponse, UpdateSwapRequest},
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

fn respond(message: &str, request: ShiftSwapRequest) -> Json<SwapActionResponse> {
    Json(SwapActionResponse {
        message: message.to_string(),
        request,
    })
}

pub async fn my_requests<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
) -> Result<Json<Vec<ShiftSwapRequest>>, AppError> {
    let requests = services::swap::my_requests(&state.store, employee_id, state.today()).await?;
    Ok(Json(requests))
}

pub async fn create<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
    Json(payload): Json<CreateSwapRequest>,
) -> Result<Json<SwapActionResponse>, AppError> {
    let request = services::swap::create(&state.store, employee_id, payload, state.now()).await?;
    Ok(respond("Shift swap requested successfully", request))
}

pub async fn update<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSwapRequest>,
) -> Result<Json<SwapActionResponse>, AppError> {
    let request =
        services::swap::update(&state.store, employee_id, id, payload, state.now()).await?;
    Ok(respond("Shift swap request updated successfully", request))
}

pub async fn cancel<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
    Path(id): Path<Uuid>,
) -> Result<Json<SwapActionResponse>, AppError> {
    let request = services::swap::cancel(&state.store, employee_id, id, state.now()).await?;
    Ok(respond("Shift swap request cancelled successfully", request))
}

pub async fn team_pending<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(manager_id): Manager,
) -> Result<Json<Vec<ShiftSwapRequest>>, AppError> {
    let requests = services::swap::team_pending(&state.store, manager_id, state.today()).await?;
    Ok(Json(requests))
}

pub async fn approve<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(manager_id): Manager,
    Path(id): Path<Uuid>,
) -> Result<Json<SwapActionResponse>, AppError> {
    let request = services::swap::approve(&state.store, manager_id, id, state.now()).await?;
    Ok(respond("Shift swap approved", request))
}

pub async fn reject<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(manager_id): Manager,
    Path(id): Path<Uuid>,
) -> Result<Json<SwapActionResponse>, AppError> {
    let request = services::swap::reject(&state.store, manager_id, id, state.now()).await?;
    Ok(respond("Shift swap rejected", request))
}
