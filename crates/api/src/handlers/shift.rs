use axum::{
    Json,
    extract::{Path, State},
};
use leavedesk_core::{
    models::shift::{AssignShiftRequest, Shift, ShiftActionResponse, ShiftView, UpdateShiftRequest},
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

pub async fn my_shifts<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
) -> Result<Json<Vec<ShiftView>>, AppError> {
    let shifts = services::shift::my_shifts(&state.store, employee_id, state.today()).await?;
    Ok(Json(shifts))
}

pub async fn team_shifts<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(manager_id): Manager,
) -> Result<Json<Vec<Shift>>, AppError> {
    let shifts = services::shift::team_shifts(&state.store, manager_id, state.today()).await?;
    Ok(Json(shifts))
}

pub async fn assign<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(manager_id): Manager,
    Json(payload): Json<AssignShiftRequest>,
) -> Result<Json<ShiftActionResponse>, AppError> {
    let shifts = services::shift::assign(&state.store, manager_id, payload, state.today()).await?;
    Ok(Json(ShiftActionResponse {
        message: "Shifts assigned successfully".to_string(),
        shifts,
    }))
}

pub async fn update<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(manager_id): Manager,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateShiftRequest>,
) -> Result<Json<ShiftActionResponse>, AppError> {
    let shift =
        services::shift::update(&state.store, manager_id, id, payload, state.today()).await?;
    Ok(Json(ShiftActionResponse {
        message: "Shift updated successfully".to_string(),
        shifts: vec![shift],
    }))
}
