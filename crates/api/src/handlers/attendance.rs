use axum::{
    Json,
    extract::{Query, State},
};
use leavedesk_core::{
    models::attendance::{Attendance, AttendanceActionResponse, AttendanceRange},
    services,
    store::Store,
};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{
        auth::{Manager, Staff},
        error_handling::AppError,
    },
};

pub async fn clock_in<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
) -> Result<Json<AttendanceActionResponse>, AppError> {
    let attendance = services::attendance::clock_in(&state.store, employee_id, state.now()).await?;
    Ok(Json(AttendanceActionResponse {
        message: "Clocked in successfully".to_string(),
        attendance,
    }))
}

pub async fn clock_out<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
) -> Result<Json<AttendanceActionResponse>, AppError> {
    let attendance =
        services::attendance::clock_out(&state.store, &state.policy, employee_id, state.now())
            .await?;
    Ok(Json(AttendanceActionResponse {
        message: "Clocked out successfully".to_string(),
        attendance,
    }))
}

pub async fn week<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
) -> Result<Json<Vec<Attendance>>, AppError> {
    let rows = services::attendance::week(&state.store, employee_id, state.today()).await?;
    Ok(Json(rows))
}

pub async fn between<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
    Query(range): Query<AttendanceRange>,
) -> Result<Json<Vec<Attendance>>, AppError> {
    let rows =
        services::attendance::between(&state.store, employee_id, range.start, range.end).await?;
    Ok(Json(rows))
}

pub async fn team_between<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(manager_id): Manager,
    Query(range): Query<AttendanceRange>,
) -> Result<Json<Vec<Attendance>>, AppError> {
    let rows = services::attendance::team_between(
        &state.store,
        manager_id,
        range.start,
        range.end,
        state.today(),
    )
    .await?;
    Ok(Json(rows))
}
