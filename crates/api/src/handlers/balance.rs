use axum::{Json, extract::State};
use leavedesk_core::{models::leave::LeaveBalance, services, store::Store};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{auth::Staff, error_handling::AppError},
};

pub async fn my_balance<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Staff(employee_id): Staff,
) -> Result<Json<LeaveBalance>, AppError> {
    let balance =
        services::balance::my_balance(&state.store, &state.policy, employee_id, state.today())
            .await?;
    Ok(Json(balance))
}
