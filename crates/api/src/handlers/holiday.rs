use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Datelike;
use leavedesk_core::{
    models::holiday::{CreateHolidayRequest, Holiday},
    services,
    store::Store,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{
        auth::{Caller, Manager},
        error_handling::AppError,
    },
};

#[derive(Debug, Deserialize)]
pub struct HolidayQuery {
    /// Defaults to the current calendar year.
    pub year: Option<i32>,
}

pub async fn annual_holidays<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    _caller: Caller,
    Query(query): Query<HolidayQuery>,
) -> Result<Json<Vec<Holiday>>, AppError> {
    let year = query.year.unwrap_or_else(|| state.today().year());
    let holidays = services::holiday::annual_holidays(&state.store, year).await?;
    Ok(Json(holidays))
}

pub async fn upcoming_holidays<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    _caller: Caller,
) -> Result<Json<Vec<Holiday>>, AppError> {
    let holidays = services::holiday::upcoming_holidays(&state.store, state.today()).await?;
    Ok(Json(holidays))
}

pub async fn add_holiday<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Manager(_manager_id): Manager,
    Json(payload): Json<CreateHolidayRequest>,
) -> Result<Json<Holiday>, AppError> {
    let holiday = services::holiday::add_holiday(&state.store, payload).await?;
    Ok(Json(holiday))
}
