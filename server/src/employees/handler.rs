//! Employee HTTP handlers

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use platform_api::ApiError;

use super::assembler::{EmployeeCollection, EmployeeResource};
use super::extract::{EmployeeBody, EmployeeId};
use crate::http::{AppState, Hal, HttpResult};

/// GET /employees
pub async fn all(State(state): State<AppState>) -> HttpResult<Hal<EmployeeCollection>> {
    Ok(Hal(state.employees.all().await?))
}

/// POST /employees
pub async fn create(
    State(state): State<AppState>,
    EmployeeBody(candidate): EmployeeBody,
) -> HttpResult<Response> {
    let model = state.employees.create(candidate).await?;
    created(model)
}

/// GET /employees/{id}
pub async fn one(
    State(state): State<AppState>,
    EmployeeId(id): EmployeeId,
) -> HttpResult<Hal<EmployeeResource>> {
    Ok(Hal(state.employees.one(id).await?))
}

/// PUT /employees/{id}, answered with 201 whether the employee existed or not.
pub async fn replace(
    State(state): State<AppState>,
    EmployeeId(id): EmployeeId,
    EmployeeBody(candidate): EmployeeBody,
) -> HttpResult<Response> {
    let model = state.employees.replace(id, candidate).await?;
    created(model)
}

/// DELETE /employees/{id}
pub async fn delete(State(state): State<AppState>, EmployeeId(id): EmployeeId) -> HttpResult<StatusCode> {
    state.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn created(model: EmployeeResource) -> HttpResult<Response> {
    let location = model
        .self_href()
        .ok_or_else(|| ApiError::internal(anyhow::anyhow!("employee model without self link")))?
        .to_string();
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Hal(model)).into_response())
}
