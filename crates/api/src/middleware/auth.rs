//! # Caller Identity
//!
//! Authentication happens upstream: the identity provider in front of this
//! service forwards the signed-in employee as two headers.
//!
//! - `X-Employee-Id`: numeric employee id
//! - `X-Employee-Role`: job title, e.g. `Manager` or `DevOps Engineer`
//!
//! A missing or malformed header fails with 401. Role gates fail with 403.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use leavedesk_core::{
    errors::HrError,
    models::employee::{EmployeeId, Role},
};

use crate::middleware::error_handling::AppError;

pub const EMPLOYEE_ID_HEADER: &str = "x-employee-id";
pub const EMPLOYEE_ROLE_HEADER: &str = "x-employee-role";

/// The authenticated employee making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: EmployeeId,
    pub role: Role,
}

impl Caller {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, HrError> {
        let id = header_value(headers, EMPLOYEE_ID_HEADER)?
            .parse::<EmployeeId>()
            .map_err(|_| HrError::Authentication("Invalid employee id".to_string()))?;
        let role = header_value(headers, EMPLOYEE_ROLE_HEADER)?
            .parse::<Role>()
            .map_err(|_| HrError::Authentication("Invalid employee role".to_string()))?;

        Ok(Self { id, role })
    }

    pub fn require_manager(&self) -> Result<EmployeeId, HrError> {
        if self.role.is_manager() {
            Ok(self.id)
        } else {
            tracing::warn!(employee_id = self.id, role = %self.role, "Manager route denied");
            Err(HrError::Authorization("Manager role required".to_string()))
        }
    }

    pub fn require_employee(&self) -> Result<EmployeeId, HrError> {
        if self.role.is_manager() {
            tracing::warn!(employee_id = self.id, "Employee route denied to manager");
            Err(HrError::Authorization("Employee role required".to_string()))
        } else {
            Ok(self.id)
        }
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, HrError> {
    headers
        .get(name)
        .ok_or_else(|| HrError::Authentication(format!("Missing {name} header")))?
        .to_str()
        .map(str::trim)
        .map_err(|_| HrError::Authentication(format!("Malformed {name} header")))
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller::from_headers(&parts.headers)?)
    }
}

/// A caller holding the Manager role; yields the manager's id.
#[derive(Debug, Clone, Copy)]
pub struct Manager(pub EmployeeId);

#[async_trait]
impl<S> FromRequestParts<S> for Manager
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let caller = Caller::from_request_parts(parts, state).await?;
        Ok(Manager(caller.require_manager()?))
    }
}

/// A caller holding any non-manager role; yields the employee's id.
#[derive(Debug, Clone, Copy)]
pub struct Staff(pub EmployeeId);

#[async_trait]
impl<S> FromRequestParts<S> for Staff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let caller = Caller::from_request_parts(parts, state).await?;
        Ok(Staff(caller.require_employee()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(id: &str, role: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(EMPLOYEE_ID_HEADER, HeaderValue::from_str(id).unwrap());
        headers.insert(EMPLOYEE_ROLE_HEADER, HeaderValue::from_str(role).unwrap());
        headers
    }

    #[test]
    fn test_caller_from_headers() {
        let caller = Caller::from_headers(&headers("9", "DevOps Engineer")).unwrap();
        assert_eq!(
            caller,
            Caller {
                id: 9,
                role: Role::DevOpsEngineer
            }
        );
        assert_eq!(caller.require_employee().unwrap(), 9);
        assert!(matches!(
            caller.require_manager(),
            Err(HrError::Authorization(_))
        ));
    }

    #[test]
    fn test_caller_rejects_bad_headers() {
        assert!(matches!(
            Caller::from_headers(&HeaderMap::new()),
            Err(HrError::Authentication(_))
        ));
        assert!(matches!(
            Caller::from_headers(&headers("abc", "Manager")),
            Err(HrError::Authentication(_))
        ));
        assert!(matches!(
            Caller::from_headers(&headers("1", "Intern")),
            Err(HrError::Authentication(_))
        ));
    }
}
