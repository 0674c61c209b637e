use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::HrError;

pub type EmployeeId = i32;

/// Job titles known to the portal. `Manager` is the only role allowed to
/// approve, reject and assign on behalf of a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Manager,
    Developer,
    Tester,
    #[serde(rename = "DevOps Engineer")]
    DevOpsEngineer,
    #[serde(rename = "Maintenance Engineer")]
    MaintenanceEngineer,
    #[serde(rename = "Network Engineer")]
    NetworkEngineer,
    #[serde(rename = "Database Administrator")]
    DatabaseAdministrator,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::Developer => "Developer",
            Role::Tester => "Tester",
            Role::DevOpsEngineer => "DevOps Engineer",
            Role::MaintenanceEngineer => "Maintenance Engineer",
            Role::NetworkEngineer => "Network Engineer",
            Role::DatabaseAdministrator => "Database Administrator",
        }
    }

    pub const fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = HrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manager" => Ok(Role::Manager),
            "Developer" => Ok(Role::Developer),
            "Tester" => Ok(Role::Tester),
            "DevOps Engineer" => Ok(Role::DevOpsEngineer),
            "Maintenance Engineer" => Ok(Role::MaintenanceEngineer),
            "Network Engineer" => Ok(Role::NetworkEngineer),
            "Database Administrator" => Ok(Role::DatabaseAdministrator),
            other => Err(HrError::Validation(format!("Unknown role: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub manager_id: Option<EmployeeId>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn reports_to(&self, manager_id: EmployeeId) -> bool {
        self.manager_id == Some(manager_id)
    }
}
