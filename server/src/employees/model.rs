use entity::{Employee, EmployeeDraft};
use platform_api::ValidationErrors;
use serde::{Deserialize, Serialize};

const OBJECT_NAME: &str = "employee";

/// Wire representation of a stored employee, before links are attached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeModel {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub role: String,
}

impl From<&Employee> for EmployeeModel {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            name: employee.name(),
            role: employee.role.clone(),
        }
    }
}

/// Request body for create and replace. Unknown fields are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
}

impl EmployeeInput {
    /// Every field is required and must be non-empty.
    pub fn validate(self) -> Result<EmployeeDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new(OBJECT_NAME);
        let first_name = errors.require_non_empty("firstName", self.first_name);
        let last_name = errors.require_non_empty("lastName", self.last_name);
        let role = errors.require_non_empty("role", self.role);
        errors.into_result()?;
        Ok(EmployeeDraft::new(first_name, last_name, role))
    }
}
