use std::sync::Arc;

use entity::EmployeeDraft;
use platform_api::{ApiError, ApiResult};
use platform_db::{DbError, EmployeeStore};
use tracing::{info, instrument};

use super::assembler::{EmployeeCollection, EmployeeModelAssembler, EmployeeResource};

/// Employee operations behind the HTTP routes. Holds no state of its own.
#[derive(Clone)]
pub struct EmployeeController {
    store: Arc<dyn EmployeeStore>,
    assembler: EmployeeModelAssembler,
}

impl EmployeeController {
    pub fn new(store: Arc<dyn EmployeeStore>, assembler: EmployeeModelAssembler) -> Self {
        Self { store, assembler }
    }

    #[instrument(name = "employees.all", skip_all)]
    pub async fn all(&self) -> ApiResult<EmployeeCollection> {
        let employees = self.store.find_all().await.map_err(store_error)?;
        Ok(self.assembler.to_collection_model(&employees))
    }

    #[instrument(name = "employees.create", skip_all)]
    pub async fn create(&self, candidate: EmployeeDraft) -> ApiResult<EmployeeResource> {
        let draft = EmployeeDraft {
            id: None,
            ..candidate
        };
        let saved = self.store.save(draft).await.map_err(store_error)?;
        info!(id = saved.id, "employee created");
        Ok(self.assembler.to_model(&saved))
    }

    #[instrument(name = "employees.one", skip(self))]
    pub async fn one(&self, id: i64) -> ApiResult<EmployeeResource> {
        let employee = self
            .store
            .find_by_id(id)
            .await
            .map_err(store_error)?
            .ok_or(ApiError::EmployeeNotFound(id))?;
        Ok(self.assembler.to_model(&employee))
    }

    /// Overwrites the names and role of employee `id`, or stores `candidate`
    /// as a new employee when `id` is unknown. The new record's id is chosen
    /// by the store and may differ from `id`.
    #[instrument(name = "employees.replace", skip(self, candidate))]
    pub async fn replace(&self, id: i64, candidate: EmployeeDraft) -> ApiResult<EmployeeResource> {
        let existing = self.store.find_by_id(id).await.map_err(store_error)?;
        let draft = match existing {
            Some(mut employee) => {
                employee.first_name = candidate.first_name;
                employee.last_name = candidate.last_name;
                employee.role = candidate.role;
                EmployeeDraft::from(employee)
            }
            None => candidate.with_id(id),
        };
        let saved = self.store.save(draft).await.map_err(store_error)?;
        info!(requested = id, id = saved.id, "employee replaced");
        Ok(self.assembler.to_model(&saved))
    }

    #[instrument(name = "employees.delete", skip(self))]
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        if self.store.exists_by_id(id).await.map_err(store_error)? {
            self.store.delete_by_id(id).await.map_err(store_error)?;
            info!(id, "employee deleted");
        }
        Ok(())
    }
}

fn store_error(err: DbError) -> ApiError {
    ApiError::internal(err.into())
}
