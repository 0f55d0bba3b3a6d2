use async_trait::async_trait;
use entity::{Employee, EmployeeDraft, employees};
use sea_orm::{ActiveModelTrait, EntityTrait, NotSet, PaginatorTrait, QueryOrder, Set};
use tracing::debug;

use crate::{DbPool, DbResult};

/// Persistence operations the employee endpoints rely on.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Every stored employee.
    async fn find_all(&self) -> DbResult<Vec<Employee>>;

    async fn find_by_id(&self, id: i64) -> DbResult<Option<Employee>>;

    /// Overwrites the record matching `draft.id` when there is one, otherwise
    /// inserts a new record and lets the database pick its id.
    async fn save(&self, draft: EmployeeDraft) -> DbResult<Employee>;

    async fn exists_by_id(&self, id: i64) -> DbResult<bool>;

    /// Removing an id that is not stored is a no-op.
    async fn delete_by_id(&self, id: i64) -> DbResult<()>;
}

/// [`EmployeeStore`] backed by the `employees` table.
#[derive(Clone, Debug)]
pub struct SeaOrmEmployeeStore {
    pool: DbPool,
}

impl SeaOrmEmployeeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for SeaOrmEmployeeStore {
    async fn find_all(&self) -> DbResult<Vec<Employee>> {
        let rows = employees::Entity::find()
            .order_by_asc(employees::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<Employee>> {
        Ok(employees::Entity::find_by_id(id).one(&self.pool).await?)
    }

    async fn save(&self, draft: EmployeeDraft) -> DbResult<Employee> {
        if let Some(id) = draft.id {
            if let Some(existing) = employees::Entity::find_by_id(id).one(&self.pool).await? {
                let mut active: employees::ActiveModel = existing.into();
                active.first_name = Set(draft.first_name);
                active.last_name = Set(draft.last_name);
                active.role = Set(draft.role);
                let updated = active.update(&self.pool).await?;
                debug!(id = updated.id, "employee updated");
                return Ok(updated);
            }
        }
        let inserted = employees::ActiveModel {
            id: NotSet,
            first_name: Set(draft.first_name),
            last_name: Set(draft.last_name),
            role: Set(draft.role),
        }
        .insert(&self.pool)
        .await?;
        debug!(id = inserted.id, requested = ?draft.id, "employee inserted");
        Ok(inserted)
    }

    async fn exists_by_id(&self, id: i64) -> DbResult<bool> {
        let count = employees::Entity::find_by_id(id).count(&self.pool).await?;
        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: i64) -> DbResult<()> {
        let result = employees::Entity::delete_by_id(id).exec(&self.pool).await?;
        debug!(id, rows = result.rows_affected, "employee delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn store() -> SeaOrmEmployeeStore {
        let pool = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&pool, None).await.unwrap();
        SeaOrmEmployeeStore::new(pool)
    }

    #[tokio::test]
    async fn save_without_id_assigns_sequential_ids() {
        let store = store().await;
        let bilbo = store
            .save(EmployeeDraft::new("Bilbo", "Baggins", "burglar"))
            .await
            .unwrap();
        let jaime = store
            .save(EmployeeDraft::new("Jaime", "Lannister", "king's guard"))
            .await
            .unwrap();
        assert_eq!(bilbo.id, 1);
        assert_eq!(jaime.id, 2);
        assert_eq!(store.find_all().await.unwrap(), vec![bilbo, jaime]);
    }

    #[tokio::test]
    async fn save_with_existing_id_overwrites_fields() {
        let store = store().await;
        let robert = store
            .save(EmployeeDraft::new("Robert", "Baratheon", "king"))
            .await
            .unwrap();
        let jon = store
            .save(EmployeeDraft::new("Jon", "Snow", "night's watch").with_id(robert.id))
            .await
            .unwrap();
        assert_eq!(jon.id, robert.id);
        assert_eq!(jon.name(), "Jon Snow");
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_with_unknown_id_inserts_with_generated_id() {
        let store = store().await;
        let saved = store
            .save(EmployeeDraft::new("Jon", "Snow", "night's watch").with_id(3))
            .await
            .unwrap();
        assert_eq!(saved.id, 1);
        assert!(!store.exists_by_id(3).await.unwrap());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = store().await;
        let saved = store
            .save(EmployeeDraft::new("Bilbo", "Baggins", "burglar"))
            .await
            .unwrap();
        assert!(store.exists_by_id(saved.id).await.unwrap());
        store.delete_by_id(saved.id).await.unwrap();
        store.delete_by_id(saved.id).await.unwrap();
        assert!(!store.exists_by_id(saved.id).await.unwrap());
        assert_eq!(store.find_by_id(saved.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn ids_past_32_bits_are_queried_as_absent() {
        let store = store().await;
        let id = i64::from(i32::MAX) + 1;
        assert_eq!(store.find_by_id(id).await.unwrap(), None);
        assert!(!store.exists_by_id(id).await.unwrap());
        store.delete_by_id(id).await.unwrap();
    }
}
