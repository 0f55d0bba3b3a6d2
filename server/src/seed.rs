use anyhow::{Context, Result};
use entity::{Employee, EmployeeDraft};
use platform_db::EmployeeStore;
use tracing::info;

const SAMPLES: [(&str, &str, &str); 2] = [
    ("Richard", "Lewis", "comedian"),
    ("Lebron", "James", "basketball player"),
];

/// Inserts the sample employees unconditionally.
pub async fn preload(store: &dyn EmployeeStore) -> Result<Vec<Employee>> {
    let mut saved = Vec::with_capacity(SAMPLES.len());
    for (first, last, role) in SAMPLES {
        let employee = store
            .save(EmployeeDraft::new(first, last, role))
            .await
            .with_context(|| format!("failed to preload {first} {last}"))?;
        info!("Preloading {employee}");
        saved.push(employee);
    }
    Ok(saved)
}

/// Preloads only into an empty store, so restarts against a persistent
/// database do not duplicate the samples.
pub async fn preload_if_empty(store: &dyn EmployeeStore) -> Result<usize> {
    let existing = store
        .find_all()
        .await
        .context("failed to inspect employee store")?;
    if !existing.is_empty() {
        info!(count = existing.len(), "employee store already populated; skipping seed");
        return Ok(0);
    }
    Ok(preload(store).await?.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use platform_db::{DatabaseSettings, SeaOrmEmployeeStore, connect};

    async fn store() -> SeaOrmEmployeeStore {
        let pool = connect(&DatabaseSettings::default()).await.unwrap();
        Migrator::up(&pool, None).await.unwrap();
        SeaOrmEmployeeStore::new(pool)
    }

    #[tokio::test]
    async fn preload_inserts_both_samples() {
        let store = store().await;
        let saved = preload(&store).await.unwrap();

        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].name(), "Richard Lewis");
        assert_eq!(saved[1].role, "basketball player");
        assert_eq!(store.find_all().await.unwrap(), saved);
    }

    #[tokio::test]
    async fn preload_if_empty_runs_once() {
        let store = store().await;

        assert_eq!(preload_if_empty(&store).await.unwrap(), 2);
        assert_eq!(preload_if_empty(&store).await.unwrap(), 0);
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }
}
