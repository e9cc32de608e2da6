//! SurrealDB client factory and migration tooling.
//!
//! The server process holds exactly one datastore connection. The first
//! caller of [`connect`] performs the handshake; concurrent early callers
//! await that same in-flight attempt instead of opening duplicates, and every
//! later caller reuses the resolved handle for the life of the process.
//! There is no teardown besides process exit.

use anyhow::Context;
use surrealdb::engine::any::{self, Any};
use surrealdb::Surreal;
use tokio::sync::OnceCell;

use bookstall_kernel::settings::DatabaseSettings;
use bookstall_kernel::ModuleRegistry;

static CONNECTION: OnceCell<Surreal<Any>> = OnceCell::const_new();

/// Open a fresh connection and select the namespace/database.
///
/// Used by [`connect`] for the process-wide handle; tests call it directly
/// against `mem://` engines to get isolated datastores.
pub async fn open(endpoint: &str, namespace: &str, database: &str) -> anyhow::Result<Surreal<Any>> {
    let client = any::connect(endpoint)
        .await
        .with_context(|| format!("failed to reach datastore at '{endpoint}'"))?;

    client
        .use_ns(namespace)
        .use_db(database)
        .await
        .with_context(|| format!("failed to select namespace '{namespace}' db '{database}'"))?;

    Ok(client)
}

/// Return the process-wide cached connection, establishing it on first use.
///
/// Initialization is single-flight: concurrent callers share one connection
/// attempt. A failed attempt surfaces the error to every waiter and leaves
/// the cache empty so the next caller retries.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<&'static Surreal<Any>> {
    CONNECTION
        .get_or_try_init(|| async {
            tracing::info!(endpoint = %settings.endpoint, "establishing datastore connection");
            open(&settings.endpoint, &settings.namespace, &settings.database).await
        })
        .await
}

/// Apply every module migration in deterministic order.
///
/// Migration DDL is written idempotently, so replaying the full set on each
/// boot is safe. Returns the number of migrations executed.
pub async fn apply_migrations(
    db: &Surreal<Any>,
    registry: &ModuleRegistry,
) -> anyhow::Result<usize> {
    let migrations = registry.collect_migrations();

    for (module, migration) in &migrations {
        tracing::info!(module = %module, migration = migration.id, "applying migration");

        db.query(migration.up)
            .await
            .and_then(|response| response.check())
            .with_context(|| format!("migration '{}/{}' failed", module, migration.id))?;
    }

    tracing::info!(count = migrations.len(), "migrations applied");
    Ok(migrations.len())
}
