//! Connection pooling and migration bootstrap.

use crate::error::ReadStoreError;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

/// Pooled Postgres connections backing the read store.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Build a connection pool over `database_url` (spec §6 `DB_*` config).
pub fn build_pool(database_url: &str) -> Result<PgPool, ReadStoreError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .map_err(|e| ReadStoreError::Connection(e.to_string()))
}

/// Apply any pending migrations. Called once at startup by `sc-ledgersync`
/// before the event pipeline begins draining blocks.
pub fn run_migrations(pool: &PgPool) -> Result<(), ReadStoreError> {
    let mut conn = pool.get().map_err(|e| ReadStoreError::Connection(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|e| ReadStoreError::Migration(e.to_string()))
}
