pub mod errors;
pub mod models;
pub mod pool;
pub mod schema;
pub mod types;

use deadpool_diesel::Runtime;
use deadpool_diesel::postgres::{Manager, Pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub use errors::{DatabaseError, ErrorKind};
pub use pool::WagerPool;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Build the deadpool-diesel pool used by every component of the process.
/// Constructed once at startup and passed by reference from there on.
pub fn init_pool(app_name: &str, database_url: &str) -> Result<Pool, ErrorKind> {
    tracing::info!("Initializing database pool for {app_name}...");
    let manager = Manager::new(database_url, Runtime::Tokio1);
    Pool::builder(manager)
        .build()
        .map_err(|e| ErrorKind::Pool(e.to_string()))
}

/// Run pending embedded migrations. Panics on failure: the process cannot
/// serve requests against an out-of-date schema.
pub async fn run_migrations(pool: &Pool) {
    let conn = pool
        .get()
        .await
        .expect("Failed to get connection for migrations");
    conn.interact(|conn| {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| {
                for version in versions {
                    tracing::info!("Applied migration {version}");
                }
            })
            .map_err(|e| format!("Failed to run migrations: {e}"))
    })
    .await
    .expect("Migration interaction failed")
    .expect("Migrations failed");
}
