//! Connection pool, pragmas, and migrations.

pub mod write_actor;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use ledgerworth_core::errors::{DatabaseError, Error, Result};
use std::sync::Arc;
use std::time::Duration;

pub use write_actor::{spawn_writer, WriteHandle};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Applied to every pooled connection. Foreign keys are off by default in
/// SQLite and the engine relies on them; the busy timeout keeps readers from
/// failing immediately while the writer actor holds a transaction.
#[derive(Debug)]
struct ConnectionOptions;

impl diesel::r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error>
    for ConnectionOptions
{
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Creates the connection pool for the given database path.
pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .connection_timeout(Duration::from_secs(5))
        .build(manager)
        .map_err(|e| Error::Database(DatabaseError::PoolCreationFailed(e.to_string())))?;
    Ok(Arc::new(pool))
}

/// Checks out a connection for a read path.
pub fn get_connection(pool: &Arc<DbPool>) -> Result<DbConnection> {
    pool.get()
        .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))
}

/// Runs any pending embedded migrations.
pub fn run_migrations(pool: &Arc<DbPool>) -> Result<()> {
    let mut conn = get_connection(pool)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(DatabaseError::MigrationFailed(e.to_string())))?;
    Ok(())
}
