// src/db/connection.rs
//
// Connection source
//
// PRINCIPLES:
// - Built once from the configured connection string
// - Every connection has foreign keys enabled
// - A pooled connection goes back to the pool when dropped

use log::info;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};

use crate::config::{DatabaseConfig, DatabaseTarget, OpenMode};
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create a connection pool for the configured database
///
/// File databases:
/// - Up to `max_connections` connections
/// - Opened with the flags of the `mode` option
/// - WAL mode for concurrent readers, unless read-only
/// - Busy timeout set to avoid immediate errors
///
/// In-memory databases live inside a single connection, so the pool keeps
/// exactly one and never recycles it.
pub fn create_connection_pool(config: &DatabaseConfig) -> AppResult<ConnectionPool> {
    let target = config.target()?;

    let pool = match &target {
        DatabaseTarget::File { path, mode } => {
            let pragmas = match mode {
                OpenMode::ReadOnly => "PRAGMA foreign_keys = ON;
                     PRAGMA busy_timeout = 5000;",
                OpenMode::ReadWrite | OpenMode::ReadWriteCreate => "PRAGMA foreign_keys = ON;
                     PRAGMA journal_mode = WAL;
                     PRAGMA synchronous = NORMAL;
                     PRAGMA busy_timeout = 5000;",
            };
            let manager = SqliteConnectionManager::file(path)
                .with_flags(open_flags(*mode))
                .with_init(move |conn| conn.execute_batch(pragmas));

            Pool::builder()
                .max_size(config.max_connections.max(1))
                .build(manager)
        }
        DatabaseTarget::Memory => {
            let manager = SqliteConnectionManager::memory()
                .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

            Pool::builder()
                .max_size(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .build(manager)
        }
    }
    .map_err(|e| {
        AppError::Connection(format!(
            "Failed to create connection pool for '{}': {}",
            config.url, e
        ))
    })?;

    info!("Connection pool ready for {:?} ({} max)", target, pool.max_size());

    Ok(pool)
}

fn open_flags(mode: OpenMode) -> OpenFlags {
    let common = OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;

    match mode {
        OpenMode::ReadOnly => OpenFlags::SQLITE_OPEN_READ_ONLY | common,
        OpenMode::ReadWrite => OpenFlags::SQLITE_OPEN_READ_WRITE | common,
        OpenMode::ReadWriteCreate => {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE | common
        }
    }
}

/// Get a connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Connection(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone connection (for testing)
///
/// This creates an in-memory database, useful for unit tests.
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()
        .map_err(|e| AppError::Connection(e.to_string()))?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    Ok(conn)
}
