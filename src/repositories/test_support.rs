// src/repositories/test_support.rs
//
// File-backed test database seeded with a small catalog.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use crate::config::DatabaseConfig;
use crate::db::{create_connection_pool, get_connection, initialize_database, ConnectionPool};

pub(crate) const SEED_GENRES: &str = "
    INSERT INTO genre (idgenre, name) VALUES (1, 'Drama');
    INSERT INTO genre (idgenre, name) VALUES (2, 'Comedy');
    INSERT INTO genre (idgenre, name) VALUES (3, 'Thriller');
";

pub(crate) const SEED_MOVIES: &str = "
    INSERT INTO movie (idmovie, title, release_date, genre_id, duration, director, summary)
    VALUES (1, 'Title 1', '2015-11-26 12:00:00.000', 1, 120, 'director 1', 'summary of the first movie');
    INSERT INTO movie (idmovie, title, release_date, genre_id, duration, director, summary)
    VALUES (2, 'My Title 2', '2015-11-14 12:00:00.000', 2, 114, 'director 2', 'summary of the second movie');
    INSERT INTO movie (idmovie, title, release_date, genre_id, duration, director, summary)
    VALUES (3, 'Third title', '2015-12-12 12:00:00.000', 2, 176, 'director 3', 'summary of the third movie');
";

pub(crate) struct TestDb {
    pub pool: Arc<ConnectionPool>,
    pub path: PathBuf,
    _dir: TempDir,
}

impl TestDb {
    /// Empty schema, no rows
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");
        let config =
            DatabaseConfig::new(format!("sqlite:{}", path.display())).with_max_connections(2);
        let pool = create_connection_pool(&config).unwrap();

        {
            let conn = get_connection(&pool).unwrap();
            initialize_database(&conn).unwrap();
        }

        Self {
            pool: Arc::new(pool),
            path,
            _dir: dir,
        }
    }

    /// Three genres and three movies
    pub fn seeded() -> Self {
        let db = Self::empty();
        db.execute(SEED_GENRES);
        db.execute(SEED_MOVIES);
        db
    }

    pub fn execute(&self, sql: &str) {
        let conn = get_connection(&self.pool).unwrap();
        conn.execute_batch(sql).unwrap();
    }

    /// A plain connection that bypasses the pool
    ///
    /// Bundled SQLite enables foreign keys by default, so they are switched
    /// off here to allow rows the pool would reject.
    pub fn raw_connection(&self) -> rusqlite::Connection {
        let conn = rusqlite::Connection::open(&self.path).unwrap();
        conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
        conn
    }
}
