// src/repositories/genre_repository.rs
//
// Genre persistence

use std::sync::Arc;

use log::debug;
use rusqlite::{params, OptionalExtension};

use super::row_mapping::genre_from_row;
use crate::db::{get_connection, ConnectionPool};
use crate::domain::Genre;
use crate::error::{AppError, AppResult};

pub trait GenreRepository: Send + Sync {
    /// All genres, in whatever order the store returns them
    fn list_genres(&self) -> AppResult<Vec<Genre>>;

    /// Exact name match; the first row wins if names repeat
    fn get_genre(&self, name: &str) -> AppResult<Option<Genre>>;

    /// The generated id is not reported back
    fn add_genre(&self, name: &str) -> AppResult<()>;
}

pub struct SqliteGenreRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteGenreRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl GenreRepository for SqliteGenreRepository {
    fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let context = "fetching genres";
        debug!("{}", context);

        let conn = get_connection(&self.pool)?;
        let mut stmt = conn
            .prepare("SELECT idgenre, name FROM genre")
            .map_err(|e| AppError::statement(context, e))?;

        let genres = stmt
            .query_map([], genre_from_row)
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| AppError::statement(context, e))?;

        Ok(genres)
    }

    fn get_genre(&self, name: &str) -> AppResult<Option<Genre>> {
        debug!("fetching genre by name: {}", name);

        let conn = get_connection(&self.pool)?;
        let mut stmt = conn
            .prepare("SELECT idgenre, name FROM genre WHERE name = ?1")
            .map_err(|e| AppError::statement(format!("fetching genre by name: {}", name), e))?;

        let genre = stmt
            .query_row(params![name], genre_from_row)
            .optional()
            .map_err(|e| AppError::statement(format!("fetching genre by name: {}", name), e))?;

        Ok(genre)
    }

    fn add_genre(&self, name: &str) -> AppResult<()> {
        debug!("adding genre: {}", name);

        let conn = get_connection(&self.pool)?;
        conn.execute("INSERT INTO genre (name) VALUES (?1)", params![name])
            .map_err(|e| AppError::statement(format!("adding genre: {}", name), e))?;

        Ok(())
    }
}
