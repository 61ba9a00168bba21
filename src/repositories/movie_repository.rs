// src/repositories/movie_repository.rs
//
// Movie persistence
//
// Every read joins genre so a Movie always carries its full Genre. The join
// is INNER: a movie whose genre row is gone is not listed at all.

use std::sync::Arc;

use log::{debug, warn};
use rusqlite::{params, Params, Row, Rows};

use super::row_mapping::{genre_from_row, SqlDate};
use crate::db::{get_connection, ConnectionPool};
use crate::domain::{Movie, NewMovie};
use crate::error::{AppError, AppResult};

const SELECT_MOVIES_WITH_GENRE: &str = "
    SELECT movie.idmovie, movie.title, movie.release_date, movie.duration,
           movie.director, movie.summary, genre.idgenre, genre.name
    FROM movie
    JOIN genre ON movie.genre_id = genre.idgenre";

pub trait MovieRepository: Send + Sync {
    fn list_movies(&self) -> AppResult<Vec<Movie>>;

    /// Movies whose genre name equals `genre_name` exactly
    fn list_movies_by_genre(&self, genre_name: &str) -> AppResult<Vec<Movie>>;

    /// Insert and return a new value carrying the generated id
    fn add_movie(&self, movie: &NewMovie) -> AppResult<Movie>;
}

pub struct SqliteMovieRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMovieRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map a joined movie/genre row to a Movie, genre first
    fn row_to_movie(row: &Row) -> rusqlite::Result<Movie> {
        let genre = genre_from_row(row)?;
        let release_date: SqlDate = row.get("release_date")?;
        let summary: Option<String> = row.get("summary")?;

        Ok(Movie {
            id: row.get("idmovie")?,
            title: row.get("title")?,
            release_date: release_date.0,
            genre,
            duration: row.get("duration")?,
            director: row.get("director")?,
            summary: summary.unwrap_or_default(),
        })
    }

    fn fetch_movies<P: Params>(
        &self,
        sql: &str,
        params: P,
        context: &str,
    ) -> AppResult<Vec<Movie>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| AppError::statement(context, e))?;

        let movies = stmt
            .query_map(params, Self::row_to_movie)
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| AppError::statement(context, e))?;

        Ok(movies)
    }
}

/// Read the key produced by an `INSERT ... RETURNING` statement
fn generated_key(rows: &mut Rows<'_>, context: &str) -> AppResult<i64> {
    let row = rows.next().map_err(|e| AppError::statement(context, e))?;

    match row {
        Some(row) => row.get(0).map_err(|e| AppError::statement(context, e)),
        None => {
            warn!("No generated key returned while {}", context);
            Err(AppError::GeneratedKey(context.to_string()))
        }
    }
}

impl MovieRepository for SqliteMovieRepository {
    fn list_movies(&self) -> AppResult<Vec<Movie>> {
        debug!("fetching movies");
        self.fetch_movies(SELECT_MOVIES_WITH_GENRE, [], "fetching movies")
    }

    fn list_movies_by_genre(&self, genre_name: &str) -> AppResult<Vec<Movie>> {
        let context = format!("fetching movies by genre: {}", genre_name);
        debug!("{}", context);

        let sql = format!("{} WHERE genre.name = ?1", SELECT_MOVIES_WITH_GENRE);
        self.fetch_movies(&sql, params![genre_name], &context)
    }

    fn add_movie(&self, movie: &NewMovie) -> AppResult<Movie> {
        let context = format!("adding movie: {}", movie.title);
        debug!("{}", context);

        let conn = get_connection(&self.pool)?;
        let mut stmt = conn
            .prepare(
                "INSERT INTO movie (title, release_date, genre_id, duration, director, summary)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING idmovie",
            )
            .map_err(|e| AppError::statement(&context, e))?;

        let mut rows = stmt
            .query(params![
                movie.title,
                SqlDate(movie.release_date),
                movie.genre.id,
                movie.duration,
                movie.director,
                movie.summary,
            ])
            .map_err(|e| AppError::statement(&context, e))?;

        let id = generated_key(&mut rows, &context)?;

        Ok(Movie::from_new(id, movie))
    }
}
