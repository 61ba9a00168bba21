// src/lib.rs
// MovieDB - persistence layer for a genre/movie catalog
//
// Architecture:
// - Domain: immutable Genre / NewMovie / Movie values
// - Repositories: hand-written parameterized SQL over a connection pool
// - Configuration: one connection string picks the database

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use config::{DatabaseConfig, DatabaseTarget, OpenMode};

pub use db::{create_connection_pool, get_connection, initialize_database, ConnectionPool};

pub use domain::{Genre, Movie, NewMovie};

pub use error::{AppError, AppResult};

pub use repositories::{
    GenreRepository, MovieRepository, SqliteGenreRepository, SqliteMovieRepository,
};
