// src/main.rs
//
// Bootstrap: open the configured database, make sure the schema exists and
// print the catalog.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use log::info;

use moviedb::db::{get_database_stats, verify_database_integrity};
use moviedb::{
    create_connection_pool, get_connection, initialize_database, DatabaseConfig, GenreRepository,
    Movie, MovieRepository, SqliteGenreRepository, SqliteMovieRepository,
};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // 1. CONFIGURATION
    let config = DatabaseConfig::from_env().context("reading database configuration")?;
    info!("Using database {}", config.url);

    // 2. CONNECTION SOURCE
    let pool = Arc::new(create_connection_pool(&config)?);

    // Initialize schema (idempotent)
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
        let stats = get_database_stats(&conn)?;
        info!(
            "{} genres, {} movies, {} bytes",
            stats.genre_count, stats.movie_count, stats.size_bytes
        );
    }

    // 3. REPOSITORIES
    let genre_repo: Arc<dyn GenreRepository> =
        Arc::new(SqliteGenreRepository::new(pool.clone()));
    let movie_repo: Arc<dyn MovieRepository> =
        Arc::new(SqliteMovieRepository::new(pool.clone()));

    // 4. CATALOG
    // Grouped by genre id: names are not unique
    let mut by_genre = group_by_genre(movie_repo.list_movies()?);
    for genre in genre_repo.list_genres()? {
        println!("{}", genre.name);
        for movie in by_genre.remove(&genre.id).unwrap_or_default() {
            println!(
                "  [{}] {} ({}, {} min) by {}",
                movie.id, movie.title, movie.release_date, movie.duration, movie.director
            );
        }
    }

    Ok(())
}

fn group_by_genre(movies: Vec<Movie>) -> HashMap<i64, Vec<Movie>> {
    let mut groups: HashMap<i64, Vec<Movie>> = HashMap::new();
    for movie in movies {
        groups.entry(movie.genre.id).or_default().push(movie);
    }
    groups
}
