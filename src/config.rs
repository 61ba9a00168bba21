// src/config.rs
//
// Database configuration
//
// The connection string is the only switch between backends. It is read
// once at startup and parsed into a DatabaseTarget before any pool exists.

use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Environment variable holding the connection string
pub const DATABASE_URL_VAR: &str = "MOVIEDB_DATABASE_URL";

/// Environment variable holding the pool size for file databases
pub const MAX_CONNECTIONS_VAR: &str = "MOVIEDB_MAX_CONNECTIONS";

const DEFAULT_MAX_CONNECTIONS: u32 = 8;

/// Schemes understood as SQLite, longest first so `sqlite://` wins over `sqlite:`
const SQLITE_SCHEMES: [&str; 3] = ["jdbc:sqlite:", "sqlite://", "sqlite:"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Connection string, e.g. `sqlite:catalog.db?mode=ro` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
}

/// How a database file is opened, from the `mode` option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// `mode=ro`
    ReadOnly,
    /// `mode=rw`: the file must already exist
    ReadWrite,
    /// `mode=rwc`, also used when no mode is given
    #[default]
    ReadWriteCreate,
}

/// Where a connection string points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    File { path: PathBuf, mode: OpenMode },
    Memory,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Build the configuration from the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    ///
    /// Falls back to `{APP_DATA}/moviedb/moviedb.db` when no URL is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let url = match lookup(DATABASE_URL_VAR) {
            Some(url) => url,
            None => format!("sqlite:{}", default_database_path()?.display()),
        };

        let max_connections = match lookup(MAX_CONNECTIONS_VAR) {
            Some(value) => value.trim().parse().map_err(|e| {
                AppError::Config(format!(
                    "{} must be a number, got '{}': {}",
                    MAX_CONNECTIONS_VAR, value, e
                ))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self { url, max_connections })
    }

    /// Parse the connection string into a target.
    ///
    /// The only option understood is `mode=ro|rw|rwc`; anything else after
    /// `?` is rejected.
    pub fn target(&self) -> AppResult<DatabaseTarget> {
        let url = self.url.trim();
        let rest = SQLITE_SCHEMES
            .iter()
            .find_map(|scheme| url.strip_prefix(scheme))
            .ok_or_else(|| AppError::Config(format!("Unsupported connection string '{}'", url)))?;

        let (path, options) = match rest.split_once('?') {
            Some((path, options)) => (path, Some(options)),
            None => (rest, None),
        };

        match path {
            "" => Err(AppError::Config(format!(
                "Connection string '{}' has no database path",
                url
            ))),
            ":memory:" => match options {
                Some(options) if !options.is_empty() => Err(AppError::Config(format!(
                    "In-memory connection string '{}' takes no options",
                    url
                ))),
                _ => Ok(DatabaseTarget::Memory),
            },
            path => Ok(DatabaseTarget::File {
                path: PathBuf::from(path),
                mode: parse_options(options.unwrap_or_default(), url)?,
            }),
        }
    }
}

fn parse_options(options: &str, url: &str) -> AppResult<OpenMode> {
    let mut mode = OpenMode::default();

    for option in options.split('&').filter(|o| !o.is_empty()) {
        mode = match option.split_once('=') {
            Some(("mode", "ro")) => OpenMode::ReadOnly,
            Some(("mode", "rw")) => OpenMode::ReadWrite,
            Some(("mode", "rwc")) => OpenMode::ReadWriteCreate,
            _ => {
                return Err(AppError::Config(format!(
                    "Unsupported option '{}' in connection string '{}'",
                    option, url
                )))
            }
        };
    }

    Ok(mode)
}

/// Default database file location
///
/// Path structure: {APP_DATA}/moviedb/moviedb.db
pub fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    let moviedb_dir = app_data_dir.join("moviedb");

    std::fs::create_dir_all(&moviedb_dir).map_err(|e| {
        AppError::Other(format!("Could not create {}: {}", moviedb_dir.display(), e))
    })?;

    Ok(moviedb_dir.join("moviedb.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn file(path: &str, mode: OpenMode) -> DatabaseTarget {
        DatabaseTarget::File {
            path: PathBuf::from(path),
            mode,
        }
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_sqlite_file_urls() {
        for url in ["sqlite:catalog.db", "sqlite://catalog.db", "jdbc:sqlite:catalog.db"] {
            let target = DatabaseConfig::new(url).target().unwrap();
            assert_eq!(target, file("catalog.db", OpenMode::ReadWriteCreate), "{}", url);
        }
    }

    #[test]
    fn test_absolute_path_and_mode_option() {
        let cases = [
            ("sqlite:///var/lib/moviedb.db?mode=ro", OpenMode::ReadOnly),
            ("sqlite:///var/lib/moviedb.db?mode=rw", OpenMode::ReadWrite),
            ("sqlite:///var/lib/moviedb.db?mode=rwc", OpenMode::ReadWriteCreate),
            ("sqlite:///var/lib/moviedb.db?", OpenMode::ReadWriteCreate),
        ];

        for (url, mode) in cases {
            let target = DatabaseConfig::new(url).target().unwrap();
            assert_eq!(target, file("/var/lib/moviedb.db", mode), "{}", url);
        }
    }

    #[test]
    fn test_unknown_options_are_rejected() {
        for url in [
            "sqlite:catalog.db?mode=memory",
            "sqlite:catalog.db?cache=shared",
            "sqlite:catalog.db?mode=ro&journal=off",
            "sqlite::memory:?mode=ro",
        ] {
            let result = DatabaseConfig::new(url).target();
            assert!(matches!(result, Err(AppError::Config(_))), "{}", url);
        }
    }

    #[test]
    fn test_memory_url() {
        let target = DatabaseConfig::new("sqlite::memory:").target().unwrap();
        assert_eq!(target, DatabaseTarget::Memory);
    }

    #[test]
    fn test_unsupported_backend_is_config_error() {
        let result = DatabaseConfig::new("postgres://localhost:5432/movies").target();
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_missing_path_is_config_error() {
        let result = DatabaseConfig::new("sqlite:").target();
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_builder_sets_pool_size() {
        let config = DatabaseConfig::new("sqlite:x.db").with_max_connections(2);
        assert_eq!(config.max_connections, 2);
    }

    #[test]
    fn test_lookup_reads_both_variables() {
        let config = DatabaseConfig::from_lookup(lookup(&[
            (DATABASE_URL_VAR, "sqlite:catalog.db"),
            (MAX_CONNECTIONS_VAR, "3"),
        ]))
        .unwrap();

        assert_eq!(config, DatabaseConfig::new("sqlite:catalog.db").with_max_connections(3));
    }

    #[test]
    fn test_lookup_defaults_pool_size() {
        let vars = lookup(&[(DATABASE_URL_VAR, "sqlite:catalog.db")]);
        let config = DatabaseConfig::from_lookup(vars).unwrap();

        assert_eq!(config.max_connections, 8);
    }

    #[test]
    fn test_lookup_falls_back_to_data_dir() {
        let config = DatabaseConfig::from_lookup(lookup(&[])).unwrap();

        let expected = default_database_path().unwrap();
        assert!(expected.ends_with("moviedb/moviedb.db"));
        assert_eq!(config.url, format!("sqlite:{}", expected.display()));
        assert_eq!(config.max_connections, 8);
    }

    #[test]
    fn test_lookup_rejects_non_numeric_pool_size() {
        let result = DatabaseConfig::from_lookup(lookup(&[
            (DATABASE_URL_VAR, "sqlite:catalog.db"),
            (MAX_CONNECTIONS_VAR, "plenty"),
        ]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
