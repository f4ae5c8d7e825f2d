use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Connection string for the feedback store. Startup fails without it.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

const CONFIG_FILE_NAME: &str = "feedback-api.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub validation: ValidationConfig,
    pub cors: CorsConfig,
}

/// Config files in increasing priority: the per-user file, then `./feedback-api.toml`.
pub fn config_files() -> Vec<PathBuf> {
    let user_file = dirs::config_dir().map(|dir| dir.join("course-feedback").join(CONFIG_FILE_NAME));
    let local_file = env::current_dir().ok().map(|dir| dir.join(CONFIG_FILE_NAME));

    user_file.into_iter().chain(local_file).collect()
}

/// `FEEDBACK_API__SERVER__PORT=9000`, `FEEDBACK_API__CORS__ALLOWED_ORIGINS=http://a,http://b`
pub fn environment() -> Environment {
    Environment::with_prefix("FEEDBACK_API")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .try_parsing(true)
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(
            env::var(DATABASE_URL_VAR).ok(),
            &config_files(),
            Some(environment()),
        )
    }

    pub fn from_sources(
        database_url: Option<String>,
        files: &[PathBuf],
        environment: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let database_url = database_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::Message(format!(
                    "{DATABASE_URL_VAR} environment variable is not set; \
                     configure a valid store URL (e.g. sqlite://feedback.db)"
                ))
            })?;

        let mut settings = ConfigBuilder::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("database.max_connections", 5)?
            .set_default("logging.level", "info")?
            .set_default("validation.strict", false)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?;

        for file in files {
            settings = settings.add_source(File::from(file.as_path()).required(false));
        }

        if let Some(environment) = environment {
            settings = settings.add_source(environment);
        }

        settings
            .set_override("database.url", database_url)?
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_database_url_is_an_error() {
        let err = Config::from_sources(None, &[], None).unwrap_err();
        assert!(err.to_string().contains(DATABASE_URL_VAR));

        let err = Config::from_sources(Some("  ".to_string()), &[], None).unwrap_err();
        assert!(err.to_string().contains(DATABASE_URL_VAR));
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_sources(Some("sqlite::memory:".to_string()), &[], None).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
        assert!(!config.validation.strict);
        assert!(config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn test_file_overrides_defaults_but_not_database_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
[server]
port = 9100

[database]
url = "sqlite://ignored.db"

[validation]
strict = true

[cors]
allowed_origins = ["http://localhost:8501"]
"#,
        )
        .unwrap();

        let config = Config::from_sources(
            Some("postgresql://db/feedback".to_string()),
            &[path, dir.path().join("missing.toml")],
            None,
        )
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "postgresql://db/feedback");
        assert!(config.validation.strict);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:8501"]);
    }

    #[test]
    fn test_later_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let user_file = dir.path().join("user.toml");
        let local_file = dir.path().join("local.toml");
        fs::write(&user_file, "[server]\nport = 9001\nhost = \"127.0.0.1\"\n").unwrap();
        fs::write(&local_file, "[server]\nport = 9002\n").unwrap();

        let config = Config::from_sources(
            Some("sqlite::memory:".to_string()),
            &[user_file, local_file],
            None,
        )
        .unwrap();

        assert_eq!(config.server.port, 9002);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_local_file_is_loaded_last() {
        let files = config_files();
        let local = env::current_dir().unwrap().join(CONFIG_FILE_NAME);
        assert_eq!(files.last(), Some(&local));
    }

    #[test]
    fn test_environment_overrides() {
        let vars: config::Map<String, String> = [
            ("FEEDBACK_API__SERVER__PORT", "9300"),
            ("FEEDBACK_API__VALIDATION__STRICT", "true"),
            (
                "FEEDBACK_API__CORS__ALLOWED_ORIGINS",
                "http://localhost:8501,https://feedback.example.org",
            ),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let config = Config::from_sources(
            Some("sqlite::memory:".to_string()),
            &[],
            Some(environment().source(Some(vars))),
        )
        .unwrap();

        assert_eq!(config.server.port, 9300);
        assert!(config.validation.strict);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://localhost:8501", "https://feedback.example.org"]
        );
    }
}
