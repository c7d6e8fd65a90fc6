use crate::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DatabaseSettings, LogFormat, LoggingSettings, ServerSettings, Settings};

/// Prefix for environment overrides, e.g. `GRIDIRON_SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "GRIDIRON";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the config file
/// (`path`, or an optional `gridiron.toml` in the working directory), then
/// `GRIDIRON_*` environment variables. The result is validated before it is
/// returned.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        // An explicitly named file must exist.
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration file.");
            config::File::from(path).required(true)
        }
        None => {
            tracing::debug!("Looking for an optional gridiron config file.");
            config::File::with_name("gridiron").required(false)
        }
    };

    let builder = config::Config::builder().add_source(file).add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    from_builder(builder)
}

fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn parse(toml: &str) -> Result<Settings, ConfigError> {
        from_builder(config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn empty_file_yields_defaults() {
        let settings = parse("").unwrap();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.database.url, "sqlite://stats.db");
        assert_eq!(settings.database.max_connections, 1);
        assert_eq!(settings.logging.format, LogFormat::Full);
        assert!(settings.logging.directory.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = parse(
            r#"
            [server]
            port = 8080

            [logging]
            format = "compact"
            "#,
        )
        .unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.logging.format, LogFormat::Compact);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn rejects_zero_pool_size() {
        let err = parse("[database]\nmax_connections = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_unparseable_host() {
        let err = parse("[server]\nhost = \"localhost:80\"").unwrap_err();
        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn missing_explicit_file_is_a_load_error() {
        let err = load_config(Some(Path::new("does-not-exist/gridiron.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let settings = parse("[server]\nhost = \"0.0.0.0\"\nport = 3000").unwrap();
        assert_eq!(settings.server.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
    }
}
