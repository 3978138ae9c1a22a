use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_hours() -> i64 {
    24
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        Self::from_configuration(configuration)
    }

    fn from_configuration(configuration: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Config = configuration.try_deserialize()?;

        // Tokens with no validity window would be expired when issued
        if config.jwt.expiration_hours <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be positive, got {}",
                config.jwt.expiration_hours
            )));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn configuration(jwt_section: &str) -> ConfigBuilder {
        ConfigBuilder::builder()
            .add_source(File::from_str(
                &format!(
                    r#"
                    [database]
                    url = "postgres://localhost/catalog"

                    [server]
                    http_port = 9000

                    [jwt]
                    secret = "0123456789abcdef0123456789abcdef"
                    {}
                    "#,
                    jwt_section
                ),
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let config = Config::from_configuration(configuration("")).unwrap();

        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.http_port, 9000);
        assert_eq!(config.jwt.expiration_hours, 24);
    }

    #[test]
    fn test_explicit_expiration_is_kept() {
        let config =
            Config::from_configuration(configuration("expiration_hours = 2")).unwrap();

        assert_eq!(config.jwt.expiration_hours, 2);
    }

    #[test]
    fn test_non_positive_expiration_is_rejected() {
        for hours in ["0", "-3"] {
            let result = Config::from_configuration(configuration(&format!(
                "expiration_hours = {}",
                hours
            )));

            assert!(matches!(result, Err(ConfigError::Message(_))), "{}", hours);
        }
    }
}
