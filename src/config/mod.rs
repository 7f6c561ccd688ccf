use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `*` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.cors_origins", vec!["*"])?
            .set_default("database.url", "sqlite://campuslink.db")?
            .set_default("database.max_connections", 10)?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Environment variables, e.g. CAMPUSLINK__SERVER__PORT=8080
            .add_source(
                Environment::with_prefix("CAMPUSLINK")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )

            .build()?;

        config.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                cors_origins: default_cors_origins(),
            },
            database: DatabaseConfig {
                url: "sqlite://campuslink.db".to_string(),
                max_connections: 10,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_local_port_5000() {
        let settings = Settings::default();
        assert_eq!(settings.bind_address(), "127.0.0.1:5000");
        assert!(settings.server.allows_any_origin());
        assert_eq!(settings.database.max_connections, 10);
    }

    #[test]
    fn explicit_origins_disable_permissive_cors() {
        let mut settings = Settings::default();
        settings.server.cors_origins = vec!["https://campus.example.edu".to_string()];
        assert!(!settings.server.allows_any_origin());
    }
}
