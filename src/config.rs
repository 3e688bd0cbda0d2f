//! Server Configuration
//!
//! Settings come from three places, later ones winning:
//!
//! 1. Built-in defaults (`127.0.0.1:8080`)
//! 2. The `PORT` environment variable
//! 3. Command-line flags (`--host`, `--port`)

use crate::{DEFAULT_HOST, DEFAULT_PORT};

/// Environment variable consulted for the listening port.
pub const PORT_ENV: &str = "PORT";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// What the command line asked the process to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Run(Config),
    Help,
    Version,
}

/// Errors that can occur while reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("invalid port number: {0}")]
    InvalidPort(String),

    #[error("invalid PORT environment variable: {0}")]
    InvalidEnvPort(String),

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

impl Config {
    /// Reads the configuration from the process environment and arguments.
    pub fn load() -> Result<ConfigAction, ConfigError> {
        Self::parse(std::env::args().skip(1), std::env::var(PORT_ENV).ok())
    }

    /// Parses `args` (without the program name) on top of an optional
    /// `PORT` value.
    pub fn parse<I, S>(args: I, env_port: Option<String>) -> Result<ConfigAction, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Config::default();

        // An empty PORT is treated as unset
        if let Some(raw) = env_port.filter(|p| !p.is_empty()) {
            config.port = raw.parse().map_err(|_| ConfigError::InvalidEnvPort(raw))?;
        }

        let mut args = args.into_iter().map(Into::<String>::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--host" | "-h" => {
                    config.host = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                }
                "--port" | "-p" => {
                    let raw = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    config.port = raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?;
                }
                "--help" => return Ok(ConfigAction::Help),
                "--version" | "-v" => return Ok(ConfigAction::Version),
                _ => return Err(ConfigError::UnknownArgument(arg.clone())),
            }
        }

        Ok(ConfigAction::Run(config))
    }

    /// Returns the bind address as a string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
