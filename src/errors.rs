use thiserror::Error;

#[derive(Error, Debug)]
#[error("ConfigError: {0}")]
pub struct ConfigError(pub String);

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError(format!("config file error: {}", e))
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError(format!("toml document error: {}", e))
    }
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self {
        ConfigError(e.to_string())
    }
}

#[derive(Error, Debug)]
#[error("StatusError: {0}")]
pub struct StatusError(pub String);

impl From<std::io::Error> for StatusError {
    fn from(e: std::io::Error) -> Self {
        StatusError(format!("status file error: {}", e))
    }
}
impl From<serde_json::Error> for StatusError {
    fn from(e: serde_json::Error) -> Self {
        StatusError(format!("json document error: {}", e))
    }
}

#[derive(Error, Debug)]
#[error("InitError: {0}")]
pub struct InitError(pub String);

impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        InitError(e.to_string())
    }
}
impl From<StatusError> for InitError {
    fn from(e: StatusError) -> Self {
        InitError(e.to_string())
    }
}
impl From<std::io::Error> for InitError {
    fn from(e: std::io::Error) -> Self {
        InitError(format!("log file error: {}", e))
    }
}
impl From<log4rs::config::runtime::ConfigErrors> for InitError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self {
        InitError(format!("logger configuration error: {}", e))
    }
}
impl From<log::SetLoggerError> for InitError {
    fn from(e: log::SetLoggerError) -> Self {
        InitError(format!("logger installation error: {}", e))
    }
}

/// Raised by the digest builder when too few of the requested forecast
/// hours survive into the message
#[derive(Error, Debug, PartialEq)]
pub enum DigestError {
    #[error("only {got} of {want} requested forecast hours available")]
    InsufficientData { got: usize, want: usize },
}
