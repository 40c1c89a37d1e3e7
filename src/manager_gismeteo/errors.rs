use thiserror::Error;

/// Errors from fetching and extracting the forecast page
///
/// Transport covers the network/HTTP layer. Extraction means the page was
/// retrieved but no longer matches the expected structure, which is the
/// signal that the upstream layout has changed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeatherError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("page structure mismatch: {0}")]
    Extraction(String),
}

impl From<ureq::Error> for WeatherError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(code) => WeatherError::Transport(format!("HTTP {}", code)),
            e => WeatherError::Transport(e.to_string()),
        }
    }
}
