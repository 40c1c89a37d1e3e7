use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with Telegram: {0}")]
pub struct TelegramError(pub String);

impl From<serde_json::Error> for TelegramError {
    fn from(e: serde_json::Error) -> TelegramError {
        TelegramError(format!("json document error: {}", e))
    }
}
impl From<ureq::Error> for TelegramError {
    fn from(e: ureq::Error) -> TelegramError {
        TelegramError(format!("http request error: {}", e))
    }
}
