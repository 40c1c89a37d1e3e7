use serde::Serialize;

/// Request body for the Telegram Bot API sendMessage method
#[derive(Serialize)]
pub struct SendMessage {
    pub chat_id: String,
    pub text: String,
}
