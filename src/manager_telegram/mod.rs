pub mod errors;

use std::time::Duration;
use log::{info, warn};
use ureq::Agent;
use crate::config::Bot;
use crate::manager_telegram::errors::TelegramError;
use crate::models::telegram::SendMessage;

/// Chat id of the administrator receiving breakage and recovery notices
pub const ADMIN_CHAT_ID: i64 = 263523529;

const API_DOMAIN: &str = "https://api.telegram.org";

/// Destinations the bot can deliver to
pub trait Notifier {
    /// Delivers a digest to the public channel, swallowing delivery failures
    fn notify_channel(&self, text: &str);
    /// Delivers a notice to the administrator, swallowing delivery failures
    fn notify_admin(&self, text: &str);
}

/// Struct for sending messages through the Telegram Bot API
pub struct Telegram {
    agent: Agent,
    token: String,
    channel: String,
    debug_mode: bool,
}

impl Telegram {
    /// Returns a new instance of the Telegram struct
    ///
    /// # Arguments
    ///
    /// * 'config' - the bot section of the configuration, token and
    ///   channel already filled in from the environment
    /// * 'debug_mode' - when set, messages are logged instead of sent
    pub fn new(config: &Bot, debug_mode: bool) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        let agent = agent_config.into();

        Self {
            agent,
            token: config.token.to_string(),
            channel: config.channel.to_string(),
            debug_mode,
        }
    }

    /// Sends a message to the given chat
    ///
    /// # Arguments
    ///
    /// * 'chat_id' - channel identifier or numeric chat id
    /// * 'text' - the message text
    fn send(&self, chat_id: String, text: &str) -> Result<(), TelegramError> {
        let req = SendMessage { chat_id, text: text.to_string() };
        let json = serde_json::to_string(&req)?;

        let url = format!("{}/bot{}/sendMessage", API_DOMAIN, self.token);
        let _ = self.agent
            .post(&url)
            .content_type("application/json")
            .send(json)?;

        Ok(())
    }

    /// Sends a message and swallows any delivery error. A failed send must
    /// never fail the run or block status persistence.
    fn notify(&self, chat_id: String, text: &str) {
        if self.debug_mode {
            info!("debug mode, message to {} withheld:\n{}", chat_id, text);
            return;
        }

        if let Err(e) = self.send(chat_id.clone(), text) {
            warn!("failed to deliver message to {}: {}", chat_id, e);
        }
    }
}

impl Notifier for Telegram {
    fn notify_channel(&self, text: &str) {
        self.notify(self.channel.clone(), text);
    }

    fn notify_admin(&self, text: &str) {
        self.notify(ADMIN_CHAT_ID.to_string(), text);
    }
}
