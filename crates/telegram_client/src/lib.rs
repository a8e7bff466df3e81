//! Telegram notification client.
//!
//! Renders slip summaries and sends them through the Bot API.

pub mod message;
pub mod notifier;

use async_trait::async_trait;
use common::{Error, MessageSender, Result};
use serde::Serialize;
use tracing::debug;

pub use message::{format_slip_message, html_escape};
pub use notifier::{NotifyOutcome, SlipNotifier};

const TELEGRAM_API: &str = "https://api.telegram.org";

/// Request body for sendMessage
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

/// Bot API client bound to one bot token.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    bot_token: String,
    client: reqwest::Client,
}

impl TelegramClient {
    pub fn new(bot_token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Http(format!("failed to build Telegram HTTP client: {e}")))?;

        Ok(Self {
            bot_token: bot_token.into(),
            client,
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", TELEGRAM_API, self.bot_token)
    }
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "HTML",
            disable_web_page_preview: false,
        };

        let resp = self
            .client
            .post(self.send_message_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Notify(format!("Telegram request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(500).collect();
            return Err(Error::Notify(format!(
                "Telegram API returned {}: {}",
                status, snippet
            )));
        }

        debug!("Telegram message sent to chat {}", chat_id);
        Ok(())
    }
}
