//! Slip notifier: applies the enabled/addressing policy, then dispatches.

use common::config::NotifyConfig;
use common::{MessageSender, Proposition, Result};
use tracing::{info, warn};

use crate::message::format_slip_message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    /// Notifications switched off in config.
    Disabled,
    /// No destination chat configured.
    MissingAddress,
    /// Empty link: nothing to send.
    EmptyLink,
}

pub struct SlipNotifier {
    sender: Box<dyn MessageSender>,
    enabled: bool,
    chat_id: Option<String>,
}

impl SlipNotifier {
    pub fn new(sender: Box<dyn MessageSender>, enabled: bool, chat_id: Option<String>) -> Self {
        let chat_id = chat_id.filter(|id| !id.trim().is_empty());
        Self {
            sender,
            enabled,
            chat_id,
        }
    }

    pub fn from_config(sender: Box<dyn MessageSender>, cfg: &NotifyConfig) -> Self {
        Self::new(sender, cfg.enabled, Some(cfg.chat_id.clone()))
    }

    /// Send one slip message. Dispatch failures come back as `Err` and are
    /// not retried.
    pub async fn send_slip(&self, shortlist: &[Proposition], link: &str) -> Result<NotifyOutcome> {
        if link.is_empty() {
            info!("Empty link, nothing to notify");
            return Ok(NotifyOutcome::EmptyLink);
        }
        let chat_id = match self.destination() {
            Ok(chat_id) => chat_id,
            Err(outcome) => return Ok(outcome),
        };

        let message = format_slip_message(shortlist, link);
        self.sender.send_message(chat_id, &message).await?;
        info!("Sent slip notification with {} legs", shortlist.len());
        Ok(NotifyOutcome::Sent)
    }

    /// Send a connectivity test message.
    pub async fn send_test(&self) -> Result<NotifyOutcome> {
        let chat_id = match self.destination() {
            Ok(chat_id) => chat_id,
            Err(outcome) => return Ok(outcome),
        };
        self.sender
            .send_message(chat_id, "Slip generator: connection test successful!")
            .await?;
        Ok(NotifyOutcome::Sent)
    }

    fn destination(&self) -> std::result::Result<&str, NotifyOutcome> {
        if !self.enabled {
            info!("Telegram notifications disabled");
            return Err(NotifyOutcome::Disabled);
        }
        match self.chat_id.as_deref() {
            Some(chat_id) => Ok(chat_id),
            None => {
                warn!("Telegram chat id not configured, skipping notification");
                Err(NotifyOutcome::MissingAddress)
            }
        }
    }
}
