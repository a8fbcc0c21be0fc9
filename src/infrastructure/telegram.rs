//! Telegram Bot API notifier

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

use crate::config::TelegramConfig;
use crate::shared::errors::DeliveryError;
use super::traits::Notifier;

pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// `sendMessage` request body
#[derive(Debug, Serialize)]
pub struct SendMessagePayload<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'static str,
    pub disable_web_page_preview: bool,
}

impl<'a> SendMessagePayload<'a> {
    pub fn markdown(chat_id: &'a str, text: &'a str) -> Self {
        Self {
            chat_id,
            text,
            parse_mode: "markdown",
            disable_web_page_preview: true,
        }
    }
}

/// Sends alert messages to one Telegram chat
pub struct TelegramNotifier {
    http_client: Client,
    base_url: String,
    bot_id: String,
    recipient_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self::from_client(config, http_client))
    }

    pub fn from_client(config: &TelegramConfig, http_client: Client) -> Self {
        Self {
            http_client,
            base_url: TELEGRAM_API_URL.to_string(),
            bot_id: config.bot_id.clone(),
            recipient_id: config.recipient_id.clone(),
        }
    }

    /// Point the notifier at another Bot API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.bot_id)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        let payload = SendMessagePayload::markdown(&self.recipient_id, text);

        let response = self
            .http_client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("📨 Alert delivered to chat {}", self.recipient_id);
        Ok(())
    }
}
