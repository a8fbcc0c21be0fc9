use async_trait::async_trait;
use tracing::info;

use crate::shared::errors::DeliveryError;
use super::traits::Notifier;

/// Dry-run notifier: writes the message to the log instead of sending it
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        info!("🔕 Dry run, alert not sent:\n{}", text);
        Ok(())
    }
}
