use async_trait::async_trait;
use tracing::info;

use super::{Notifier, OutboundMessage};
use crate::errors::Result;

/// 只把消息写进日志，用于开发环境
pub struct LogNotifier {
    from: String,
}

impl LogNotifier {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: OutboundMessage) -> Result<()> {
        info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            "Outbound message: {}",
            message.body
        );
        Ok(())
    }
}
