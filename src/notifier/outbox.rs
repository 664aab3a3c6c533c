use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::{Notifier, OutboundMessage};
use crate::errors::{PortalError, Result};

/// 把每封消息写成 outbox 目录下的一个 `.eml` 文件，由外部投递程序取走
pub struct OutboxNotifier {
    dir: PathBuf,
    from: String,
}

impl OutboxNotifier {
    pub fn new(dir: impl Into<PathBuf>, from: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            from: from.into(),
        }
    }

    fn render(&self, message: &OutboundMessage) -> String {
        format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nDate: {}\r\nContent-Type: text/plain; charset=utf-8\r\n\r\n{}\r\n",
            self.from,
            message.to,
            message.subject,
            chrono::Utc::now().to_rfc2822(),
            message.body
        )
    }
}

#[async_trait]
impl Notifier for OutboxNotifier {
    async fn send(&self, message: OutboundMessage) -> Result<()> {
        // 收件人或主题中的换行会破坏报文头
        if [&message.to, &message.subject]
            .iter()
            .any(|v| v.contains(['\r', '\n']))
        {
            return Err(PortalError::notification("Message header contains a line break"));
        }

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            PortalError::notification(format!("Failed to create outbox directory: {e}"))
        })?;

        let file_name = format!(
            "{}-{}.eml",
            chrono::Utc::now().timestamp_millis(),
            uuid::Uuid::new_v4()
        );
        let path = self.dir.join(file_name);
        tokio::fs::write(&path, self.render(&message))
            .await
            .map_err(|e| PortalError::notification(format!("Failed to write outbox file: {e}")))?;

        debug!("Queued message for {} at {}", message.to, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_message_file() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = OutboxNotifier::new(dir.path().join("outbox"), "admissions@school.test");

        notifier
            .send(OutboundMessage::new(
                "parent@example.com",
                "Application approved",
                "Your registration number is VSS2025-0001",
            ))
            .await
            .unwrap();

        let mut entries = std::fs::read_dir(dir.path().join("outbox")).unwrap();
        let path = entries.next().unwrap().unwrap().path();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("To: parent@example.com\r\n"));
        assert!(content.contains("VSS2025-0001"));
    }

    #[tokio::test]
    async fn test_rejects_header_injection() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = OutboxNotifier::new(dir.path(), "admissions@school.test");

        let err = notifier
            .send(OutboundMessage::new("a@b.com\r\nBcc: x@y.com", "Hi", "body"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E015");
    }
}
