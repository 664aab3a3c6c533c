//! 通知投递
//!
//! 通知是尽力而为的：调用方记录失败并降级，不回滚已完成的数据变更。
//! 后端由 `notifier.type` 选择：`log` 只写日志，`outbox` 写入本地目录。

pub mod log;
pub mod outbox;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};

/// 一封待发送的消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutboundMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> Result<()>;
}

/// 按配置创建通知后端
pub fn create_notifier() -> Result<Arc<dyn Notifier>> {
    let config = AppConfig::get();
    let from = config.notifier.from_address.clone();

    match config.notifier.notifier_type.as_str() {
        "log" => Ok(Arc::new(log::LogNotifier::new(from))),
        "outbox" => Ok(Arc::new(outbox::OutboxNotifier::new(
            &config.notifier.outbox_dir,
            from,
        ))),
        other => Err(PortalError::notification(format!(
            "Unknown notifier type: {other}"
        ))),
    }
}
