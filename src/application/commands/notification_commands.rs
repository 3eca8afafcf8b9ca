//! Notification Commands

/// 标记通知已读命令
#[derive(Debug, Clone)]
pub struct MarkNotificationRead {
    pub notification_id: i64,
}
