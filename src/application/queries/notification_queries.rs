//! Notification Queries

/// 默认返回的通知条数
pub const DEFAULT_NOTIFICATION_LIMIT: usize = 50;

/// 最近通知
#[derive(Debug, Clone)]
pub struct ListNotifications {
    pub limit: usize,
}

impl Default for ListNotifications {
    fn default() -> Self {
        Self {
            limit: DEFAULT_NOTIFICATION_LIMIT,
        }
    }
}
