//! Notification Command Handlers

use std::sync::Arc;

use crate::application::commands::MarkNotificationRead;
use crate::application::error::ApplicationError;
use crate::application::ports::NotificationRepositoryPort;

/// MarkNotificationRead Handler
pub struct MarkNotificationReadHandler {
    notification_repo: Arc<dyn NotificationRepositoryPort>,
}

impl MarkNotificationReadHandler {
    pub fn new(notification_repo: Arc<dyn NotificationRepositoryPort>) -> Self {
        Self { notification_repo }
    }

    pub async fn handle(&self, command: MarkNotificationRead) -> Result<(), ApplicationError> {
        let found = self
            .notification_repo
            .mark_read(command.notification_id)
            .await?;
        if !found {
            return Err(ApplicationError::not_found(
                "Notification",
                command.notification_id,
            ));
        }

        tracing::debug!(notification_id = command.notification_id, "Notification marked read");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{memory_pool, SqliteNotificationRepository};

    #[tokio::test]
    async fn test_unknown_notification_is_not_found() {
        let repo = Arc::new(SqliteNotificationRepository::new(memory_pool().await));
        let err = MarkNotificationReadHandler::new(repo)
            .handle(MarkNotificationRead { notification_id: 3 })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { id: 3, .. }));
    }
}
