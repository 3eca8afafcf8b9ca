//! Notification Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{NotificationRecord, NotificationRepositoryPort};
use crate::application::queries::ListNotifications;

/// ListNotifications Handler
pub struct ListNotificationsHandler {
    notification_repo: Arc<dyn NotificationRepositoryPort>,
}

impl ListNotificationsHandler {
    pub fn new(notification_repo: Arc<dyn NotificationRepositoryPort>) -> Self {
        Self { notification_repo }
    }

    pub async fn handle(
        &self,
        query: ListNotifications,
    ) -> Result<Vec<NotificationRecord>, ApplicationError> {
        Ok(self.notification_repo.find_recent(query.limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::handlers::{MarkNotificationReadHandler, UpdatePriceHandler};
    use crate::application::commands::{MarkNotificationRead, UpdatePrice};
    use crate::application::ports::{BookRepositoryPort, NewBook};
    use crate::domain::book::ChangeThresholds;
    use crate::infrastructure::persistence::sqlite::{
        memory_pool, SqliteBookRepository, SqliteNotificationRepository,
    };

    #[tokio::test]
    async fn test_price_change_notifications_are_listed_newest_first() {
        let pool = memory_pool().await;
        let books = Arc::new(SqliteBookRepository::new(pool.clone()));
        let notifications = Arc::new(SqliteNotificationRepository::new(pool));

        let book_id = books
            .insert(&NewBook {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                price: Some("9.99".parse().unwrap()),
                ..Default::default()
            })
            .await
            .unwrap();

        let update = UpdatePriceHandler::new(books.clone(), ChangeThresholds::default());
        for price in ["7.99", "8.99"] {
            update
                .handle(UpdatePrice {
                    book_id,
                    price: price.parse().unwrap(),
                    rating: None,
                    reviews_count: None,
                })
                .await
                .unwrap();
        }

        let listed = ListNotificationsHandler::new(notifications.clone())
            .handle(ListNotifications::default())
            .await
            .unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].message, "Price increase: $7.99 → $8.99");
        assert_eq!(listed[0].book_title, "Dune");
        assert_eq!(listed[0].notification_type, "price_change");
        assert!(!listed[0].is_read);

        MarkNotificationReadHandler::new(notifications.clone())
            .handle(MarkNotificationRead {
                notification_id: listed[1].id,
            })
            .await
            .unwrap();
        assert_eq!(notifications.count_unread().await.unwrap(), 1);
    }
}
