//! Notification HTTP Handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{ListNotifications, MarkNotificationRead};
use crate::infrastructure::http::dto::{NotificationDto, NotificationsResponse, SuccessResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 最近 50 条通知
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NotificationsResponse>, ApiError> {
    let notifications = state
        .list_notifications_handler
        .handle(ListNotifications::default())
        .await?;

    Ok(Json(NotificationsResponse {
        notifications: notifications.into_iter().map(NotificationDto::from).collect(),
    }))
}

pub async fn mark_notification_read(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Path(notification_id) = path?;
    state
        .mark_notification_read_handler
        .handle(MarkNotificationRead { notification_id })
        .await?;

    Ok(Json(SuccessResponse::ok()))
}
