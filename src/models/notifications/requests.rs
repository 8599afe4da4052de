use serde::Deserialize;
use ts_rs::TS;

use super::entities::NotificationType;
use crate::models::common::pagination::PaginationQuery;

// Yêu cầu tạo thông báo (dùng nội bộ bởi bộ điều phối)
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct CreateNotificationRequest {
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub content: String,
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
}

// Tham số truy vấn danh sách thông báo
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub unread_only: Option<bool>,
}
