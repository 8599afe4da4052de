use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Notification;
use crate::models::PaginationInfo;

// Phản hồi danh sách thông báo
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListResponse {
    pub items: Vec<Notification>,
    pub pagination: PaginationInfo,
}

// Phản hồi số thông báo chưa đọc
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct UnreadCountResponse {
    pub unread: i64,
}
