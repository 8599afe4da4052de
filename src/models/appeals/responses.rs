use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Appeal;
use crate::models::PaginationInfo;

// Phản hồi danh sách kháng nghị
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/appeal.ts")]
pub struct AppealListResponse {
    pub items: Vec<Appeal>,
    pub pagination: PaginationInfo,
}
