use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Rubric;
use crate::models::PaginationInfo;

// Phản hồi danh sách rubric
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rubric.ts")]
pub struct RubricListResponse {
    pub items: Vec<Rubric>,
    pub pagination: PaginationInfo,
}
