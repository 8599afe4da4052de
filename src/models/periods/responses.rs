use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::EvaluationPeriod;
use crate::models::PaginationInfo;

// Phản hồi danh sách đợt đánh giá
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/period.ts")]
pub struct PeriodListResponse {
    pub items: Vec<EvaluationPeriod>,
    pub pagination: PaginationInfo,
}
