use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::EvaluationSummary;
use crate::models::PaginationInfo;

// Phản hồi danh sách phiếu đánh giá
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationListResponse {
    pub items: Vec<EvaluationSummary>,
    pub pagination: PaginationInfo,
}
