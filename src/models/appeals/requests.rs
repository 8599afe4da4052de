use serde::Deserialize;
use ts_rs::TS;

use super::entities::{AppealDecision, AppealStatus};

// Yêu cầu tạo kháng nghị
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/appeal.ts")]
pub struct CreateAppealRequest {
    pub evaluation_id: i64,
    pub reason: String,
}

// Yêu cầu xét kháng nghị
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/appeal.ts")]
pub struct ReviewAppealRequest {
    pub decision: AppealDecision,
    pub comment: Option<String>,
}

// Tham số truy vấn danh sách kháng nghị
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/appeal.ts")]
pub struct AppealListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_code: Option<String>,
    pub status: Option<AppealStatus>,
}
