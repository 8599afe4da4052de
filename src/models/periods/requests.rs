use serde::Deserialize;
use ts_rs::TS;

// Yêu cầu tạo đợt đánh giá
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/period.ts")]
pub struct CreatePeriodRequest {
    pub name: String,
    pub semester: String,
    pub academic_year: String,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub description: Option<String>,
    pub rubric_id: Option<i64>,
}

// Yêu cầu cập nhật đợt đánh giá
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/period.ts")]
pub struct UpdatePeriodRequest {
    pub name: Option<String>,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

// Tham số truy vấn danh sách đợt
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/period.ts")]
pub struct PeriodListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub semester: Option<String>,
    pub academic_year: Option<String>,
    pub active_only: Option<bool>,
}
