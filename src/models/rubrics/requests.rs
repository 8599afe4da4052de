use serde::Deserialize;
use ts_rs::TS;

// Yêu cầu tạo rubric kèm danh sách tiêu chí
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rubric.ts")]
pub struct CreateRubricRequest {
    pub name: String,
    pub description: Option<String>,
    pub max_points: f64,
    pub academic_year: Option<String>,
    pub criteria: Vec<CreateCriterionRequest>,
}

// Một tiêu chí trong yêu cầu tạo rubric
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rubric.ts")]
pub struct CreateCriterionRequest {
    pub name: String,
    pub description: Option<String>,
    pub max_points: f64,
    pub order_index: i32,
}

// Tham số truy vấn danh sách rubric
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rubric.ts")]
pub struct RubricListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub academic_year: Option<String>,
    pub active_only: Option<bool>,
}
