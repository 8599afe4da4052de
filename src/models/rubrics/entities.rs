use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Phiếu tiêu chí đánh giá (rubric), có phiên bản theo năm học.
// Phiếu đánh giá gắn với đúng một rubric tại thời điểm tạo và không đổi.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rubric.ts")]
pub struct Rubric {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    // Tổng điểm tối đa của cả phiếu
    pub max_points: f64,
    pub academic_year: Option<String>,
    // Rubric ngừng hoạt động thì không gắn được vào phiếu mới
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    // Các tiêu chí, theo thứ tự hiển thị
    pub criteria: Vec<Criterion>,
}

// Một tiêu chí trong rubric
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rubric.ts")]
pub struct Criterion {
    pub id: i64,
    pub rubric_id: i64,
    pub name: String,
    pub description: Option<String>,
    // Điểm tối đa; tiêu chí trừ điểm vẫn dùng mức trần này,
    // điểm âm do quy ước của rubric chứ không bị chặn dưới
    pub max_points: f64,
    pub order_index: i32,
}
