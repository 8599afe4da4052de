use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use super::workflow::{ApprovalLevel, EvaluationStatus, HistoryAction};

// Phiếu đánh giá điểm rèn luyện, kèm đầy đủ chi tiết điểm và lịch sử.
// Chi tiết và lịch sử luôn được nạp trọn vẹn cùng phiếu, không nạp trễ.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct Evaluation {
    // ID duy nhất
    pub id: i64,
    // Mã sinh viên (tham chiếu dịch vụ sinh viên, không khóa ngoại)
    pub student_code: String,
    // Học kỳ, ví dụ "2024-2025-HK1"
    pub semester: String,
    // Năm học, ví dụ "2024-2025"
    pub academic_year: Option<String>,
    // Phiếu tiêu chí được gắn lúc tạo, không đổi về sau
    pub rubric_id: i64,
    // Tổng điểm, luôn bằng tổng điểm các chi tiết
    pub total_points: f64,
    // Trạng thái quy trình duyệt
    pub status: EvaluationStatus,
    // Lý do từ chối gần nhất
    pub rejection_reason: Option<String>,
    // Cấp đã từ chối gần nhất, dùng để định tuyến nộp lại
    pub last_rejection_level: Option<ApprovalLevel>,
    // Số lần nộp lại sau khi bị từ chối
    pub resubmission_count: i32,
    // Người tạo hộ (null nếu sinh viên tự tạo)
    pub created_by: Option<i64>,
    // Thời điểm nộp gần nhất
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    // Thời điểm duyệt hoàn tất
    pub approved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    // Điểm theo từng tiêu chí
    pub details: Vec<EvaluationDetail>,
    // Lịch sử chuyển trạng thái, cũ nhất trước
    pub history: Vec<EvaluationHistoryEntry>,
}

// Điểm của một tiêu chí trong phiếu
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationDetail {
    pub criteria_id: i64,
    pub score: f64,
    // Minh chứng tự do
    pub evidence: String,
    // Điểm tự chấm tiêu chí con, chỉ mang tính tham khảo
    pub self_scores: BTreeMap<String, f64>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Một dòng lịch sử chuyển trạng thái
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationHistoryEntry {
    pub id: i64,
    pub action: HistoryAction,
    pub from_status: Option<EvaluationStatus>,
    pub to_status: EvaluationStatus,
    pub level: Option<ApprovalLevel>,
    pub actor_id: Option<i64>,
    pub actor_name: Option<String>,
    pub comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// Phiếu đánh giá dạng rút gọn cho danh sách
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationSummary {
    pub id: i64,
    pub student_code: String,
    pub semester: String,
    pub academic_year: Option<String>,
    pub rubric_id: i64,
    pub total_points: f64,
    pub status: EvaluationStatus,
    pub resubmission_count: i32,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
