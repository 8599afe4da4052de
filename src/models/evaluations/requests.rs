use serde::Deserialize;
use std::collections::BTreeMap;
use ts_rs::TS;

use super::workflow::{ApprovalLevel, EvaluationStatus};

// Điểm tự chấm cho một tiêu chí trong yêu cầu tạo/cập nhật/nộp lại
//
// score để null sẽ được quy về 0 thay vì bị từ chối, áp dụng như nhau cho
// bản nháp lẫn phiếu nộp lại.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationDetailInput {
    pub criteria_id: i64,
    pub score: Option<f64>,
    pub evidence: Option<String>,
    pub self_scores: Option<BTreeMap<String, f64>>,
}

// Yêu cầu tạo phiếu đánh giá (trạng thái DRAFT)
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct CreateEvaluationRequest {
    pub student_code: String,
    pub rubric_id: i64,
    pub semester: String,
    pub academic_year: Option<String>,
    pub details: Vec<EvaluationDetailInput>,
}

// Yêu cầu cập nhật bản nháp (thay toàn bộ chi tiết điểm)
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct UpdateEvaluationRequest {
    pub details: Vec<EvaluationDetailInput>,
}

// Yêu cầu duyệt phiếu
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ApproveEvaluationRequest {
    pub comment: Option<String>,
}

// Yêu cầu từ chối phiếu
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct RejectEvaluationRequest {
    pub reason: String,
}

// Yêu cầu nộp lại sau khi bị từ chối (thay toàn bộ chi tiết điểm)
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ResubmitEvaluationRequest {
    pub details: Vec<EvaluationDetailInput>,
    // Phản hồi của sinh viên đối với lý do từ chối
    pub response_to_rejection: String,
}

// Tham số truy vấn danh sách phiếu (dùng cho tầng lưu trữ)
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_code: Option<String>,
    pub semester: Option<String>,
    pub status: Option<EvaluationStatus>,
}

// Tham số truy vấn danh sách phiếu chờ duyệt theo cấp
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct PendingReviewQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    // Không truyền cấp thì trả về phiếu chờ duyệt ở mọi cấp
    pub level: Option<ApprovalLevel>,
}
