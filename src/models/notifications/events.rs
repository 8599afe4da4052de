//! Sự kiện chuyển trạng thái phát cho bộ điều phối thông báo
//!
//! Mỗi chuyển trạng thái thành công phát đúng một sự kiện SAU khi giao dịch
//! đã commit. Bộ điều phối tiêu thụ sự kiện ở chế độ cố gắng tối đa: lỗi phía
//! thông báo chỉ được ghi log, không bao giờ dội ngược về nghiệp vụ.

use crate::models::appeals::entities::AppealStatus;
use crate::models::evaluations::workflow::ApprovalLevel;

/// Sự kiện nghiệp vụ phát sau mỗi chuyển trạng thái
#[derive(Debug, Clone)]
pub enum TransitionEvent {
    /// Sinh viên nộp phiếu, cần cấp lớp xét
    EvaluationSubmitted {
        evaluation_id: i64,
        student_code: String,
        semester: String,
    },
    /// Phiếu được duyệt một cấp, chuyển lên cấp kế tiếp
    EvaluationEscalated {
        evaluation_id: i64,
        student_code: String,
        next_level: ApprovalLevel,
    },
    /// Phiếu được CTSV duyệt hoàn tất
    EvaluationFinalApproved {
        evaluation_id: i64,
        student_code: String,
        semester: String,
        total_points: f64,
    },
    /// Phiếu bị trả lại kèm lý do
    EvaluationReturned {
        evaluation_id: i64,
        student_code: String,
        level: ApprovalLevel,
        reason: String,
    },
    /// Sinh viên nộp lại phiếu sau khi bị trả
    EvaluationResubmitted {
        evaluation_id: i64,
        student_code: String,
        resume_level: ApprovalLevel,
    },
    /// Kháng nghị mới được tạo
    AppealCreated {
        appeal_id: i64,
        evaluation_id: i64,
        student_code: String,
        semester: String,
    },
    /// Kháng nghị đã được xét
    AppealReviewed {
        appeal_id: i64,
        student_code: String,
        decision: AppealStatus,
    },
    /// Nhắc hạn đợt đánh giá sắp đóng
    PeriodDeadlineReminder {
        period_id: i64,
        period_name: String,
        semester: String,
        days_left: i64,
    },
}
