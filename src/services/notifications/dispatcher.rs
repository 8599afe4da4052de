//! Bộ điều phối sự kiện chuyển trạng thái
//!
//! Điểm phát duy nhất cho mọi tác dụng phụ sau chuyển trạng thái: tầng
//! nghiệp vụ gọi `EventDispatcher::emit` SAU khi giao dịch đã commit, sự
//! kiện đi qua kênh mpsc và được một task nền tiêu thụ. Mọi lỗi ở phía tiêu
//! thụ (ghi thông báo, tra cứu người nhận) chỉ được ghi log rồi bỏ qua —
//! at-most-once, không thử lại, không bao giờ dội ngược về giao dịch.

use std::sync::{Arc, OnceLock};

use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{info, warn};

use crate::clients::AuthDirectoryClient;
use crate::errors::Result;
use crate::models::appeals::entities::AppealStatus;
use crate::models::notifications::entities::NotificationType;
use crate::models::notifications::events::TransitionEvent;
use crate::models::notifications::requests::CreateNotificationRequest;
use crate::storage::Storage;

static DISPATCHER: OnceLock<EventDispatcher> = OnceLock::new();

#[derive(Clone)]
pub struct EventDispatcher {
    tx: UnboundedSender<TransitionEvent>,
}

impl EventDispatcher {
    /// Khởi động task tiêu thụ và đăng ký bộ điều phối toàn cục
    pub fn init(storage: Arc<dyn Storage>, auth: Option<AuthDirectoryClient>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<TransitionEvent>();

        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if let Err(e) = handle_event(&storage, auth.as_ref(), &event).await {
                    warn!("Xử lý sự kiện thông báo thất bại ({:?}): {}", event, e);
                }
            }
        });

        if DISPATCHER.set(EventDispatcher { tx }).is_err() {
            warn!("EventDispatcher đã được khởi tạo trước đó");
        }
    }

    /// Phát một sự kiện, không chờ và không trả lỗi cho bên gọi
    pub fn emit(event: TransitionEvent) {
        match DISPATCHER.get() {
            Some(dispatcher) => {
                if dispatcher.tx.send(event).is_err() {
                    warn!("Kênh sự kiện đã đóng, bỏ qua sự kiện");
                }
            }
            None => warn!("EventDispatcher chưa khởi tạo, bỏ qua sự kiện"),
        }
    }
}

/// Ghi thông báo cho một sinh viên, cần đổi mã sinh viên sang ID người dùng
async fn notify_student(
    storage: &Arc<dyn Storage>,
    auth: Option<&AuthDirectoryClient>,
    student_code: &str,
    notification_type: NotificationType,
    title: String,
    content: String,
    reference_type: &str,
    reference_id: i64,
) -> Result<()> {
    let Some(auth) = auth else {
        info!(
            "Không có client xác thực, bỏ qua thông báo cho sinh viên {}",
            student_code
        );
        return Ok(());
    };

    let user_id = auth.get_user_id_by_student_code(student_code).await?;

    storage
        .create_notification(CreateNotificationRequest {
            user_id,
            notification_type,
            title,
            content,
            reference_type: Some(reference_type.to_string()),
            reference_id: Some(reference_id),
        })
        .await?;

    Ok(())
}

async fn handle_event(
    storage: &Arc<dyn Storage>,
    auth: Option<&AuthDirectoryClient>,
    event: &TransitionEvent,
) -> Result<()> {
    match event {
        TransitionEvent::EvaluationSubmitted {
            evaluation_id,
            student_code,
            semester,
        } => {
            notify_student(
                storage,
                auth,
                student_code,
                NotificationType::EvaluationSubmitted,
                "Đánh giá đã được nộp".to_string(),
                format!(
                    "Đánh giá điểm rèn luyện của bạn (Học kỳ: {semester}) đã được nộp thành công. Vui lòng chờ duyệt."
                ),
                "EVALUATION",
                *evaluation_id,
            )
            .await?;
            // Đẩy tới người duyệt cấp lớp đi qua kênh riêng của gateway
            info!(
                "Phiếu {} của sinh viên {} chờ duyệt cấp lớp",
                evaluation_id, student_code
            );
        }
        TransitionEvent::EvaluationEscalated {
            evaluation_id,
            student_code,
            next_level,
        } => {
            info!(
                "Phiếu {} của sinh viên {} chuyển lên cấp {}",
                evaluation_id, student_code, next_level
            );
        }
        TransitionEvent::EvaluationFinalApproved {
            evaluation_id,
            student_code,
            semester,
            total_points,
        } => {
            notify_student(
                storage,
                auth,
                student_code,
                NotificationType::EvaluationApproved,
                "Đánh giá đã được duyệt".to_string(),
                format!(
                    "Đánh giá điểm rèn luyện của bạn (Học kỳ: {semester}) đã được duyệt hoàn tất. Điểm: {total_points:.1}"
                ),
                "EVALUATION",
                *evaluation_id,
            )
            .await?;
        }
        TransitionEvent::EvaluationReturned {
            evaluation_id,
            student_code,
            level,
            reason,
        } => {
            notify_student(
                storage,
                auth,
                student_code,
                NotificationType::EvaluationReturned,
                "Phiếu đánh giá bị trả lại".to_string(),
                format!(
                    "Phiếu đánh giá của bạn bị trả lại ở cấp {level}. Lý do: {reason}. Vui lòng chỉnh sửa và nộp lại."
                ),
                "EVALUATION",
                *evaluation_id,
            )
            .await?;
        }
        TransitionEvent::EvaluationResubmitted {
            evaluation_id,
            student_code,
            resume_level,
        } => {
            info!(
                "Phiếu {} của sinh viên {} được nộp lại, chờ duyệt từ cấp {}",
                evaluation_id, student_code, resume_level
            );
        }
        TransitionEvent::AppealCreated {
            appeal_id,
            evaluation_id,
            student_code,
            semester,
        } => {
            notify_student(
                storage,
                auth,
                student_code,
                NotificationType::AppealCreated,
                "Đã tiếp nhận kháng nghị".to_string(),
                format!(
                    "Kháng nghị của bạn cho phiếu đánh giá học kỳ {semester} đã được tiếp nhận và đang chờ xét."
                ),
                "APPEAL",
                *appeal_id,
            )
            .await?;
            info!(
                "Kháng nghị {} cho phiếu {} đang chờ xét",
                appeal_id, evaluation_id
            );
        }
        TransitionEvent::AppealReviewed {
            appeal_id,
            student_code,
            decision,
        } => {
            let outcome = match decision {
                AppealStatus::Approved => "được chấp nhận",
                _ => "bị từ chối",
            };
            notify_student(
                storage,
                auth,
                student_code,
                NotificationType::AppealReviewed,
                "Kháng nghị đã được xét".to_string(),
                format!("Kháng nghị của bạn đã {outcome}. Xem chi tiết trong hệ thống."),
                "APPEAL",
                *appeal_id,
            )
            .await?;
        }
        TransitionEvent::PeriodDeadlineReminder {
            period_id,
            period_name,
            semester,
            days_left,
        } => {
            // Nhắc diện rộng cho sinh viên đi qua kênh broadcast của gateway
            info!(
                "Đợt \"{}\" (học kỳ {}, id {}) còn {} ngày nữa là đóng",
                period_name, semester, period_id, days_left
            );
        }
    }

    Ok(())
}
