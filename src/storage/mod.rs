use std::sync::Arc;

use crate::models::{
    appeals::{
        entities::{Appeal, AppealDecision},
        requests::AppealListQuery,
        responses::AppealListResponse,
    },
    evaluations::{
        entities::{Evaluation, EvaluationHistoryEntry},
        requests::{
            CreateEvaluationRequest, EvaluationDetailInput, EvaluationListQuery, PendingReviewQuery,
        },
        responses::EvaluationListResponse,
    },
    notifications::{
        entities::Notification, requests::CreateNotificationRequest,
        requests::NotificationListQuery, responses::NotificationListResponse,
    },
    periods::{
        entities::EvaluationPeriod,
        requests::{CreatePeriodRequest, PeriodListQuery, UpdatePeriodRequest},
        responses::PeriodListResponse,
    },
    rubrics::{
        entities::Rubric,
        requests::{CreateRubricRequest, RubricListQuery},
        responses::RubricListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Quy trình phiếu đánh giá
    // Tạo phiếu ở trạng thái DRAFT (đã kiểm tra sinh viên tồn tại ở tầng trên)
    async fn create_evaluation(
        &self,
        req: CreateEvaluationRequest,
        created_by: Option<i64>,
    ) -> Result<Evaluation>;
    // Lấy phiếu kèm đầy đủ chi tiết và lịch sử
    async fn get_evaluation_by_id(&self, id: i64) -> Result<Option<Evaluation>>;
    // Liệt kê phiếu theo sinh viên / học kỳ / trạng thái
    async fn list_evaluations_with_pagination(
        &self,
        query: EvaluationListQuery,
    ) -> Result<EvaluationListResponse>;
    // Liệt kê phiếu đang chờ duyệt theo cấp
    async fn list_pending_evaluations(
        &self,
        query: PendingReviewQuery,
    ) -> Result<EvaluationListResponse>;
    // Thay toàn bộ chi tiết điểm của bản nháp
    async fn update_draft_details(
        &self,
        id: i64,
        details: Vec<EvaluationDetailInput>,
    ) -> Result<Evaluation>;
    // Nộp phiếu (DRAFT → SUBMITTED, yêu cầu có đợt đang mở đúng học kỳ)
    async fn submit_evaluation(&self, id: i64) -> Result<Evaluation>;
    // Duyệt phiếu lên cấp kế tiếp
    async fn approve_evaluation(
        &self,
        id: i64,
        comment: Option<String>,
        approver_id: Option<i64>,
        approver_name: Option<String>,
    ) -> Result<Evaluation>;
    // Từ chối phiếu, ghi lại cấp từ chối
    async fn reject_evaluation(
        &self,
        id: i64,
        reason: String,
        rejector_id: Option<i64>,
        rejector_name: Option<String>,
    ) -> Result<Evaluation>;
    // Nộp lại sau khi bị từ chối, quay về đúng cấp đã từ chối
    async fn resubmit_evaluation(
        &self,
        id: i64,
        details: Vec<EvaluationDetailInput>,
        response_text: String,
    ) -> Result<Evaluation>;
    // Xóa bản nháp, chỉ chủ phiếu xóa được
    async fn delete_draft_evaluation(&self, id: i64, requester_student_code: &str) -> Result<()>;
    // Đọc lịch sử một phiếu, thứ tự ổn định
    async fn list_evaluation_history(
        &self,
        evaluation_id: i64,
        newest_first: bool,
    ) -> Result<Vec<EvaluationHistoryEntry>>;

    /// Kháng nghị
    // Tạo kháng nghị cho phiếu đã duyệt cấp khoa
    async fn create_appeal(
        &self,
        evaluation_id: i64,
        student_code: &str,
        reason: String,
    ) -> Result<Appeal>;
    // Lấy kháng nghị theo ID
    async fn get_appeal_by_id(&self, id: i64) -> Result<Option<Appeal>>;
    // Xét kháng nghị (một lần duy nhất)
    async fn review_appeal(
        &self,
        id: i64,
        decision: AppealDecision,
        reviewer_id: i64,
        comment: Option<String>,
    ) -> Result<Appeal>;
    // Liệt kê kháng nghị
    async fn list_appeals_with_pagination(
        &self,
        query: AppealListQuery,
    ) -> Result<AppealListResponse>;

    /// Danh mục rubric / tiêu chí
    // Tạo rubric kèm tiêu chí
    async fn create_rubric(&self, req: CreateRubricRequest) -> Result<Rubric>;
    // Lấy rubric kèm tiêu chí
    async fn get_rubric_by_id(&self, id: i64) -> Result<Option<Rubric>>;
    // Liệt kê rubric
    async fn list_rubrics_with_pagination(
        &self,
        query: RubricListQuery,
    ) -> Result<RubricListResponse>;
    // Ngừng sử dụng rubric
    async fn deactivate_rubric(&self, id: i64) -> Result<bool>;
    // Đếm số rubric (phục vụ khởi tạo dữ liệu mẫu)
    async fn count_rubrics(&self) -> Result<u64>;

    /// Đợt đánh giá
    // Tạo đợt
    async fn create_period(&self, req: CreatePeriodRequest) -> Result<EvaluationPeriod>;
    // Cập nhật đợt
    async fn update_period(
        &self,
        id: i64,
        req: UpdatePeriodRequest,
    ) -> Result<Option<EvaluationPeriod>>;
    // Liệt kê đợt
    async fn list_periods_with_pagination(&self, query: PeriodListQuery)
    -> Result<PeriodListResponse>;
    // Tìm đợt đang mở cho một học kỳ tại một thời điểm
    async fn get_open_period_for_semester(
        &self,
        semester: &str,
        at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<EvaluationPeriod>>;
    // Liệt kê đợt đang hoạt động (phục vụ quét nhắc hạn)
    async fn list_active_periods(&self) -> Result<Vec<EvaluationPeriod>>;

    /// Thông báo
    // Tạo thông báo
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification>;
    // Liệt kê thông báo của một người dùng
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    // Đếm thông báo chưa đọc
    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64>;
    // Đánh dấu đã đọc (chỉ thông báo của đúng người dùng đó)
    async fn mark_notification_as_read(&self, user_id: i64, notification_id: i64) -> Result<bool>;
    // Đánh dấu tất cả đã đọc
    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
