pub mod approve;
pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod reject;
pub mod resubmit;
pub mod submit;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::clients::StudentDirectoryClient;
use crate::middlewares::Actor;
use crate::models::evaluations::requests::{
    ApproveEvaluationRequest, CreateEvaluationRequest, EvaluationListQuery, PendingReviewQuery,
    RejectEvaluationRequest, ResubmitEvaluationRequest, UpdateEvaluationRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// Các vai trò được duyệt/từ chối phiếu
pub const REVIEWER_ROLES: &[&str] = &["CLASS_MONITOR", "ADVISOR", "FACULTY", "CTSV"];

pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_student_directory(&self, request: &HttpRequest) -> StudentDirectoryClient {
        request
            .app_data::<actix_web::web::Data<StudentDirectoryClient>>()
            .expect("StudentDirectoryClient not found in app data")
            .get_ref()
            .clone()
    }

    /// Tạo phiếu đánh giá
    pub async fn create_evaluation(
        &self,
        request: &HttpRequest,
        actor: Actor,
        req: CreateEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_evaluation(self, request, actor, req).await
    }

    /// Lấy phiếu theo ID
    pub async fn get_evaluation(
        &self,
        request: &HttpRequest,
        actor: Actor,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_evaluation(self, request, actor, evaluation_id).await
    }

    /// Đọc lịch sử phiếu
    pub async fn get_evaluation_history(
        &self,
        request: &HttpRequest,
        actor: Actor,
        evaluation_id: i64,
        newest_first: bool,
    ) -> ActixResult<HttpResponse> {
        detail::get_evaluation_history(self, request, actor, evaluation_id, newest_first).await
    }

    /// Liệt kê phiếu
    pub async fn list_evaluations(
        &self,
        request: &HttpRequest,
        query: EvaluationListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_evaluations(self, request, query).await
    }

    /// Liệt kê phiếu chờ duyệt theo cấp
    pub async fn list_pending_evaluations(
        &self,
        request: &HttpRequest,
        query: PendingReviewQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_pending_evaluations(self, request, query).await
    }

    /// Cập nhật bản nháp
    pub async fn update_draft(
        &self,
        request: &HttpRequest,
        actor: Actor,
        evaluation_id: i64,
        req: UpdateEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_draft(self, request, actor, evaluation_id, req).await
    }

    /// Nộp phiếu
    pub async fn submit_evaluation(
        &self,
        request: &HttpRequest,
        actor: Actor,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        submit::submit_evaluation(self, request, actor, evaluation_id).await
    }

    /// Duyệt phiếu
    pub async fn approve_evaluation(
        &self,
        request: &HttpRequest,
        actor: Actor,
        evaluation_id: i64,
        req: ApproveEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        approve::approve_evaluation(self, request, actor, evaluation_id, req).await
    }

    /// Từ chối phiếu
    pub async fn reject_evaluation(
        &self,
        request: &HttpRequest,
        actor: Actor,
        evaluation_id: i64,
        req: RejectEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        reject::reject_evaluation(self, request, actor, evaluation_id, req).await
    }

    /// Nộp lại phiếu sau khi bị từ chối
    pub async fn resubmit_evaluation(
        &self,
        request: &HttpRequest,
        actor: Actor,
        evaluation_id: i64,
        req: ResubmitEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        resubmit::resubmit_evaluation(self, request, actor, evaluation_id, req).await
    }

    /// Xóa bản nháp
    pub async fn delete_draft(
        &self,
        request: &HttpRequest,
        actor: Actor,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_draft(self, request, actor, evaluation_id).await
    }
}

/// Kiểm tra người gọi có quyền thao tác trên phiếu với tư cách chủ phiếu.
///
/// ADMIN được phép thao tác hộ; còn lại mã sinh viên của người gọi phải
/// trùng chủ phiếu. Trả về phản hồi lỗi dựng sẵn khi không đạt.
pub(crate) async fn check_evaluation_owner(
    storage: &Arc<dyn Storage>,
    actor: &Actor,
    evaluation_id: i64,
) -> Result<(), HttpResponse> {
    if actor.has_role("ADMIN") {
        return Ok(());
    }

    let evaluation = match storage.get_evaluation_by_id(evaluation_id).await {
        Ok(Some(e)) => e,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EvaluationNotFound,
                "Không tìm thấy phiếu đánh giá",
            )));
        }
        Err(e) => return Err(crate::services::error_response(&e)),
    };

    match &actor.student_code {
        Some(code) if *code == evaluation.student_code => Ok(()),
        // Từ chối chung chung, không tiết lộ phiếu thuộc về ai
        _ => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotOwner,
            "Không có quyền thao tác trên phiếu đánh giá này",
        ))),
    }
}
