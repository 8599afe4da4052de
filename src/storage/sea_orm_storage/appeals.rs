//! Thao tác lưu trữ kháng nghị
//!
//! Kháng nghị chỉ tham chiếu phiếu đánh giá; tạo hay xét kháng nghị không
//! bao giờ làm thay đổi phiếu.

use super::{SeaOrmStorage, opt_ts_to_datetime, ts_to_datetime};
use crate::entity::appeals::{ActiveModel, Column, Entity as Appeals};
use crate::entity::evaluations::Entity as Evaluations;
use crate::errors::{DrlError, Result};
use crate::models::{
    PaginationInfo,
    appeals::{
        entities::{Appeal, AppealDecision, AppealStatus},
        requests::AppealListQuery,
        responses::AppealListResponse,
    },
    evaluations::workflow::EvaluationStatus,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

fn to_appeal(model: crate::entity::appeals::Model) -> Result<Appeal> {
    Ok(Appeal {
        id: model.id,
        evaluation_id: model.evaluation_id,
        student_code: model.student_code,
        reason: model.reason,
        status: model
            .status
            .parse::<AppealStatus>()
            .map_err(DrlError::database_operation)?,
        reviewer_id: model.reviewer_id,
        reviewer_comment: model.reviewer_comment,
        created_at: ts_to_datetime(model.created_at),
        reviewed_at: opt_ts_to_datetime(model.reviewed_at),
    })
}

impl SeaOrmStorage {
    /// Tạo kháng nghị
    ///
    /// Chỉ hợp lệ khi phiếu đang ở FACULTY_APPROVED (mốc duyệt cuối trước khi
    /// CTSV chốt vĩnh viễn) và người kháng nghị là chủ phiếu.
    pub async fn create_appeal_impl(
        &self,
        evaluation_id: i64,
        student_code: &str,
        reason: String,
    ) -> Result<Appeal> {
        let evaluation = Evaluations::find_by_id(evaluation_id)
            .one(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn phiếu thất bại: {e}")))?
            .ok_or_else(|| {
                DrlError::not_found(format!("Không tìm thấy phiếu đánh giá {evaluation_id}"))
            })?;

        if evaluation.student_code != student_code {
            return Err(DrlError::ownership(
                "Chỉ được kháng nghị phiếu đánh giá của chính mình",
            ));
        }

        let status: EvaluationStatus = evaluation
            .status
            .parse()
            .map_err(DrlError::database_operation)?;
        if status != EvaluationStatus::FacultyApproved {
            return Err(DrlError::transition_refused("APPEAL", status));
        }

        let model = ActiveModel {
            evaluation_id: Set(evaluation_id),
            student_code: Set(student_code.to_string()),
            reason: Set(reason),
            status: Set(AppealStatus::Pending.to_string()),
            reviewer_id: Set(None),
            reviewer_comment: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            reviewed_at: Set(None),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Tạo kháng nghị thất bại: {e}")))?;

        to_appeal(inserted)
    }

    /// Lấy kháng nghị theo ID
    pub async fn get_appeal_by_id_impl(&self, id: i64) -> Result<Option<Appeal>> {
        let result = Appeals::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn kháng nghị thất bại: {e}")))?;

        result.map(to_appeal).transpose()
    }

    /// Xét kháng nghị
    ///
    /// Quyết định là một chiều: kháng nghị đã xét thì lần xét thứ hai phải
    /// thất bại chứ không ghi đè. Cập nhật có điều kiện trên trạng thái
    /// PENDING để hai người xét đồng thời chỉ một người thắng.
    pub async fn review_appeal_impl(
        &self,
        id: i64,
        decision: AppealDecision,
        reviewer_id: i64,
        comment: Option<String>,
    ) -> Result<Appeal> {
        let model = Appeals::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn kháng nghị thất bại: {e}")))?
            .ok_or_else(|| DrlError::not_found(format!("Không tìm thấy kháng nghị {id}")))?;

        let status: AppealStatus = model.status.parse().map_err(DrlError::database_operation)?;
        if !status.can_review() {
            return Err(DrlError::invalid_transition(format!(
                "Kháng nghị {id} đã được xét ({status}), không xét lại được"
            )));
        }

        let result = Appeals::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(decision.into_status().to_string()),
            )
            .col_expr(
                Column::ReviewerId,
                sea_orm::sea_query::Expr::value(Some(reviewer_id)),
            )
            .col_expr(
                Column::ReviewerComment,
                sea_orm::sea_query::Expr::value(comment),
            )
            .col_expr(
                Column::ReviewedAt,
                sea_orm::sea_query::Expr::value(Some(chrono::Utc::now().timestamp())),
            )
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(AppealStatus::Pending.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Cập nhật kháng nghị thất bại: {e}")))?;

        if result.rows_affected == 0 {
            return Err(DrlError::conflict(format!(
                "Kháng nghị {id} vừa được người khác xét trước"
            )));
        }

        let updated = Appeals::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Đọc lại kháng nghị thất bại: {e}")))?
            .ok_or_else(|| DrlError::database_operation("Không đọc lại được kháng nghị vừa xét"))?;

        to_appeal(updated)
    }

    /// Liệt kê kháng nghị (phân trang), mới nhất trước
    pub async fn list_appeals_with_pagination_impl(
        &self,
        query: AppealListQuery,
    ) -> Result<AppealListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Appeals::find();

        if let Some(ref student_code) = query.student_code {
            select = select.filter(Column::StudentCode.eq(student_code));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm kháng nghị thất bại: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm trang thất bại: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn danh sách thất bại: {e}")))?;

        let items = models
            .into_iter()
            .map(to_appeal)
            .collect::<Result<Vec<_>>>()?;

        Ok(AppealListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
