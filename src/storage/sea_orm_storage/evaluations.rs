//! Thao tác lưu trữ phiếu đánh giá
//!
//! Mỗi chuyển trạng thái là một giao dịch: đọc trạng thái hiện tại, kiểm tra
//! luật chuyển bằng máy trạng thái thuần túy, rồi cập nhật có điều kiện
//! `WHERE status = <trạng thái đã đọc>`. Không cập nhật được dòng nào nghĩa
//! là có thao tác đồng thời thắng trước, trả lỗi Conflict để bên gọi thử lại.

use std::collections::{HashMap, HashSet};

use super::{SeaOrmStorage, opt_ts_to_datetime, ts_to_datetime};
use crate::entity::criteria::{Column as CriterionColumn, Entity as Criteria};
use crate::entity::evaluation_details::{
    ActiveModel as DetailActiveModel, Column as DetailColumn, Entity as EvaluationDetails,
};
use crate::entity::evaluation_history::{
    ActiveModel as HistoryActiveModel, Column as HistoryColumn, Entity as EvaluationHistoryEntity,
};
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations};
use crate::entity::rubrics::Entity as Rubrics;
use crate::errors::{DrlError, Result};
use crate::models::{
    PaginationInfo,
    evaluations::{
        entities::{Evaluation, EvaluationDetail, EvaluationHistoryEntry, EvaluationSummary},
        evidence::EvidenceNote,
        requests::{
            CreateEvaluationRequest, EvaluationDetailInput, EvaluationListQuery, PendingReviewQuery,
        },
        responses::EvaluationListResponse,
        workflow::{
            ApprovalLevel, EvaluationStatus, HistoryAction, WorkflowAction, transition,
        },
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// Một dòng chi tiết đã qua kiểm tra, sẵn sàng ghi xuống
struct ValidatedDetail {
    criteria_id: i64,
    score: f64,
    evidence: Option<String>,
}

/// Kiểm tra bộ chi tiết điểm theo rubric và tính tổng.
///
/// Điểm null quy về 0; điểm vượt mức tối đa của tiêu chí là lỗi cứng; điểm
/// âm không bị chặn vì một số tiêu chí là tiêu chí trừ điểm theo quy ước
/// của rubric.
async fn validate_details<C: ConnectionTrait>(
    conn: &C,
    rubric_id: i64,
    inputs: &[EvaluationDetailInput],
) -> Result<(Vec<ValidatedDetail>, f64)> {
    let criteria = Criteria::find()
        .filter(CriterionColumn::RubricId.eq(rubric_id))
        .all(conn)
        .await
        .map_err(|e| DrlError::database_operation(format!("Truy vấn tiêu chí thất bại: {e}")))?;

    let criteria_map: HashMap<i64, _> = criteria.into_iter().map(|c| (c.id, c)).collect();

    let mut seen: HashSet<i64> = HashSet::new();
    let mut rows = Vec::with_capacity(inputs.len());
    let mut total = 0.0;

    for input in inputs {
        let criterion = criteria_map.get(&input.criteria_id).ok_or_else(|| {
            DrlError::not_found(format!(
                "Tiêu chí {} không tồn tại hoặc không thuộc rubric {rubric_id}",
                input.criteria_id
            ))
        })?;

        if !seen.insert(input.criteria_id) {
            return Err(DrlError::validation(format!(
                "Tiêu chí {} xuất hiện nhiều lần trong cùng một phiếu",
                input.criteria_id
            )));
        }

        let score = input.score.unwrap_or(0.0);
        if score > criterion.max_points {
            return Err(DrlError::validation(format!(
                "Điểm {:.2} vượt quá mức tối đa {:.2} của tiêu chí \"{}\"",
                score, criterion.max_points, criterion.name
            )));
        }

        let note = EvidenceNote {
            evidence: input.evidence.clone().unwrap_or_default(),
            self_scores: input.self_scores.clone().unwrap_or_default(),
        };

        rows.push(ValidatedDetail {
            criteria_id: input.criteria_id,
            score,
            evidence: note.encode()?,
        });
        total += score;
    }

    Ok((rows, total))
}

/// Thay toàn bộ chi tiết điểm của một phiếu (xóa cũ, ghi mới)
async fn replace_details<C: ConnectionTrait>(
    conn: &C,
    evaluation_id: i64,
    rows: &[ValidatedDetail],
) -> Result<()> {
    EvaluationDetails::delete_many()
        .filter(DetailColumn::EvaluationId.eq(evaluation_id))
        .exec(conn)
        .await
        .map_err(|e| DrlError::database_operation(format!("Xóa chi tiết cũ thất bại: {e}")))?;

    if rows.is_empty() {
        return Ok(());
    }

    let now = chrono::Utc::now().timestamp();
    let models: Vec<DetailActiveModel> = rows
        .iter()
        .map(|row| DetailActiveModel {
            evaluation_id: Set(evaluation_id),
            criteria_id: Set(row.criteria_id),
            score: Set(row.score),
            evidence: Set(row.evidence.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .collect();

    EvaluationDetails::insert_many(models)
        .exec(conn)
        .await
        .map_err(|e| DrlError::database_operation(format!("Ghi chi tiết điểm thất bại: {e}")))?;

    Ok(())
}

/// Ghi một dòng lịch sử; bảng lịch sử chỉ ghi thêm
#[allow(clippy::too_many_arguments)]
async fn append_history<C: ConnectionTrait>(
    conn: &C,
    evaluation_id: i64,
    action: HistoryAction,
    from_status: Option<EvaluationStatus>,
    to_status: EvaluationStatus,
    level: Option<ApprovalLevel>,
    actor_id: Option<i64>,
    actor_name: Option<String>,
    comment: Option<String>,
) -> Result<()> {
    let model = HistoryActiveModel {
        evaluation_id: Set(evaluation_id),
        action: Set(action.to_string()),
        from_status: Set(from_status.map(|s| s.to_string())),
        to_status: Set(to_status.to_string()),
        level: Set(level.map(|l| l.to_string())),
        actor_id: Set(actor_id),
        actor_name: Set(actor_name),
        comment: Set(comment),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };

    model
        .insert(conn)
        .await
        .map_err(|e| DrlError::database_operation(format!("Ghi lịch sử thất bại: {e}")))?;

    Ok(())
}

/// Đọc trạng thái đã lưu, lỗi nếu dữ liệu trong CSDL không hợp lệ
fn parse_status(raw: &str) -> Result<EvaluationStatus> {
    raw.parse()
        .map_err(|e: String| DrlError::database_operation(e))
}

fn parse_level(raw: Option<&str>) -> Result<Option<ApprovalLevel>> {
    raw.map(|s| {
        s.parse::<ApprovalLevel>()
            .map_err(DrlError::database_operation)
    })
    .transpose()
}

fn to_history_entry(
    model: crate::entity::evaluation_history::Model,
) -> Result<EvaluationHistoryEntry> {
    Ok(EvaluationHistoryEntry {
        id: model.id,
        action: model
            .action
            .parse()
            .map_err(DrlError::database_operation)?,
        from_status: model.from_status.as_deref().map(parse_status).transpose()?,
        to_status: parse_status(&model.to_status)?,
        level: parse_level(model.level.as_deref())?,
        actor_id: model.actor_id,
        actor_name: model.actor_name,
        comment: model.comment,
        created_at: ts_to_datetime(model.created_at),
    })
}

fn to_summary(model: &crate::entity::evaluations::Model) -> Result<EvaluationSummary> {
    Ok(EvaluationSummary {
        id: model.id,
        student_code: model.student_code.clone(),
        semester: model.semester.clone(),
        academic_year: model.academic_year.clone(),
        rubric_id: model.rubric_id,
        total_points: model.total_points,
        status: parse_status(&model.status)?,
        resubmission_count: model.resubmission_count,
        submitted_at: opt_ts_to_datetime(model.submitted_at),
        updated_at: ts_to_datetime(model.updated_at),
    })
}

impl SeaOrmStorage {
    /// Nạp phiếu kèm trọn vẹn chi tiết và lịch sử trong một lần đọc
    async fn load_evaluation<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Evaluation>> {
        let model = Evaluations::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn phiếu thất bại: {e}")))?;

        let Some(model) = model else {
            return Ok(None);
        };

        let details = EvaluationDetails::find()
            .filter(DetailColumn::EvaluationId.eq(id))
            .order_by_asc(DetailColumn::CriteriaId)
            .all(conn)
            .await
            .map_err(|e| {
                DrlError::database_operation(format!("Truy vấn chi tiết điểm thất bại: {e}"))
            })?;

        // Cùng một mốc thời gian có thể có nhiều dòng, lấy id làm khóa phụ
        let history = EvaluationHistoryEntity::find()
            .filter(HistoryColumn::EvaluationId.eq(id))
            .order_by_asc(HistoryColumn::CreatedAt)
            .order_by_asc(HistoryColumn::Id)
            .all(conn)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn lịch sử thất bại: {e}")))?;

        let detail_entries = details
            .into_iter()
            .map(|d| {
                let note = EvidenceNote::decode(d.evidence.as_deref())?;
                Ok(EvaluationDetail {
                    criteria_id: d.criteria_id,
                    score: d.score,
                    evidence: note.evidence,
                    self_scores: note.self_scores,
                    updated_at: ts_to_datetime(d.updated_at),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let history_entries = history
            .into_iter()
            .map(to_history_entry)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Evaluation {
            id: model.id,
            student_code: model.student_code,
            semester: model.semester,
            academic_year: model.academic_year,
            rubric_id: model.rubric_id,
            total_points: model.total_points,
            status: parse_status(&model.status)?,
            rejection_reason: model.rejection_reason,
            last_rejection_level: parse_level(model.last_rejection_level.as_deref())?,
            resubmission_count: model.resubmission_count,
            created_by: model.created_by,
            submitted_at: opt_ts_to_datetime(model.submitted_at),
            approved_at: opt_ts_to_datetime(model.approved_at),
            created_at: ts_to_datetime(model.created_at),
            updated_at: ts_to_datetime(model.updated_at),
            details: detail_entries,
            history: history_entries,
        }))
    }

    async fn require_evaluation<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<crate::entity::evaluations::Model> {
        Evaluations::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn phiếu thất bại: {e}")))?
            .ok_or_else(|| DrlError::not_found(format!("Không tìm thấy phiếu đánh giá {id}")))
    }

    /// Cập nhật có điều kiện trên trạng thái đã đọc.
    ///
    /// Trả lỗi Conflict khi không còn dòng nào khớp: một thao tác đồng thời
    /// đã chuyển trạng thái trước, bên thua không được ghi đè kết quả.
    pub(crate) async fn guarded_status_update<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
        expected: EvaluationStatus,
        update: sea_orm::UpdateMany<Evaluations>,
    ) -> Result<()> {
        let result = update
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(expected.to_string()))
            .exec(conn)
            .await
            .map_err(|e| {
                DrlError::database_operation(format!("Cập nhật trạng thái thất bại: {e}"))
            })?;

        if result.rows_affected == 0 {
            return Err(DrlError::conflict(format!(
                "Phiếu {id} đã bị thao tác khác thay đổi trạng thái, vui lòng tải lại và thử lại"
            )));
        }

        Ok(())
    }

    /// Tạo phiếu đánh giá mới ở trạng thái DRAFT
    pub async fn create_evaluation_impl(
        &self,
        req: CreateEvaluationRequest,
        created_by: Option<i64>,
    ) -> Result<Evaluation> {
        // Rubric phải tồn tại và còn hiệu lực
        let rubric = Rubrics::find_by_id(req.rubric_id)
            .one(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn rubric thất bại: {e}")))?
            .ok_or_else(|| {
                DrlError::not_found(format!("Không tìm thấy rubric {}", req.rubric_id))
            })?;

        if !rubric.is_active {
            return Err(DrlError::validation(format!(
                "Rubric \"{}\" không còn hiệu lực",
                rubric.name
            )));
        }

        // Mỗi sinh viên chỉ có một phiếu cho một học kỳ
        let existing = Evaluations::find()
            .filter(Column::StudentCode.eq(&req.student_code))
            .filter(Column::Semester.eq(&req.semester))
            .count(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Kiểm tra trùng thất bại: {e}")))?;

        if existing > 0 {
            return Err(DrlError::conflict(format!(
                "Sinh viên {} đã có phiếu đánh giá cho học kỳ {}",
                req.student_code, req.semester
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DrlError::database_operation(format!("Mở giao dịch thất bại: {e}")))?;

        let (rows, total) = validate_details(&txn, req.rubric_id, &req.details).await?;

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            student_code: Set(req.student_code.clone()),
            semester: Set(req.semester.clone()),
            academic_year: Set(req.academic_year.clone()),
            rubric_id: Set(req.rubric_id),
            total_points: Set(total),
            status: Set(EvaluationStatus::Draft.to_string()),
            rejection_reason: Set(None),
            last_rejection_level: Set(None),
            resubmission_count: Set(0),
            created_by: Set(created_by),
            submitted_at: Set(None),
            approved_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model
            .insert(&txn)
            .await
            .map_err(|e| DrlError::database_operation(format!("Tạo phiếu thất bại: {e}")))?;

        replace_details(&txn, inserted.id, &rows).await?;

        append_history(
            &txn,
            inserted.id,
            HistoryAction::Created,
            None,
            EvaluationStatus::Draft,
            None,
            created_by,
            None,
            Some("Tạo phiếu đánh giá".to_string()),
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| DrlError::database_operation(format!("Commit thất bại: {e}")))?;

        self.load_evaluation(&self.db, inserted.id)
            .await?
            .ok_or_else(|| DrlError::database_operation("Không đọc lại được phiếu vừa tạo"))
    }

    /// Lấy phiếu theo ID, kèm chi tiết và lịch sử
    pub async fn get_evaluation_by_id_impl(&self, id: i64) -> Result<Option<Evaluation>> {
        self.load_evaluation(&self.db, id).await
    }

    /// Thay toàn bộ chi tiết điểm của bản nháp
    pub async fn update_draft_details_impl(
        &self,
        id: i64,
        details: Vec<EvaluationDetailInput>,
    ) -> Result<Evaluation> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DrlError::database_operation(format!("Mở giao dịch thất bại: {e}")))?;

        let model = self.require_evaluation(&txn, id).await?;
        let status = parse_status(&model.status)?;

        if !status.can_edit() {
            return Err(DrlError::transition_refused("UPDATE", status));
        }

        let (rows, total) = validate_details(&txn, model.rubric_id, &details).await?;
        replace_details(&txn, id, &rows).await?;

        let update = Evaluations::update_many()
            .col_expr(
                Column::TotalPoints,
                sea_orm::sea_query::Expr::value(total),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            );
        self.guarded_status_update(&txn, id, status, update).await?;

        txn.commit()
            .await
            .map_err(|e| DrlError::database_operation(format!("Commit thất bại: {e}")))?;

        self.load_evaluation(&self.db, id)
            .await?
            .ok_or_else(|| DrlError::database_operation("Không đọc lại được phiếu vừa cập nhật"))
    }

    /// Nộp phiếu (DRAFT → SUBMITTED)
    ///
    /// Chỉ nộp được khi có đợt đánh giá đang mở trùng đúng học kỳ của phiếu.
    /// Điều kiện này xét tại thời điểm nộp chứ không phải lúc tạo phiếu.
    pub async fn submit_evaluation_impl(&self, id: i64) -> Result<Evaluation> {
        let model = self.require_evaluation(&self.db, id).await?;
        let status = parse_status(&model.status)?;
        let new_status = transition(status, WorkflowAction::Submit)?;

        let now = chrono::Utc::now();
        let period = self
            .get_open_period_for_semester_impl(&model.semester, now)
            .await?;
        if period.is_none() {
            return Err(DrlError::period_closed(format!(
                "Không có đợt đánh giá nào đang mở cho học kỳ '{}'. Vui lòng liên hệ quản trị viên hoặc đợi đến đợt tiếp theo.",
                model.semester
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DrlError::database_operation(format!("Mở giao dịch thất bại: {e}")))?;

        let update = Evaluations::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(new_status.to_string()),
            )
            .col_expr(
                Column::SubmittedAt,
                sea_orm::sea_query::Expr::value(Some(now.timestamp())),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(now.timestamp()),
            );
        self.guarded_status_update(&txn, id, status, update).await?;

        append_history(
            &txn,
            id,
            HistoryAction::Submitted,
            Some(status),
            new_status,
            None,
            None,
            None,
            Some("Nộp phiếu chờ duyệt".to_string()),
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| DrlError::database_operation(format!("Commit thất bại: {e}")))?;

        self.load_evaluation(&self.db, id)
            .await?
            .ok_or_else(|| DrlError::database_operation("Không đọc lại được phiếu vừa nộp"))
    }

    /// Duyệt phiếu lên cấp kế tiếp
    ///
    /// Dòng lịch sử ghi cấp TRƯỚC khi chuyển: ai duyệt ở cấp nào, chứ không
    /// phải trạng thái kết quả.
    pub async fn approve_evaluation_impl(
        &self,
        id: i64,
        comment: Option<String>,
        approver_id: Option<i64>,
        approver_name: Option<String>,
    ) -> Result<Evaluation> {
        let model = self.require_evaluation(&self.db, id).await?;
        let status = parse_status(&model.status)?;
        let new_status = transition(status, WorkflowAction::Approve)?;
        let level = status.approval_level();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DrlError::database_operation(format!("Mở giao dịch thất bại: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        let mut update = Evaluations::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(new_status.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now));
        // Duyệt cấp cuối chốt thời điểm hoàn tất
        if new_status.is_final() {
            update = update.col_expr(
                Column::ApprovedAt,
                sea_orm::sea_query::Expr::value(Some(now)),
            );
        }
        self.guarded_status_update(&txn, id, status, update).await?;

        append_history(
            &txn,
            id,
            HistoryAction::Approved,
            Some(status),
            new_status,
            Some(level),
            approver_id,
            approver_name,
            comment,
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| DrlError::database_operation(format!("Commit thất bại: {e}")))?;

        self.load_evaluation(&self.db, id)
            .await?
            .ok_or_else(|| DrlError::database_operation("Không đọc lại được phiếu vừa duyệt"))
    }

    /// Từ chối phiếu, ghi lại cấp từ chối để định tuyến nộp lại
    pub async fn reject_evaluation_impl(
        &self,
        id: i64,
        reason: String,
        rejector_id: Option<i64>,
        rejector_name: Option<String>,
    ) -> Result<Evaluation> {
        let model = self.require_evaluation(&self.db, id).await?;
        let status = parse_status(&model.status)?;
        let new_status = transition(status, WorkflowAction::Reject)?;
        // Cấp từ chối là cấp phiếu đang chờ xét lúc bị từ chối
        let level = status.approval_level();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DrlError::database_operation(format!("Mở giao dịch thất bại: {e}")))?;

        let update = Evaluations::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(new_status.to_string()),
            )
            .col_expr(
                Column::RejectionReason,
                sea_orm::sea_query::Expr::value(Some(reason.clone())),
            )
            .col_expr(
                Column::LastRejectionLevel,
                sea_orm::sea_query::Expr::value(Some(level.to_string())),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            );
        self.guarded_status_update(&txn, id, status, update).await?;

        append_history(
            &txn,
            id,
            HistoryAction::Rejected,
            Some(status),
            new_status,
            Some(level),
            rejector_id,
            rejector_name,
            Some(reason),
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| DrlError::database_operation(format!("Commit thất bại: {e}")))?;

        self.load_evaluation(&self.db, id)
            .await?
            .ok_or_else(|| DrlError::database_operation("Không đọc lại được phiếu vừa từ chối"))
    }

    /// Nộp lại sau khi bị từ chối
    ///
    /// Quay về đúng cấp đã từ chối (giữ chữ ký các cấp dưới), thay toàn bộ
    /// chi tiết điểm, tính lại tổng và tăng số lần nộp lại.
    pub async fn resubmit_evaluation_impl(
        &self,
        id: i64,
        details: Vec<EvaluationDetailInput>,
        response_text: String,
    ) -> Result<Evaluation> {
        let model = self.require_evaluation(&self.db, id).await?;
        let status = parse_status(&model.status)?;
        let last_level = parse_level(model.last_rejection_level.as_deref())?;
        let new_status = transition(
            status,
            WorkflowAction::Resubmit {
                last_rejection_level: last_level,
            },
        )?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DrlError::database_operation(format!("Mở giao dịch thất bại: {e}")))?;

        let (rows, total) = validate_details(&txn, model.rubric_id, &details).await?;
        replace_details(&txn, id, &rows).await?;

        let now = chrono::Utc::now().timestamp();
        let update = Evaluations::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(new_status.to_string()),
            )
            .col_expr(Column::TotalPoints, sea_orm::sea_query::Expr::value(total))
            .col_expr(
                Column::SubmittedAt,
                sea_orm::sea_query::Expr::value(Some(now)),
            )
            .col_expr(
                Column::ResubmissionCount,
                sea_orm::sea_query::Expr::value(model.resubmission_count + 1),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now));
        self.guarded_status_update(&txn, id, status, update).await?;

        append_history(
            &txn,
            id,
            HistoryAction::Resubmitted,
            Some(status),
            new_status,
            None,
            None,
            None,
            Some(format!("Nộp lại: {response_text}")),
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| DrlError::database_operation(format!("Commit thất bại: {e}")))?;

        self.load_evaluation(&self.db, id)
            .await?
            .ok_or_else(|| DrlError::database_operation("Không đọc lại được phiếu vừa nộp lại"))
    }

    /// Xóa bản nháp; chỉ chủ phiếu xóa được, phiếu đã nộp không xóa được
    pub async fn delete_draft_evaluation_impl(
        &self,
        id: i64,
        requester_student_code: &str,
    ) -> Result<()> {
        let model = self.require_evaluation(&self.db, id).await?;

        if model.student_code != requester_student_code {
            return Err(DrlError::ownership(
                "Chỉ được xóa phiếu đánh giá của chính mình",
            ));
        }

        let status = parse_status(&model.status)?;
        if !status.can_edit() {
            return Err(DrlError::transition_refused("DELETE", status));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DrlError::database_operation(format!("Mở giao dịch thất bại: {e}")))?;

        EvaluationDetails::delete_many()
            .filter(DetailColumn::EvaluationId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| DrlError::database_operation(format!("Xóa chi tiết thất bại: {e}")))?;

        EvaluationHistoryEntity::delete_many()
            .filter(HistoryColumn::EvaluationId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| DrlError::database_operation(format!("Xóa lịch sử thất bại: {e}")))?;

        Evaluations::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| DrlError::database_operation(format!("Xóa phiếu thất bại: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DrlError::database_operation(format!("Commit thất bại: {e}")))?;

        Ok(())
    }

    /// Liệt kê phiếu (phân trang)
    pub async fn list_evaluations_with_pagination_impl(
        &self,
        query: EvaluationListQuery,
    ) -> Result<EvaluationListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Evaluations::find();

        if let Some(ref student_code) = query.student_code {
            select = select.filter(Column::StudentCode.eq(student_code));
        }

        if let Some(ref semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::UpdatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm phiếu thất bại: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm trang thất bại: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn danh sách thất bại: {e}")))?;

        let items = models
            .iter()
            .map(to_summary)
            .collect::<Result<Vec<_>>>()?;

        Ok(EvaluationListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// Liệt kê phiếu đang chờ duyệt theo cấp, phiếu nộp sớm xếp trước
    pub async fn list_pending_evaluations_impl(
        &self,
        query: PendingReviewQuery,
    ) -> Result<EvaluationListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let statuses: Vec<String> = match query.level {
            Some(ApprovalLevel::Class) => vec![EvaluationStatus::Submitted.to_string()],
            Some(ApprovalLevel::Faculty) => vec![EvaluationStatus::ClassApproved.to_string()],
            Some(ApprovalLevel::Ctsv) => vec![EvaluationStatus::FacultyApproved.to_string()],
            _ => vec![
                EvaluationStatus::Submitted.to_string(),
                EvaluationStatus::ClassApproved.to_string(),
                EvaluationStatus::FacultyApproved.to_string(),
            ],
        };

        let select = Evaluations::find()
            .filter(Column::Status.is_in(statuses))
            .order_by_asc(Column::SubmittedAt)
            .order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm phiếu chờ duyệt thất bại: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm trang thất bại: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn danh sách thất bại: {e}")))?;

        let items = models
            .iter()
            .map(to_summary)
            .collect::<Result<Vec<_>>>()?;

        Ok(EvaluationListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// Đọc lịch sử một phiếu, thứ tự ổn định (id làm khóa phụ)
    pub async fn list_evaluation_history_impl(
        &self,
        evaluation_id: i64,
        newest_first: bool,
    ) -> Result<Vec<EvaluationHistoryEntry>> {
        // Xác nhận phiếu tồn tại để phân biệt "không có lịch sử" với "không có phiếu"
        self.require_evaluation(&self.db, evaluation_id).await?;

        let mut select = EvaluationHistoryEntity::find()
            .filter(HistoryColumn::EvaluationId.eq(evaluation_id));

        select = if newest_first {
            select
                .order_by_desc(HistoryColumn::CreatedAt)
                .order_by_desc(HistoryColumn::Id)
        } else {
            select
                .order_by_asc(HistoryColumn::CreatedAt)
                .order_by_asc(HistoryColumn::Id)
        };

        let models = select
            .all(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn lịch sử thất bại: {e}")))?;

        models.into_iter().map(to_history_entry).collect()
    }
}
