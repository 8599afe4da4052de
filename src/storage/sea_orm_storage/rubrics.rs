//! Thao tác lưu trữ rubric và tiêu chí

use super::{SeaOrmStorage, ts_to_datetime};
use crate::entity::criteria::{
    ActiveModel as CriterionActiveModel, Column as CriterionColumn, Entity as Criteria,
};
use crate::entity::rubrics::{ActiveModel, Column, Entity as Rubrics};
use crate::errors::{DrlError, Result};
use crate::models::{
    PaginationInfo,
    rubrics::{
        entities::{Criterion, Rubric},
        requests::{CreateRubricRequest, RubricListQuery},
        responses::RubricListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

fn to_criterion(model: crate::entity::criteria::Model) -> Criterion {
    Criterion {
        id: model.id,
        rubric_id: model.rubric_id,
        name: model.name,
        description: model.description,
        max_points: model.max_points,
        order_index: model.order_index,
    }
}

fn to_rubric(model: crate::entity::rubrics::Model, criteria: Vec<Criterion>) -> Rubric {
    Rubric {
        id: model.id,
        name: model.name,
        description: model.description,
        max_points: model.max_points,
        academic_year: model.academic_year,
        is_active: model.is_active,
        created_at: ts_to_datetime(model.created_at),
        updated_at: ts_to_datetime(model.updated_at),
        criteria,
    }
}

impl SeaOrmStorage {
    /// Tạo rubric kèm danh sách tiêu chí trong một giao dịch
    pub async fn create_rubric_impl(&self, req: CreateRubricRequest) -> Result<Rubric> {
        if req.criteria.is_empty() {
            return Err(DrlError::validation("Rubric phải có ít nhất một tiêu chí"));
        }

        // Tổng mức tối đa của các tiêu chí không vượt tổng của rubric
        let criteria_total: f64 = req.criteria.iter().map(|c| c.max_points.max(0.0)).sum();
        if criteria_total > req.max_points {
            return Err(DrlError::validation(format!(
                "Tổng điểm tối đa các tiêu chí ({criteria_total:.1}) vượt quá tổng của rubric ({:.1})",
                req.max_points
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DrlError::database_operation(format!("Mở giao dịch thất bại: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            max_points: Set(req.max_points),
            academic_year: Set(req.academic_year),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model
            .insert(&txn)
            .await
            .map_err(|e| DrlError::database_operation(format!("Tạo rubric thất bại: {e}")))?;

        let criterion_models: Vec<CriterionActiveModel> = req
            .criteria
            .into_iter()
            .map(|c| CriterionActiveModel {
                rubric_id: Set(inserted.id),
                name: Set(c.name),
                description: Set(c.description),
                max_points: Set(c.max_points),
                order_index: Set(c.order_index),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            })
            .collect();

        Criteria::insert_many(criterion_models)
            .exec(&txn)
            .await
            .map_err(|e| DrlError::database_operation(format!("Tạo tiêu chí thất bại: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DrlError::database_operation(format!("Commit thất bại: {e}")))?;

        self.get_rubric_by_id_impl(inserted.id)
            .await?
            .ok_or_else(|| DrlError::database_operation("Không đọc lại được rubric vừa tạo"))
    }

    /// Lấy rubric kèm tiêu chí, tiêu chí theo thứ tự hiển thị
    pub async fn get_rubric_by_id_impl(&self, id: i64) -> Result<Option<Rubric>> {
        let model = Rubrics::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn rubric thất bại: {e}")))?;

        let Some(model) = model else {
            return Ok(None);
        };

        let criteria = Criteria::find()
            .filter(CriterionColumn::RubricId.eq(id))
            .order_by_asc(CriterionColumn::OrderIndex)
            .all(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn tiêu chí thất bại: {e}")))?;

        Ok(Some(to_rubric(
            model,
            criteria.into_iter().map(to_criterion).collect(),
        )))
    }

    /// Liệt kê rubric (phân trang)
    pub async fn list_rubrics_with_pagination_impl(
        &self,
        query: RubricListQuery,
    ) -> Result<RubricListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Rubrics::find();

        if let Some(ref academic_year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year));
        }

        if let Some(true) = query.active_only {
            select = select.filter(Column::IsActive.eq(true));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm rubric thất bại: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm trang thất bại: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn danh sách thất bại: {e}")))?;

        // Nạp tiêu chí của cả trang bằng một truy vấn
        let rubric_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let all_criteria = Criteria::find()
            .filter(CriterionColumn::RubricId.is_in(rubric_ids))
            .order_by_asc(CriterionColumn::OrderIndex)
            .all(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn tiêu chí thất bại: {e}")))?;

        let mut by_rubric: std::collections::HashMap<i64, Vec<Criterion>> =
            std::collections::HashMap::new();
        for c in all_criteria {
            by_rubric
                .entry(c.rubric_id)
                .or_default()
                .push(to_criterion(c));
        }

        let items = models
            .into_iter()
            .map(|m| {
                let criteria = by_rubric.remove(&m.id).unwrap_or_default();
                to_rubric(m, criteria)
            })
            .collect();

        Ok(RubricListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// Ngừng sử dụng rubric; phiếu đã gắn rubric này vẫn giữ nguyên
    pub async fn deactivate_rubric_impl(&self, id: i64) -> Result<bool> {
        let result = Rubrics::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Cập nhật rubric thất bại: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// Đếm số rubric hiện có
    pub async fn count_rubrics_impl(&self) -> Result<u64> {
        Rubrics::find()
            .count(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm rubric thất bại: {e}")))
    }
}
