//! Thao tác lưu trữ đợt đánh giá

use super::{SeaOrmStorage, ts_to_datetime};
use crate::entity::evaluation_periods::{ActiveModel, Column, Entity as EvaluationPeriods};
use crate::errors::{DrlError, Result};
use crate::models::{
    PaginationInfo,
    periods::{
        entities::EvaluationPeriod,
        requests::{CreatePeriodRequest, PeriodListQuery, UpdatePeriodRequest},
        responses::PeriodListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

fn to_period(model: crate::entity::evaluation_periods::Model) -> EvaluationPeriod {
    EvaluationPeriod {
        id: model.id,
        name: model.name,
        semester: model.semester,
        academic_year: model.academic_year,
        start_date: ts_to_datetime(model.start_date),
        end_date: ts_to_datetime(model.end_date),
        is_active: model.is_active,
        description: model.description,
        rubric_id: model.rubric_id,
        created_at: ts_to_datetime(model.created_at),
        updated_at: ts_to_datetime(model.updated_at),
    }
}

impl SeaOrmStorage {
    /// Tạo đợt đánh giá
    pub async fn create_period_impl(&self, req: CreatePeriodRequest) -> Result<EvaluationPeriod> {
        if req.end_date <= req.start_date {
            return Err(DrlError::validation(
                "Ngày kết thúc đợt phải sau ngày bắt đầu",
            ));
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            name: Set(req.name),
            semester: Set(req.semester),
            academic_year: Set(req.academic_year),
            start_date: Set(req.start_date.timestamp()),
            end_date: Set(req.end_date.timestamp()),
            is_active: Set(true),
            description: Set(req.description),
            rubric_id: Set(req.rubric_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Tạo đợt đánh giá thất bại: {e}")))?;

        Ok(to_period(inserted))
    }

    /// Cập nhật đợt đánh giá
    pub async fn update_period_impl(
        &self,
        id: i64,
        req: UpdatePeriodRequest,
    ) -> Result<Option<EvaluationPeriod>> {
        let Some(model) = EvaluationPeriods::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn đợt thất bại: {e}")))?
        else {
            return Ok(None);
        };

        // Kiểm tra khoảng thời gian trước khi ghi
        let new_start = req.start_date.map(|d| d.timestamp()).unwrap_or(model.start_date);
        let new_end = req.end_date.map(|d| d.timestamp()).unwrap_or(model.end_date);
        if new_end <= new_start {
            return Err(DrlError::validation(
                "Ngày kết thúc đợt phải sau ngày bắt đầu",
            ));
        }

        let mut active: ActiveModel = model.into();
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        active.start_date = Set(new_start);
        active.end_date = Set(new_end);
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        if let Some(is_active) = req.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Cập nhật đợt thất bại: {e}")))?;

        Ok(Some(to_period(updated)))
    }

    /// Liệt kê đợt đánh giá (phân trang), đợt mới nhất trước
    pub async fn list_periods_with_pagination_impl(
        &self,
        query: PeriodListQuery,
    ) -> Result<PeriodListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = EvaluationPeriods::find();

        if let Some(ref semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }

        if let Some(ref academic_year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year));
        }

        if let Some(true) = query.active_only {
            select = select.filter(Column::IsActive.eq(true));
        }

        select = select.order_by_desc(Column::StartDate);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm đợt thất bại: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm trang thất bại: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn danh sách thất bại: {e}")))?;

        Ok(PeriodListResponse {
            items: models.into_iter().map(to_period).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// Tìm đợt đang mở cho một học kỳ tại một thời điểm
    ///
    /// Điều kiện nộp phiếu: đợt đang hoạt động, đúng học kỳ và thời điểm nằm
    /// trong khoảng mở.
    pub async fn get_open_period_for_semester_impl(
        &self,
        semester: &str,
        at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<EvaluationPeriod>> {
        let ts = at.timestamp();
        let model = EvaluationPeriods::find()
            .filter(Column::Semester.eq(semester))
            .filter(Column::IsActive.eq(true))
            .filter(Column::StartDate.lte(ts))
            .filter(Column::EndDate.gte(ts))
            .order_by_asc(Column::StartDate)
            .one(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn đợt mở thất bại: {e}")))?;

        Ok(model.map(to_period))
    }

    /// Liệt kê mọi đợt đang hoạt động (phục vụ quét nhắc hạn hằng ngày)
    pub async fn list_active_periods_impl(&self) -> Result<Vec<EvaluationPeriod>> {
        let models = EvaluationPeriods::find()
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::EndDate)
            .all(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn đợt thất bại: {e}")))?;

        Ok(models.into_iter().map(to_period).collect())
    }
}
