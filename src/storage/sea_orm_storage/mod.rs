//! Hiện thực lưu trữ bằng SeaORM
//!
//! Tầng lưu trữ thống nhất, hỗ trợ SQLite, PostgreSQL và MySQL. Mọi chuyển
//! trạng thái và thay thế chi tiết điểm đều chạy trong một giao dịch duy
//! nhất, với phép cập nhật có điều kiện trên trạng thái cũ để hai thao tác
//! đồng thời trên cùng một phiếu không bao giờ ghi đè lẫn nhau.

mod appeals;
mod evaluations;
mod notifications;
mod periods;
mod rubrics;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{DrlError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// Hiện thực lưu trữ SeaORM
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// Tạo thể hiện lưu trữ mới
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // Chọn cách kết nối theo loại cơ sở dữ liệu
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // Chạy migration
        Migrator::up(&db, None)
            .await
            .map_err(|e| DrlError::database_operation(format!("Migration thất bại: {e}")))?;

        info!("Khởi tạo lưu trữ SeaORM hoàn tất, cơ sở dữ liệu: {}", db_url);

        Ok(Self { db })
    }

    /// Kết nối SQLite (WAL + pragma tối ưu)
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| DrlError::database_config(format!("Phân tích URL SQLite thất bại: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| DrlError::database_connection(format!("Kết nối SQLite thất bại: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Kết nối chung (PostgreSQL, MySQL, ...)
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| DrlError::database_connection(format!("Không kết nối được CSDL: {e}")))
    }

    /// Suy ra loại cơ sở dữ liệu từ URL và chuẩn hóa URL kết nối
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(DrlError::database_config(format!(
                "Không suy ra được loại CSDL từ URL: {url}. Hỗ trợ: sqlite://, postgres://, mysql://, hoặc đường dẫn tệp .db/.sqlite"
            )))
        }
    }

    /// Kết nối SQLite trong bộ nhớ dành cho kiểm thử
    #[cfg(test)]
    pub(crate) async fn new_in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        // Một kết nối duy nhất để mọi truy vấn thấy cùng một CSDL trong bộ nhớ
        opt.max_connections(1).min_connections(1);

        let db = Database::connect(opt)
            .await
            .map_err(|e| DrlError::database_connection(format!("Kết nối SQLite thất bại: {e}")))?;

        Migrator::up(&db, None)
            .await
            .map_err(|e| DrlError::database_operation(format!("Migration thất bại: {e}")))?;

        Ok(Self { db })
    }
}

/// Đổi mốc epoch giây sang DateTime<Utc>
pub(crate) fn ts_to_datetime(ts: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp(ts, 0).unwrap_or_default()
}

/// Đổi mốc epoch giây tùy chọn sang DateTime<Utc> tùy chọn
pub(crate) fn opt_ts_to_datetime(ts: Option<i64>) -> Option<chrono::DateTime<chrono::Utc>> {
    ts.and_then(|t| chrono::DateTime::from_timestamp(t, 0))
}

// Hiện thực trait Storage
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // Quy trình phiếu đánh giá
    async fn create_evaluation(
        &self,
        req: CreateEvaluationRequest,
        created_by: Option<i64>,
    ) -> Result<Evaluation> {
        self.create_evaluation_impl(req, created_by).await
    }

    async fn get_evaluation_by_id(&self, id: i64) -> Result<Option<Evaluation>> {
        self.get_evaluation_by_id_impl(id).await
    }

    async fn list_evaluations_with_pagination(
        &self,
        query: EvaluationListQuery,
    ) -> Result<EvaluationListResponse> {
        self.list_evaluations_with_pagination_impl(query).await
    }

    async fn list_pending_evaluations(
        &self,
        query: PendingReviewQuery,
    ) -> Result<EvaluationListResponse> {
        self.list_pending_evaluations_impl(query).await
    }

    async fn update_draft_details(
        &self,
        id: i64,
        details: Vec<EvaluationDetailInput>,
    ) -> Result<Evaluation> {
        self.update_draft_details_impl(id, details).await
    }

    async fn submit_evaluation(&self, id: i64) -> Result<Evaluation> {
        self.submit_evaluation_impl(id).await
    }

    async fn approve_evaluation(
        &self,
        id: i64,
        comment: Option<String>,
        approver_id: Option<i64>,
        approver_name: Option<String>,
    ) -> Result<Evaluation> {
        self.approve_evaluation_impl(id, comment, approver_id, approver_name)
            .await
    }

    async fn reject_evaluation(
        &self,
        id: i64,
        reason: String,
        rejector_id: Option<i64>,
        rejector_name: Option<String>,
    ) -> Result<Evaluation> {
        self.reject_evaluation_impl(id, reason, rejector_id, rejector_name)
            .await
    }

    async fn resubmit_evaluation(
        &self,
        id: i64,
        details: Vec<EvaluationDetailInput>,
        response_text: String,
    ) -> Result<Evaluation> {
        self.resubmit_evaluation_impl(id, details, response_text)
            .await
    }

    async fn delete_draft_evaluation(&self, id: i64, requester_student_code: &str) -> Result<()> {
        self.delete_draft_evaluation_impl(id, requester_student_code)
            .await
    }

    async fn list_evaluation_history(
        &self,
        evaluation_id: i64,
        newest_first: bool,
    ) -> Result<Vec<EvaluationHistoryEntry>> {
        self.list_evaluation_history_impl(evaluation_id, newest_first)
            .await
    }

    // Kháng nghị
    async fn create_appeal(
        &self,
        evaluation_id: i64,
        student_code: &str,
        reason: String,
    ) -> Result<Appeal> {
        self.create_appeal_impl(evaluation_id, student_code, reason)
            .await
    }

    async fn get_appeal_by_id(&self, id: i64) -> Result<Option<Appeal>> {
        self.get_appeal_by_id_impl(id).await
    }

    async fn review_appeal(
        &self,
        id: i64,
        decision: AppealDecision,
        reviewer_id: i64,
        comment: Option<String>,
    ) -> Result<Appeal> {
        self.review_appeal_impl(id, decision, reviewer_id, comment)
            .await
    }

    async fn list_appeals_with_pagination(
        &self,
        query: AppealListQuery,
    ) -> Result<AppealListResponse> {
        self.list_appeals_with_pagination_impl(query).await
    }

    // Danh mục rubric / tiêu chí
    async fn create_rubric(&self, req: CreateRubricRequest) -> Result<Rubric> {
        self.create_rubric_impl(req).await
    }

    async fn get_rubric_by_id(&self, id: i64) -> Result<Option<Rubric>> {
        self.get_rubric_by_id_impl(id).await
    }

    async fn list_rubrics_with_pagination(
        &self,
        query: RubricListQuery,
    ) -> Result<RubricListResponse> {
        self.list_rubrics_with_pagination_impl(query).await
    }

    async fn deactivate_rubric(&self, id: i64) -> Result<bool> {
        self.deactivate_rubric_impl(id).await
    }

    async fn count_rubrics(&self) -> Result<u64> {
        self.count_rubrics_impl().await
    }

    // Đợt đánh giá
    async fn create_period(&self, req: CreatePeriodRequest) -> Result<EvaluationPeriod> {
        self.create_period_impl(req).await
    }

    async fn update_period(
        &self,
        id: i64,
        req: UpdatePeriodRequest,
    ) -> Result<Option<EvaluationPeriod>> {
        self.update_period_impl(id, req).await
    }

    async fn list_periods_with_pagination(
        &self,
        query: PeriodListQuery,
    ) -> Result<PeriodListResponse> {
        self.list_periods_with_pagination_impl(query).await
    }

    async fn get_open_period_for_semester(
        &self,
        semester: &str,
        at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<EvaluationPeriod>> {
        self.get_open_period_for_semester_impl(semester, at).await
    }

    async fn list_active_periods(&self) -> Result<Vec<EvaluationPeriod>> {
        self.list_active_periods_impl().await
    }

    // Thông báo
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification> {
        self.create_notification_impl(req).await
    }

    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(user_id, query)
            .await
    }

    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64> {
        self.get_unread_notification_count_impl(user_id).await
    }

    async fn mark_notification_as_read(&self, user_id: i64, notification_id: i64) -> Result<bool> {
        self.mark_notification_as_read_impl(user_id, notification_id)
            .await
    }

    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_as_read_impl(user_id).await
    }
}
