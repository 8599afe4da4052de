//! Định nghĩa mô hình nghiệp vụ và DTO

pub mod appeals;
pub mod common;
pub mod evaluations;
pub mod notifications;
pub mod periods;
pub mod rubrics;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::{ApiResponse, ErrorCode};

/// Thời điểm khởi động ứng dụng
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
