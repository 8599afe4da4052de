//! Client tra cứu dịch vụ xác thực
//!
//! Bộ điều phối thông báo cần đổi mã sinh viên sang ID người dùng để ghi
//! thông báo. Tra cứu này chỉ chạy trên đường best-effort: thất bại thì ghi
//! log và bỏ qua, không ảnh hưởng nghiệp vụ.

use serde::Deserialize;
use std::time::Duration;

use crate::config::AppConfig;
use crate::errors::{DrlError, Result};

#[derive(Debug, Deserialize)]
struct UserIdEnvelope {
    code: i32,
    #[serde(default)]
    data: Option<i64>,
}

#[derive(Clone)]
pub struct AuthDirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthDirectoryClient {
    pub fn new() -> Result<Self> {
        let config = AppConfig::get();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.gateway.request_timeout))
            .build()
            .map_err(|e| {
                DrlError::dependency_unresolved(format!("Khởi tạo HTTP client thất bại: {e}"))
            })?;

        Ok(Self {
            http,
            base_url: config.gateway.auth_service_url.trim_end_matches('/').to_string(),
        })
    }

    /// Đổi mã sinh viên sang ID người dùng
    pub async fn get_user_id_by_student_code(&self, student_code: &str) -> Result<i64> {
        let url = format!("{}/api/v1/users/student/{student_code}", self.base_url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            DrlError::dependency_unresolved(format!("Không gọi được dịch vụ xác thực: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(DrlError::dependency_unresolved(format!(
                "Dịch vụ xác thực trả về mã {}",
                response.status()
            )));
        }

        let envelope: UserIdEnvelope = response.json().await.map_err(|e| {
            DrlError::dependency_unresolved(format!("Phản hồi dịch vụ xác thực không hợp lệ: {e}"))
        })?;

        if envelope.code != 0 {
            return Err(DrlError::not_found(format!(
                "Không tìm thấy người dùng cho mã sinh viên {student_code}"
            )));
        }

        envelope.data.ok_or_else(|| {
            DrlError::not_found(format!(
                "Không tìm thấy người dùng cho mã sinh viên {student_code}"
            ))
        })
    }
}
