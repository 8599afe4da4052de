//! Client tra cứu dịch vụ quản lý sinh viên
//!
//! Chỉ dùng để xác nhận sinh viên tồn tại trước khi tạo phiếu và lấy thông
//! tin lớp/khoa phục vụ gửi thông báo. Dịch vụ sinh viên không phản hồi được
//! thì trả lỗi DependencyUnresolved, không bao giờ mặc định cho qua.

use serde::Deserialize;
use std::time::Duration;

use crate::config::AppConfig;
use crate::errors::{DrlError, Result};

/// Thông tin sinh viên trả về từ dịch vụ quản lý sinh viên
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub student_code: String,
    pub full_name: String,
    #[serde(default)]
    pub class_code: Option<String>,
    #[serde(default)]
    pub faculty_code: Option<String>,
}

// Phong bì phản hồi chung của các dịch vụ trong hệ thống
#[derive(Debug, Deserialize)]
struct StudentEnvelope {
    code: i32,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<StudentProfile>,
}

#[derive(Clone)]
pub struct StudentDirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl StudentDirectoryClient {
    /// Tạo client theo cấu hình gateway
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
            base_url: config.gateway.student_service_url.trim_end_matches('/').to_string(),
        })
    }

    /// Tra cứu sinh viên theo mã
    ///
    /// 404 là NotFound; lỗi vận chuyển hay lỗi phía dịch vụ sinh viên là
    /// DependencyUnresolved để bên gọi phân biệt được với "không tồn tại".
    pub async fn get_student_by_code(&self, student_code: &str) -> Result<StudentProfile> {
        let url = format!("{}/api/v1/students/code/{student_code}", self.base_url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            DrlError::dependency_unresolved(format!(
                "Không gọi được dịch vụ sinh viên: {e}"
            ))
        })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DrlError::not_found(format!(
                "Không tìm thấy sinh viên với mã {student_code}"
            )));
        }

        if !response.status().is_success() {
            return Err(DrlError::dependency_unresolved(format!(
                "Dịch vụ sinh viên trả về mã {}",
                response.status()
            )));
        }

        let envelope: StudentEnvelope = response.json().await.map_err(|e| {
            DrlError::dependency_unresolved(format!(
                "Phản hồi dịch vụ sinh viên không hợp lệ: {e}"
            ))
        })?;

        if envelope.code != 0 {
            return Err(DrlError::not_found(format!(
                "Không tìm thấy sinh viên với mã {student_code}: {}",
                envelope.message
            )));
        }

        envelope.data.ok_or_else(|| {
            DrlError::not_found(format!("Không tìm thấy sinh viên với mã {student_code}"))
        })
    }
}
