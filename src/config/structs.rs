use serde::{Deserialize, Serialize};

/// Cấu trúc cấu hình ứng dụng
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub gateway: GatewayConfig,
    pub scheduler: SchedulerConfig,
}

/// Thiết lập ứng dụng
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// Cấu hình máy chủ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// Cấu hình thời gian chờ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// Cấu hình giới hạn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// Cấu hình cơ sở dữ liệu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // URL kết nối (tự suy ra loại CSDL từ scheme)
    pub pool_size: u32, // Kích thước pool kết nối
    pub timeout: u64,   // Thời gian chờ kết nối (giây)
}

/// Cấu hình bộ nhớ đệm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(rename = "type")]
    pub cache_type: String,
    pub default_ttl: u64,
    pub redis: RedisConfig,
    pub memory: MemoryConfig,
}

/// Cấu hình Redis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub key_prefix: String,
    pub pool_size: u64,
}

/// Cấu hình bộ nhớ đệm trong tiến trình
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

/// Cấu hình CORS
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

/// Cấu hình gọi sang các dịch vụ khác qua gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub student_service_url: String, // URL dịch vụ quản lý sinh viên
    pub auth_service_url: String,    // URL dịch vụ xác thực
    pub request_timeout: u64,        // Thời gian chờ khi gọi dịch vụ ngoài (giây)
}

/// Cấu hình tác vụ định kỳ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub reminder_enabled: bool,
    pub reminder_hour: u32, // Giờ trong ngày chạy quét nhắc hạn (0-23)
}
