//! Mô-đun xử lý lỗi thống nhất
//!
//! Dùng macro để sinh các loại lỗi kèm mã lỗi và tên loại.

use std::fmt;

/// Macro định nghĩa các loại lỗi
///
/// Tự động sinh:
/// - định nghĩa enum
/// - phương thức code() - trả về mã lỗi
/// - phương thức error_type() - trả về tên loại lỗi
/// - phương thức message() - trả về chi tiết lỗi
/// - các hàm khởi tạo tiện lợi
macro_rules! define_drl_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum DrlError {
            $($variant(String),)*
        }

        impl DrlError {
            /// Lấy mã lỗi
            pub fn code(&self) -> &'static str {
                match self {
                    $(DrlError::$variant(_) => $code,)*
                }
            }

            /// Lấy tên loại lỗi
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(DrlError::$variant(_) => $type_name,)*
                }
            }

            /// Lấy chi tiết lỗi
            pub fn message(&self) -> &str {
                match self {
                    $(DrlError::$variant(msg) => msg,)*
                }
            }
        }

        // Sinh các hàm khởi tạo tiện lợi
        paste::paste! {
            impl DrlError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        DrlError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_drl_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    InvalidTransition("E009", "Invalid State Transition"),
    Ownership("E010", "Ownership Violation"),
    Conflict("E011", "Concurrent Update Conflict"),
    DependencyUnresolved("E012", "Dependency Unresolved"),
    PeriodClosed("E013", "Evaluation Period Closed"),
    DateParse("E014", "Date Parse Error"),
}

impl DrlError {
    /// Lỗi chuyển trạng thái không hợp lệ, kèm hành động và trạng thái hiện tại
    pub fn transition_refused(action: &str, current: impl fmt::Display) -> Self {
        DrlError::InvalidTransition(format!(
            "Không thể thực hiện {action} khi phiếu đang ở trạng thái {current}"
        ))
    }

    /// Định dạng màu cho môi trường phát triển
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// Định dạng gọn
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for DrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DrlError {}

// Chuyển đổi từ các loại lỗi thường gặp
impl From<sea_orm::DbErr> for DrlError {
    fn from(err: sea_orm::DbErr) -> Self {
        DrlError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for DrlError {
    fn from(err: serde_json::Error) -> Self {
        DrlError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for DrlError {
    fn from(err: chrono::ParseError) -> Self {
        DrlError::DateParse(err.to_string())
    }
}

impl From<reqwest::Error> for DrlError {
    fn from(err: reqwest::Error) -> Self {
        DrlError::DependencyUnresolved(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DrlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DrlError::cache_connection("test").code(), "E001");
        assert_eq!(DrlError::validation("test").code(), "E006");
        assert_eq!(DrlError::invalid_transition("test").code(), "E009");
        assert_eq!(DrlError::conflict("test").code(), "E011");
        assert_eq!(DrlError::dependency_unresolved("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            DrlError::invalid_transition("test").error_type(),
            "Invalid State Transition"
        );
        assert_eq!(
            DrlError::ownership("test").error_type(),
            "Ownership Violation"
        );
    }

    #[test]
    fn test_error_message() {
        let err = DrlError::validation("Điểm vượt quá mức tối đa");
        assert_eq!(err.message(), "Điểm vượt quá mức tối đa");
    }

    #[test]
    fn test_transition_refused() {
        let err = DrlError::transition_refused("APPROVE", "DRAFT");
        assert_eq!(err.code(), "E009");
        assert!(err.message().contains("APPROVE"));
        assert!(err.message().contains("DRAFT"));
    }

    #[test]
    fn test_format_simple() {
        let err = DrlError::not_found("Không tìm thấy phiếu đánh giá");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Không tìm thấy phiếu đánh giá"));
    }
}
