//! Client gọi sang các dịch vụ khác qua gateway

pub mod auth;
pub mod student;

pub use auth::AuthDirectoryClient;
pub use student::{StudentDirectoryClient, StudentProfile};
