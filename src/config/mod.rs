//! Quản lý cấu hình ứng dụng

mod r#impl;
mod structs;

pub use structs::*;
