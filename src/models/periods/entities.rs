use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Đợt đánh giá: khoảng thời gian cho phép nộp phiếu của một học kỳ.
// Bản nháp có thể tạo ngoài đợt, nhưng chỉ nộp được khi có đợt đang mở
// trùng đúng học kỳ của phiếu.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/period.ts")]
pub struct EvaluationPeriod {
    pub id: i64,
    // Tên đợt, ví dụ "Đợt 1 - Học kỳ 1 năm học 2024-2025"
    pub name: String,
    pub semester: String,
    pub academic_year: String,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub is_active: bool,
    pub description: Option<String>,
    // Rubric khuyến nghị cho đợt này
    pub rubric_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl EvaluationPeriod {
    /// Đợt có đang mở tại thời điểm cho trước không
    pub fn is_open_at(&self, at: chrono::DateTime<chrono::Utc>) -> bool {
        self.is_active && at >= self.start_date && at <= self.end_date
    }

    /// Số ngày còn lại đến hạn, tính từ thời điểm cho trước
    pub fn days_until_end(&self, at: chrono::DateTime<chrono::Utc>) -> i64 {
        (self.end_date - at).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn period(active: bool) -> EvaluationPeriod {
        // Đợt mở trọn tháng 10/2024
        EvaluationPeriod {
            id: 1,
            name: "Đợt 1".to_string(),
            semester: "2024-2025-HK1".to_string(),
            academic_year: "2024-2025".to_string(),
            start_date: at(2024, 10, 1, 0, 0, 0),
            end_date: at(2024, 10, 31, 23, 59, 59),
            is_active: active,
            description: None,
            rubric_id: None,
            created_at: at(2024, 9, 1, 0, 0, 0),
            updated_at: at(2024, 9, 1, 0, 0, 0),
        }
    }

    #[test]
    fn test_open_within_window() {
        assert!(period(true).is_open_at(at(2024, 10, 15, 12, 0, 0)));
    }

    #[test]
    fn test_closed_outside_window() {
        let p = period(true);
        assert!(!p.is_open_at(at(2024, 9, 30, 23, 59, 59)));
        assert!(!p.is_open_at(at(2024, 11, 1, 0, 0, 0)));
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let p = period(true);
        assert!(p.is_open_at(at(2024, 10, 1, 0, 0, 0)));
        assert!(p.is_open_at(at(2024, 10, 31, 23, 59, 59)));
    }

    #[test]
    fn test_inactive_period_is_never_open() {
        assert!(!period(false).is_open_at(at(2024, 10, 15, 0, 0, 0)));
    }
}
