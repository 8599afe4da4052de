use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Trạng thái kháng nghị: PENDING → APPROVED | REJECTED, một chiều,
// không có nộp lại kháng nghị.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/appeal.ts")]
pub enum AppealStatus {
    Pending,
    Approved,
    Rejected,
}

impl AppealStatus {
    pub const PENDING: &'static str = "PENDING";
    pub const APPROVED: &'static str = "APPROVED";
    pub const REJECTED: &'static str = "REJECTED";

    /// Chỉ kháng nghị đang chờ mới được xét
    pub fn can_review(&self) -> bool {
        *self == AppealStatus::Pending
    }

    pub fn is_decided(&self) -> bool {
        !self.can_review()
    }
}

impl<'de> Deserialize<'de> for AppealStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for AppealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AppealStatus::Pending => Self::PENDING,
            AppealStatus::Approved => Self::APPROVED,
            AppealStatus::Rejected => Self::REJECTED,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AppealStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PENDING => Ok(AppealStatus::Pending),
            Self::APPROVED => Ok(AppealStatus::Approved),
            Self::REJECTED => Ok(AppealStatus::Rejected),
            _ => Err(format!("Trạng thái kháng nghị không hợp lệ: '{s}'")),
        }
    }
}

// Quyết định khi xét kháng nghị, chỉ nhận hai giá trị kết thúc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/appeal.ts")]
pub enum AppealDecision {
    Approved,
    Rejected,
}

impl AppealDecision {
    pub fn into_status(self) -> AppealStatus {
        match self {
            AppealDecision::Approved => AppealStatus::Approved,
            AppealDecision::Rejected => AppealStatus::Rejected,
        }
    }
}

// Kháng nghị điểm rèn luyện.
// Chỉ tham chiếu phiếu đánh giá, không bao giờ sửa phiếu.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/appeal.ts")]
pub struct Appeal {
    pub id: i64,
    pub evaluation_id: i64,
    pub student_code: String,
    pub reason: String,
    pub status: AppealStatus,
    pub reviewer_id: Option<i64>,
    pub reviewer_comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_can_be_reviewed() {
        assert!(AppealStatus::Pending.can_review());
        assert!(!AppealStatus::Approved.can_review());
        assert!(!AppealStatus::Rejected.can_review());
    }

    #[test]
    fn test_decision_maps_to_terminal_status() {
        assert_eq!(AppealDecision::Approved.into_status(), AppealStatus::Approved);
        assert_eq!(AppealDecision::Rejected.into_status(), AppealStatus::Rejected);
        assert!(AppealDecision::Approved.into_status().is_decided());
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in [
            AppealStatus::Pending,
            AppealStatus::Approved,
            AppealStatus::Rejected,
        ] {
            assert_eq!(status.to_string().parse::<AppealStatus>().unwrap(), status);
        }
        assert!("CANCELLED".parse::<AppealStatus>().is_err());
    }
}
