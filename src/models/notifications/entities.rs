use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Loại thông báo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationType {
    EvaluationSubmitted,
    EvaluationNeedsReview,
    EvaluationEscalated,
    EvaluationApproved,
    EvaluationReturned,
    AppealCreated,
    AppealReviewed,
    PeriodReminder,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationType::EvaluationSubmitted => "EVALUATION_SUBMITTED",
            NotificationType::EvaluationNeedsReview => "EVALUATION_NEEDS_REVIEW",
            NotificationType::EvaluationEscalated => "EVALUATION_ESCALATED",
            NotificationType::EvaluationApproved => "EVALUATION_APPROVED",
            NotificationType::EvaluationReturned => "EVALUATION_RETURNED",
            NotificationType::AppealCreated => "APPEAL_CREATED",
            NotificationType::AppealReviewed => "APPEAL_REVIEWED",
            NotificationType::PeriodReminder => "PERIOD_REMINDER",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EVALUATION_SUBMITTED" => Ok(NotificationType::EvaluationSubmitted),
            "EVALUATION_NEEDS_REVIEW" => Ok(NotificationType::EvaluationNeedsReview),
            "EVALUATION_ESCALATED" => Ok(NotificationType::EvaluationEscalated),
            "EVALUATION_APPROVED" => Ok(NotificationType::EvaluationApproved),
            "EVALUATION_RETURNED" => Ok(NotificationType::EvaluationReturned),
            "APPEAL_CREATED" => Ok(NotificationType::AppealCreated),
            "APPEAL_REVIEWED" => Ok(NotificationType::AppealReviewed),
            "PERIOD_REMINDER" => Ok(NotificationType::PeriodReminder),
            _ => Err(format!("Loại thông báo không hợp lệ: '{s}'")),
        }
    }
}

impl<'de> Deserialize<'de> for NotificationType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// Thông báo gửi tới một người dùng
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub content: String,
    // Loại và ID đối tượng được tham chiếu (EVALUATION / APPEAL / PERIOD)
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
