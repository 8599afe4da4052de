//! Máy trạng thái quy trình duyệt phiếu đánh giá
//!
//! Toàn bộ luật chuyển trạng thái nằm ở đây, tách khỏi tầng lưu trữ để có thể
//! kiểm thử đơn vị không cần cơ sở dữ liệu. Tầng Storage chỉ gọi
//! [`transition`] rồi ghi kết quả trong cùng một giao dịch.
//!
//! Chuỗi duyệt: DRAFT → SUBMITTED → CLASS_APPROVED → FACULTY_APPROVED →
//! CTSV_APPROVED. Từ ba trạng thái chờ duyệt có thể bị REJECTED; nộp lại sẽ
//! quay về đúng cấp đã từ chối (không bao giờ quay về DRAFT).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{DrlError, Result};

// Trạng thái phiếu đánh giá
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub enum EvaluationStatus {
    Draft,           // Sinh viên đang soạn
    Submitted,       // Đã nộp, chờ lớp duyệt
    ClassApproved,   // Lớp đã duyệt, chờ khoa duyệt
    FacultyApproved, // Khoa đã duyệt, chờ CTSV duyệt
    CtsvApproved,    // CTSV đã duyệt - hoàn tất
    Rejected,        // Bị từ chối, có thể nộp lại
}

impl EvaluationStatus {
    pub const DRAFT: &'static str = "DRAFT";
    pub const SUBMITTED: &'static str = "SUBMITTED";
    pub const CLASS_APPROVED: &'static str = "CLASS_APPROVED";
    pub const FACULTY_APPROVED: &'static str = "FACULTY_APPROVED";
    pub const CTSV_APPROVED: &'static str = "CTSV_APPROVED";
    pub const REJECTED: &'static str = "REJECTED";

    /// Chỉ sửa được nội dung khi còn là bản nháp
    pub fn can_edit(&self) -> bool {
        *self == EvaluationStatus::Draft
    }

    /// Chỉ nộp được khi còn là bản nháp
    pub fn can_submit(&self) -> bool {
        *self == EvaluationStatus::Draft
    }

    /// Duyệt được ở ba trạng thái chờ duyệt
    pub fn can_approve(&self) -> bool {
        matches!(
            self,
            EvaluationStatus::Submitted
                | EvaluationStatus::ClassApproved
                | EvaluationStatus::FacultyApproved
        )
    }

    /// Từ chối được ở đúng các trạng thái duyệt được
    pub fn can_reject(&self) -> bool {
        self.can_approve()
    }

    /// Chỉ nộp lại được sau khi bị từ chối
    pub fn can_resubmit(&self) -> bool {
        *self == EvaluationStatus::Rejected
    }

    /// Trạng thái kết thúc của quy trình
    pub fn is_final(&self) -> bool {
        *self == EvaluationStatus::CtsvApproved
    }

    /// Trạng thái kế tiếp khi được duyệt; None nếu không duyệt được
    pub fn next_approval_status(&self) -> Option<EvaluationStatus> {
        match self {
            EvaluationStatus::Submitted => Some(EvaluationStatus::ClassApproved),
            EvaluationStatus::ClassApproved => Some(EvaluationStatus::FacultyApproved),
            EvaluationStatus::FacultyApproved => Some(EvaluationStatus::CtsvApproved),
            _ => None,
        }
    }

    /// Cấp duyệt mà trạng thái này đang chờ.
    ///
    /// SUBMITTED chờ lớp, CLASS_APPROVED chờ khoa, FACULTY_APPROVED chờ CTSV.
    /// Giữ nguyên ánh xạ gián tiếp này vì định tuyến nộp lại dựa trên nó.
    pub fn approval_level(&self) -> ApprovalLevel {
        match self {
            EvaluationStatus::Submitted => ApprovalLevel::Class,
            EvaluationStatus::ClassApproved => ApprovalLevel::Faculty,
            EvaluationStatus::FacultyApproved => ApprovalLevel::Ctsv,
            _ => ApprovalLevel::None,
        }
    }
}

impl<'de> Deserialize<'de> for EvaluationStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EvaluationStatus::Draft => Self::DRAFT,
            EvaluationStatus::Submitted => Self::SUBMITTED,
            EvaluationStatus::ClassApproved => Self::CLASS_APPROVED,
            EvaluationStatus::FacultyApproved => Self::FACULTY_APPROVED,
            EvaluationStatus::CtsvApproved => Self::CTSV_APPROVED,
            EvaluationStatus::Rejected => Self::REJECTED,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for EvaluationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            Self::DRAFT => Ok(EvaluationStatus::Draft),
            Self::SUBMITTED => Ok(EvaluationStatus::Submitted),
            Self::CLASS_APPROVED => Ok(EvaluationStatus::ClassApproved),
            Self::FACULTY_APPROVED => Ok(EvaluationStatus::FacultyApproved),
            Self::CTSV_APPROVED => Ok(EvaluationStatus::CtsvApproved),
            Self::REJECTED => Ok(EvaluationStatus::Rejected),
            _ => Err(format!("Trạng thái phiếu không hợp lệ: '{s}'")),
        }
    }
}

// Cấp duyệt trong quy trình
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub enum ApprovalLevel {
    Class,   // Ban cán sự lớp
    Faculty, // Khoa / cố vấn học tập
    Ctsv,    // Phòng Công tác sinh viên
    None,    // Không thuộc cấp duyệt nào
}

impl ApprovalLevel {
    pub const CLASS: &'static str = "CLASS";
    pub const FACULTY: &'static str = "FACULTY";
    pub const CTSV: &'static str = "CTSV";
    pub const NONE: &'static str = "NONE";

    /// Trạng thái mà phiếu nộp lại sẽ quay về, theo cấp đã từ chối.
    ///
    /// Từ chối ở cấp nào thì quay về ngay trước cấp đó, giữ nguyên chữ ký
    /// duyệt của các cấp thấp hơn; thiếu thông tin thì duyệt lại từ đầu.
    pub fn resubmit_target(level: Option<ApprovalLevel>) -> EvaluationStatus {
        match level {
            Some(ApprovalLevel::Class) => EvaluationStatus::Submitted,
            Some(ApprovalLevel::Faculty) => EvaluationStatus::ClassApproved,
            Some(ApprovalLevel::Ctsv) => EvaluationStatus::FacultyApproved,
            _ => EvaluationStatus::Submitted,
        }
    }
}

impl<'de> Deserialize<'de> for ApprovalLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ApprovalLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApprovalLevel::Class => Self::CLASS,
            ApprovalLevel::Faculty => Self::FACULTY,
            ApprovalLevel::Ctsv => Self::CTSV,
            ApprovalLevel::None => Self::NONE,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ApprovalLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            Self::CLASS => Ok(ApprovalLevel::Class),
            Self::FACULTY => Ok(ApprovalLevel::Faculty),
            Self::CTSV => Ok(ApprovalLevel::Ctsv),
            Self::NONE => Ok(ApprovalLevel::None),
            _ => Err(format!("Cấp duyệt không hợp lệ: '{s}'")),
        }
    }
}

// Nhãn hành động ghi vào lịch sử
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub enum HistoryAction {
    Created,
    Submitted,
    Approved,
    Rejected,
    Resubmitted,
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HistoryAction::Created => "CREATED",
            HistoryAction::Submitted => "SUBMITTED",
            HistoryAction::Approved => "APPROVED",
            HistoryAction::Rejected => "REJECTED",
            HistoryAction::Resubmitted => "RESUBMITTED",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for HistoryAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(HistoryAction::Created),
            "SUBMITTED" => Ok(HistoryAction::Submitted),
            "APPROVED" => Ok(HistoryAction::Approved),
            "REJECTED" => Ok(HistoryAction::Rejected),
            "RESUBMITTED" => Ok(HistoryAction::Resubmitted),
            _ => Err(format!("Hành động lịch sử không hợp lệ: '{s}'")),
        }
    }
}

impl<'de> Deserialize<'de> for HistoryAction {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Hành động tác động lên máy trạng thái
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowAction {
    Submit,
    Approve,
    Reject,
    /// Nộp lại sau khi bị từ chối; mang theo cấp đã từ chối lần gần nhất
    Resubmit {
        last_rejection_level: Option<ApprovalLevel>,
    },
}

impl WorkflowAction {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowAction::Submit => "SUBMIT",
            WorkflowAction::Approve => "APPROVE",
            WorkflowAction::Reject => "REJECT",
            WorkflowAction::Resubmit { .. } => "RESUBMIT",
        }
    }
}

/// Hàm chuyển trạng thái thuần túy.
///
/// Trả về trạng thái mới nếu hành động hợp lệ với trạng thái hiện tại; ngược
/// lại trả lỗi InvalidTransition mang theo hành động và trạng thái hiện tại,
/// không có bất kỳ tác dụng phụ nào.
pub fn transition(current: EvaluationStatus, action: WorkflowAction) -> Result<EvaluationStatus> {
    let next = match action {
        WorkflowAction::Submit if current.can_submit() => Some(EvaluationStatus::Submitted),
        WorkflowAction::Approve => current.next_approval_status(),
        WorkflowAction::Reject if current.can_reject() => Some(EvaluationStatus::Rejected),
        WorkflowAction::Resubmit {
            last_rejection_level,
        } if current.can_resubmit() => Some(ApprovalLevel::resubmit_target(last_rejection_level)),
        _ => None,
    };

    next.ok_or_else(|| DrlError::transition_refused(action.name(), current))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [EvaluationStatus; 6] = [
        EvaluationStatus::Draft,
        EvaluationStatus::Submitted,
        EvaluationStatus::ClassApproved,
        EvaluationStatus::FacultyApproved,
        EvaluationStatus::CtsvApproved,
        EvaluationStatus::Rejected,
    ];

    #[test]
    fn test_can_approve_and_reject_only_in_reviewable_states() {
        for status in ALL_STATUSES {
            let reviewable = matches!(
                status,
                EvaluationStatus::Submitted
                    | EvaluationStatus::ClassApproved
                    | EvaluationStatus::FacultyApproved
            );
            assert_eq!(status.can_approve(), reviewable, "can_approve({status})");
            assert_eq!(status.can_reject(), reviewable, "can_reject({status})");
        }
    }

    #[test]
    fn test_edit_and_submit_only_in_draft() {
        for status in ALL_STATUSES {
            assert_eq!(status.can_edit(), status == EvaluationStatus::Draft);
            assert_eq!(status.can_submit(), status == EvaluationStatus::Draft);
        }
    }

    #[test]
    fn test_resubmit_only_after_rejection() {
        for status in ALL_STATUSES {
            assert_eq!(status.can_resubmit(), status == EvaluationStatus::Rejected);
        }
    }

    #[test]
    fn test_only_ctsv_approved_is_final() {
        for status in ALL_STATUSES {
            assert_eq!(status.is_final(), status == EvaluationStatus::CtsvApproved);
        }
    }

    #[test]
    fn test_approval_chain() {
        assert_eq!(
            transition(EvaluationStatus::Submitted, WorkflowAction::Approve).unwrap(),
            EvaluationStatus::ClassApproved
        );
        assert_eq!(
            transition(EvaluationStatus::ClassApproved, WorkflowAction::Approve).unwrap(),
            EvaluationStatus::FacultyApproved
        );
        assert_eq!(
            transition(EvaluationStatus::FacultyApproved, WorkflowAction::Approve).unwrap(),
            EvaluationStatus::CtsvApproved
        );
    }

    #[test]
    fn test_approve_refused_outside_chain() {
        for status in [
            EvaluationStatus::Draft,
            EvaluationStatus::CtsvApproved,
            EvaluationStatus::Rejected,
        ] {
            let err = transition(status, WorkflowAction::Approve).unwrap_err();
            assert_eq!(err.code(), "E009");
            assert!(err.message().contains("APPROVE"));
            assert!(err.message().contains(&status.to_string()));
        }
    }

    #[test]
    fn test_submit_only_from_draft() {
        assert_eq!(
            transition(EvaluationStatus::Draft, WorkflowAction::Submit).unwrap(),
            EvaluationStatus::Submitted
        );
        for status in ALL_STATUSES {
            if status != EvaluationStatus::Draft {
                assert!(transition(status, WorkflowAction::Submit).is_err());
            }
        }
    }

    #[test]
    fn test_reject_from_reviewable_states() {
        for status in [
            EvaluationStatus::Submitted,
            EvaluationStatus::ClassApproved,
            EvaluationStatus::FacultyApproved,
        ] {
            assert_eq!(
                transition(status, WorkflowAction::Reject).unwrap(),
                EvaluationStatus::Rejected
            );
        }
        for status in [
            EvaluationStatus::Draft,
            EvaluationStatus::CtsvApproved,
            EvaluationStatus::Rejected,
        ] {
            assert!(transition(status, WorkflowAction::Reject).is_err());
        }
    }

    #[test]
    fn test_approval_level_of_reviewable_states() {
        // Cấp duyệt là cấp đang chờ xét, không phải cấp đã ký
        assert_eq!(
            EvaluationStatus::Submitted.approval_level(),
            ApprovalLevel::Class
        );
        assert_eq!(
            EvaluationStatus::ClassApproved.approval_level(),
            ApprovalLevel::Faculty
        );
        assert_eq!(
            EvaluationStatus::FacultyApproved.approval_level(),
            ApprovalLevel::Ctsv
        );
        assert_eq!(
            EvaluationStatus::Draft.approval_level(),
            ApprovalLevel::None
        );
        assert_eq!(
            EvaluationStatus::Rejected.approval_level(),
            ApprovalLevel::None
        );
        assert_eq!(
            EvaluationStatus::CtsvApproved.approval_level(),
            ApprovalLevel::None
        );
    }

    #[test]
    fn test_smart_resubmission_routing() {
        // Từ chối ở cấp lớp → duyệt lại từ đầu
        assert_eq!(
            transition(
                EvaluationStatus::Rejected,
                WorkflowAction::Resubmit {
                    last_rejection_level: Some(ApprovalLevel::Class)
                }
            )
            .unwrap(),
            EvaluationStatus::Submitted
        );
        // Từ chối ở cấp khoa → bỏ qua vòng lớp
        assert_eq!(
            transition(
                EvaluationStatus::Rejected,
                WorkflowAction::Resubmit {
                    last_rejection_level: Some(ApprovalLevel::Faculty)
                }
            )
            .unwrap(),
            EvaluationStatus::ClassApproved
        );
        // Từ chối ở cấp CTSV → bỏ qua vòng lớp và khoa
        assert_eq!(
            transition(
                EvaluationStatus::Rejected,
                WorkflowAction::Resubmit {
                    last_rejection_level: Some(ApprovalLevel::Ctsv)
                }
            )
            .unwrap(),
            EvaluationStatus::FacultyApproved
        );
        // Thiếu thông tin cấp từ chối → mặc định duyệt lại từ đầu
        assert_eq!(
            transition(
                EvaluationStatus::Rejected,
                WorkflowAction::Resubmit {
                    last_rejection_level: None
                }
            )
            .unwrap(),
            EvaluationStatus::Submitted
        );
        assert_eq!(
            transition(
                EvaluationStatus::Rejected,
                WorkflowAction::Resubmit {
                    last_rejection_level: Some(ApprovalLevel::None)
                }
            )
            .unwrap(),
            EvaluationStatus::Submitted
        );
    }

    #[test]
    fn test_resubmit_refused_outside_rejected() {
        for status in ALL_STATUSES {
            if status != EvaluationStatus::Rejected {
                assert!(
                    transition(
                        status,
                        WorkflowAction::Resubmit {
                            last_rejection_level: Some(ApprovalLevel::Class)
                        }
                    )
                    .is_err()
                );
            }
        }
    }

    #[test]
    fn test_rejection_then_resubmission_round_trip() {
        // Từ chối ở từng trạng thái chờ duyệt rồi nộp lại phải quay về đúng nơi
        for (reviewable, expected_landing) in [
            (EvaluationStatus::Submitted, EvaluationStatus::Submitted),
            (
                EvaluationStatus::ClassApproved,
                EvaluationStatus::ClassApproved,
            ),
            (
                EvaluationStatus::FacultyApproved,
                EvaluationStatus::FacultyApproved,
            ),
        ] {
            let level = reviewable.approval_level();
            let rejected = transition(reviewable, WorkflowAction::Reject).unwrap();
            assert_eq!(rejected, EvaluationStatus::Rejected);
            let landed = transition(
                rejected,
                WorkflowAction::Resubmit {
                    last_rejection_level: Some(level),
                },
            )
            .unwrap();
            assert_eq!(landed, expected_landing);
        }
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in ALL_STATUSES {
            let s = status.to_string();
            assert_eq!(s.parse::<EvaluationStatus>().unwrap(), status);
        }
        assert!("UNKNOWN".parse::<EvaluationStatus>().is_err());
    }

    #[test]
    fn test_level_string_round_trip() {
        for level in [
            ApprovalLevel::Class,
            ApprovalLevel::Faculty,
            ApprovalLevel::Ctsv,
            ApprovalLevel::None,
        ] {
            assert_eq!(level.to_string().parse::<ApprovalLevel>().unwrap(), level);
        }
        assert!("ADVISOR".parse::<ApprovalLevel>().is_err());
    }
}
