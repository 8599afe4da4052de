//! Kiểm thử tầng lưu trữ trên SQLite trong bộ nhớ
//!
//! Chạy trọn quy trình nghiệp vụ: tạo phiếu, nộp, duyệt ba cấp, từ chối và
//! nộp lại theo đúng cấp, xóa bản nháp, kháng nghị.

use super::SeaOrmStorage;
use crate::models::appeals::entities::{AppealDecision, AppealStatus};
use crate::models::evaluations::requests::{
    CreateEvaluationRequest, EvaluationDetailInput, PendingReviewQuery,
};
use crate::models::evaluations::workflow::{ApprovalLevel, EvaluationStatus, HistoryAction};
use crate::models::notifications::entities::NotificationType;
use crate::models::notifications::requests::CreateNotificationRequest;
use crate::models::periods::requests::CreatePeriodRequest;
use crate::models::rubrics::entities::Rubric;
use crate::models::rubrics::requests::{CreateCriterionRequest, CreateRubricRequest};
use crate::storage::Storage;
use sea_orm::EntityTrait;

const SEMESTER: &str = "2024-2025-HK1";

async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::new_in_memory()
        .await
        .expect("khởi tạo SQLite trong bộ nhớ")
}

async fn seed_rubric(storage: &SeaOrmStorage) -> Rubric {
    storage
        .create_rubric(CreateRubricRequest {
            name: "Phiếu đánh giá Kết quả Rèn luyện".to_string(),
            description: None,
            max_points: 100.0,
            academic_year: Some("2024-2025".to_string()),
            criteria: vec![
                CreateCriterionRequest {
                    name: "Đánh giá về ý thức tham gia học tập".to_string(),
                    description: None,
                    max_points: 20.0,
                    order_index: 1,
                },
                CreateCriterionRequest {
                    name: "Ý thức chấp hành nội quy".to_string(),
                    description: None,
                    max_points: 25.0,
                    order_index: 2,
                },
                CreateCriterionRequest {
                    name: "Hoạt động chính trị – xã hội".to_string(),
                    description: None,
                    max_points: 20.0,
                    order_index: 3,
                },
            ],
        })
        .await
        .expect("tạo rubric mẫu")
}

fn detail(criteria_id: i64, score: f64) -> EvaluationDetailInput {
    EvaluationDetailInput {
        criteria_id,
        score: Some(score),
        evidence: None,
        self_scores: None,
    }
}

async fn seed_evaluation(
    storage: &SeaOrmStorage,
    rubric: &Rubric,
    student_code: &str,
    scores: [f64; 3],
) -> crate::models::evaluations::entities::Evaluation {
    storage
        .create_evaluation(
            CreateEvaluationRequest {
                student_code: student_code.to_string(),
                rubric_id: rubric.id,
                semester: SEMESTER.to_string(),
                academic_year: Some("2024-2025".to_string()),
                details: vec![
                    detail(rubric.criteria[0].id, scores[0]),
                    detail(rubric.criteria[1].id, scores[1]),
                    detail(rubric.criteria[2].id, scores[2]),
                ],
            },
            None,
        )
        .await
        .expect("tạo phiếu mẫu")
}

async fn open_period(storage: &SeaOrmStorage, semester: &str) {
    let now = chrono::Utc::now();
    storage
        .create_period(CreatePeriodRequest {
            name: format!("Đợt đánh giá {semester}"),
            semester: semester.to_string(),
            academic_year: "2024-2025".to_string(),
            start_date: now - chrono::Duration::days(1),
            end_date: now + chrono::Duration::days(7),
            description: None,
            rubric_id: None,
        })
        .await
        .expect("tạo đợt đang mở");
}

/// Đưa phiếu tới một trạng thái chờ duyệt cho trước
async fn advance_to(
    storage: &SeaOrmStorage,
    id: i64,
    target: EvaluationStatus,
) -> crate::models::evaluations::entities::Evaluation {
    let mut eval = storage.submit_evaluation(id).await.expect("nộp phiếu");
    while eval.status != target {
        eval = storage
            .approve_evaluation(id, None, Some(1), Some("Người duyệt".to_string()))
            .await
            .expect("duyệt phiếu");
    }
    eval
}

#[tokio::test]
async fn test_create_computes_total_and_writes_history() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;

    let eval = seed_evaluation(&storage, &rubric, "B21DCCN001", [18.0, 25.0, 12.0]).await;

    assert_eq!(eval.status, EvaluationStatus::Draft);
    assert_eq!(eval.total_points, 55.0);
    assert_eq!(eval.details.len(), 3);
    let sum: f64 = eval.details.iter().map(|d| d.score).sum();
    assert_eq!(sum, eval.total_points);
    assert_eq!(eval.resubmission_count, 0);
    assert!(eval.submitted_at.is_none());
    assert!(eval.approved_at.is_none());

    assert_eq!(eval.history.len(), 1);
    assert_eq!(eval.history[0].action, HistoryAction::Created);
    assert_eq!(eval.history[0].from_status, None);
    assert_eq!(eval.history[0].to_status, EvaluationStatus::Draft);
}

#[tokio::test]
async fn test_duplicate_student_semester_is_refused() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;

    seed_evaluation(&storage, &rubric, "B21DCCN001", [10.0, 10.0, 10.0]).await;

    let err = storage
        .create_evaluation(
            CreateEvaluationRequest {
                student_code: "B21DCCN001".to_string(),
                rubric_id: rubric.id,
                semester: SEMESTER.to_string(),
                academic_year: None,
                details: vec![],
            },
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(err.code(), "E011");
}

#[tokio::test]
async fn test_score_validation() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;

    // Điểm vượt mức tối đa của tiêu chí bị từ chối ngay, không ghi gì
    let err = storage
        .create_evaluation(
            CreateEvaluationRequest {
                student_code: "B21DCCN002".to_string(),
                rubric_id: rubric.id,
                semester: SEMESTER.to_string(),
                academic_year: None,
                details: vec![detail(rubric.criteria[0].id, 20.5)],
            },
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E006");
    assert!(
        storage
            .list_evaluations_with_pagination(
                crate::models::evaluations::requests::EvaluationListQuery {
                    page: None,
                    size: None,
                    student_code: Some("B21DCCN002".to_string()),
                    semester: None,
                    status: None,
                }
            )
            .await
            .unwrap()
            .items
            .is_empty()
    );

    // Điểm null quy về 0; điểm âm hợp lệ (tiêu chí trừ điểm)
    let eval = storage
        .create_evaluation(
            CreateEvaluationRequest {
                student_code: "B21DCCN003".to_string(),
                rubric_id: rubric.id,
                semester: SEMESTER.to_string(),
                academic_year: None,
                details: vec![
                    EvaluationDetailInput {
                        criteria_id: rubric.criteria[0].id,
                        score: None,
                        evidence: None,
                        self_scores: None,
                    },
                    detail(rubric.criteria[1].id, -5.0),
                ],
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(eval.details[0].score, 0.0);
    assert_eq!(eval.total_points, -5.0);
}

#[tokio::test]
async fn test_update_draft_replaces_detail_set() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;
    let eval = seed_evaluation(&storage, &rubric, "B21DCCN001", [18.0, 25.0, 12.0]).await;

    let updated = storage
        .update_draft_details(eval.id, vec![detail(rubric.criteria[0].id, 15.0)])
        .await
        .unwrap();

    // Thay toàn bộ chứ không trộn: chỉ còn một chi tiết
    assert_eq!(updated.details.len(), 1);
    assert_eq!(updated.total_points, 15.0);

    // Sau khi nộp thì không sửa được nữa
    open_period(&storage, SEMESTER).await;
    storage.submit_evaluation(eval.id).await.unwrap();
    let err = storage
        .update_draft_details(eval.id, vec![detail(rubric.criteria[0].id, 10.0)])
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E009");
}

#[tokio::test]
async fn test_submit_requires_open_period_for_exact_semester() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;
    let eval = seed_evaluation(&storage, &rubric, "B21DCCN001", [18.0, 25.0, 12.0]).await;

    // Chưa có đợt nào
    let err = storage.submit_evaluation(eval.id).await.unwrap_err();
    assert_eq!(err.code(), "E013");

    // Có đợt nhưng của học kỳ khác
    open_period(&storage, "2024-2025-HK2").await;
    let err = storage.submit_evaluation(eval.id).await.unwrap_err();
    assert_eq!(err.code(), "E013");

    // Đợt đúng học kỳ
    open_period(&storage, SEMESTER).await;
    let submitted = storage.submit_evaluation(eval.id).await.unwrap();
    assert_eq!(submitted.status, EvaluationStatus::Submitted);
    assert!(submitted.submitted_at.is_some());
}

#[tokio::test]
async fn test_full_approval_chain() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;
    let eval = seed_evaluation(&storage, &rubric, "B21DCCN001", [18.0, 25.0, 12.0]).await;
    open_period(&storage, SEMESTER).await;

    storage.submit_evaluation(eval.id).await.unwrap();

    let e1 = storage
        .approve_evaluation(eval.id, None, Some(11), Some("Lớp trưởng".to_string()))
        .await
        .unwrap();
    assert_eq!(e1.status, EvaluationStatus::ClassApproved);
    assert!(e1.approved_at.is_none());

    let e2 = storage
        .approve_evaluation(eval.id, None, Some(12), Some("Cố vấn khoa".to_string()))
        .await
        .unwrap();
    assert_eq!(e2.status, EvaluationStatus::FacultyApproved);
    assert!(e2.approved_at.is_none());

    let e3 = storage
        .approve_evaluation(
            eval.id,
            Some("Đồng ý".to_string()),
            Some(13),
            Some("CTSV".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(e3.status, EvaluationStatus::CtsvApproved);
    assert!(e3.approved_at.is_some());

    // Dòng lịch sử duyệt ghi cấp TRƯỚC khi chuyển
    let approvals: Vec<_> = e3
        .history
        .iter()
        .filter(|h| h.action == HistoryAction::Approved)
        .collect();
    assert_eq!(approvals.len(), 3);
    assert_eq!(approvals[0].level, Some(ApprovalLevel::Class));
    assert_eq!(approvals[1].level, Some(ApprovalLevel::Faculty));
    assert_eq!(approvals[2].level, Some(ApprovalLevel::Ctsv));
    assert_eq!(approvals[2].from_status, Some(EvaluationStatus::FacultyApproved));

    // Phiếu đã chốt thì không duyệt thêm được
    let err = storage
        .approve_evaluation(eval.id, None, None, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E009");
    let reloaded = storage.get_evaluation_by_id(eval.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, EvaluationStatus::CtsvApproved);
}

#[tokio::test]
async fn test_reject_records_waiting_level_and_resubmit_routes_back() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;
    open_period(&storage, SEMESTER).await;

    // (trạng thái bị từ chối, cấp ghi nhận, trạng thái sau nộp lại)
    let cases = [
        (
            EvaluationStatus::Submitted,
            ApprovalLevel::Class,
            EvaluationStatus::Submitted,
        ),
        (
            EvaluationStatus::ClassApproved,
            ApprovalLevel::Faculty,
            EvaluationStatus::ClassApproved,
        ),
        (
            EvaluationStatus::FacultyApproved,
            ApprovalLevel::Ctsv,
            EvaluationStatus::FacultyApproved,
        ),
    ];

    for (i, (rejected_at, expected_level, expected_landing)) in cases.into_iter().enumerate() {
        let student = format!("B21DCCN00{i}");
        let eval = seed_evaluation(&storage, &rubric, &student, [18.0, 25.0, 12.0]).await;
        advance_to(&storage, eval.id, rejected_at).await;

        let rejected = storage
            .reject_evaluation(
                eval.id,
                "Thiếu minh chứng".to_string(),
                Some(99),
                Some("Người duyệt".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(rejected.status, EvaluationStatus::Rejected);
        assert_eq!(rejected.last_rejection_level, Some(expected_level));
        assert_eq!(rejected.rejection_reason.as_deref(), Some("Thiếu minh chứng"));

        let resubmitted = storage
            .resubmit_evaluation(
                eval.id,
                vec![
                    detail(rubric.criteria[0].id, 20.0),
                    detail(rubric.criteria[1].id, 25.0),
                    detail(rubric.criteria[2].id, 15.0),
                ],
                "Đã bổ sung minh chứng".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(resubmitted.status, expected_landing);
        assert_eq!(resubmitted.total_points, 60.0);
        assert_eq!(resubmitted.resubmission_count, 1);
        assert!(resubmitted.submitted_at.is_some());

        let last = resubmitted.history.last().unwrap();
        assert_eq!(last.action, HistoryAction::Resubmitted);
        assert_eq!(last.from_status, Some(EvaluationStatus::Rejected));
        assert_eq!(last.to_status, expected_landing);
    }
}

#[tokio::test]
async fn test_resubmission_count_only_grows_on_resubmit() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;
    open_period(&storage, SEMESTER).await;
    let eval = seed_evaluation(&storage, &rubric, "B21DCCN001", [18.0, 25.0, 12.0]).await;

    let submitted = storage.submit_evaluation(eval.id).await.unwrap();
    assert_eq!(submitted.resubmission_count, 0);

    for expected in 1..=2 {
        storage
            .reject_evaluation(eval.id, "Chưa đạt".to_string(), None, None)
            .await
            .unwrap();
        let resubmitted = storage
            .resubmit_evaluation(
                eval.id,
                vec![detail(rubric.criteria[0].id, 18.0)],
                "Bổ sung".to_string(),
            )
            .await
            .unwrap();
        assert_eq!(resubmitted.resubmission_count, expected);
    }

    let approved = storage
        .approve_evaluation(eval.id, None, None, None)
        .await
        .unwrap();
    assert_eq!(approved.resubmission_count, 2);
}

#[tokio::test]
async fn test_delete_draft_rules() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;
    let eval = seed_evaluation(&storage, &rubric, "B21DCCN001", [18.0, 25.0, 12.0]).await;

    // Không phải chủ phiếu thì không xóa được
    let err = storage
        .delete_draft_evaluation(eval.id, "B21DCCN999")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E010");

    // Phiếu đã nộp thì không xóa được
    open_period(&storage, SEMESTER).await;
    storage.submit_evaluation(eval.id).await.unwrap();
    let err = storage
        .delete_draft_evaluation(eval.id, "B21DCCN001")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E009");

    // Bản nháp của chính mình thì xóa được, kèm chi tiết và lịch sử
    let draft = seed_evaluation(&storage, &rubric, "B21DCCN002", [10.0, 10.0, 10.0]).await;
    storage
        .delete_draft_evaluation(draft.id, "B21DCCN002")
        .await
        .unwrap();
    assert!(storage.get_evaluation_by_id(draft.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_stale_status_update_is_a_conflict() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;
    open_period(&storage, SEMESTER).await;
    let eval = seed_evaluation(&storage, &rubric, "B21DCCN001", [18.0, 25.0, 12.0]).await;
    storage.submit_evaluation(eval.id).await.unwrap();

    // Bên thua cuộc đua: còn giữ trạng thái cũ DRAFT trong tay
    let update = crate::entity::evaluations::Entity::update_many().col_expr(
        crate::entity::evaluations::Column::Status,
        sea_orm::sea_query::Expr::value(EvaluationStatus::ClassApproved.to_string()),
    );
    let err = storage
        .guarded_status_update(&storage.db, eval.id, EvaluationStatus::Draft, update)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E011");

    // Kết quả của bên thắng không bị ghi đè
    let reloaded = storage.get_evaluation_by_id(eval.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, EvaluationStatus::Submitted);
}

#[tokio::test]
async fn test_appeal_lifecycle() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;
    open_period(&storage, SEMESTER).await;
    let eval = seed_evaluation(&storage, &rubric, "B21DCCN001", [18.0, 25.0, 12.0]).await;

    // Chưa tới FACULTY_APPROVED thì chưa kháng nghị được
    let err = storage
        .create_appeal(eval.id, "B21DCCN001", "Điểm chưa đúng".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E009");

    advance_to(&storage, eval.id, EvaluationStatus::FacultyApproved).await;

    // Không phải chủ phiếu thì không kháng nghị được
    let err = storage
        .create_appeal(eval.id, "B21DCCN999", "Điểm chưa đúng".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E010");

    let appeal = storage
        .create_appeal(eval.id, "B21DCCN001", "Điểm mục 2 chưa đúng".to_string())
        .await
        .unwrap();
    assert_eq!(appeal.status, AppealStatus::Pending);

    // Tạo kháng nghị không đụng vào phiếu
    let reloaded = storage.get_evaluation_by_id(eval.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, EvaluationStatus::FacultyApproved);

    let reviewed = storage
        .review_appeal(
            appeal.id,
            AppealDecision::Approved,
            42,
            Some("Sẽ xem xét lại".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(reviewed.status, AppealStatus::Approved);
    assert_eq!(reviewed.reviewer_id, Some(42));
    assert!(reviewed.reviewed_at.is_some());

    // Xét lần hai phải thất bại, không ghi đè
    let err = storage
        .review_appeal(appeal.id, AppealDecision::Rejected, 43, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E009");
    let kept = storage.get_appeal_by_id(appeal.id).await.unwrap().unwrap();
    assert_eq!(kept.status, AppealStatus::Approved);
    assert_eq!(kept.reviewer_id, Some(42));

    // Phiếu vẫn nguyên trạng sau khi kháng nghị được xét
    let reloaded = storage.get_evaluation_by_id(eval.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, EvaluationStatus::FacultyApproved);

    // Phiếu đã chốt CTSV thì không mở kháng nghị mới được
    storage
        .approve_evaluation(eval.id, None, None, None)
        .await
        .unwrap();
    let err = storage
        .create_appeal(eval.id, "B21DCCN001", "Muộn rồi".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E009");
}

#[tokio::test]
async fn test_history_ordering_is_stable_both_ways() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;
    open_period(&storage, SEMESTER).await;
    let eval = seed_evaluation(&storage, &rubric, "B21DCCN001", [18.0, 25.0, 12.0]).await;
    advance_to(&storage, eval.id, EvaluationStatus::FacultyApproved).await;

    let oldest_first = storage.list_evaluation_history(eval.id, false).await.unwrap();
    let newest_first = storage.list_evaluation_history(eval.id, true).await.unwrap();

    // CREATED, SUBMITTED, APPROVED, APPROVED — nhiều dòng chung mốc thời
    // gian, id tăng dần quyết định thứ tự
    assert_eq!(oldest_first.len(), 4);
    assert!(oldest_first.windows(2).all(|w| w[0].id < w[1].id));

    let mut reversed = newest_first.clone();
    reversed.reverse();
    let ids: Vec<i64> = oldest_first.iter().map(|h| h.id).collect();
    let reversed_ids: Vec<i64> = reversed.iter().map(|h| h.id).collect();
    assert_eq!(ids, reversed_ids);

    // Lịch sử của phiếu không tồn tại là NotFound, không phải danh sách rỗng
    let err = storage.list_evaluation_history(9999, false).await.unwrap_err();
    assert_eq!(err.code(), "E007");
}

#[tokio::test]
async fn test_evidence_round_trips_through_storage() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;

    let mut self_scores = std::collections::BTreeMap::new();
    self_scores.insert("1.1".to_string(), 3.0);
    self_scores.insert("1.2".to_string(), 8.0);

    let eval = storage
        .create_evaluation(
            CreateEvaluationRequest {
                student_code: "B21DCCN001".to_string(),
                rubric_id: rubric.id,
                semester: SEMESTER.to_string(),
                academic_year: None,
                details: vec![EvaluationDetailInput {
                    criteria_id: rubric.criteria[0].id,
                    score: Some(15.0),
                    evidence: Some("Bảng điểm học kỳ đính kèm".to_string()),
                    self_scores: Some(self_scores.clone()),
                }],
            },
            None,
        )
        .await
        .unwrap();

    let d = &eval.details[0];
    assert_eq!(d.evidence, "Bảng điểm học kỳ đính kèm");
    assert_eq!(d.self_scores, self_scores);
    // Điểm tự chấm tiêu chí con không được cộng vào tổng chính thức
    assert_eq!(eval.total_points, 15.0);
}

#[tokio::test]
async fn test_pending_queue_filters_by_level() {
    let storage = storage().await;
    let rubric = seed_rubric(&storage).await;
    open_period(&storage, SEMESTER).await;

    let e1 = seed_evaluation(&storage, &rubric, "B21DCCN001", [10.0, 10.0, 10.0]).await;
    let e2 = seed_evaluation(&storage, &rubric, "B21DCCN002", [10.0, 10.0, 10.0]).await;
    advance_to(&storage, e1.id, EvaluationStatus::Submitted).await;
    advance_to(&storage, e2.id, EvaluationStatus::ClassApproved).await;

    let class_queue = storage
        .list_pending_evaluations(PendingReviewQuery {
            page: None,
            size: None,
            level: Some(ApprovalLevel::Class),
        })
        .await
        .unwrap();
    assert_eq!(class_queue.items.len(), 1);
    assert_eq!(class_queue.items[0].id, e1.id);

    let all_queue = storage
        .list_pending_evaluations(PendingReviewQuery {
            page: None,
            size: None,
            level: None,
        })
        .await
        .unwrap();
    assert_eq!(all_queue.items.len(), 2);
}

#[tokio::test]
async fn test_notifications_basic_flow() {
    let storage = storage().await;

    storage
        .create_notification(CreateNotificationRequest {
            user_id: 7,
            notification_type: NotificationType::EvaluationReturned,
            title: "Phiếu bị trả lại".to_string(),
            content: "Thiếu minh chứng mục 2".to_string(),
            reference_type: Some("EVALUATION".to_string()),
            reference_id: Some(1),
        })
        .await
        .unwrap();

    assert_eq!(storage.get_unread_notification_count(7).await.unwrap(), 1);
    let list = storage
        .list_notifications_with_pagination(
            7,
            crate::models::notifications::requests::NotificationListQuery {
                pagination: Default::default(),
                unread_only: Some(true),
            },
        )
        .await
        .unwrap();
    assert_eq!(list.items.len(), 1);

    // Người khác không đánh dấu hộ được
    assert!(!storage.mark_notification_as_read(8, list.items[0].id).await.unwrap());
    assert!(storage.mark_notification_as_read(7, list.items[0].id).await.unwrap());
    assert_eq!(storage.get_unread_notification_count(7).await.unwrap(), 0);
}
