use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Tạo bảng phiếu tiêu chí (rubric)
        manager
            .create_table(
                Table::create()
                    .table(Rubrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rubrics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rubrics::Name).string().not_null())
                    .col(ColumnDef::new(Rubrics::Description).text().null())
                    .col(ColumnDef::new(Rubrics::MaxPoints).double().not_null())
                    .col(ColumnDef::new(Rubrics::AcademicYear).string().null())
                    .col(
                        ColumnDef::new(Rubrics::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Rubrics::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Rubrics::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Tạo bảng tiêu chí
        manager
            .create_table(
                Table::create()
                    .table(Criteria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Criteria::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Criteria::RubricId).big_integer().not_null())
                    .col(ColumnDef::new(Criteria::Name).string().not_null())
                    .col(ColumnDef::new(Criteria::Description).text().null())
                    .col(ColumnDef::new(Criteria::MaxPoints).double().not_null())
                    .col(ColumnDef::new(Criteria::OrderIndex).integer().not_null())
                    .col(
                        ColumnDef::new(Criteria::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Criteria::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Criteria::Table, Criteria::RubricId)
                            .to(Rubrics::Table, Rubrics::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Tạo bảng phiếu đánh giá
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::StudentCode)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::Semester).string().not_null())
                    .col(ColumnDef::new(Evaluations::AcademicYear).string().null())
                    .col(
                        ColumnDef::new(Evaluations::RubricId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::TotalPoints)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Evaluations::Status).string().not_null())
                    .col(ColumnDef::new(Evaluations::RejectionReason).text().null())
                    .col(
                        ColumnDef::new(Evaluations::LastRejectionLevel)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::ResubmissionCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Evaluations::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Evaluations::SubmittedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::ApprovedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::RubricId)
                            .to(Rubrics::Table, Rubrics::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Tạo bảng chi tiết điểm theo tiêu chí (khóa chính kép)
        manager
            .create_table(
                Table::create()
                    .table(EvaluationDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationDetails::EvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationDetails::CriteriaId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationDetails::Score)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EvaluationDetails::Evidence).text().null())
                    .col(
                        ColumnDef::new(EvaluationDetails::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationDetails::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EvaluationDetails::EvaluationId)
                            .col(EvaluationDetails::CriteriaId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationDetails::Table, EvaluationDetails::EvaluationId)
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationDetails::Table, EvaluationDetails::CriteriaId)
                            .to(Criteria::Table, Criteria::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Tạo bảng lịch sử chuyển trạng thái (chỉ ghi thêm, không sửa/xóa)
        manager
            .create_table(
                Table::create()
                    .table(EvaluationHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationHistory::EvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EvaluationHistory::Action).string().not_null())
                    .col(ColumnDef::new(EvaluationHistory::FromStatus).string().null())
                    .col(
                        ColumnDef::new(EvaluationHistory::ToStatus)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EvaluationHistory::Level).string().null())
                    .col(
                        ColumnDef::new(EvaluationHistory::ActorId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(EvaluationHistory::ActorName).string().null())
                    .col(ColumnDef::new(EvaluationHistory::Comment).text().null())
                    .col(
                        ColumnDef::new(EvaluationHistory::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationHistory::Table, EvaluationHistory::EvaluationId)
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Tạo bảng kháng nghị
        manager
            .create_table(
                Table::create()
                    .table(Appeals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appeals::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Appeals::EvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Appeals::StudentCode).string().not_null())
                    .col(ColumnDef::new(Appeals::Reason).text().not_null())
                    .col(ColumnDef::new(Appeals::Status).string().not_null())
                    .col(ColumnDef::new(Appeals::ReviewerId).big_integer().null())
                    .col(ColumnDef::new(Appeals::ReviewerComment).text().null())
                    .col(ColumnDef::new(Appeals::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Appeals::ReviewedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Appeals::Table, Appeals::EvaluationId)
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Tạo bảng đợt đánh giá
        manager
            .create_table(
                Table::create()
                    .table(EvaluationPeriods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationPeriods::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EvaluationPeriods::Name).string().not_null())
                    .col(
                        ColumnDef::new(EvaluationPeriods::Semester)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationPeriods::AcademicYear)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationPeriods::StartDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationPeriods::EndDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationPeriods::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(EvaluationPeriods::Description).text().null())
                    .col(
                        ColumnDef::new(EvaluationPeriods::RubricId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationPeriods::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationPeriods::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationPeriods::Table, EvaluationPeriods::RubricId)
                            .to(Rubrics::Table, Rubrics::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Tạo bảng thông báo
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Notifications::NotificationType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Content).text().not_null())
                    .col(ColumnDef::new(Notifications::ReferenceType).string().null())
                    .col(
                        ColumnDef::new(Notifications::ReferenceId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Tạo các chỉ mục
        // Mỗi sinh viên chỉ có một phiếu đánh giá cho một học kỳ
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_evaluations_student_semester")
                    .table(Evaluations::Table)
                    .col(Evaluations::StudentCode)
                    .col(Evaluations::Semester)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluations_status")
                    .table(Evaluations::Table)
                    .col(Evaluations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluations_semester")
                    .table(Evaluations::Table)
                    .col(Evaluations::Semester)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluation_history_evaluation_id")
                    .table(EvaluationHistory::Table)
                    .col(EvaluationHistory::EvaluationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_criteria_rubric_id")
                    .table(Criteria::Table)
                    .col(Criteria::RubricId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_appeals_evaluation_id")
                    .table(Appeals::Table)
                    .col(Appeals::EvaluationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_appeals_student_code")
                    .table(Appeals::Table)
                    .col(Appeals::StudentCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_periods_semester")
                    .table(EvaluationPeriods::Table)
                    .col(EvaluationPeriods::Semester)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_user_id")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Xóa theo thứ tự ngược với lúc tạo
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EvaluationPeriods::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Appeals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EvaluationHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EvaluationDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Criteria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rubrics::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Rubrics {
    Table,
    Id,
    Name,
    Description,
    MaxPoints,
    AcademicYear,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Criteria {
    Table,
    Id,
    RubricId,
    Name,
    Description,
    MaxPoints,
    OrderIndex,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Evaluations {
    Table,
    Id,
    StudentCode,
    Semester,
    AcademicYear,
    RubricId,
    TotalPoints,
    Status,
    RejectionReason,
    LastRejectionLevel,
    ResubmissionCount,
    CreatedBy,
    SubmittedAt,
    ApprovedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EvaluationDetails {
    Table,
    EvaluationId,
    CriteriaId,
    Score,
    Evidence,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EvaluationHistory {
    Table,
    Id,
    EvaluationId,
    Action,
    FromStatus,
    ToStatus,
    Level,
    ActorId,
    ActorName,
    Comment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Appeals {
    Table,
    Id,
    EvaluationId,
    StudentCode,
    Reason,
    Status,
    ReviewerId,
    ReviewerComment,
    CreatedAt,
    ReviewedAt,
}

#[derive(DeriveIden)]
enum EvaluationPeriods {
    Table,
    Id,
    Name,
    Semester,
    AcademicYear,
    StartDate,
    EndDate,
    IsActive,
    Description,
    RubricId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    UserId,
    NotificationType,
    Title,
    Content,
    ReferenceType,
    ReferenceId,
    IsRead,
    CreatedAt,
}
