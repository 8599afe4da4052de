//! Thực thể phiếu đánh giá điểm rèn luyện
//!
//! student_code lưu dưới dạng chuỗi, không có khóa ngoại sang dịch vụ sinh
//! viên để dịch vụ đánh giá hoạt động độc lập.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_code: String,
    pub semester: String,
    #[sea_orm(nullable)]
    pub academic_year: Option<String>,
    pub rubric_id: i64,
    pub total_points: f64,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub rejection_reason: Option<String>,
    #[sea_orm(nullable)]
    pub last_rejection_level: Option<String>,
    pub resubmission_count: i32,
    #[sea_orm(nullable)]
    pub created_by: Option<i64>,
    #[sea_orm(nullable)]
    pub submitted_at: Option<i64>,
    #[sea_orm(nullable)]
    pub approved_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rubrics::Entity",
        from = "Column::RubricId",
        to = "super::rubrics::Column::Id"
    )]
    Rubric,
    #[sea_orm(has_many = "super::evaluation_details::Entity")]
    Details,
    #[sea_orm(has_many = "super::evaluation_history::Entity")]
    History,
    #[sea_orm(has_many = "super::appeals::Entity")]
    Appeals,
}

impl Related<super::rubrics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rubric.def()
    }
}

impl Related<super::evaluation_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Details.def()
    }
}

impl Related<super::evaluation_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

impl Related<super::appeals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appeals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
