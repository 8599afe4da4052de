//! Thực thể đợt đánh giá
//!
//! Quản lý khoảng thời gian cho phép sinh viên nộp phiếu.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_periods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub semester: String,
    pub academic_year: String,
    pub start_date: i64,
    pub end_date: i64,
    pub is_active: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub rubric_id: Option<i64>,
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
}

impl Related<super::rubrics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rubric.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
