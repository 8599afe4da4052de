//! Thực thể kháng nghị điểm rèn luyện

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "appeals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluation_id: i64,
    pub student_code: String,
    #[sea_orm(column_type = "Text")]
    pub reason: String,
    pub status: String,
    #[sea_orm(nullable)]
    pub reviewer_id: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub reviewer_comment: Option<String>,
    pub created_at: i64,
    #[sea_orm(nullable)]
    pub reviewed_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluations::Entity",
        from = "Column::EvaluationId",
        to = "super::evaluations::Column::Id"
    )]
    Evaluation,
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
