//! Thực thể chi tiết điểm theo tiêu chí
//!
//! Khóa chính kép (evaluation_id, criteria_id): mỗi phiếu chỉ chấm mỗi tiêu
//! chí đúng một lần, ghi đè chứ không nhân bản.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub evaluation_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub criteria_id: i64,
    pub score: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub evidence: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluations::Entity",
        from = "Column::EvaluationId",
        to = "super::evaluations::Column::Id"
    )]
    Evaluation,
    #[sea_orm(
        belongs_to = "super::criteria::Entity",
        from = "Column::CriteriaId",
        to = "super::criteria::Column::Id"
    )]
    Criterion,
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl Related<super::criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Criterion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
