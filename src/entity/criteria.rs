//! Thực thể tiêu chí đánh giá

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "criteria")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub rubric_id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub max_points: f64,
    pub order_index: i32,
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
    EvaluationDetails,
}

impl Related<super::rubrics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rubric.def()
    }
}

impl Related<super::evaluation_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
