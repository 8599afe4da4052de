//! Thực thể lịch sử phiếu đánh giá
//!
//! Bảng chỉ ghi thêm: mỗi lần chuyển trạng thái ghi đúng một dòng, không bao
//! giờ cập nhật hay xóa riêng lẻ. actor_id tham chiếu dịch vụ xác thực, không
//! có khóa ngoại.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluation_id: i64,
    pub action: String,
    #[sea_orm(nullable)]
    pub from_status: Option<String>,
    pub to_status: String,
    #[sea_orm(nullable)]
    pub level: Option<String>,
    #[sea_orm(nullable)]
    pub actor_id: Option<i64>,
    #[sea_orm(nullable)]
    pub actor_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: i64,
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
