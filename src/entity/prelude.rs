//! Mô-đun tiền nhập cho tiện sử dụng

pub use super::appeals::{ActiveModel as AppealActiveModel, Entity as Appeals, Model as AppealModel};
pub use super::criteria::{
    ActiveModel as CriterionActiveModel, Entity as Criteria, Model as CriterionModel,
};
pub use super::evaluation_details::{
    ActiveModel as EvaluationDetailActiveModel, Entity as EvaluationDetails,
    Model as EvaluationDetailModel,
};
pub use super::evaluation_history::{
    ActiveModel as EvaluationHistoryActiveModel, Entity as EvaluationHistoryEntity,
    Model as EvaluationHistoryModel,
};
pub use super::evaluation_periods::{
    ActiveModel as EvaluationPeriodActiveModel, Entity as EvaluationPeriods,
    Model as EvaluationPeriodModel,
};
pub use super::evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as Evaluations, Model as EvaluationModel,
};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::rubrics::{ActiveModel as RubricActiveModel, Entity as Rubrics, Model as RubricModel};
