//! Thao tác lưu trữ thông báo

use super::{SeaOrmStorage, ts_to_datetime};
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{DrlError, Result};
use crate::models::{
    PaginationInfo,
    notifications::{
        entities::{Notification, NotificationType},
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::NotificationListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

fn to_notification(model: crate::entity::notifications::Model) -> Result<Notification> {
    Ok(Notification {
        id: model.id,
        user_id: model.user_id,
        notification_type: model
            .notification_type
            .parse::<NotificationType>()
            .map_err(DrlError::database_operation)?,
        title: model.title,
        content: model.content,
        reference_type: model.reference_type,
        reference_id: model.reference_id,
        is_read: model.is_read,
        created_at: ts_to_datetime(model.created_at),
    })
}

impl SeaOrmStorage {
    /// Tạo thông báo
    pub async fn create_notification_impl(
        &self,
        req: CreateNotificationRequest,
    ) -> Result<Notification> {
        let model = ActiveModel {
            user_id: Set(req.user_id),
            notification_type: Set(req.notification_type.to_string()),
            title: Set(req.title),
            content: Set(req.content),
            reference_type: Set(req.reference_type),
            reference_id: Set(req.reference_id),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Tạo thông báo thất bại: {e}")))?;

        to_notification(inserted)
    }

    /// Liệt kê thông báo của một người dùng (phân trang)
    pub async fn list_notifications_with_pagination_impl(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Notifications::find().filter(Column::UserId.eq(user_id));

        if let Some(true) = query.unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm thông báo thất bại: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm trang thất bại: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DrlError::database_operation(format!("Truy vấn thông báo thất bại: {e}")))?;

        let items = models
            .into_iter()
            .map(to_notification)
            .collect::<Result<Vec<_>>>()?;

        Ok(NotificationListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// Đếm thông báo chưa đọc
    pub async fn get_unread_notification_count_impl(&self, user_id: i64) -> Result<i64> {
        let count = Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Đếm thông báo chưa đọc thất bại: {e}")))?;

        Ok(count as i64)
    }

    /// Đánh dấu một thông báo đã đọc; chỉ chạm được thông báo của chính mình
    pub async fn mark_notification_as_read_impl(
        &self,
        user_id: i64,
        notification_id: i64,
    ) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::Id.eq(notification_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Đánh dấu đã đọc thất bại: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// Đánh dấu mọi thông báo của một người dùng là đã đọc
    pub async fn mark_all_notifications_as_read_impl(&self, user_id: i64) -> Result<i64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| DrlError::database_operation(format!("Đánh dấu tất cả đã đọc thất bại: {e}")))?;

        Ok(result.rows_affected as i64)
    }
}
