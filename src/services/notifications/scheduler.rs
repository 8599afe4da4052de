//! Tác vụ quét nhắc hạn hằng ngày
//!
//! Mỗi ngày một lần (vào giờ cấu hình) quét các đợt đánh giá đang hoạt động
//! và phát sự kiện nhắc khi đợt còn 3 hoặc 7 ngày là đóng. Tác vụ chỉ ĐỌC dữ
//! liệu đợt, không bao giờ chạm vào trạng thái phiếu đánh giá.

use std::sync::Arc;
use std::time::Duration;

use chrono::Timelike;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::models::notifications::events::TransitionEvent;
use crate::services::notifications::EventDispatcher;
use crate::storage::Storage;

const REMINDER_DAYS: [i64; 2] = [3, 7];

/// Khởi động vòng quét nhắc hạn
pub fn spawn_period_reminder(storage: Arc<dyn Storage>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(3600));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_run_date: Option<chrono::NaiveDate> = None;

        loop {
            ticker.tick().await;

            let config = AppConfig::get();
            if !config.scheduler.reminder_enabled {
                continue;
            }

            let now = chrono::Utc::now();
            if now.hour() != config.scheduler.reminder_hour {
                continue;
            }
            // Mỗi ngày chạy đúng một lần
            if last_run_date == Some(now.date_naive()) {
                continue;
            }
            last_run_date = Some(now.date_naive());

            if let Err(e) = sweep(&storage, now).await {
                warn!("Quét nhắc hạn thất bại: {}", e);
            }
        }
    })
}

async fn sweep(
    storage: &Arc<dyn Storage>,
    now: chrono::DateTime<chrono::Utc>,
) -> crate::errors::Result<()> {
    let periods = storage.list_active_periods().await?;
    debug!("Quét nhắc hạn: {} đợt đang hoạt động", periods.len());

    for period in periods {
        let days_left = period.days_until_end(now);
        if REMINDER_DAYS.contains(&days_left) {
            EventDispatcher::emit(TransitionEvent::PeriodDeadlineReminder {
                period_id: period.id,
                period_name: period.name.clone(),
                semester: period.semester.clone(),
                days_left,
            });
        }
    }

    Ok(())
}
