use tokio::signal;
use tracing::warn;

pub async fn listen_for_shutdown() {
    // Chờ tín hiệu Ctrl+C
    signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
    warn!("Nhận tín hiệu dừng, bắt đầu tắt máy chủ...");
}
