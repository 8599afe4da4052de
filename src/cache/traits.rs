use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

/// Kết quả tra cứu cache
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    // Backend gặp sự cố, coi như không có giá trị nhưng không phải cache miss
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    /// Đọc và giải tuần tự một đối tượng JSON từ cache
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    // Giá trị hỏng thì loại bỏ, lần sau đọc từ nguồn
                    warn!("Giá trị cache hỏng tại khóa '{}': {}", key, e);
                    self.remove(key).await;
                    CacheResult::NotFound
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    /// Tuần tự hóa và ghi một đối tượng JSON vào cache
    pub async fn insert<T: Serialize>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => warn!("Không tuần tự hóa được giá trị cache: {}", e),
        }
    }
}
