use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisObjectCache);

pub struct RedisObjectCache {
    client: redis::Client,
    key_prefix: String,
    ttl: u64, // TTL tính bằng giây
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis_config = &config.cache.redis;

        debug!(
            "RedisObjectCache khởi tạo với prefix: '{}', TTL: {}s",
            redis_config.key_prefix, config.cache.default_ttl
        );

        let client = redis::Client::open(redis_config.url.clone())
            .map_err(|e| format!("Tạo Redis client thất bại: {e}"))?;

        // Kiểm tra kết nối bằng lệnh PING đồng bộ
        match client.get_connection() {
            Ok(mut conn) => {
                if let Err(e) = redis::cmd("PING").query::<String>(&mut conn) {
                    error!(
                        "Không ping được Redis: {}. Kiểm tra máy chủ và URL: {}",
                        e, redis_config.url
                    );
                    return Err(format!("Redis ping thất bại: {e}"));
                }
            }
            Err(e) => {
                error!(
                    "Không kết nối được Redis: {}. Kiểm tra máy chủ và URL: {}",
                    e, redis_config.url
                );
                return Err(format!("Redis ping thất bại: {e}"));
            }
        }

        Ok(Self {
            client,
            key_prefix: redis_config.key_prefix.clone(),
            ttl: config.cache.default_ttl,
        })
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let redis_key = self.make_key(key);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Không lấy được kết nối Redis: {}", e);
                return CacheResult::ExistsButNoValue;
            }
        };

        let result: redis::RedisResult<Option<String>> = conn.get(redis_key).await;

        match result {
            Ok(Some(data)) => CacheResult::Found(data),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                error!("Đọc khóa '{}' thất bại: {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let redis_key = self.make_key(&key);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Không lấy được kết nối Redis: {}", e);
                return;
            }
        };

        // ttl = 0 nghĩa là dùng TTL mặc định
        let effective_ttl = if ttl == 0 { self.ttl } else { ttl };

        if let Err(e) = conn
            .set_ex::<String, String, ()>(redis_key, value, effective_ttl)
            .await
        {
            error!("Ghi khóa '{}' vào cache thất bại: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let redis_key = self.make_key(key);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Không lấy được kết nối Redis: {}", e);
                return;
            }
        };

        if let Err(e) = conn.del::<String, i32>(redis_key).await {
            error!("Xóa khóa '{}' thất bại: {}", key, e);
        }
    }

    async fn invalidate_all(&self) {
        warn!("RedisObjectCache không hỗ trợ invalidate_all");
    }
}
