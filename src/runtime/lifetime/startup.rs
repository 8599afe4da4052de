use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::clients::{AuthDirectoryClient, StudentDirectoryClient};
use crate::config::AppConfig;
use crate::models::rubrics::requests::{CreateCriterionRequest, CreateRubricRequest};
use crate::services::notifications::{EventDispatcher, scheduler};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub student_directory: StudentDirectoryClient,
}

/// Tạo thể hiện cache theo cấu hình, hỏng thì lùi về moka trong tiến trình
async fn create_cache() -> Result<Arc<dyn ObjectCache>, Box<dyn std::error::Error>> {
    let config = AppConfig::get();
    let cache_type = &config.cache.cache_type;

    warn!("Khởi tạo backend cache loại {}", cache_type);

    if let Some(constructor) = get_object_cache_plugin(cache_type) {
        match constructor().await {
            Ok(cache) => {
                warn!("Khởi tạo backend cache {} thành công", cache_type);
                return Ok(Arc::from(cache));
            }
            Err(e) => {
                warn!("Khởi tạo cache {} thất bại: {}", cache_type, e);

                if cache_type == "redis" {
                    warn!("Lùi về cache trong tiến trình");
                    if let Some(fallback_constructor) = get_object_cache_plugin("moka") {
                        match fallback_constructor().await {
                            Ok(cache) => {
                                warn!("Khởi tạo cache moka dự phòng thành công");
                                return Ok(Arc::from(cache));
                            }
                            Err(fallback_e) => {
                                warn!("Khởi tạo cache moka dự phòng thất bại: {}", fallback_e);
                            }
                        }
                    }
                }
            }
        }
    } else {
        warn!("Không tìm thấy backend cache '{}' trong registry", cache_type);

        if cache_type != "moka" {
            warn!("Lùi về cache trong tiến trình mặc định");
            if let Some(fallback_constructor) = get_object_cache_plugin("moka") {
                match fallback_constructor().await {
                    Ok(cache) => {
                        warn!("Khởi tạo cache moka dự phòng thành công");
                        return Ok(Arc::from(cache));
                    }
                    Err(fallback_e) => {
                        warn!("Khởi tạo cache moka dự phòng thất bại: {}", fallback_e);
                    }
                }
            }
        }
    }

    Err(format!("Không có backend cache nào dùng được (đã thử: {cache_type})").into())
}

/// Khởi tạo rubric mặc định
/// Cơ sở dữ liệu trống thì tạo "Phiếu đánh giá Kết quả Rèn luyện" chuẩn PTIT
async fn seed_default_rubric(storage: &Arc<dyn Storage>) {
    match storage.count_rubrics().await {
        Ok(count) if count > 0 => {
            debug!("Đã có {} rubric trong cơ sở dữ liệu, bỏ qua bước khởi tạo", count);
            return;
        }
        Ok(_) => {
            info!("Chưa có rubric nào, tạo rubric mặc định...");
        }
        Err(e) => {
            warn!("Đếm rubric thất bại: {}, bỏ qua bước khởi tạo", e);
            return;
        }
    }

    let request = CreateRubricRequest {
        name: "Phiếu đánh giá Kết quả Rèn luyện".to_string(),
        description: Some(
            "Bảng tiêu chí đánh giá điểm rèn luyện - Học viện CN Bưu chính Viễn thông (PTIT). \
             Tổng điểm tối đa: 100 điểm."
                .to_string(),
        ),
        max_points: 100.0,
        academic_year: Some("2024-2025".to_string()),
        criteria: vec![
            CreateCriterionRequest {
                name: "Đánh giá về ý thức tham gia học tập".to_string(),
                description: Some(
                    "1.1. Ý thức và thái độ trong học tập: 3 điểm\n\
                     1.2. Kết quả học tập trong kỳ: 10 điểm\n\
                     1.3. Ý thức chấp hành nội quy về các kỳ thi: 4 điểm\n\
                     1.4. Tham gia ngoại khóa: 2 điểm\n\
                     1.5. Tinh thần vượt khó: 1 điểm"
                        .to_string(),
                ),
                max_points: 20.0,
                order_index: 1,
            },
            CreateCriterionRequest {
                name: "Ý thức chấp hành nội quy".to_string(),
                description: Some(
                    "2.1. Thực hiện nội quy: 15 điểm\n\
                     2.2. Họp lớp / Sinh hoạt đoàn thể: 5 điểm\n\
                     2.3. Hội thảo việc làm: 5 điểm"
                        .to_string(),
                ),
                max_points: 25.0,
                order_index: 2,
            },
            CreateCriterionRequest {
                name: "Hoạt động chính trị – xã hội".to_string(),
                description: Some(
                    "3.1. Hoạt động chính trị, văn nghệ, thể thao: 10 điểm\n\
                     3.2. Công tác xã hội: 4 điểm\n\
                     3.3. Tuyên truyền hình ảnh trường: 3 điểm\n\
                     3.4. Phòng chống tệ nạn: 3 điểm\n\
                     3.5. Đưa thông tin sai lệch: trừ 10 điểm mỗi lần vi phạm"
                        .to_string(),
                ),
                max_points: 20.0,
                order_index: 3,
            },
            CreateCriterionRequest {
                name: "Ý thức công dân".to_string(),
                description: Some(
                    "4.1. Chấp hành pháp luật: 8 điểm\n\
                     4.2. Tuyên truyền, giữ vệ sinh: 5 điểm\n\
                     4.3. Quan hệ đúng mực với thầy cô: 5 điểm\n\
                     4.4. Quan hệ tốt với bạn bè: 5 điểm\n\
                     4.5. Khen thưởng: 2 điểm\n\
                     4.6. Vi phạm an ninh trật tự: trừ 5 điểm mỗi lần vi phạm"
                        .to_string(),
                ),
                max_points: 25.0,
                order_index: 4,
            },
            CreateCriterionRequest {
                name: "Phụ trách lớp – thành tích đặc biệt".to_string(),
                description: Some(
                    "5.1. Lớp trưởng/bí thư: 4 điểm\n\
                     5.2. Thành viên CLB, tham gia tổ chức: 3 điểm\n\
                     5.3. Thành tích đặc biệt: 3 điểm"
                        .to_string(),
                ),
                max_points: 10.0,
                order_index: 5,
            },
        ],
    };

    match storage.create_rubric(request).await {
        Ok(rubric) => {
            info!(
                "Đã tạo rubric mặc định (ID: {}, {} tiêu chí, tối đa {} điểm)",
                rubric.id,
                rubric.criteria.len(),
                rubric.max_points
            );
        }
        Err(e) => {
            warn!("Tạo rubric mặc định thất bại: {}", e);
        }
    }
}

/// Chuẩn bị ngữ cảnh khởi động máy chủ:
/// lưu trữ, cache, client gateway, bộ điều phối thông báo và quét nhắc hạn
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Chế độ debug: registry cache đã bật");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Tầng lưu trữ đã khởi tạo, migration hoàn tất");

    // Khởi tạo rubric mặc định (nếu cần)
    seed_default_rubric(&storage).await;

    // Tạo thể hiện cache
    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Backend cache đã khởi tạo");

    // Client gọi các dịch vụ khác qua gateway
    let student_directory =
        StudentDirectoryClient::new().expect("Failed to create student directory client");
    let auth_directory = match AuthDirectoryClient::new() {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("Không khởi tạo được client xác thực: {}, thông báo cho sinh viên sẽ bị bỏ qua", e);
            None
        }
    };

    // Bộ điều phối sự kiện chuyển trạng thái (best-effort, chạy nền)
    EventDispatcher::init(storage.clone(), auth_directory);

    // Vòng quét nhắc hạn đợt đánh giá, mỗi ngày một lần
    scheduler::spawn_period_reminder(storage.clone());
    warn!("Bộ điều phối thông báo và quét nhắc hạn đã khởi động");

    StartupContext {
        storage,
        cache,
        student_directory,
    }
}
