use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::rubrics::requests::{CreateRubricRequest, RubricListQuery};
use crate::services::RubricService;

// Thể hiện RubricService toàn cục, khởi tạo trễ
static RUBRIC_SERVICE: Lazy<RubricService> = Lazy::new(RubricService::new_lazy);

// Tạo rubric
pub async fn create_rubric(
    req: HttpRequest,
    body: web::Json<CreateRubricRequest>,
) -> ActixResult<HttpResponse> {
    RUBRIC_SERVICE.create_rubric(&req, body.into_inner()).await
}

// Lấy rubric theo ID
pub async fn get_rubric(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    RUBRIC_SERVICE.get_rubric(&req, path.into_inner()).await
}

// Liệt kê rubric
pub async fn list_rubrics(
    req: HttpRequest,
    query: web::Query<RubricListQuery>,
) -> ActixResult<HttpResponse> {
    RUBRIC_SERVICE.list_rubrics(&req, query.into_inner()).await
}

// Ngừng sử dụng rubric
pub async fn deactivate_rubric(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    RUBRIC_SERVICE
        .deactivate_rubric(&req, path.into_inner())
        .await
}

// Cấu hình route
pub fn configure_rubrics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/rubrics")
            .wrap(middlewares::RequireActor)
            .route("", web::get().to(list_rubrics))
            .route("/{id}", web::get().to(get_rubric))
            .service(
                // Quản lý danh mục rubric thuộc về CTSV
                web::scope("")
                    .wrap(middlewares::RequireRole::any_of(&["CTSV"]))
                    .route("", web::post().to(create_rubric))
                    .route("/{id}/deactivate", web::post().to(deactivate_rubric)),
            ),
    );
}
