use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireRole, RequireSession};
use crate::models::{SessionContext, users::entities::UserRole};
use crate::services::EnrollmentService;
use crate::utils::SafeClassIdI64;

// 懒加载的全局 EnrollmentService 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn enroll(
    req: HttpRequest,
    session: SessionContext,
    path: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.enroll(&session, path.0, &req).await
}

// 配置路由
pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/enroll/{class_id}")
            .wrap(RequireRole::new(UserRole::Student))
            .wrap(RequireSession)
            .route(web::get().to(enroll)),
    );
}
