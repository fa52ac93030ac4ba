use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireRole, RequireSession};
use crate::models::{SessionContext, users::entities::UserRole};
use crate::services::DashboardService;

// 懒加载的全局 DashboardService 实例
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn teacher_dashboard(
    req: HttpRequest,
    session: SessionContext,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.teacher_dashboard(&session, &req).await
}

pub async fn student_dashboard(
    req: HttpRequest,
    session: SessionContext,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.student_dashboard(&session, &req).await
}

// 配置路由
pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/teacher/dashboard")
            .wrap(RequireRole::new(UserRole::Teacher))
            .wrap(RequireSession)
            .route(web::get().to(teacher_dashboard)),
    )
    .service(
        web::resource("/student/dashboard")
            .wrap(RequireRole::new(UserRole::Student))
            .wrap(RequireSession)
            .route(web::get().to(student_dashboard)),
    );
}
