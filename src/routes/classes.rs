use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireRole, RequireSession};
use crate::models::{SessionContext, classes::requests::CreateClassForm, users::entities::UserRole};
use crate::services::ClassService;
use crate::utils::SafeClassIdI64;

// 懒加载的全局 ClassService 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

pub async fn create_class(
    req: HttpRequest,
    session: SessionContext,
    form: web::Form<CreateClassForm>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&session, form.into_inner(), &req)
        .await
}

pub async fn start_class(
    req: HttpRequest,
    session: SessionContext,
    path: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.start_class(&session, path.0, &req).await
}

pub async fn live_class(
    req: HttpRequest,
    session: SessionContext,
    path: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.live_class(&session, path.0, &req).await
}

pub async fn schedule(req: HttpRequest, session: SessionContext) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.schedule(&session, &req).await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/create_class")
            .wrap(RequireRole::new(UserRole::Teacher))
            .wrap(RequireSession)
            .route(web::post().to(create_class)),
    )
    .service(
        web::resource("/start_class/{class_id}")
            .wrap(RequireRole::new(UserRole::Teacher))
            .wrap(RequireSession)
            .route(web::get().to(start_class)),
    )
    .service(
        web::resource("/live_class/{class_id}")
            .wrap(RequireSession)
            .route(web::get().to(live_class)),
    )
    .service(
        web::resource("/schedule")
            .wrap(RequireSession)
            .route(web::get().to(schedule)),
    );
}
