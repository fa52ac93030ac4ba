use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireRole, RequireSession};
use crate::models::{SessionContext, users::entities::UserRole};
use crate::services::MaterialService;
use crate::utils::{SafeClassIdI64, SafeStoredFilename};

// 懒加载的全局 MaterialService 实例
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

pub async fn list_materials(
    req: HttpRequest,
    session: SessionContext,
    path: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .list_materials(&session, path.0, &req)
        .await
}

pub async fn upload_material(
    req: HttpRequest,
    session: SessionContext,
    path: SafeClassIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .upload_material(&session, path.0, &req, payload)
        .await
}

pub async fn download_material(
    req: HttpRequest,
    session: SessionContext,
    filename: SafeStoredFilename,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .download_material(&session, filename.0, &req)
        .await
}

// 配置路由
pub fn configure_material_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/materials/{class_id}")
            .wrap(RequireSession)
            .route(web::get().to(list_materials)),
    )
    .service(
        web::resource("/upload_material/{class_id}")
            .wrap(RequireRole::new(UserRole::Teacher))
            .wrap(RequireSession)
            .route(web::post().to(upload_material)),
    )
    .service(
        web::resource("/download/{filename}")
            .wrap(RequireSession)
            .route(web::get().to(download_material)),
    );
}
