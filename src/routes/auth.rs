use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::auth::{LoginRequest, RegisterRequest};
use crate::services::AuthService;
use crate::utils::redirect;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login_page() -> HttpResponse {
    // 登录表单在首页
    redirect("/")
}

pub async fn login(
    req: HttpRequest,
    form: web::Form<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(form.into_inner(), &req).await
}

pub async fn register(
    req: HttpRequest,
    form: web::Form<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(form.into_inner(), &req).await
}

pub async fn logout() -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout().await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/login")
            .route(web::get().to(login_page))
            .route(web::post().to(login)),
    )
    .route("/register", web::post().to(register))
    .route("/logout", web::get().to(logout));
}
