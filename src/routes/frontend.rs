//! 首页与静态资源路由
//!
//! 使用 rust-embed 嵌入的资源：
//! - `/` 渲染登录注册首页
//! - `/static/{tail}` 提供 CSS/JS
//! - 未匹配的路由返回 404 页面

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::errors::EduStreamError;
use crate::utils::SessionToken;
use crate::utils::filename::content_type_for;
use crate::views::{self, StaticAssets};

/// 检查是否应该设置缓存
fn should_cache(path: &str) -> bool {
    let ext = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    matches!(
        ext,
        "js" | "css" | "woff" | "woff2" | "png" | "jpg" | "jpeg" | "gif" | "svg" | "ico"
    )
}

/// 首页
pub async fn index(req: HttpRequest) -> ActixResult<HttpResponse> {
    // 已登录时导航栏显示用户信息
    let session = SessionToken::from_request(&req);
    let content = views::index_page()?;
    Ok(views::page_response(&req, "Welcome", session.as_ref(), &content)?)
}

/// 静态资源请求处理
pub async fn serve_static(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    let Some(file) = StaticAssets::get(path) else {
        return Err(EduStreamError::not_found("Asset not found").into());
    };

    let mut response = HttpResponse::Ok();
    response.content_type(content_type_for(path));

    // 设置缓存头
    if should_cache(path) {
        response.insert_header(("Cache-Control", "public, max-age=86400"));
    } else {
        response.insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"));
    }

    Ok(response.body(file.data.into_owned()))
}

/// 未匹配路由
pub async fn not_found() -> ActixResult<HttpResponse> {
    Err(EduStreamError::not_found("Page not found").into())
}

/// 配置首页与静态资源路由
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/static/{tail:.*}", web::get().to(serve_static))
        // 兜底：其余路径返回 404
        .route("/{tail:.*}", web::route().to(not_found));
}
