pub mod auth;

pub mod dashboard;

pub mod classes;

pub mod enrollments;

pub mod materials;

pub mod frontend;

pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use dashboard::configure_dashboard_routes;
pub use enrollments::configure_enrollment_routes;
pub use frontend::configure_frontend_routes;
pub use materials::configure_material_routes;

use actix_web::web;
use std::sync::Arc;

use crate::storage::{Storage, UploadStore};
use crate::utils::form_error_handler;

/// 注册全部路由
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_auth_routes(cfg); // 登录注册
    configure_dashboard_routes(cfg); // 控制台
    configure_classes_routes(cfg); // 课程
    configure_enrollment_routes(cfg); // 选课
    configure_material_routes(cfg); // 课程资料
    configure_frontend_routes(cfg); // 首页与静态资源（放在最后，包含 404 兜底）
}

/// 应用级共享数据与全部路由
///
/// 服务器与集成测试共用，保证两者的中间件和提取器配置一致。
pub fn app_configurator(
    storage: Arc<dyn Storage>,
    uploads: UploadStore,
) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(uploads.clone()))
            .app_data(web::FormConfig::default().error_handler(form_error_handler)); // 设置表单错误处理器
        configure_all_routes(cfg);
    }
}
