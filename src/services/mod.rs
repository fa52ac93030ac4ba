pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod enrollments;
pub mod materials;

pub use auth::AuthService;
pub use classes::ClassService;
pub use dashboard::DashboardService;
pub use enrollments::EnrollmentService;
pub use materials::MaterialService;

use actix_web::{HttpRequest, web};
use std::sync::Arc;

use crate::errors::{EduStreamError, Result};
use crate::models::{SessionContext, classes::entities::Class};
use crate::storage::Storage;

/// 按 ID 加载课程，不存在时返回 NotFound
pub(crate) async fn load_class(storage: &Arc<dyn Storage>, class_id: i64) -> Result<Class> {
    storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| EduStreamError::not_found(format!("Class {class_id} not found")))
}

/// 读取请求上下文中的存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

/// 记录被拒绝的访问
pub(crate) fn log_denied(session: &SessionContext, action: &str, class_id: i64) {
    tracing::warn!(
        "User {} ({}) denied {} on class {}",
        session.user_id,
        session.role,
        action,
        class_id
    );
}
