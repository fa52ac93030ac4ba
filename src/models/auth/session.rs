use serde::{Deserialize, Serialize};

use crate::models::users::entities::{User, UserRole};

/// 请求级会话上下文
///
/// 由 `RequireSession` 中间件从签名会话 cookie 中解析后放入请求扩展，
/// 处理程序通过提取器显式获取，而不是读取全局会话状态。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
}

impl SessionContext {
    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }

    /// 登录后默认跳转的控制台地址
    pub fn dashboard_path(&self) -> &'static str {
        self.role.dashboard_path()
    }
}

impl From<&User> for SessionContext {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
        }
    }
}
