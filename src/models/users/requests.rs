use super::entities::UserRole;

// 创建用户请求（存储层使用，password 已经是哈希值）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}
