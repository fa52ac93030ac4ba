use serde::Deserialize;

// 登录表单
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// 注册表单
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    // 缺省时为 student
    pub role: Option<String>,
}
