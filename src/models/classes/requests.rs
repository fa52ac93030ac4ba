use serde::Deserialize;

/// 表单中 scheduled_time 的格式（HTML datetime-local）
pub const SCHEDULED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

// 创建课程表单，数值字段保持字符串以便给出友好的校验提示
#[derive(Debug, Deserialize)]
pub struct CreateClassForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub scheduled_time: String,
    pub duration: String,
}

// 创建课程请求（存储层使用）
#[derive(Debug, Clone)]
pub struct CreateClassRequest {
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: i64,
    pub scheduled_time: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
}
