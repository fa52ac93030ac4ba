use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    // 上传目录中的存储文件名（带时间戳前缀）
    pub filename: String,
    // 原始扩展名（小写）
    pub file_type: Option<String>,
    pub class_id: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
