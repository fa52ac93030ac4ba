// 创建资料请求（存储层使用）
#[derive(Debug, Clone)]
pub struct CreateMaterialRequest {
    pub title: String,
    pub description: Option<String>,
    pub filename: String,
    pub file_type: String,
    pub class_id: i64,
}
