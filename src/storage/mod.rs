use std::sync::Arc;

use crate::models::{
    classes::{entities::Class, requests::CreateClassRequest},
    enrollments::entities::Enrollment,
    materials::{entities::Material, requests::CreateMaterialRequest},
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;
pub mod uploads;

pub use uploads::UploadStore;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，用户名或邮箱重复时返回 Conflict
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过用户名获取用户信息（精确匹配）
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// 课程管理方法
    // 创建课程
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取课程信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 列出教师的课程，按开课时间排序
    async fn list_classes_by_teacher(&self, teacher_id: i64, newest_first: bool)
    -> Result<Vec<Class>>;
    // 列出学生尚未选修的课程
    async fn list_classes_not_enrolled(&self, student_id: i64) -> Result<Vec<Class>>;
    // 开始上课：status=live, is_live=true
    async fn start_class(&self, class_id: i64) -> Result<Option<Class>>;

    /// 选课管理方法
    // 创建选课记录，重复选课返回 Conflict
    async fn create_enrollment(&self, student_id: i64, class_id: i64) -> Result<Enrollment>;
    // 获取学生在课程中的选课记录
    async fn get_enrollment(&self, student_id: i64, class_id: i64) -> Result<Option<Enrollment>>;
    // 列出学生的选课记录及课程
    async fn list_enrollments_by_student(&self, student_id: i64)
    -> Result<Vec<(Enrollment, Class)>>;

    /// 课程资料方法
    // 创建资料记录
    async fn create_material(&self, material: CreateMaterialRequest) -> Result<Material>;
    // 列出课程的资料
    async fn list_materials_by_class(&self, class_id: i64) -> Result<Vec<Material>>;
    // 列出教师所有课程中最近上传的资料
    async fn list_recent_materials_by_teacher(
        &self,
        teacher_id: i64,
        limit: u64,
    ) -> Result<Vec<Material>>;
    // 通过存储文件名获取资料
    async fn get_material_by_filename(&self, filename: &str) -> Result<Option<Material>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
