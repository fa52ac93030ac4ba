use super::entities::{Class, ClassStatus};
use crate::models::enrollments::entities::Enrollment;
use crate::models::materials::entities::Material;

// 教师控制台
#[derive(Debug)]
pub struct TeacherDashboard {
    // 按开课时间倒序
    pub classes: Vec<Class>,
    pub total_classes: usize,
    pub live_classes: usize,
    pub completed_classes: usize,
    // 最近上传的资料（最多 5 条）
    pub recent_materials: Vec<Material>,
}

impl TeacherDashboard {
    pub fn new(classes: Vec<Class>, recent_materials: Vec<Material>) -> Self {
        let count = |status: ClassStatus| classes.iter().filter(|c| c.status == status).count();
        let live_classes = count(ClassStatus::Live);
        let completed_classes = count(ClassStatus::Completed);

        Self {
            total_classes: classes.len(),
            live_classes,
            completed_classes,
            classes,
            recent_materials,
        }
    }
}

// 学生控制台
#[derive(Debug)]
pub struct StudentDashboard {
    // 选课记录及对应课程
    pub enrollments: Vec<(Enrollment, Class)>,
    // 尚未选修的课程
    pub available_classes: Vec<Class>,
}
