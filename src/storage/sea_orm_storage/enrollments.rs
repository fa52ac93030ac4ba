//! 选课存储操作

use super::SeaOrmStorage;
use crate::entity::classes::Entity as Classes;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{EduStreamError, Result};
use crate::models::{
    classes::entities::Class,
    enrollments::entities::{AttendanceStatus, Enrollment},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建选课记录
    ///
    /// (student_id, class_id) 上有唯一索引，并发的重复选课会得到 Conflict。
    pub async fn create_enrollment_impl(&self, student_id: i64, class_id: i64) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            class_id: Set(class_id),
            enrolled_at: Set(now),
            attendance_status: Set(AttendanceStatus::Enrolled.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduStreamError::from_db("Failed to create enrollment", e))?;

        Ok(result.into_enrollment())
    }

    /// 获取学生在课程中的选课记录
    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        class_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::ClassId.eq(class_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| EduStreamError::from_db("Failed to query enrollment", e))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 列出学生的选课记录及课程
    pub async fn list_enrollments_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<(Enrollment, Class)>> {
        let rows = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(Classes)
            .order_by_asc(Column::EnrolledAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduStreamError::from_db("Failed to list enrollments", e))?;

        // 外键保证课程存在，缺失的行直接跳过
        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, class)| {
                class.map(|c| (enrollment.into_enrollment(), c.into_class()))
            })
            .collect())
    }
}
