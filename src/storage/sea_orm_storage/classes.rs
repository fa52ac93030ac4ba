//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::errors::{EduStreamError, Result};
use crate::models::classes::{
    entities::{Class, ClassStatus},
    requests::CreateClassRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            teacher_id: Set(req.teacher_id),
            scheduled_time: Set(req.scheduled_time.timestamp()),
            duration_minutes: Set(req.duration_minutes),
            is_live: Set(false),
            status: Set(ClassStatus::Scheduled.to_string()),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduStreamError::from_db("Failed to create class", e))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取课程
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| EduStreamError::from_db("Failed to query class", e))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 列出教师的课程
    pub async fn list_classes_by_teacher_impl(
        &self,
        teacher_id: i64,
        newest_first: bool,
    ) -> Result<Vec<Class>> {
        let select = Classes::find().filter(Column::TeacherId.eq(teacher_id));

        let select = if newest_first {
            select.order_by_desc(Column::ScheduledTime)
        } else {
            select.order_by_asc(Column::ScheduledTime)
        };

        let classes = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduStreamError::from_db("Failed to list classes", e))?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }

    /// 列出学生尚未选修的课程
    pub async fn list_classes_not_enrolled_impl(&self, student_id: i64) -> Result<Vec<Class>> {
        let enrolled_ids: Vec<i64> = Enrollments::find()
            .select_only()
            .column(EnrollmentColumn::ClassId)
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduStreamError::from_db("Failed to list enrollments", e))?;

        let mut select = Classes::find();
        if !enrolled_ids.is_empty() {
            select = select.filter(Column::Id.is_not_in(enrolled_ids));
        }

        let classes = select
            .order_by_asc(Column::ScheduledTime)
            .all(&self.db)
            .await
            .map_err(|e| EduStreamError::from_db("Failed to list classes", e))?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }

    /// 开始上课
    pub async fn start_class_impl(&self, class_id: i64) -> Result<Option<Class>> {
        // 先检查课程是否存在
        let existing = self.get_class_by_id_impl(class_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(class_id),
            status: Set(ClassStatus::Live.to_string()),
            is_live: Set(true),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduStreamError::from_db("Failed to start class", e))?;

        Ok(Some(result.into_class()))
    }
}
