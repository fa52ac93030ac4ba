//! 课程资料存储操作

use super::SeaOrmStorage;
use crate::entity::classes::Column as ClassColumn;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials, Relation};
use crate::errors::{EduStreamError, Result};
use crate::models::materials::{entities::Material, requests::CreateMaterialRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 创建资料记录
    pub async fn create_material_impl(&self, req: CreateMaterialRequest) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            filename: Set(req.filename),
            file_type: Set(Some(req.file_type)),
            class_id: Set(req.class_id),
            uploaded_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduStreamError::from_db("Failed to create material", e))?;

        Ok(result.into_material())
    }

    /// 列出课程的资料
    pub async fn list_materials_by_class_impl(&self, class_id: i64) -> Result<Vec<Material>> {
        let materials = Materials::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::UploadedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduStreamError::from_db("Failed to list materials", e))?;

        Ok(materials.into_iter().map(|m| m.into_material()).collect())
    }

    /// 列出教师所有课程中最近上传的资料
    pub async fn list_recent_materials_by_teacher_impl(
        &self,
        teacher_id: i64,
        limit: u64,
    ) -> Result<Vec<Material>> {
        let materials = Materials::find()
            .join(JoinType::InnerJoin, Relation::Class.def())
            .filter(ClassColumn::TeacherId.eq(teacher_id))
            .order_by_desc(Column::UploadedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| EduStreamError::from_db("Failed to list recent materials", e))?;

        Ok(materials.into_iter().map(|m| m.into_material()).collect())
    }

    /// 通过存储文件名获取资料
    pub async fn get_material_by_filename_impl(&self, filename: &str) -> Result<Option<Material>> {
        let result = Materials::find()
            .filter(Column::Filename.eq(filename))
            .one(&self.db)
            .await
            .map_err(|e| EduStreamError::from_db("Failed to query material", e))?;

        Ok(result.map(|m| m.into_material()))
    }
}
