//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: i64,
    pub scheduled_time: i64,
    pub duration_minutes: i32,
    pub is_live: bool,
    pub status: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::materials::Entity")]
    Materials,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Materials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_class(self) -> crate::models::classes::entities::Class {
        use crate::models::classes::entities::{Class, ClassStatus};

        Class {
            id: self.id,
            title: self.title,
            description: self.description,
            teacher_id: self.teacher_id,
            scheduled_time: super::timestamp_to_datetime(self.scheduled_time),
            duration_minutes: self.duration_minutes,
            is_live: self.is_live,
            status: self
                .status
                .parse::<ClassStatus>()
                .unwrap_or(ClassStatus::Scheduled),
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
