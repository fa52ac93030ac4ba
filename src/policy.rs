//! 访问控制策略
//!
//! 所有路由的角色与归属检查都通过 [`authorize`] 完成，中间件和各个服务共用同一套规则。

use std::sync::Arc;

use crate::errors::Result;
use crate::models::{SessionContext, classes::entities::Class, users::entities::UserRole};
use crate::storage::Storage;

/// 访问要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// 调用者必须是指定角色
    Role(UserRole),
    /// 教师且为课程的授课教师
    Owns,
    /// 授课教师，或已选修课程的学生
    OwnsOrEnrolled,
}

/// 与课程相关的判定依据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassResource {
    pub teacher_id: i64,
    pub caller_enrolled: bool,
}

impl ClassResource {
    pub fn new(teacher_id: i64, caller_enrolled: bool) -> Self {
        Self {
            teacher_id,
            caller_enrolled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    WrongRole,
    NotOwner,
    NotOwnerOrEnrolled,
    /// 归属类要求缺少课程信息
    MissingResource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny(Denial),
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }
}

/// 判定调用者是否满足访问要求
pub fn authorize(
    identity: &SessionContext,
    resource: Option<&ClassResource>,
    requirement: &Requirement,
) -> Access {
    let owns = |r: &ClassResource| identity.is_teacher() && r.teacher_id == identity.user_id;
    let enrolled = |r: &ClassResource| identity.is_student() && r.caller_enrolled;

    match requirement {
        Requirement::Role(role) => {
            if &identity.role == role {
                Access::Allow
            } else {
                Access::Deny(Denial::WrongRole)
            }
        }
        Requirement::Owns => match resource {
            Some(r) if owns(r) => Access::Allow,
            Some(_) => Access::Deny(Denial::NotOwner),
            None => Access::Deny(Denial::MissingResource),
        },
        Requirement::OwnsOrEnrolled => match resource {
            Some(r) if owns(r) || enrolled(r) => Access::Allow,
            Some(_) => Access::Deny(Denial::NotOwnerOrEnrolled),
            None => Access::Deny(Denial::MissingResource),
        },
    }
}

/// 构造课程的判定依据，只有学生才需要查询选课记录
pub async fn class_resource(
    storage: &Arc<dyn Storage>,
    identity: &SessionContext,
    class: &Class,
) -> Result<ClassResource> {
    let caller_enrolled = if identity.is_student() {
        storage
            .get_enrollment(identity.user_id, class.id)
            .await?
            .is_some()
    } else {
        false
    };

    Ok(ClassResource::new(class.teacher_id, caller_enrolled))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher(id: i64) -> SessionContext {
        SessionContext {
            user_id: id,
            username: format!("teacher{id}"),
            role: UserRole::Teacher,
        }
    }

    fn student(id: i64) -> SessionContext {
        SessionContext {
            user_id: id,
            username: format!("student{id}"),
            role: UserRole::Student,
        }
    }

    #[test]
    fn test_role_requirement() {
        let req = Requirement::Role(UserRole::Teacher);
        assert_eq!(authorize(&teacher(1), None, &req), Access::Allow);
        assert_eq!(
            authorize(&student(2), None, &req),
            Access::Deny(Denial::WrongRole)
        );
    }

    #[test]
    fn test_owner_requirement() {
        let class = ClassResource::new(1, false);
        assert!(authorize(&teacher(1), Some(&class), &Requirement::Owns).is_allowed());
        assert_eq!(
            authorize(&teacher(3), Some(&class), &Requirement::Owns),
            Access::Deny(Denial::NotOwner)
        );
        // 学生 id 与教师 id 相同也不算拥有
        assert!(!authorize(&student(1), Some(&class), &Requirement::Owns).is_allowed());
        assert_eq!(
            authorize(&teacher(1), None, &Requirement::Owns),
            Access::Deny(Denial::MissingResource)
        );
    }

    #[test]
    fn test_owns_or_enrolled_requirement() {
        let req = Requirement::OwnsOrEnrolled;
        let class = ClassResource::new(1, false);
        let enrolled = ClassResource::new(1, true);

        assert!(authorize(&teacher(1), Some(&class), &req).is_allowed());
        assert!(authorize(&student(7), Some(&enrolled), &req).is_allowed());
        assert_eq!(
            authorize(&teacher(2), Some(&class), &req),
            Access::Deny(Denial::NotOwnerOrEnrolled)
        );
        assert_eq!(
            authorize(&student(7), Some(&class), &req),
            Access::Deny(Denial::NotOwnerOrEnrolled)
        );
        // 教师不会因为 caller_enrolled 被放行
        assert!(!authorize(&teacher(2), Some(&enrolled), &req).is_allowed());
    }
}
