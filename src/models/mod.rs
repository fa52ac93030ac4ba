//! 业务数据模型
//!
//! 与 `entity` 模块中的数据库实体分离，存储层负责两者之间的转换。

pub mod auth;
pub mod classes;
pub mod enrollments;
pub mod materials;
pub mod users;

pub use auth::session::SessionContext;
