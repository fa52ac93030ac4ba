//! EduStream - 在线课堂管理平台
//!
//! 基于 Actix Web 构建的服务端渲染应用：教师排课、开课、上传资料，学生选课、进入直播课堂、下载资料。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 会话与角色中间件
//! - `models`: 数据模型定义
//! - `policy`: 访问控制策略
//! - `routes`: 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）与上传文件存储
//! - `utils`: 工具函数
//! - `views`: 页面渲染

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod policy;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
pub mod views;
