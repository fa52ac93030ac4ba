//! 路径参数提取器
//!
//! 非数字的 ID 直接按 404 处理，而不是 actix 默认的 400。

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::errors::EduStreamError;

/// 从路径参数 `{class_id}` 中解析课程 ID
#[derive(Debug, Clone, Copy)]
pub struct SafeClassIdI64(pub i64);

impl FromRequest for SafeClassIdI64 {
    type Error = EduStreamError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_i64_segment(req, "class_id").map(SafeClassIdI64))
    }
}

/// 从路径参数 `{filename}` 中取出存储文件名，拒绝包含路径分隔符或 `..` 的值
#[derive(Debug, Clone)]
pub struct SafeStoredFilename(pub String);

impl FromRequest for SafeStoredFilename {
    type Error = EduStreamError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let name = req.match_info().get("filename").unwrap_or_default();
        let result = if crate::utils::filename::is_safe_stored_name(name) {
            Ok(SafeStoredFilename(name.to_string()))
        } else {
            Err(EduStreamError::not_found("File not found"))
        };
        ready(result)
    }
}

fn parse_i64_segment(req: &HttpRequest, name: &str) -> Result<i64, EduStreamError> {
    req.match_info()
        .get(name)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| EduStreamError::not_found("Page not found"))
}
