use actix_web::{Error, HttpRequest, error::InternalError, error::UrlencodedError};

use crate::utils::redirect::redirect_with_flash;

/// 表单解析失败时重定向回首页并提示
pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> Error {
    tracing::debug!("Rejected form body for {}: {}", req.path(), err);
    InternalError::from_response(err, redirect_with_flash("/", "Invalid form submission")).into()
}
