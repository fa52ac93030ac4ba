//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::SqlErr;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_edustream_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum EduStreamError {
            $($variant(String),)*
        }

        impl EduStreamError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EduStreamError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EduStreamError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EduStreamError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EduStreamError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EduStreamError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_edustream_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Resource Conflict"),
    DateParse("E008", "Date Parse Error"),
    Authorization("E009", "Authorization Error"),
    SessionToken("E010", "Session Token Error"),
}

impl EduStreamError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为唯一约束冲突
    pub fn is_conflict(&self) -> bool {
        matches!(self, EduStreamError::Conflict(_))
    }

    /// 将数据库错误包装为带上下文的错误，唯一约束冲突单独归类
    pub fn from_db(context: &str, err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                EduStreamError::conflict(format!("{context}: {detail}"))
            }
            _ => EduStreamError::database_operation(format!("{context}: {err}")),
        }
    }
}

impl fmt::Display for EduStreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EduStreamError {}

impl ResponseError for EduStreamError {
    fn status_code(&self) -> StatusCode {
        match self {
            EduStreamError::NotFound(_) => StatusCode::NOT_FOUND,
            EduStreamError::Conflict(_) => StatusCode::CONFLICT,
            EduStreamError::Validation(_) | EduStreamError::DateParse(_) => StatusCode::BAD_REQUEST,
            EduStreamError::Authorization(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            // 内部错误详情只写日志，不返回给客户端
            tracing::error!("[{}] {}", self.code(), self.format_simple());
            return HttpResponse::build(status)
                .content_type("text/html; charset=utf-8")
                .body(crate::views::error_page(status, "Something went wrong on our side."));
        }

        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(crate::views::error_page(status, self.message()))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EduStreamError {
    fn from(err: sea_orm::DbErr) -> Self {
        EduStreamError::from_db("Database error", err)
    }
}

impl From<std::io::Error> for EduStreamError {
    fn from(err: std::io::Error) -> Self {
        EduStreamError::FileOperation(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for EduStreamError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        EduStreamError::SessionToken(err.to_string())
    }
}

impl From<chrono::ParseError> for EduStreamError {
    fn from(err: chrono::ParseError) -> Self {
        EduStreamError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EduStreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EduStreamError::database_config("test").code(), "E001");
        assert_eq!(EduStreamError::validation("test").code(), "E005");
        assert_eq!(EduStreamError::conflict("test").code(), "E007");
        assert_eq!(EduStreamError::authorization("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            EduStreamError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            EduStreamError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = EduStreamError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = EduStreamError::not_found("Class 42");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Class 42"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            EduStreamError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EduStreamError::conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            EduStreamError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_non_unique_db_error_is_operation_error() {
        let err = EduStreamError::from_db("insert", sea_orm::DbErr::Custom("boom".into()));
        assert!(!err.is_conflict());
        assert_eq!(err.code(), "E003");
    }
}
