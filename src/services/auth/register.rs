use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::RegisterRequest;
use crate::models::users::requests::CreateUserRequest;
use crate::utils::password::hash_password;
use crate::utils::redirect_with_flash;
use crate::utils::validate::{parse_role, validate_email, validate_password, validate_username};

use super::AuthService;

const USERNAME_TAKEN: &str = "Username already exists";
const EMAIL_TAKEN: &str = "Email already exists";

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let RegisterRequest {
        username,
        email,
        password,
        role,
    } = register_request;
    let username = username.trim().to_string();
    let email = email.trim().to_string();

    // 输入校验
    let role = match validate_username(&username)
        .and_then(|_| validate_email(&email))
        .and_then(|_| validate_password(&password))
        .and_then(|_| parse_role(role.as_deref()))
    {
        Ok(role) => role,
        Err(msg) => return Ok(redirect_with_flash("/", msg)),
    };

    let storage = service.get_storage(request);

    // 检查用户名和邮箱是否已存在
    if storage.get_user_by_username(&username).await?.is_some() {
        return Ok(redirect_with_flash("/", USERNAME_TAKEN));
    }
    if storage.get_user_by_email(&email).await?.is_some() {
        return Ok(redirect_with_flash("/", EMAIL_TAKEN));
    }

    let password_hash = hash_password(&password)?;

    let create_request = CreateUserRequest {
        username,
        email,
        password_hash,
        role,
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            tracing::info!("Registered {} {} (ID: {})", user.role, user.username, user.id);
            Ok(redirect_with_flash("/", "Registration successful! Please login."))
        }
        // 并发注册时由唯一索引兜底
        Err(e) if e.is_conflict() => {
            let msg = if is_email_conflict(e.message()) {
                EMAIL_TAKEN
            } else {
                USERNAME_TAKEN
            };
            Ok(redirect_with_flash("/", msg))
        }
        Err(e) => Err(e.into()),
    }
}

/// 唯一约束冲突是否发生在 email 列上
///
/// 只看约束名部分，冲突的值（MySQL 会带上）不参与判断。各后端的写法：
/// SQLite `UNIQUE constraint failed: users.email`，
/// PostgreSQL `unique constraint "users_email_key"`，
/// MySQL `Duplicate entry '...' for key 'users.email'`。
fn is_email_conflict(message: &str) -> bool {
    let target = ["for key", "constraint"]
        .iter()
        .find_map(|marker| message.rfind(marker).map(|i| &message[i + marker.len()..]))
        .unwrap_or(message);
    let ident = target
        .trim()
        .trim_start_matches("failed:")
        .trim()
        .trim_matches(|c| matches!(c, '\'' | '"' | '`'));

    ident == "email" || ident.ends_with(".email") || ident.starts_with("users_email")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_conflict_by_constraint_name() {
        for message in [
            "Failed to create user: UNIQUE constraint failed: users.email",
            "Failed to create user: duplicate key value violates unique constraint \"users_email_key\"",
            "Failed to create user: Duplicate entry 'a@example.com' for key 'users.email'",
            "Failed to create user: Duplicate entry 'a@example.com' for key 'email'",
        ] {
            assert!(is_email_conflict(message), "{message}");
        }
    }

    #[test]
    fn test_username_conflict_mentioning_email() {
        for message in [
            "Failed to create user: UNIQUE constraint failed: users.username",
            "Failed to create user: duplicate key value violates unique constraint \"users_username_key\"",
            // 用户名本身包含 email 字样
            "Failed to create user: Duplicate entry 'emailfan' for key 'users.username'",
            "Failed to create user: Duplicate entry 'users.email' for key 'users.username'",
        ] {
            assert!(!is_email_conflict(message), "{message}");
        }
    }
}
