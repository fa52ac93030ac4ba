use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use crate::errors::EduStreamError;
use crate::models::{SessionContext, auth::LoginRequest};
use crate::utils::password::verify_password;
use crate::utils::{SessionToken, redirect_with_flash};

use super::AuthService;

// 用户名不存在与密码错误使用同一提示
const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 按用户名精确查找，与注册时一样去掉首尾空白
    let Some(user) = storage
        .get_user_by_username(login_request.username.trim())
        .await?
    else {
        tracing::info!("Login failed: unknown username");
        return Ok(redirect_with_flash("/", INVALID_CREDENTIALS));
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        tracing::info!("Login failed for user {}: wrong password", user.id);
        return Ok(redirect_with_flash("/", INVALID_CREDENTIALS));
    }

    // 3. 签发会话
    let session = SessionContext::from(&user);
    let token = SessionToken::issue(&session).map_err(EduStreamError::from)?;

    tracing::info!("User {} logged in successfully", user.username);

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, session.dashboard_path()))
        .cookie(SessionToken::create_cookie(&token))
        .finish())
}
