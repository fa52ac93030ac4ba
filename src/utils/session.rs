use crate::config::AppConfig;
use crate::models::{SessionContext, users::entities::UserRole};
use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// 闪现消息 cookie 名称
pub const FLASH_COOKIE: &str = "flash";

// 闪现消息有效期（秒），只需要撑过一次重定向
const FLASH_EXPIRY_SECONDS: i64 = 60;

// 会话 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,      // 用户ID
    pub username: String, // 用户名
    pub role: String,     // 用户角色
    pub exp: usize,       // 过期时间
    pub iat: usize,       // 签发时间
}

// 闪现消息 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FlashClaims {
    msg: String,
    exp: usize,
}

pub struct SessionToken;

impl SessionToken {
    fn get_secret() -> String {
        AppConfig::get().session.secret.clone()
    }

    // 为会话上下文签发令牌
    pub fn issue(ctx: &SessionContext) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::issue_with_expiry(ctx, chrono::Duration::hours(config.session.expiry_hours))
    }

    pub fn issue_with_expiry(
        ctx: &SessionContext,
        expiry: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = SessionClaims {
            sub: ctx.user_id.to_string(),
            username: ctx.username.clone(),
            role: ctx.role.to_string(),
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let secret = Self::get_secret();
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
    }

    // 验证令牌并还原会话上下文
    pub fn verify(token: &str) -> Result<SessionContext, jsonwebtoken::errors::Error> {
        let secret = Self::get_secret();
        let claims = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )?
        .claims;

        let invalid = || jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidToken);
        let user_id = claims.sub.parse::<i64>().map_err(|_| invalid())?;
        let role = claims.role.parse::<UserRole>().map_err(|_| invalid())?;

        Ok(SessionContext {
            user_id,
            username: claims.username,
            role,
        })
    }

    /// 创建会话 Cookie
    pub fn create_cookie(token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::hours(
                config.session.expiry_hours,
            ))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的会话 Cookie（用于注销）
    pub fn create_empty_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从请求中解析会话，令牌缺失或无效都视为未登录
    pub fn from_request(req: &HttpRequest) -> Option<SessionContext> {
        let config = AppConfig::get();
        let cookie = req.cookie(&config.session.cookie_name)?;
        match Self::verify(cookie.value()) {
            Ok(ctx) => Some(ctx),
            Err(err) => {
                tracing::debug!("Ignoring invalid session cookie: {}", err);
                None
            }
        }
    }
}

pub struct Flash;

impl Flash {
    /// 创建携带消息的闪现 Cookie
    pub fn create_cookie(message: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        let claims = FlashClaims {
            msg: message.to_string(),
            exp: (chrono::Utc::now() + chrono::Duration::seconds(FLASH_EXPIRY_SECONDS)).timestamp()
                as usize,
        };

        // 签名失败时只丢失提示消息，不影响跳转
        let value = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.session.secret.as_ref()),
        )
        .unwrap_or_default();

        Cookie::build(FLASH_COOKIE, value)
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(
                FLASH_EXPIRY_SECONDS,
            ))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 读取后需要清除的空 Cookie
    pub fn create_empty_cookie() -> Cookie<'static> {
        Cookie::build(FLASH_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .finish()
    }

    /// 读取请求中的闪现消息
    pub fn from_request(req: &HttpRequest) -> Option<String> {
        let cookie = req.cookie(FLASH_COOKIE)?;
        if cookie.value().is_empty() {
            return None;
        }
        let secret = AppConfig::get().session.secret.clone();
        decode::<FlashClaims>(
            cookie.value(),
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims.msg)
        .ok()
    }
}
