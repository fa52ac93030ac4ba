use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::users::entities::UserRole;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

const USERNAME_MAX_LEN: usize = 80;
const EMAIL_MAX_LEN: usize = 120;

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：1 <= x <= 80
    if username.is_empty() || username.len() > USERNAME_MAX_LEN {
        return Err("Username length must be between 1 and 80 characters");
    }
    // 用户名格式校验：字母、数字、下划线、点或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores, dots or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.len() > EMAIL_MAX_LEN || !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Password must not be empty");
    }
    Ok(())
}

/// 解析注册表单中的角色，缺省为 student
pub fn parse_role(role: Option<&str>) -> Result<UserRole, &'static str> {
    match role.map(str::trim) {
        None | Some("") => Ok(UserRole::Student),
        Some(value) => value
            .parse::<UserRole>()
            .map_err(|_| "Role must be teacher or student"),
    }
}
