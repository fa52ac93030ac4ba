//! 服务端页面渲染
//!
//! 使用 rust-embed 嵌入 `templates/` 与 `static/`：
//! - 页面模板通过 `{{KEY}}` 占位符替换生成
//! - 所有用户提供的文本都经过 HTML 转义
//! - 页面统一套用 `layout.html`，闪现消息在渲染时取出并清除

mod pages;

pub use pages::*;

use actix_web::{HttpRequest, HttpResponse, http::StatusCode};
use rust_embed::Embed;

use crate::config::AppConfig;
use crate::errors::{EduStreamError, Result};
use crate::models::SessionContext;
use crate::utils::Flash;

/// 嵌入页面模板
#[derive(Embed)]
#[folder = "templates/"]
struct Templates;

/// 嵌入静态资源（CSS/JS）
#[derive(Embed)]
#[folder = "static/"]
pub struct StaticAssets;

/// HTML 转义
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            // 防止用户文本被当作占位符替换
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

/// 读取嵌入模板
fn template(name: &str) -> Result<String> {
    Templates::get(name)
        .map(|f| String::from_utf8_lossy(&f.data).into_owned())
        .ok_or_else(|| EduStreamError::file_operation(format!("Template {name} not embedded")))
}

/// 替换 `{{KEY}}` 占位符，值需由调用方事先转义
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{{{key}}}}}"), value)
    })
}

/// 渲染指定模板
pub(crate) fn render(name: &str, values: &[(&str, &str)]) -> Result<String> {
    Ok(fill(&template(name)?, values))
}

/// 套用公共布局
pub fn render_layout(
    title: &str,
    session: Option<&SessionContext>,
    flash: Option<&str>,
    content: &str,
) -> Result<String> {
    let system_name = escape_html(&AppConfig::get().app.system_name);
    let nav = match session {
        Some(s) => format!(
            r#"<a href="{}">Dashboard</a><a href="/schedule">Schedule</a><span class="nav-user">{} ({})</span><a href="/logout">Logout</a>"#,
            s.dashboard_path(),
            escape_html(&s.username),
            s.role
        ),
        None => String::new(),
    };
    let flash_html = flash
        .map(|msg| {
            format!(
                r#"<div class="flash" role="alert">{}<button class="flash-close" aria-label="Dismiss">&times;</button></div>"#,
                escape_html(msg)
            )
        })
        .unwrap_or_default();

    render(
        "layout.html",
        &[
            ("TITLE", &escape_html(title)),
            ("SYSTEM_NAME", &system_name),
            ("NAV", &nav),
            ("FLASH", &flash_html),
            ("CONTENT", content),
        ],
    )
}

/// 渲染完整页面并清除已展示的闪现消息
pub fn page_response(
    req: &HttpRequest,
    title: &str,
    session: Option<&SessionContext>,
    content: &str,
) -> Result<HttpResponse> {
    let flash = Flash::from_request(req);
    let html = render_layout(title, session, flash.as_deref(), content)?;

    let mut response = HttpResponse::Ok();
    response.content_type("text/html; charset=utf-8");
    if req.cookie(crate::utils::session::FLASH_COOKIE).is_some() {
        response.cookie(Flash::create_empty_cookie());
    }
    Ok(response.body(html))
}

/// 错误页面，模板缺失时退回纯文本
pub fn error_page(status: StatusCode, message: &str) -> String {
    let content = render(
        "error.html",
        &[
            ("STATUS", status.as_str()),
            (
                "REASON",
                &escape_html(status.canonical_reason().unwrap_or("Error")),
            ),
            ("MESSAGE", &escape_html(message)),
        ],
    )
    .unwrap_or_else(|_| escape_html(message));

    render_layout(status.as_str(), None, None, &content).unwrap_or(content)
}
