//! 上传文件名处理

use chrono::{DateTime, Utc};

// 存储文件名的时间戳前缀格式
const STORED_PREFIX_FORMAT: &str = "%Y%m%d_%H%M%S_";

// 清理后为空时使用的文件名
const FALLBACK_NAME: &str = "upload";

/// 取最后一个 '.' 之后的扩展名（小写），不在允许列表中返回 None
pub fn allowed_extension(filename: &str, allowed: &[String]) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    if ext.is_empty() {
        return None;
    }
    allowed
        .iter()
        .any(|a| a.eq_ignore_ascii_case(&ext))
        .then_some(ext)
}

/// 清理客户端提供的文件名
///
/// 只保留 ASCII 字母数字和 `.` `_` `-`，空白替换为 `_`，去掉路径部分和开头的点。
/// 结果总能通过 [`is_safe_stored_name`]。
pub fn sanitize_filename(filename: &str) -> String {
    // 去掉客户端可能带上的目录
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let cleaned: String = base
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                Some(c)
            } else if c.is_whitespace() {
                Some('_')
            } else {
                None
            }
        })
        .collect();

    // 连续的点合并为一个，保证存储名不含 ".."
    let mut collapsed = String::with_capacity(cleaned.len());
    for c in cleaned.chars() {
        if c == '.' && collapsed.ends_with('.') {
            continue;
        }
        collapsed.push(c);
    }

    let cleaned = collapsed.trim_start_matches('.');
    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// 生成带时间戳前缀的存储文件名
pub fn stored_filename(original: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}{}",
        now.format(STORED_PREFIX_FORMAT),
        sanitize_filename(original)
    )
}

/// 同一秒内重名时在时间戳后插入序号，例如 `20250301_090507_2_notes.pdf`
pub fn stored_filename_with_counter(original: &str, now: DateTime<Utc>, counter: u32) -> String {
    format!(
        "{}{}_{}",
        now.format(STORED_PREFIX_FORMAT),
        counter,
        sanitize_filename(original)
    )
}

/// 下载请求中的文件名只能是单个路径段
pub fn is_safe_stored_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
        && !name.contains('\0')
}

/// 根据扩展名获取 MIME 类型
pub fn content_type_for(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "mp4" => "video/mp4",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}
