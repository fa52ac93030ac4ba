use actix_web::{HttpResponse, http::header};

use crate::utils::session::Flash;

/// 302 重定向
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// 302 重定向，并附带一条闪现消息
pub fn redirect_with_flash(location: &str, message: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_string()))
        .cookie(Flash::create_cookie(message))
        .finish()
}
