use actix_web::{HttpResponse, Result as ActixResult, http::header};

use crate::utils::SessionToken;

pub async fn handle_logout() -> ActixResult<HttpResponse> {
    // 清除会话 Cookie
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(SessionToken::create_empty_cookie())
        .finish())
}
