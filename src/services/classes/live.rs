use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::SessionContext;
use crate::policy::{Requirement, authorize, class_resource};
use crate::utils::redirect_with_flash;
use crate::views;

use super::ClassService;

pub async fn handle_live_class(
    service: &ClassService,
    session: &SessionContext,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let class = crate::services::load_class(&storage, class_id).await?;

    // 授课教师或已选课学生
    let resource = class_resource(&storage, session, &class).await?;
    if !authorize(session, Some(&resource), &Requirement::OwnsOrEnrolled).is_allowed() {
        crate::services::log_denied(session, "live view", class_id);
        return Ok(redirect_with_flash(
            "/",
            "You are not authorized to access this class!",
        ));
    }

    let content = views::live_class_page(session, &class)?;
    Ok(views::page_response(request, &class.title, Some(session), &content)?)
}
