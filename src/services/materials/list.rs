use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::SessionContext;
use crate::policy::{Requirement, authorize, class_resource};
use crate::utils::redirect_with_flash;
use crate::views;

use super::MaterialService;

pub async fn handle_list_materials(
    service: &MaterialService,
    session: &SessionContext,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let class = crate::services::load_class(&storage, class_id).await?;

    let resource = class_resource(&storage, session, &class).await?;
    if !authorize(session, Some(&resource), &Requirement::OwnsOrEnrolled).is_allowed() {
        crate::services::log_denied(session, "materials", class_id);
        return Ok(redirect_with_flash(
            "/",
            "You are not authorized to access these materials!",
        ));
    }

    let materials = storage.list_materials_by_class(class_id).await?;
    // 只有授课教师可以上传
    let can_upload = authorize(session, Some(&resource), &Requirement::Owns).is_allowed();

    let content = views::materials_page(&class, &materials, can_upload)?;
    Ok(views::page_response(
        request,
        &format!("Materials - {}", class.title),
        Some(session),
        &content,
    )?)
}
