use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use crate::errors::EduStreamError;
use crate::models::SessionContext;
use crate::policy::{Requirement, authorize, class_resource};
use crate::utils::filename::content_type_for;
use crate::utils::redirect_with_flash;

use super::MaterialService;

pub async fn handle_download(
    service: &MaterialService,
    session: &SessionContext,
    filename: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 文件名必须对应一条资料记录
    let material = storage
        .get_material_by_filename(&filename)
        .await?
        .ok_or_else(|| EduStreamError::not_found("File not found"))?;

    // 与资料列表相同的访问规则
    let class = crate::services::load_class(&storage, material.class_id).await?;
    let resource = class_resource(&storage, session, &class).await?;
    if !authorize(session, Some(&resource), &Requirement::OwnsOrEnrolled).is_allowed() {
        crate::services::log_denied(session, "download", class.id);
        return Ok(redirect_with_flash(
            "/",
            "You are not authorized to access these materials!",
        ));
    }

    let uploads = service.get_uploads(request);
    let data = uploads.read(&material.filename)?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type_for(&material.filename)))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", material.filename),
        ))
        .insert_header((header::CACHE_CONTROL, "private, no-store"))
        .body(data))
}
