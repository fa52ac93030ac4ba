use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::EduStreamError;
use crate::models::SessionContext;
use crate::policy::{Requirement, authorize, class_resource};
use crate::utils::{redirect, redirect_with_flash};

use super::ClassService;

pub async fn handle_start_class(
    service: &ClassService,
    session: &SessionContext,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let class = crate::services::load_class(&storage, class_id).await?;

    let resource = class_resource(&storage, session, &class).await?;
    if !authorize(session, Some(&resource), &Requirement::Owns).is_allowed() {
        crate::services::log_denied(session, "start", class_id);
        return Ok(redirect_with_flash(
            "/teacher/dashboard",
            "You are not authorized to start this class!",
        ));
    }

    // 更新状态：status=live, is_live=true
    storage
        .start_class(class_id)
        .await?
        .ok_or_else(|| EduStreamError::not_found(format!("Class {class_id} not found")))?;

    tracing::info!("Class {} is now live", class_id);

    Ok(redirect(&format!("/live_class/{class_id}")))
}
