use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::SessionContext;
use crate::utils::redirect_with_flash;

use super::EnrollmentService;

const DASHBOARD: &str = "/student/dashboard";
const ALREADY_ENROLLED: &str = "You are already enrolled in this class!";

pub async fn handle_enroll(
    service: &EnrollmentService,
    session: &SessionContext,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 课程必须存在
    crate::services::load_class(&storage, class_id).await?;

    if storage
        .get_enrollment(session.user_id, class_id)
        .await?
        .is_some()
    {
        return Ok(redirect_with_flash(DASHBOARD, ALREADY_ENROLLED));
    }

    match storage.create_enrollment(session.user_id, class_id).await {
        Ok(enrollment) => {
            tracing::info!(
                "Student {} enrolled in class {} (enrollment {})",
                session.user_id,
                class_id,
                enrollment.id
            );
            Ok(redirect_with_flash(DASHBOARD, "Successfully enrolled in class!"))
        }
        // 并发重复选课由唯一索引拦截
        Err(e) if e.is_conflict() => Ok(redirect_with_flash(DASHBOARD, ALREADY_ENROLLED)),
        Err(e) => Err(e.into()),
    }
}
