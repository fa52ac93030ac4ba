use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{SessionContext, classes::responses::StudentDashboard};
use crate::views;

use super::DashboardService;

pub async fn handle_student_dashboard(
    service: &DashboardService,
    session: &SessionContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let dashboard = StudentDashboard {
        enrollments: storage.list_enrollments_by_student(session.user_id).await?,
        available_classes: storage.list_classes_not_enrolled(session.user_id).await?,
    };
    let content = views::student_dashboard_page(session, &dashboard)?;

    Ok(views::page_response(
        request,
        "Student Dashboard",
        Some(session),
        &content,
    )?)
}
