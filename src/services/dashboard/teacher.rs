use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{SessionContext, classes::responses::TeacherDashboard};
use crate::views;

use super::DashboardService;

// 控制台展示的最近资料条数
const RECENT_MATERIALS_LIMIT: u64 = 5;

pub async fn handle_teacher_dashboard(
    service: &DashboardService,
    session: &SessionContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 按开课时间倒序
    let classes = storage
        .list_classes_by_teacher(session.user_id, true)
        .await?;
    let recent_materials = storage
        .list_recent_materials_by_teacher(session.user_id, RECENT_MATERIALS_LIMIT)
        .await?;

    let dashboard = TeacherDashboard::new(classes, recent_materials);
    let content = views::teacher_dashboard_page(session, &dashboard)?;

    Ok(views::page_response(
        request,
        "Teacher Dashboard",
        Some(session),
        &content,
    )?)
}
