use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::SessionContext;
use crate::views;

use super::ClassService;

pub async fn handle_schedule(
    service: &ClassService,
    session: &SessionContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 教师看自己的课程，学生看已选课程，均按开课时间升序
    let classes = if session.is_teacher() {
        storage
            .list_classes_by_teacher(session.user_id, false)
            .await?
    } else {
        let mut classes: Vec<_> = storage
            .list_enrollments_by_student(session.user_id)
            .await?
            .into_iter()
            .map(|(_, class)| class)
            .collect();
        classes.sort_by_key(|c| c.scheduled_time);
        classes
    };

    let content = views::schedule_page(session, &classes)?;
    Ok(views::page_response(request, "Schedule", Some(session), &content)?)
}
