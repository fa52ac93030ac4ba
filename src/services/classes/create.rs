use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDateTime;

use crate::models::{
    SessionContext,
    classes::requests::{CreateClassForm, CreateClassRequest, SCHEDULED_TIME_FORMAT},
};
use crate::utils::redirect_with_flash;

use super::ClassService;

const DASHBOARD: &str = "/teacher/dashboard";

/// 解析表单，只校验开课时间与时长格式
pub(crate) fn parse_create_form(
    form: CreateClassForm,
    teacher_id: i64,
) -> Result<CreateClassRequest, &'static str> {
    let scheduled_time = NaiveDateTime::parse_from_str(form.scheduled_time.trim(), SCHEDULED_TIME_FORMAT)
        .map_err(|_| "Invalid scheduled time")?
        .and_utc();
    let duration_minutes = form
        .duration
        .trim()
        .parse::<i32>()
        .map_err(|_| "Invalid duration")?;

    let description = form.description.trim();

    Ok(CreateClassRequest {
        title: form.title.trim().to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
        teacher_id,
        scheduled_time,
        duration_minutes,
    })
}

pub async fn handle_create_class(
    service: &ClassService,
    session: &SessionContext,
    form: CreateClassForm,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let create_request = match parse_create_form(form, session.user_id) {
        Ok(req) => req,
        Err(msg) => return Ok(redirect_with_flash(DASHBOARD, msg)),
    };

    let storage = service.get_storage(request);
    let class = storage.create_class(create_request).await?;

    tracing::info!(
        "Teacher {} created class {} scheduled at {}",
        session.user_id,
        class.id,
        class.scheduled_time
    );

    Ok(redirect_with_flash(DASHBOARD, "Class created successfully!"))
}
