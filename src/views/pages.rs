//! 各页面的内容片段

use chrono::{DateTime, Utc};

use super::{escape_html, render};
use crate::errors::Result;
use crate::models::{
    SessionContext,
    classes::{
        entities::{Class, ClassStatus},
        requests::SCHEDULED_TIME_FORMAT,
        responses::{StudentDashboard, TeacherDashboard},
    },
    materials::entities::Material,
};

const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

fn display_time(time: &DateTime<Utc>) -> String {
    time.format(DISPLAY_TIME_FORMAT).to_string()
}

fn status_badge(status: ClassStatus) -> String {
    format!(r#"<span class="badge badge-{status}">{status}</span>"#)
}

fn description(text: Option<&str>) -> String {
    text.filter(|d| !d.is_empty())
        .map(escape_html)
        .unwrap_or_default()
}

fn empty_row(colspan: usize, text: &str) -> String {
    format!(r#"<tr><td colspan="{colspan}" class="empty">{text}</td></tr>"#)
}

// 教师视角的课程行
fn teacher_class_row(class: &Class) -> String {
    let start = if class.status == ClassStatus::Scheduled {
        format!(
            r#"<a class="btn btn-primary" href="/start_class/{}">Start</a>"#,
            class.id
        )
    } else {
        format!(
            r#"<a class="btn" href="/live_class/{}">Join</a>"#,
            class.id
        )
    };

    format!(
        r#"<tr><td>{title}</td><td>{time}</td><td>{duration} min</td><td>{badge}</td><td class="actions">{start}<a class="btn" href="/materials/{id}">Materials</a></td></tr>"#,
        title = escape_html(&class.title),
        time = display_time(&class.scheduled_time),
        duration = class.duration_minutes,
        badge = status_badge(class.status),
        id = class.id,
    )
}

/// 首页：登录与注册表单
pub fn index_page() -> Result<String> {
    render("index.html", &[])
}

/// 教师控制台
pub fn teacher_dashboard_page(session: &SessionContext, dashboard: &TeacherDashboard) -> Result<String> {
    let class_rows = if dashboard.classes.is_empty() {
        empty_row(5, "No classes yet. Schedule your first class below.")
    } else {
        dashboard.classes.iter().map(teacher_class_row).collect()
    };

    let material_rows = if dashboard.recent_materials.is_empty() {
        empty_row(3, "No materials uploaded yet.")
    } else {
        dashboard
            .recent_materials
            .iter()
            .map(|m| {
                format!(
                    r#"<tr><td>{title}</td><td>{kind}</td><td><a href="/download/{file}">Download</a></td></tr>"#,
                    title = escape_html(&m.title),
                    kind = escape_html(m.file_type.as_deref().unwrap_or("")),
                    file = escape_html(&m.filename),
                )
            })
            .collect()
    };

    render(
        "teacher_dashboard.html",
        &[
            ("USERNAME", &escape_html(&session.username)),
            ("TOTAL_CLASSES", &dashboard.total_classes.to_string()),
            ("LIVE_CLASSES", &dashboard.live_classes.to_string()),
            ("COMPLETED_CLASSES", &dashboard.completed_classes.to_string()),
            ("CLASS_ROWS", &class_rows),
            ("MATERIAL_ROWS", &material_rows),
            ("MIN_TIME", &Utc::now().format(SCHEDULED_TIME_FORMAT).to_string()),
        ],
    )
}

/// 学生控制台
pub fn student_dashboard_page(session: &SessionContext, dashboard: &StudentDashboard) -> Result<String> {
    let enrolled_rows = if dashboard.enrollments.is_empty() {
        empty_row(4, "You are not enrolled in any class yet.")
    } else {
        dashboard
            .enrollments
            .iter()
            .map(|(enrollment, class)| {
                let join = if class.is_live {
                    format!(
                        r#"<a class="btn btn-primary" href="/live_class/{}">Join live</a>"#,
                        class.id
                    )
                } else {
                    String::new()
                };
                format!(
                    r#"<tr><td>{title}</td><td>{time}</td><td>{badge} <small>{attendance}</small></td><td class="actions">{join}<a class="btn" href="/materials/{id}">Materials</a></td></tr>"#,
                    title = escape_html(&class.title),
                    time = display_time(&class.scheduled_time),
                    badge = status_badge(class.status),
                    attendance = enrollment.attendance_status,
                    id = class.id,
                )
            })
            .collect()
    };

    let available_rows = if dashboard.available_classes.is_empty() {
        empty_row(4, "No other classes available.")
    } else {
        dashboard
            .available_classes
            .iter()
            .map(|class| {
                format!(
                    r#"<tr><td>{title}</td><td>{desc}</td><td>{time}</td><td><a class="btn btn-primary" href="/enroll/{id}">Enroll</a></td></tr>"#,
                    title = escape_html(&class.title),
                    desc = description(class.description.as_deref()),
                    time = display_time(&class.scheduled_time),
                    id = class.id,
                )
            })
            .collect()
    };

    render(
        "student_dashboard.html",
        &[
            ("USERNAME", &escape_html(&session.username)),
            ("ENROLLED_COUNT", &dashboard.enrollments.len().to_string()),
            ("ENROLLED_ROWS", &enrolled_rows),
            ("AVAILABLE_ROWS", &available_rows),
        ],
    )
}

/// 直播课堂页面
pub fn live_class_page(session: &SessionContext, class: &Class) -> Result<String> {
    let notice = if class.is_live {
        "The class is live."
    } else {
        "The class has not started yet."
    };

    render(
        "live_class.html",
        &[
            ("CLASS_ID", &class.id.to_string()),
            ("TITLE", &escape_html(&class.title)),
            ("DESCRIPTION", &description(class.description.as_deref())),
            ("SCHEDULED_TIME", &display_time(&class.scheduled_time)),
            ("DURATION", &class.duration_minutes.to_string()),
            ("STATUS", &status_badge(class.status)),
            ("NOTICE", notice),
            ("ROLE", &session.role.to_string()),
        ],
    )
}

/// 课程资料页面，授课教师可见上传表单
pub fn materials_page(class: &Class, materials: &[Material], can_upload: bool) -> Result<String> {
    let rows = if materials.is_empty() {
        empty_row(4, "No materials uploaded for this class.")
    } else {
        materials
            .iter()
            .map(|m| {
                format!(
                    r#"<tr><td>{title}</td><td>{desc}</td><td>{time}</td><td><a class="btn" href="/download/{file}">Download</a></td></tr>"#,
                    title = escape_html(&m.title),
                    desc = description(m.description.as_deref()),
                    time = display_time(&m.uploaded_at),
                    file = escape_html(&m.filename),
                )
            })
            .collect()
    };

    let upload_form = if can_upload {
        render("upload_form.html", &[("CLASS_ID", &class.id.to_string())])?
    } else {
        String::new()
    };

    render(
        "materials.html",
        &[
            ("TITLE", &escape_html(&class.title)),
            ("ROWS", &rows),
            ("UPLOAD_FORM", &upload_form),
        ],
    )
}

/// 课程表
pub fn schedule_page(session: &SessionContext, classes: &[Class]) -> Result<String> {
    let rows = if classes.is_empty() {
        empty_row(4, "Nothing scheduled.")
    } else {
        classes
            .iter()
            .map(|class| {
                format!(
                    r#"<tr><td>{time}</td><td>{title}</td><td>{duration} min</td><td>{badge}</td></tr>"#,
                    time = display_time(&class.scheduled_time),
                    title = escape_html(&class.title),
                    duration = class.duration_minutes,
                    badge = status_badge(class.status),
                )
            })
            .collect()
    };

    render(
        "schedule.html",
        &[
            ("ROLE", &session.role.to_string()),
            ("ROWS", &rows),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use chrono::TimeZone;

    fn class(title: &str) -> Class {
        let t = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        Class {
            id: 7,
            title: title.to_string(),
            description: Some("Intro & basics".to_string()),
            teacher_id: 1,
            scheduled_time: t,
            duration_minutes: 45,
            is_live: false,
            status: ClassStatus::Scheduled,
            created_at: t,
        }
    }

    fn teacher() -> SessionContext {
        SessionContext {
            user_id: 1,
            username: "mr_smith".to_string(),
            role: UserRole::Teacher,
        }
    }

    #[test]
    fn test_teacher_dashboard_lists_classes() {
        let dashboard = TeacherDashboard::new(vec![class("Algebra <1>")], vec![]);
        let html = teacher_dashboard_page(&teacher(), &dashboard).unwrap();
        assert!(html.contains("Algebra &lt;1&gt;"));
        assert!(html.contains("/start_class/7"));
        assert!(html.contains("2025-03-01 09:00 UTC"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_materials_upload_form_only_for_owner() {
        let c = class("Algebra");
        let with_form = materials_page(&c, &[], true).unwrap();
        assert!(with_form.contains("/upload_material/7"));
        let without_form = materials_page(&c, &[], false).unwrap();
        assert!(!without_form.contains("/upload_material/7"));
    }

    #[test]
    fn test_schedule_page() {
        let html = schedule_page(&teacher(), &[class("Geometry")]).unwrap();
        assert!(html.contains("Geometry"));
        assert!(html.contains("45 min"));
    }
}
