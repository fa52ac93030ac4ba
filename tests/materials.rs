#[macro_use]
mod common;

use actix_web::http::{StatusCode, header};
use actix_web::test;

use common::TestContext;
use edustream::storage::Storage;

const PDF_BYTES: &[u8] = b"%PDF-1.4 lecture notes";

/// 教师 A 创建课程，学生 S 选课，返回课程 ID
macro_rules! class_with_members {
    ($ctx:expr, $app:expr, $teacher:expr, $student:expr) => {{
        test::call_service(
            &$app,
            common::create_class_request(&$teacher, "Physics", "2030-02-01T10:00").to_request(),
        )
        .await;
        let class_id = $ctx.classes_of("teacher_a").await[0].id;
        test::call_service(
            &$app,
            common::get(&format!("/enroll/{class_id}"), &$student).to_request(),
        )
        .await;
        class_id
    }};
}

#[actix_web::test]
async fn test_upload_pdf_by_owner() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let teacher = sign_up!(app, "teacher_a", "teacher");
    let student = sign_up!(app, "student_s", "student");
    let class_id = class_with_members!(ctx, app, teacher, student);

    let resp = test::call_service(
        &app,
        common::upload_request(&teacher, class_id, "Lecture 1", Some(("notes.pdf", PDF_BYTES)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        common::location(&resp),
        Some(format!("/materials/{class_id}"))
    );
    assert_eq!(
        common::flash_message(&resp).as_deref(),
        Some("Material uploaded successfully!")
    );

    let materials = ctx.storage.list_materials_by_class(class_id).await.unwrap();
    assert_eq!(materials.len(), 1);
    let material = &materials[0];
    assert_eq!(material.title, "Lecture 1");
    assert_eq!(material.description.as_deref(), Some("Week 1"));
    assert_eq!(material.file_type.as_deref(), Some("pdf"));
    assert_ne!(material.filename, "notes.pdf");
    assert!(material.filename.ends_with("_notes.pdf"));
    // YYYYmmdd_HHMMSS_ 前缀
    let prefix = &material.filename[..16];
    assert!(prefix[..8].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(&prefix[8..9], "_");
    assert!(prefix[9..15].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(&prefix[15..16], "_");

    assert!(ctx.uploads.exists(&material.filename));
    assert_eq!(ctx.uploads.read(&material.filename).unwrap(), PDF_BYTES);

    // 资料列表对授课教师与已选课学生可见
    for session in [&teacher, &student] {
        let resp = test::call_service(
            &app,
            common::get(&format!("/materials/{class_id}"), session).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("Lecture 1"));
        assert!(html.contains(&format!("/download/{}", material.filename)));
    }
}

#[actix_web::test]
async fn test_upload_form_only_shown_to_owner() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let teacher = sign_up!(app, "teacher_a", "teacher");
    let student = sign_up!(app, "student_s", "student");
    let class_id = class_with_members!(ctx, app, teacher, student);
    let form_action = format!("/upload_material/{class_id}");

    let resp = test::call_service(
        &app,
        common::get(&format!("/materials/{class_id}"), &teacher).to_request(),
    )
    .await;
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains(&form_action));

    let resp = test::call_service(
        &app,
        common::get(&format!("/materials/{class_id}"), &student).to_request(),
    )
    .await;
    let body = test::read_body(resp).await;
    assert!(!String::from_utf8_lossy(&body).contains(&form_action));
}

#[actix_web::test]
async fn test_empty_title_uses_original_filename() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let teacher = sign_up!(app, "teacher_a", "teacher");
    let student = sign_up!(app, "student_s", "student");
    let class_id = class_with_members!(ctx, app, teacher, student);

    test::call_service(
        &app,
        common::upload_request(&teacher, class_id, "", Some(("slides.PPTX", &b"pptx"[..]))).to_request(),
    )
    .await;

    let materials = ctx.storage.list_materials_by_class(class_id).await.unwrap();
    assert_eq!(materials.len(), 1);
    assert_eq!(materials[0].title, "slides.PPTX");
    assert_eq!(materials[0].file_type.as_deref(), Some("pptx"));
}

#[actix_web::test]
async fn test_disallowed_extension_leaves_nothing_behind() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let teacher = sign_up!(app, "teacher_a", "teacher");
    let student = sign_up!(app, "student_s", "student");
    let class_id = class_with_members!(ctx, app, teacher, student);

    for filename in ["virus.exe", "README", "notes.pdf.sh"] {
        let resp = test::call_service(
            &app,
            common::upload_request(&teacher, class_id, "Bad", Some((filename, &b"payload"[..])))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FOUND, "{filename}");
        assert_eq!(
            common::flash_message(&resp).as_deref(),
            Some("Invalid file type"),
            "{filename}"
        );
    }

    assert!(ctx.storage.list_materials_by_class(class_id).await.unwrap().is_empty());
    assert_eq!(ctx.stored_file_count(), 0);
}

#[actix_web::test]
async fn test_missing_file_is_rejected() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let teacher = sign_up!(app, "teacher_a", "teacher");
    let student = sign_up!(app, "student_s", "student");
    let class_id = class_with_members!(ctx, app, teacher, student);

    for file in [None, Some(("", &b""[..]))] {
        let resp = test::call_service(
            &app,
            common::upload_request(&teacher, class_id, "Nothing", file).to_request(),
        )
        .await;
        assert_eq!(
            common::flash_message(&resp).as_deref(),
            Some("No file selected")
        );
    }
    assert!(ctx.storage.list_materials_by_class(class_id).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_oversized_upload_is_removed() {
    let ctx = TestContext::new().await.with_max_upload_size(8);
    let app = init_app!(ctx);
    let teacher = sign_up!(app, "teacher_a", "teacher");
    let student = sign_up!(app, "student_s", "student");
    let class_id = class_with_members!(ctx, app, teacher, student);

    let resp = test::call_service(
        &app,
        common::upload_request(&teacher, class_id, "Big", Some(("big.txt", &b"0123456789abcdef"[..])))
            .to_request(),
    )
    .await;
    assert_eq!(common::flash_message(&resp).as_deref(), Some("File too large"));
    assert!(ctx.storage.list_materials_by_class(class_id).await.unwrap().is_empty());
    assert_eq!(ctx.stored_file_count(), 0);
}

#[actix_web::test]
async fn test_only_owner_can_upload() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let teacher = sign_up!(app, "teacher_a", "teacher");
    let other_teacher = sign_up!(app, "teacher_b", "teacher");
    let student = sign_up!(app, "student_s", "student");
    let class_id = class_with_members!(ctx, app, teacher, student);

    let resp = test::call_service(
        &app,
        common::upload_request(&other_teacher, class_id, "Intruder", Some(("notes.pdf", PDF_BYTES)))
            .to_request(),
    )
    .await;
    assert_eq!(common::location(&resp).as_deref(), Some("/teacher/dashboard"));
    assert_eq!(
        common::flash_message(&resp).as_deref(),
        Some("You are not authorized to upload materials for this class!")
    );

    // 学生在角色检查处被拦下
    let resp = test::call_service(
        &app,
        common::upload_request(&student, class_id, "Homework", Some(("notes.pdf", PDF_BYTES)))
            .to_request(),
    )
    .await;
    assert_eq!(common::location(&resp).as_deref(), Some("/"));

    assert!(ctx.storage.list_materials_by_class(class_id).await.unwrap().is_empty());
    assert_eq!(ctx.stored_file_count(), 0);
}

#[actix_web::test]
async fn test_materials_and_downloads_require_membership() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let teacher = sign_up!(app, "teacher_a", "teacher");
    let other_teacher = sign_up!(app, "teacher_b", "teacher");
    let student = sign_up!(app, "student_s", "student");
    let outsider = sign_up!(app, "student_o", "student");
    let class_id = class_with_members!(ctx, app, teacher, student);

    test::call_service(
        &app,
        common::upload_request(&teacher, class_id, "Lecture 1", Some(("notes.pdf", PDF_BYTES)))
            .to_request(),
    )
    .await;
    let filename = ctx.storage.list_materials_by_class(class_id).await.unwrap()[0]
        .filename
        .clone();
    let download_uri = format!("/download/{filename}");

    for session in [&teacher, &student] {
        let resp = test::call_service(&app, common::get(&download_uri, session).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert!(
            resp.headers()
                .get(header::CONTENT_DISPOSITION)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("attachment")
        );
        let body = test::read_body(resp).await;
        assert_eq!(&body[..], PDF_BYTES);
    }

    for session in [&other_teacher, &outsider] {
        let resp = test::call_service(
            &app,
            common::get(&format!("/materials/{class_id}"), session).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(common::location(&resp).as_deref(), Some("/"));
        assert_eq!(
            common::flash_message(&resp).as_deref(),
            Some("You are not authorized to access these materials!")
        );

        let resp = test::call_service(&app, common::get(&download_uri, session).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(common::location(&resp).as_deref(), Some("/"));
    }
}

#[actix_web::test]
async fn test_unknown_or_unsafe_download_is_not_found() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let student = sign_up!(app, "student_s", "student");

    for uri in [
        "/download/20250301_090000_missing.pdf",
        "/download/..%2Fconfig.toml",
        "/download/..",
    ] {
        let resp = test::call_service(&app, common::get(uri, &student).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}
