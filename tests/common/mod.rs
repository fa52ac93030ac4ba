//! 集成测试公共工具
//!
//! 每个测试使用独立的内存 SQLite 数据库和临时上传目录。

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test::TestRequest;
use actix_web::web;
use tempfile::TempDir;

use edustream::config::{AppConfig, DatabaseConfig};
use edustream::errors::Result;
use edustream::models::{
    classes::{entities::Class, requests::CreateClassRequest},
    enrollments::entities::Enrollment,
    materials::{entities::Material, requests::CreateMaterialRequest},
    users::{entities::User, requests::CreateUserRequest},
};
use edustream::routes::app_configurator;
use edustream::storage::sea_orm_storage::SeaOrmStorage;
use edustream::storage::{Storage, UploadStore};
use edustream::utils::Flash;

pub const PASSWORD: &str = "correct horse battery staple";

const BOUNDARY: &str = "----edustream-test-boundary";

pub struct TestContext {
    /// 直接访问数据库，不受 `hide_existing_rows` 影响
    pub storage: Arc<dyn Storage>,
    pub uploads: UploadStore,
    hide_rows: Arc<AtomicBool>,
    // 生命周期内保留临时目录
    _dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let config = DatabaseConfig {
            url: ":memory:".to_string(),
            pool_size: 1,
            timeout: 10,
        };
        let storage = SeaOrmStorage::connect(&config)
            .await
            .expect("in-memory database should start");
        let dir = tempfile::tempdir().expect("temp dir");
        let uploads = UploadStore::new(dir.path().join("uploads"));

        Self {
            storage: Arc::new(storage),
            uploads,
            hide_rows: Arc::new(AtomicBool::new(false)),
            _dir: dir,
        }
    }

    /// 应用内的存在性查询一律返回空，模拟两个并发请求都通过了预检查
    pub fn hide_existing_rows(&self, hide: bool) {
        self.hide_rows.store(hide, Ordering::SeqCst);
    }

    pub fn with_max_upload_size(mut self, max_size: usize) -> Self {
        self.uploads = self.uploads.with_max_size(max_size);
        self
    }

    pub fn configurator(&self) -> impl Fn(&mut web::ServiceConfig) + Clone {
        let storage: Arc<dyn Storage> = Arc::new(StaleLookups {
            inner: self.storage.clone(),
            hide: self.hide_rows.clone(),
        });
        app_configurator(storage, self.uploads.clone())
    }

    pub async fn user(&self, username: &str) -> User {
        self.storage
            .get_user_by_username(username)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("user {username} should exist"))
    }

    pub async fn classes_of(&self, teacher: &str) -> Vec<Class> {
        let teacher = self.user(teacher).await;
        self.storage
            .list_classes_by_teacher(teacher.id, false)
            .await
            .unwrap()
    }

    /// 上传目录中的文件数量
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(self.uploads.dir())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// 可以让预检查查询落空的存储包装，其余操作原样转发
struct StaleLookups {
    inner: Arc<dyn Storage>,
    hide: Arc<AtomicBool>,
}

impl StaleLookups {
    fn hiding(&self) -> bool {
        self.hide.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Storage for StaleLookups {
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.inner.create_user(user).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        if self.hiding() {
            return Ok(None);
        }
        self.inner.get_user_by_username(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        if self.hiding() {
            return Ok(None);
        }
        self.inner.get_user_by_email(email).await
    }

    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.inner.create_class(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.inner.get_class_by_id(class_id).await
    }

    async fn list_classes_by_teacher(
        &self,
        teacher_id: i64,
        newest_first: bool,
    ) -> Result<Vec<Class>> {
        self.inner.list_classes_by_teacher(teacher_id, newest_first).await
    }

    async fn list_classes_not_enrolled(&self, student_id: i64) -> Result<Vec<Class>> {
        self.inner.list_classes_not_enrolled(student_id).await
    }

    async fn start_class(&self, class_id: i64) -> Result<Option<Class>> {
        self.inner.start_class(class_id).await
    }

    async fn create_enrollment(&self, student_id: i64, class_id: i64) -> Result<Enrollment> {
        self.inner.create_enrollment(student_id, class_id).await
    }

    async fn get_enrollment(&self, student_id: i64, class_id: i64) -> Result<Option<Enrollment>> {
        if self.hiding() {
            return Ok(None);
        }
        self.inner.get_enrollment(student_id, class_id).await
    }

    async fn list_enrollments_by_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<(Enrollment, Class)>> {
        self.inner.list_enrollments_by_student(student_id).await
    }

    async fn create_material(&self, material: CreateMaterialRequest) -> Result<Material> {
        self.inner.create_material(material).await
    }

    async fn list_materials_by_class(&self, class_id: i64) -> Result<Vec<Material>> {
        self.inner.list_materials_by_class(class_id).await
    }

    async fn list_recent_materials_by_teacher(
        &self,
        teacher_id: i64,
        limit: u64,
    ) -> Result<Vec<Material>> {
        self.inner
            .list_recent_materials_by_teacher(teacher_id, limit)
            .await
    }

    async fn get_material_by_filename(&self, filename: &str) -> Result<Option<Material>> {
        self.inner.get_material_by_filename(filename).await
    }
}

/// 初始化完整的应用服务
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(actix_web::App::new().configure($ctx.configurator())).await
    };
}

/// 注册并登录，返回会话 cookie
macro_rules! sign_up {
    ($app:expr, $username:expr, $role:expr) => {{
        let resp = actix_web::test::call_service(
            &$app,
            common::register_request($username, $role).to_request(),
        )
        .await;
        assert_eq!(
            common::flash_message(&resp).as_deref(),
            Some("Registration successful! Please login.")
        );
        let resp = actix_web::test::call_service(
            &$app,
            common::login_request($username, common::PASSWORD).to_request(),
        )
        .await;
        common::session_cookie(&resp).expect("login should set a session cookie")
    }};
}

pub fn register_form(username: &str, email: &str, role: &str) -> TestRequest {
    TestRequest::post().uri("/register").set_form([
        ("username", username),
        ("email", email),
        ("password", PASSWORD),
        ("role", role),
    ])
}

pub fn register_request(username: &str, role: &str) -> TestRequest {
    let email = format!("{username}@example.com");
    register_form(username, &email, role)
}

pub fn login_request(username: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/login")
        .set_form([("username", username), ("password", password)])
}

pub fn get(uri: &str, session: &Cookie<'static>) -> TestRequest {
    TestRequest::get().uri(uri).cookie(session.clone())
}

pub fn create_class_request(
    session: &Cookie<'static>,
    title: &str,
    scheduled_time: &str,
) -> TestRequest {
    TestRequest::post()
        .uri("/create_class")
        .cookie(session.clone())
        .set_form([
            ("title", title),
            ("description", "An introduction"),
            ("scheduled_time", scheduled_time),
            ("duration", "60"),
        ])
}

/// 构造 multipart 上传请求
pub fn upload_request(
    session: &Cookie<'static>,
    class_id: i64,
    title: &str,
    file: Option<(&str, &[u8])>,
) -> TestRequest {
    let mut body = Vec::new();
    for (name, value) in [("title", title), ("description", "Week 1")] {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    TestRequest::post()
        .uri(&format!("/upload_material/{class_id}"))
        .cookie(session.clone())
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

fn cookie_named<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

/// 响应中设置的非空会话 cookie
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    cookie_named(resp, &AppConfig::get().session.cookie_name).filter(|c| !c.value().is_empty())
}

/// 响应中是否清除了会话 cookie
pub fn clears_session<B>(resp: &ServiceResponse<B>) -> bool {
    cookie_named(resp, &AppConfig::get().session.cookie_name)
        .is_some_and(|c| c.value().is_empty())
}

/// 解码响应设置的闪现消息
pub fn flash_message<B>(resp: &ServiceResponse<B>) -> Option<String> {
    let cookie = cookie_named(resp, edustream::utils::session::FLASH_COOKIE)?;
    let req = TestRequest::default().cookie(cookie).to_http_request();
    Flash::from_request(&req)
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
