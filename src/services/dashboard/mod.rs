pub mod student;
pub mod teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::SessionContext;
use crate::storage::Storage;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 教师控制台
    pub async fn teacher_dashboard(
        &self,
        session: &SessionContext,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teacher::handle_teacher_dashboard(self, session, request).await
    }

    // 学生控制台
    pub async fn student_dashboard(
        &self,
        session: &SessionContext,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student::handle_student_dashboard(self, session, request).await
    }
}
