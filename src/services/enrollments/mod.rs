pub mod enroll;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::SessionContext;
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 学生选课
    pub async fn enroll(
        &self,
        session: &SessionContext,
        class_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::handle_enroll(self, session, class_id, request).await
    }
}
