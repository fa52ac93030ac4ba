pub mod create;
pub mod live;
pub mod schedule;
pub mod start;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{SessionContext, classes::requests::CreateClassForm};
use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 创建课程
    pub async fn create_class(
        &self,
        session: &SessionContext,
        form: CreateClassForm,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_class(self, session, form, request).await
    }

    // 开始上课
    pub async fn start_class(
        &self,
        session: &SessionContext,
        class_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        start::handle_start_class(self, session, class_id, request).await
    }

    // 直播课堂
    pub async fn live_class(
        &self,
        session: &SessionContext,
        class_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        live::handle_live_class(self, session, class_id, request).await
    }

    // 课程表
    pub async fn schedule(
        &self,
        session: &SessionContext,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schedule::handle_schedule(self, session, request).await
    }
}
