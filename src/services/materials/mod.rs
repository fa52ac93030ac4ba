pub mod download;
pub mod list;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::models::SessionContext;
use crate::storage::{Storage, UploadStore};

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    /// 上传目录，未注入时使用全局配置
    pub(crate) fn get_uploads(&self, request: &HttpRequest) -> UploadStore {
        request
            .app_data::<web::Data<UploadStore>>()
            .map(|data| data.get_ref().clone())
            .unwrap_or_else(UploadStore::from_config)
    }

    // 课程资料列表
    pub async fn list_materials(
        &self,
        session: &SessionContext,
        class_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_materials(self, session, class_id, request).await
    }

    // 上传资料
    pub async fn upload_material(
        &self,
        session: &SessionContext,
        class_id: i64,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, session, class_id, request, payload).await
    }

    // 下载资料
    pub async fn download_material(
        &self,
        session: &SessionContext,
        filename: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, session, filename, request).await
    }
}
