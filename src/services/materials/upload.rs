use actix_multipart::{Field, Multipart};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;

use super::MaterialService;
use crate::errors::EduStreamError;
use crate::models::{SessionContext, materials::requests::CreateMaterialRequest};
use crate::policy::{Requirement, authorize, class_resource};
use crate::storage::UploadStore;
use crate::utils::filename::allowed_extension;
use crate::utils::redirect_with_flash;

// 文本字段（标题、描述）的大小上限
const MAX_TEXT_FIELD: usize = 64 * 1024;

/// 表单解析过程中已经落盘的文件
struct SavedFile {
    original_name: String,
    stored_name: String,
    file_type: String,
}

#[derive(Default)]
struct UploadForm {
    title: String,
    description: String,
    file: Option<SavedFile>,
}

pub async fn handle_upload(
    service: &MaterialService,
    session: &SessionContext,
    class_id: i64,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let uploads = service.get_uploads(request);

    let class = crate::services::load_class(&storage, class_id).await?;
    let resource = class_resource(&storage, session, &class).await?;
    if !authorize(session, Some(&resource), &Requirement::Owns).is_allowed() {
        crate::services::log_denied(session, "upload", class_id);
        return Ok(redirect_with_flash(
            "/teacher/dashboard",
            "You are not authorized to upload materials for this class!",
        ));
    }

    let materials_path = format!("/materials/{class_id}");

    let mut form = UploadForm::default();
    let rejection = match read_form(&uploads, &mut payload, &mut form).await {
        Ok(rejection) => rejection,
        Err(e) => {
            // 解析失败时清理已写入的文件
            if let Some(file) = &form.file {
                uploads.remove(&file.stored_name);
            }
            return Err(e);
        }
    };

    if let Some(msg) = rejection {
        if let Some(file) = &form.file {
            uploads.remove(&file.stored_name);
        }
        return Ok(redirect_with_flash(&materials_path, msg));
    }

    let Some(file) = form.file else {
        return Ok(redirect_with_flash(&materials_path, "No file selected"));
    };

    // 标题留空时使用原始文件名
    let title = match form.title.trim() {
        "" => file.original_name.clone(),
        t => t.to_string(),
    };
    let description = form.description.trim();

    let create_request = CreateMaterialRequest {
        title,
        description: (!description.is_empty()).then(|| description.to_string()),
        filename: file.stored_name.clone(),
        file_type: file.file_type.clone(),
        class_id,
    };

    match storage.create_material(create_request).await {
        Ok(material) => {
            tracing::info!(
                "Teacher {} uploaded {} to class {} (material {})",
                session.user_id,
                material.filename,
                class_id,
                material.id
            );
            Ok(redirect_with_flash(
                &materials_path,
                "Material uploaded successfully!",
            ))
        }
        Err(e) => {
            uploads.remove(&file.stored_name);
            Err(e.into())
        }
    }
}

/// 读取整个 multipart 表单
///
/// 返回 `Ok(Some(msg))` 表示请求被拒绝，调用方负责清理 `form.file`。
async fn read_form(
    uploads: &UploadStore,
    payload: &mut Multipart,
    form: &mut UploadForm,
) -> ActixResult<Option<&'static str>> {
    while let Some(mut field) = payload.try_next().await? {
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        match name.as_str() {
            "title" => form.title = read_text(&mut field).await?,
            "description" => form.description = read_text(&mut field).await?,
            "file" => {
                if form.file.is_some() {
                    return Ok(Some("Only one file can be uploaded at a time"));
                }

                let original_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(|s| s.to_string())
                    .unwrap_or_default();

                // 浏览器未选择文件时会提交一个文件名为空的部分
                if original_name.is_empty() {
                    drain(&mut field).await?;
                    continue;
                }

                let Some(file_type) = allowed_extension(&original_name, uploads.allowed_extensions())
                else {
                    return Ok(Some("Invalid file type"));
                };

                let mut writer = uploads.create_unique(&original_name, chrono::Utc::now())?;
                form.file = Some(SavedFile {
                    original_name,
                    stored_name: writer.stored_name().to_string(),
                    file_type,
                });

                while let Some(chunk) = field.next().await {
                    let data = chunk?;
                    // 超出大小限制
                    if writer.written() + data.len() > uploads.max_size() {
                        return Ok(Some("File too large"));
                    }
                    writer.write_chunk(&data)?;
                }
                writer.finish()?;
            }
            _ => drain(&mut field).await?,
        }
    }

    Ok(None)
}

async fn read_text(field: &mut Field) -> ActixResult<String> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk?;
        if buf.len() + data.len() > MAX_TEXT_FIELD {
            return Err(EduStreamError::validation("Form field too large").into());
        }
        buf.extend_from_slice(&data);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

async fn drain(field: &mut Field) -> ActixResult<()> {
    while let Some(chunk) = field.next().await {
        chunk?;
    }
    Ok(())
}
