use crate::errors::Result;
use crate::storage::{Storage, UploadStore};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub uploads: UploadStore,
}

/// 准备服务器启动的上下文
/// 包括存储（含迁移）和上传目录
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    let uploads = UploadStore::from_config();
    uploads.ensure_dir()?;
    debug!(
        "Upload directory ready: {} (max {} bytes, allowed: {})",
        uploads.dir().display(),
        uploads.max_size(),
        uploads.allowed_extensions().join(", ")
    );

    Ok(StartupContext { storage, uploads })
}
