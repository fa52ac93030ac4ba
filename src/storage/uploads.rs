//! 上传文件的磁盘存储
//!
//! 只负责上传目录内的文件读写，文件名的合法性由调用方保证。

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::AppConfig;
use crate::errors::{EduStreamError, Result};
use crate::utils::filename::{stored_filename, stored_filename_with_counter};

// 同一秒内同名上传的序号上限
const MAX_NAME_ATTEMPTS: u32 = 1000;

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_size: usize,
    allowed_extensions: Vec<String>,
}

impl UploadStore {
    /// 指定上传目录，大小上限与扩展名列表取自配置
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let config = &AppConfig::get().upload;
        Self {
            dir: dir.into(),
            max_size: config.max_size,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// 使用全局配置中的上传目录
    pub fn from_config() -> Self {
        Self::new(&AppConfig::get().upload.dir)
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// 确保上传目录存在
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| {
                EduStreamError::file_operation(format!(
                    "Failed to create upload directory {}: {e}",
                    self.dir.display()
                ))
            })?;
        }
        Ok(())
    }

    pub fn path_for(&self, stored_name: &str) -> PathBuf {
        self.dir.join(stored_name)
    }

    pub fn exists(&self, stored_name: &str) -> bool {
        self.path_for(stored_name).is_file()
    }

    /// 创建一个待写入的文件，同名文件已存在时返回 Conflict
    pub fn create(&self, stored_name: &str) -> Result<UploadWriter> {
        self.ensure_dir()?;
        match self.try_create(stored_name)? {
            Some(writer) => Ok(writer),
            None => Err(EduStreamError::conflict(format!(
                "File {stored_name} already exists"
            ))),
        }
    }

    /// 为上传文件选取并占用一个未使用的存储名
    ///
    /// 同一秒内重名时从 2 开始追加序号，选名和创建在同一次打开中完成。
    pub fn create_unique(&self, original_name: &str, now: DateTime<Utc>) -> Result<UploadWriter> {
        self.ensure_dir()?;
        if let Some(writer) = self.try_create(&stored_filename(original_name, now))? {
            return Ok(writer);
        }
        for counter in 2..=MAX_NAME_ATTEMPTS {
            let stored_name = stored_filename_with_counter(original_name, now, counter);
            if let Some(writer) = self.try_create(&stored_name)? {
                return Ok(writer);
            }
        }
        Err(EduStreamError::conflict(format!(
            "No free stored name for {original_name}"
        )))
    }

    /// 以独占方式创建文件，已存在时返回 `None`
    fn try_create(&self, stored_name: &str) -> Result<Option<UploadWriter>> {
        let path = self.path_for(stored_name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => Ok(Some(UploadWriter {
                file,
                stored_name: stored_name.to_string(),
                path,
                written: 0,
            })),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(None),
            Err(e) => Err(EduStreamError::file_operation(format!(
                "Failed to create {}: {e}",
                path.display()
            ))),
        }
    }

    /// 删除文件，文件不存在时忽略
    pub fn remove(&self, stored_name: &str) {
        let path = self.path_for(stored_name);
        if let Err(e) = fs::remove_file(&path)
            && e.kind() != ErrorKind::NotFound
        {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
        }
    }

    pub fn read(&self, stored_name: &str) -> Result<Vec<u8>> {
        let path = self.path_for(stored_name);
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                EduStreamError::not_found(format!("File {stored_name} not found"))
            }
            _ => EduStreamError::file_operation(format!("Failed to read {}: {e}", path.display())),
        })
    }
}

/// 正在写入的上传文件，记录已写入的字节数
pub struct UploadWriter {
    file: File,
    stored_name: String,
    path: PathBuf,
    written: usize,
}

impl UploadWriter {
    pub fn stored_name(&self) -> &str {
        &self.stored_name
    }

    pub fn write_chunk(&mut self, data: &[u8]) -> Result<()> {
        self.file.write_all(data).map_err(|e| {
            EduStreamError::file_operation(format!("Failed to write {}: {e}", self.path.display()))
        })?;
        self.written += data.len();
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> Result<usize> {
        self.file.flush()?;
        Ok(self.written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_write_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("nested"));

        let mut writer = store.create("a.txt").unwrap();
        writer.write_chunk(b"hello ").unwrap();
        writer.write_chunk(b"world").unwrap();
        assert_eq!(writer.written(), 11);
        assert_eq!(writer.finish().unwrap(), 11);

        assert!(store.exists("a.txt"));
        assert_eq!(store.read("a.txt").unwrap(), b"hello world");

        store.remove("a.txt");
        assert!(!store.exists("a.txt"));
        // 重复删除不报错
        store.remove("a.txt");
    }

    #[test]
    fn test_create_never_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let mut writer = store.create("a.txt").unwrap();
        writer.write_chunk(b"first").unwrap();
        writer.finish().unwrap();

        let err = store.create("a.txt").err().unwrap();
        assert_eq!(err.code(), "E007");
        assert_eq!(store.read("a.txt").unwrap(), b"first");
    }

    #[test]
    fn test_create_unique_same_second_keeps_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

        let mut first = store.create_unique("notes.pdf", now).unwrap();
        assert_eq!(first.stored_name(), "20250301_090000_notes.pdf");
        first.write_chunk(b"first upload").unwrap();

        // 第一个文件尚未写完时，第二个上传取得新名字
        let mut second = store.create_unique("notes.pdf", now).unwrap();
        assert_eq!(second.stored_name(), "20250301_090000_2_notes.pdf");
        second.write_chunk(b"second").unwrap();
        first.finish().unwrap();
        second.finish().unwrap();

        let third = store.create_unique("notes.pdf", now).unwrap();
        assert_eq!(third.stored_name(), "20250301_090000_3_notes.pdf");

        assert_eq!(
            store.read("20250301_090000_notes.pdf").unwrap(),
            b"first upload"
        );
        assert_eq!(store.read("20250301_090000_2_notes.pdf").unwrap(), b"second");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        let err = store.read("missing.pdf").unwrap_err();
        assert_eq!(err.code(), "E006");
    }
}
