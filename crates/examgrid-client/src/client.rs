//! The request/response boundary to the remote scheduler.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;

use examgrid_core::schedule::{ScheduleConfig, ScheduleResponse, UploadResponse};

use crate::error::ClientError;

const ACCEPTED_EXTENSIONS: &[&str] = &[".xlsx", ".xls", ".json"];

/// A remote scheduler the client can upload student data to and request
/// timetables from.
#[async_trait]
pub trait SchedulerClient: Send + Sync {
    /// Short backend name for logs (e.g. "http").
    fn name(&self) -> &str;

    /// Upload the student roster.
    async fn upload(&self, file: &UploadFile) -> anyhow::Result<UploadResponse>;

    /// Request a timetable for the uploaded roster.
    async fn schedule(&self, config: &ScheduleConfig) -> anyhow::Result<ScheduleResponse>;
}

/// A roster file ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub content: Vec<u8>,
}

impl UploadFile {
    /// Wrap in-memory content, rejecting unsupported extensions.
    pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Result<Self, ClientError> {
        let filename = filename.into();
        let lower = filename.to_lowercase();
        if !ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            return Err(ClientError::InvalidFileFormat(filename));
        }
        Ok(Self { filename, content })
    }

    /// Read a roster from disk.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("not a file path: {}", path.display()))?
            .to_string();
        // Check the extension before touching the file.
        UploadFile::new(filename.clone(), Vec::new())?;
        let content = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self { filename, content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_extensions() {
        assert!(UploadFile::new("students.xlsx", vec![]).is_ok());
        assert!(UploadFile::new("STUDENTS.XLS", vec![]).is_ok());
        assert!(UploadFile::new("roster.json", vec![]).is_ok());
        assert!(matches!(
            UploadFile::new("roster.csv", vec![]),
            Err(ClientError::InvalidFileFormat(_))
        ));
    }

    #[test]
    fn from_path_reads_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        std::fs::write(&path, b"[]").unwrap();
        let file = UploadFile::from_path(&path).unwrap();
        assert_eq!(file.filename, "roster.json");
        assert_eq!(file.content, b"[]");
    }

    #[test]
    fn from_path_rejects_extension_first() {
        let err = UploadFile::from_path(Path::new("/nonexistent/roster.txt")).unwrap_err();
        assert!(err.to_string().contains("invalid file format"));
    }
}
