// src/types/upload.rs
//! Multipart payloads for resume and job description uploads

use anyhow::{Context, Result};
use std::path::Path;

use crate::utils::{content_type_for, file_name_of};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// File name used when a pasted job description is sent as a blob
pub const JOB_DESCRIPTION_TEXT_NAME: &str = "job_description.txt";

pub const RESUME_EXTENSIONS: &[&str] = &["pdf"];
pub const JOB_DESCRIPTION_EXTENSIONS: &[&str] = &["pdf", "docx"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Read a file from disk, deriving its content type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let file_name = file_name_of(path)?;
        let content_type = content_type_for(&file_name)?;

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(Self::new(file_name, content_type, bytes))
    }
}

/// Either pasted text or a PDF/DOCX document. Both go to the same endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobDescription {
    Text(String),
    File(UploadFile),
}

impl JobDescription {
    pub fn is_blank(&self) -> bool {
        match self {
            JobDescription::Text(text) => text.trim().is_empty(),
            JobDescription::File(file) => file.bytes.is_empty(),
        }
    }

    /// The single multipart part sent as the `file` field.
    pub fn into_upload_file(self) -> UploadFile {
        match self {
            JobDescription::Text(text) => UploadFile::new(
                JOB_DESCRIPTION_TEXT_NAME,
                TEXT_CONTENT_TYPE,
                text.into_bytes(),
            ),
            JobDescription::File(file) => file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_job_description_becomes_text_blob() {
        let file = JobDescription::Text("Rust engineer".to_string()).into_upload_file();
        assert_eq!(file.file_name, JOB_DESCRIPTION_TEXT_NAME);
        assert_eq!(file.content_type, TEXT_CONTENT_TYPE);
        assert_eq!(file.bytes, b"Rust engineer".to_vec());
    }

    #[test]
    fn test_blank_job_description() {
        assert!(JobDescription::Text("  \n".to_string()).is_blank());
        assert!(!JobDescription::Text("x".to_string()).is_blank());
    }

    #[tokio::test]
    async fn test_from_path_reads_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Jane.PDF");
        tokio::fs::write(&path, b"%PDF-1.4").await.unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "Jane.PDF");
        assert_eq!(file.content_type, PDF_CONTENT_TYPE);
        assert_eq!(file.bytes, b"%PDF-1.4".to_vec());
    }

    #[tokio::test]
    async fn test_from_path_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        tokio::fs::write(&path, b"png").await.unwrap();

        assert!(UploadFile::from_path(&path).await.is_err());
    }
}
