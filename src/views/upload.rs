// src/views/upload.rs
use std::path::PathBuf;

use crate::state::ViewState;
use crate::types::upload::RESUME_EXTENSIONS;
use crate::utils::has_allowed_extension;

/// Dropzone stand-in for resume uploads
#[derive(Debug, Default)]
pub struct UploadPanel {
    processed: Vec<String>,
}

impl UploadPanel {
    /// Split dropped paths into accepted PDFs and rejected files.
    pub fn accept(paths: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
        paths.into_iter().partition(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| has_allowed_extension(name, RESUME_EXTENSIONS))
        })
    }

    pub fn mark_processed(&mut self, names: Vec<String>) {
        self.processed = names;
    }

    pub fn clear(&mut self) {
        self.processed.clear();
    }

    pub fn processed(&self) -> &[String] {
        &self.processed
    }

    pub fn render(&self, state: &ViewState) -> String {
        let mut lines = vec![if state.uploading() {
            "Upload Resumes  [Processing...]".to_string()
        } else {
            "Upload Resumes".to_string()
        }];

        if state.uploading() {
            lines.push("Processing resumes with AI...".to_string());
            lines.push("This may take a few moments".to_string());
        } else if !self.processed.is_empty() {
            lines.push("Upload complete!".to_string());
            for name in &self.processed {
                lines.push(format!("  {}  [Processed]", name));
            }
        } else {
            lines.push("Add PDF resumes with :upload <file.pdf>...".to_string());
            lines.push("Supports multiple PDF files".to_string());
        }

        lines.join("\n")
    }
}
