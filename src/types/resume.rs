// src/types/resume.rs
//! Resume and search data structures shared by the adapter, controller and views

use serde::{Deserialize, Serialize};

// ===== Resume Store =====

/// One uploaded/indexed document as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFile {
    pub filename: String,
    pub url: String,
}

impl ResumeFile {
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
        }
    }

    /// Display title, filename without the `.pdf` suffix
    pub fn title(&self) -> &str {
        self.filename
            .strip_suffix(".pdf")
            .unwrap_or(&self.filename)
    }
}

/// Readiness signal of the remote index. Search is only allowed once
/// at least one chunk has been indexed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseStatus {
    pub chunks: u64,
}

impl DatabaseStatus {
    pub fn is_ready(&self) -> bool {
        self.chunks > 0
    }
}

// ===== Search =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewUrl {
    pub name: String,
    pub resume_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub agent_used: String,
    pub answer: String,
    #[serde(default)]
    pub matched_candidates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_urls: Option<Vec<PreviewUrl>>,
}

impl SearchResult {
    /// Candidates with a previewable resume. The match count shown to the
    /// user is derived from this list, not from `matched_candidates`.
    pub fn previews(&self) -> &[PreviewUrl] {
        self.preview_urls.as_deref().unwrap_or(&[])
    }

    pub fn match_count(&self) -> usize {
        self.previews().len()
    }

    pub fn preview(&self, index: usize) -> Option<&PreviewUrl> {
        self.previews().get(index)
    }
}
