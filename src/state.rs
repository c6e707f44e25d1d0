// src/state.rs
//! View state owned by the controller

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::types::{DatabaseStatus, ResumeFile, SearchResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    Resumes,
}

impl Page {
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Resumes => "Uploaded Resumes",
        }
    }
}

/// In-flight marker for one action. Clones share the same flag so an
/// observer can watch it while the controller owns the state.
#[derive(Debug, Clone, Default)]
pub struct InFlightFlag(Arc<AtomicBool>);

impl InFlightFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Set the flag until the returned guard is dropped.
    pub fn raise(&self) -> InFlightGuard {
        self.0.store(true, Ordering::SeqCst);
        InFlightGuard(self.0.clone())
    }
}

/// Resets its flag on drop, whatever the outcome of the guarded call.
#[must_use = "the flag is lowered as soon as the guard is dropped"]
pub struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// A message for the user. All surfaced failures go through here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            at: Utc::now(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.at.format("%H:%M:%S"), self.message)
    }
}

/// Document shown in the preview modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTarget {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct JobDescriptionStatus {
    pub uploading: InFlightFlag,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub page: Page,
    pub resume_list: Vec<String>,
    pub uploaded_resumes: Vec<ResumeFile>,
    pub search_result: Option<SearchResult>,
    pub is_searching: InFlightFlag,
    pub is_uploading: InFlightFlag,
    pub database_status: DatabaseStatus,
    pub preview: Option<PreviewTarget>,
    pub job_description: JobDescriptionStatus,
    pub notices: Vec<Notice>,
}

impl ViewState {
    pub fn database_ready(&self) -> bool {
        self.database_status.is_ready()
    }

    pub fn resume_count(&self) -> usize {
        self.resume_list.len()
    }

    pub fn searching(&self) -> bool {
        self.is_searching.is_set()
    }

    pub fn uploading(&self) -> bool {
        self.is_uploading.is_set()
    }
}
