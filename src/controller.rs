// src/controller.rs
//! View-state controller: the only writer of `ViewState`

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;

use crate::app_log;
use crate::config::ClientConfig;
use crate::core::{FsOps, ScreeningApi};
use crate::errors::ControllerError;
use crate::state::{JobDescriptionStatus, Notice, Page, PreviewTarget, ViewState};
use crate::types::upload::{JOB_DESCRIPTION_EXTENSIONS, RESUME_EXTENSIONS};
use crate::types::{JobDescription, ResumeFile, UploadFile};
use crate::utils::has_allowed_extension;

pub const UPLOAD_FAILED_NOTICE: &str = "Upload failed. Please try again.";

/// Remote operations, each with a fixed failure policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Status,
    Resumes,
    Upload,
    JobDescription,
    Search,
    Download,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Keep the previous value and log
    Degrade,
    /// Push a notice for the user
    Alert,
    /// Report on the panel that started the call
    Inline,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Status => "Status",
            Operation::Resumes => "Resume list",
            Operation::Upload => "Upload",
            Operation::JobDescription => "Job description upload",
            Operation::Search => "Search",
            Operation::Download => "Download",
        }
    }

    /// Reads degrade silently, user-initiated writes and searches alert.
    pub fn policy(&self) -> FailurePolicy {
        match self {
            Operation::Status | Operation::Resumes => FailurePolicy::Degrade,
            Operation::Upload | Operation::Search | Operation::Download => FailurePolicy::Alert,
            Operation::JobDescription => FailurePolicy::Inline,
        }
    }

    fn failure_message(&self, error: &anyhow::Error) -> String {
        match self {
            Operation::Upload => UPLOAD_FAILED_NOTICE.to_string(),
            Operation::JobDescription => format!("Upload failed: {:#}", error),
            _ => format!("{} failed: {:#}", self.name(), error),
        }
    }
}

pub struct ScreenerController<A> {
    api: A,
    state: ViewState,
    refresh_delay: Duration,
    refresh_due: Option<Instant>,
    initialized: bool,
}

impl<A: ScreeningApi> ScreenerController<A> {
    pub fn new(api: A, refresh_delay: Duration) -> Self {
        Self {
            api,
            state: ViewState::default(),
            refresh_delay,
            refresh_due: None,
            initialized: false,
        }
    }

    pub fn from_config(api: A, config: &ClientConfig) -> Self {
        Self::new(api, config.refresh_delay)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Mount effect: fetch status and resume list once.
    pub async fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        self.refresh_status().await;
        self.refresh_resumes().await;
    }

    /// Returns false when the fetch failed and the previous status was kept.
    pub async fn refresh_status(&mut self) -> bool {
        match self.api.fetch_status().await {
            Ok(status) => {
                app_log!(debug, "Database status: {} chunks", status.chunks);
                self.state.database_status = status;
                true
            }
            Err(e) => {
                self.report_failure(Operation::Status, &e);
                false
            }
        }
    }

    pub async fn refresh_resumes(&mut self) -> bool {
        match self.api.fetch_resumes().await {
            Ok(resumes) => {
                app_log!(debug, "Fetched {} resumes", resumes.len());
                self.state.resume_list = resumes.iter().map(|r| r.filename.clone()).collect();
                self.state.uploaded_resumes = resumes;
                true
            }
            Err(e) => {
                self.report_failure(Operation::Resumes, &e);
                false
            }
        }
    }

    /// Upload resumes. On success a single status/list refresh is scheduled
    /// `refresh_delay` later; the backend indexes asynchronously and gives
    /// no completion signal.
    pub async fn handle_upload(&mut self, files: Vec<UploadFile>) -> Result<(), ControllerError> {
        if files.is_empty() {
            return Err(ControllerError::NoFiles);
        }
        if self.state.uploading() {
            return Err(ControllerError::AlreadyInFlight(Operation::Upload.name()));
        }
        for file in &files {
            if !has_allowed_extension(&file.file_name, RESUME_EXTENSIONS) {
                return Err(ControllerError::UnsupportedFile(file.file_name.clone()));
            }
        }

        let outcome = {
            let _uploading = self.state.is_uploading.raise();
            self.api.upload_resumes(files).await
        };

        match outcome {
            Ok(_) => {
                self.refresh_due = Some(Instant::now() + self.refresh_delay);
                Ok(())
            }
            Err(e) => {
                self.report_failure(Operation::Upload, &e);
                Err(remote(Operation::Upload, &e))
            }
        }
    }

    /// Deadline of the post-upload refresh, if one is scheduled
    pub fn refresh_due(&self) -> Option<Instant> {
        self.refresh_due
    }

    /// Wait for the scheduled refresh and run it. Returns false when
    /// nothing was scheduled. Cancel-safe: an interrupted wait keeps the
    /// schedule.
    pub async fn run_pending_refresh(&mut self) -> bool {
        let Some(due) = self.refresh_due else {
            return false;
        };

        tokio::time::sleep_until(due).await;
        self.refresh_due = None;

        self.refresh_status().await;
        self.refresh_resumes().await;
        true
    }

    pub async fn handle_search(&mut self, query: &str) -> Result<(), ControllerError> {
        if query.trim().is_empty() {
            self.state.search_result = None;
            return Ok(());
        }

        if !self.state.database_ready() {
            let err = ControllerError::DatabaseNotReady;
            self.notify(err.to_string());
            return Err(err);
        }

        if self.state.searching() {
            return Err(ControllerError::AlreadyInFlight(Operation::Search.name()));
        }

        let outcome = {
            let _searching = self.state.is_searching.raise();
            self.api.search(query).await
        };

        match outcome {
            Ok(result) => {
                app_log!(
                    info,
                    "Search '{}' answered by {} with {} match(es)",
                    query,
                    result.agent_used,
                    result.match_count()
                );
                self.state.search_result = Some(result);
                Ok(())
            }
            Err(e) => {
                self.state.search_result = None;
                self.report_failure(Operation::Search, &e);
                Err(remote(Operation::Search, &e))
            }
        }
    }

    pub fn handle_page_change(&mut self, page: Page) {
        self.state.page = page;
    }

    pub async fn upload_job_description(
        &mut self,
        job_description: JobDescription,
    ) -> Result<(), ControllerError> {
        let flag = self.state.job_description.uploading.clone();
        if flag.is_set() {
            return Err(ControllerError::AlreadyInFlight(Operation::JobDescription.name()));
        }

        if job_description.is_blank() {
            let err = ControllerError::EmptyJobDescription;
            self.state.job_description.error = Some(err.to_string());
            return Err(err);
        }

        if let JobDescription::File(file) = &job_description {
            if !has_allowed_extension(&file.file_name, JOB_DESCRIPTION_EXTENSIONS) {
                return Err(ControllerError::UnsupportedFile(file.file_name.clone()));
            }
        }

        self.state.job_description.success = false;
        self.state.job_description.error = None;

        let outcome = {
            let _uploading = flag.raise();
            self.api.upload_job_description(job_description).await
        };

        match outcome {
            Ok(_) => {
                self.state.job_description.success = true;
                Ok(())
            }
            Err(e) => {
                self.report_failure(Operation::JobDescription, &e);
                Err(remote(Operation::JobDescription, &e))
            }
        }
    }

    pub fn job_description_status(&self) -> &JobDescriptionStatus {
        &self.state.job_description
    }

    pub fn open_preview(&mut self, name: impl Into<String>, url: impl Into<String>) {
        let target = PreviewTarget {
            name: name.into(),
            url: url.into(),
        };
        app_log!(debug, "Opening preview for {}", target.name);
        self.state.preview = Some(target);
    }

    /// Preview the n-th matched candidate of the last search
    pub fn preview_match(&mut self, index: usize) -> Result<&PreviewTarget, ControllerError> {
        let preview = self
            .state
            .search_result
            .as_ref()
            .and_then(|result| result.preview(index))
            .cloned()
            .ok_or(ControllerError::NoSuchItem(index))?;

        self.open_preview(preview.name, preview.resume_url);
        self.state
            .preview
            .as_ref()
            .ok_or(ControllerError::NoSuchItem(index))
    }

    pub fn close_preview(&mut self) {
        self.state.preview = None;
    }

    /// Fetch a resume and write it under `dir`. No progress, no retry.
    pub async fn download_resume(
        &mut self,
        resume: &ResumeFile,
        dir: &Path,
    ) -> Result<PathBuf, ControllerError> {
        let path = FsOps::download_path(dir, &resume.filename);

        let outcome = match self.api.download(&resume.url).await {
            Ok(bytes) => FsOps::write_bytes_safe(&path, &bytes).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {
                app_log!(info, "Downloaded {} to {}", resume.filename, path.display());
                Ok(path)
            }
            Err(e) => {
                self.report_failure(Operation::Download, &e);
                Err(remote(Operation::Download, &e))
            }
        }
    }

    /// Drain pending user notices
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.state.notices)
    }

    fn notify(&mut self, message: impl Into<String>) {
        let notice = Notice::new(message);
        app_log!(info, "Notice: {}", notice.message);
        self.state.notices.push(notice);
    }

    fn report_failure(&mut self, operation: Operation, error: &anyhow::Error) {
        match operation.policy() {
            FailurePolicy::Degrade => {
                app_log!(warn, "Failed to fetch {}: {:#}", operation.name(), error);
            }
            FailurePolicy::Alert => {
                app_log!(error, "{} error: {:#}", operation.name(), error);
                self.notify(operation.failure_message(error));
            }
            FailurePolicy::Inline => {
                app_log!(error, "{} error: {:#}", operation.name(), error);
                self.state.job_description.error = Some(operation.failure_message(error));
            }
        }
    }
}

fn remote(operation: Operation, error: &anyhow::Error) -> ControllerError {
    ControllerError::Remote {
        operation: operation.name(),
        message: format!("{:#}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InFlightFlag;
    use crate::types::{DatabaseStatus, PreviewUrl, SearchResult, UploadAck};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Scripted backend. `None` replies fail the call.
    #[derive(Default)]
    struct StubApi {
        status: Mutex<Option<DatabaseStatus>>,
        resumes: Mutex<Option<Vec<ResumeFile>>>,
        upload_ok: Mutex<bool>,
        search_reply: Mutex<Option<std::result::Result<SearchResult, String>>>,
        download_body: Mutex<Option<Vec<u8>>>,
        calls: Mutex<Vec<&'static str>>,
        watched: Mutex<Option<InFlightFlag>>,
        flag_during_call: Mutex<Vec<bool>>,
    }

    impl StubApi {
        fn ready(chunks: u64) -> Arc<Self> {
            let stub = Self::default();
            *stub.status.lock().unwrap() = Some(DatabaseStatus { chunks });
            *stub.resumes.lock().unwrap() = Some(vec![
                ResumeFile::new("alice.pdf", "http://files/alice.pdf"),
                ResumeFile::new("bob.pdf", "http://files/bob.pdf"),
            ]);
            *stub.upload_ok.lock().unwrap() = true;
            Arc::new(stub)
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
            if let Some(flag) = self.watched.lock().unwrap().as_ref() {
                self.flag_during_call.lock().unwrap().push(flag.is_set());
            }
        }

        fn count(&self, call: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| **c == call).count()
        }

        fn watch(&self, flag: &InFlightFlag) {
            *self.watched.lock().unwrap() = Some(flag.clone());
        }
    }

    #[async_trait]
    impl ScreeningApi for StubApi {
        async fn fetch_status(&self) -> Result<DatabaseStatus> {
            self.record("status");
            let status = *self.status.lock().unwrap();
            status.ok_or_else(|| anyhow::anyhow!("status unavailable"))
        }

        async fn fetch_resumes(&self) -> Result<Vec<ResumeFile>> {
            self.record("resumes");
            self.resumes
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| anyhow::anyhow!("list unavailable"))
        }

        async fn upload_resumes(&self, _files: Vec<UploadFile>) -> Result<UploadAck> {
            self.record("upload");
            if *self.upload_ok.lock().unwrap() {
                Ok(serde_json::json!({"status": "ok"}))
            } else {
                anyhow::bail!("HTTP 500 Internal Server Error error: boom")
            }
        }

        async fn upload_job_description(&self, _jd: JobDescription) -> Result<UploadAck> {
            self.record("upload-jd");
            if *self.upload_ok.lock().unwrap() {
                Ok(serde_json::json!({"status": "ok"}))
            } else {
                anyhow::bail!("HTTP 502 Bad Gateway error: upstream down")
            }
        }

        async fn search(&self, _query: &str) -> Result<SearchResult> {
            self.record("search");
            match self.search_reply.lock().unwrap().clone() {
                Some(Ok(result)) => Ok(result),
                Some(Err(message)) => Err(anyhow::anyhow!(message)),
                None => anyhow::bail!("Search failed"),
            }
        }

        async fn download(&self, _url: &str) -> Result<Vec<u8>> {
            self.record("download");
            self.download_body
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| anyhow::anyhow!("404"))
        }
    }

    fn controller(stub: &Arc<StubApi>) -> ScreenerController<Arc<StubApi>> {
        ScreenerController::new(stub.clone(), Duration::from_secs(2))
    }

    fn pdf(name: &str) -> UploadFile {
        UploadFile::new(name, "application/pdf", b"%PDF".to_vec())
    }

    fn react_result() -> SearchResult {
        SearchResult {
            agent_used: "skill_matcher".to_string(),
            answer: "A knows React".to_string(),
            matched_candidates: vec!["A".to_string()],
            preview_urls: Some(vec![PreviewUrl {
                name: "A".to_string(),
                resume_url: "u1".to_string(),
            }]),
        }
    }

    #[tokio::test]
    async fn test_initialize_fetches_once() {
        let stub = StubApi::ready(4);
        let mut ctl = controller(&stub);

        ctl.initialize().await;
        ctl.initialize().await;

        assert_eq!(stub.count("status"), 1);
        assert_eq!(stub.count("resumes"), 1);
        assert_eq!(ctl.state().database_status.chunks, 4);
        assert_eq!(ctl.state().resume_list, vec!["alice.pdf", "bob.pdf"]);
        assert_eq!(ctl.state().uploaded_resumes.len(), 2);
    }

    #[tokio::test]
    async fn test_read_failures_keep_previous_state() {
        let stub = StubApi::ready(3);
        let mut ctl = controller(&stub);
        ctl.initialize().await;

        *stub.status.lock().unwrap() = None;
        *stub.resumes.lock().unwrap() = None;

        assert!(!ctl.refresh_status().await);
        assert!(!ctl.refresh_resumes().await);
        assert_eq!(ctl.state().database_status.chunks, 3);
        assert_eq!(ctl.state().uploaded_resumes.len(), 2);
        assert!(ctl.take_notices().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_refreshes_once_after_delay() {
        let stub = StubApi::ready(0);
        let mut ctl = controller(&stub);
        stub.watch(&ctl.state().is_uploading);

        ctl.handle_upload(vec![pdf("a.pdf"), pdf("b.pdf")])
            .await
            .unwrap();

        assert!(!ctl.state().uploading());
        assert_eq!(*stub.flag_during_call.lock().unwrap(), vec![true]);
        assert_eq!(stub.count("status"), 0);
        assert_eq!(stub.count("resumes"), 0);

        let start = Instant::now();
        assert!(ctl.run_pending_refresh().await);
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert_eq!(stub.count("status"), 1);
        assert_eq!(stub.count("resumes"), 1);

        assert!(!ctl.run_pending_refresh().await);
        assert_eq!(stub.count("status"), 1);
        assert_eq!(stub.count("resumes"), 1);
    }

    #[tokio::test]
    async fn test_upload_failure_alerts_and_resets_flag() {
        let stub = StubApi::ready(0);
        *stub.upload_ok.lock().unwrap() = false;
        let mut ctl = controller(&stub);
        stub.watch(&ctl.state().is_uploading);

        let err = ctl.handle_upload(vec![pdf("a.pdf")]).await.unwrap_err();

        assert!(!err.is_local());
        assert!(!ctl.state().uploading());
        assert_eq!(*stub.flag_during_call.lock().unwrap(), vec![true]);
        assert!(ctl.refresh_due().is_none());
        let notices = ctl.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, UPLOAD_FAILED_NOTICE);
    }

    #[tokio::test]
    async fn test_upload_rejects_without_calling() {
        let stub = StubApi::ready(0);
        let mut ctl = controller(&stub);

        assert_eq!(
            ctl.handle_upload(vec![]).await,
            Err(ControllerError::NoFiles)
        );
        assert_eq!(
            ctl.handle_upload(vec![pdf("notes.txt")]).await,
            Err(ControllerError::UnsupportedFile("notes.txt".to_string()))
        );
        assert_eq!(stub.count("upload"), 0);
    }

    #[tokio::test]
    async fn test_empty_query_clears_result_without_network() {
        let stub = StubApi::ready(5);
        *stub.search_reply.lock().unwrap() = Some(Ok(react_result()));
        let mut ctl = controller(&stub);
        ctl.initialize().await;
        ctl.handle_search("React developer").await.unwrap();
        assert!(ctl.state().search_result.is_some());

        ctl.handle_search("   ").await.unwrap();

        assert!(ctl.state().search_result.is_none());
        assert_eq!(stub.count("search"), 1);
    }

    #[tokio::test]
    async fn test_search_blocked_when_database_empty() {
        let stub = StubApi::ready(0);
        let mut ctl = controller(&stub);
        ctl.initialize().await;

        let err = ctl.handle_search("Python engineers").await.unwrap_err();

        assert_eq!(err, ControllerError::DatabaseNotReady);
        assert_eq!(stub.count("search"), 0);
        let notices = ctl.take_notices();
        assert_eq!(notices[0].message, "Please upload some resumes first!");
    }

    #[tokio::test]
    async fn test_search_error_body_clears_result_and_alerts() {
        let stub = StubApi::ready(5);
        *stub.search_reply.lock().unwrap() = Some(Ok(react_result()));
        let mut ctl = controller(&stub);
        ctl.initialize().await;
        ctl.handle_search("React developer").await.unwrap();

        *stub.search_reply.lock().unwrap() = Some(Err("index offline".to_string()));
        stub.watch(&ctl.state().is_searching);
        let err = ctl.handle_search("Go developer").await.unwrap_err();

        assert!(!err.is_local());
        assert!(ctl.state().search_result.is_none());
        assert!(!ctl.state().searching());
        assert_eq!(*stub.flag_during_call.lock().unwrap(), vec![true]);
        let notices = ctl.take_notices();
        assert_eq!(notices[0].message, "Search failed: index offline");
    }

    #[tokio::test]
    async fn test_react_search_opens_preview() {
        let stub = StubApi::ready(5);
        *stub.search_reply.lock().unwrap() = Some(Ok(react_result()));
        let mut ctl = controller(&stub);
        ctl.initialize().await;

        ctl.handle_search("React developer").await.unwrap();

        let result = ctl.state().search_result.as_ref().unwrap();
        assert_eq!(result.match_count(), 1);
        let target = ctl.preview_match(0).unwrap();
        assert_eq!(target.url, "u1");
        assert_eq!(ctl.state().preview.as_ref().unwrap().name, "A");
        assert_eq!(ctl.preview_match(1), Err(ControllerError::NoSuchItem(1)));

        ctl.close_preview();
        assert!(ctl.state().preview.is_none());
    }

    #[test]
    fn test_page_change_is_pure() {
        let stub = StubApi::ready(0);
        let mut ctl = controller(&stub);

        ctl.handle_page_change(Page::Resumes);
        assert_eq!(ctl.state().page, Page::Resumes);
        ctl.handle_page_change(Page::Home);
        assert_eq!(ctl.state().page, Page::Home);
        assert!(stub.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_job_description_blank_text_is_rejected_locally() {
        let stub = StubApi::ready(0);
        let mut ctl = controller(&stub);

        let err = ctl
            .upload_job_description(JobDescription::Text("  ".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err, ControllerError::EmptyJobDescription);
        assert_eq!(
            ctl.job_description_status().error.as_deref(),
            Some("Please enter job description text")
        );
        assert_eq!(stub.count("upload-jd"), 0);
    }

    #[tokio::test]
    async fn test_job_description_outcomes_are_inline() {
        let stub = StubApi::ready(0);
        let mut ctl = controller(&stub);

        ctl.upload_job_description(JobDescription::Text("Senior Rust engineer".to_string()))
            .await
            .unwrap();
        assert!(ctl.job_description_status().success);
        assert!(!ctl.job_description_status().uploading.is_set());

        *stub.upload_ok.lock().unwrap() = false;
        let jd = JobDescription::File(UploadFile::new(
            "role.docx",
            crate::types::upload::DOCX_CONTENT_TYPE,
            b"docx".to_vec(),
        ));
        assert!(ctl.upload_job_description(jd).await.is_err());
        assert!(!ctl.job_description_status().success);
        assert_eq!(
            ctl.job_description_status().error.as_deref(),
            Some("Upload failed: HTTP 502 Bad Gateway error: upstream down")
        );
        assert!(ctl.take_notices().is_empty());
    }

    #[tokio::test]
    async fn test_download_writes_file_or_alerts() {
        let stub = StubApi::ready(1);
        let mut ctl = controller(&stub);
        let dir = tempfile::tempdir().unwrap();
        let resume = ResumeFile::new("alice.pdf", "http://files/alice.pdf");

        *stub.download_body.lock().unwrap() = Some(b"%PDF-alice".to_vec());
        let path = ctl.download_resume(&resume, dir.path()).await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"%PDF-alice".to_vec());

        *stub.download_body.lock().unwrap() = None;
        assert!(ctl.download_resume(&resume, dir.path()).await.is_err());
        assert_eq!(ctl.take_notices()[0].message, "Download failed: 404");
    }
}
