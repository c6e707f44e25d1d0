// src/core/service_client.rs
//! HTTP adapter for the screening backend - JSON for reads and search, multipart for uploads

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::app_log;
use crate::config::ClientConfig;
use crate::utils::resolve_url;
use crate::types::{
    DatabaseStatus, JobDescription, ResumeFile, ResumeListResponse, SearchRequest,
    SearchResponse, SearchResult, UploadAck, UploadFile,
};

const STATUS_ENDPOINT: &str = "/status";
const RESUMES_ENDPOINT: &str = "/resumes";
const UPLOAD_ENDPOINT: &str = "/upload";
const UPLOAD_JD_ENDPOINT: &str = "/upload-jd";
const SEARCH_ENDPOINT: &str = "/search";

const RESUME_FIELD: &str = "files";
const JOB_DESCRIPTION_FIELD: &str = "file";

/// Remote operations the controller depends on. Every call either resolves
/// with parsed JSON or fails; what a failure means to the user is decided
/// by the caller.
#[async_trait]
pub trait ScreeningApi: Send + Sync {
    async fn fetch_status(&self) -> Result<DatabaseStatus>;

    async fn fetch_resumes(&self) -> Result<Vec<ResumeFile>>;

    async fn upload_resumes(&self, files: Vec<UploadFile>) -> Result<UploadAck>;

    async fn upload_job_description(&self, job_description: JobDescription) -> Result<UploadAck>;

    async fn search(&self, query: &str) -> Result<SearchResult>;

    /// Fetch a resume document. Relative URLs resolve against the API base.
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Generic POST request with JSON
    pub async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R>
    where
        T: serde::Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = self.url(endpoint);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        Self::parse_json(response).await
    }

    /// Generic GET request
    pub async fn get<R>(&self, endpoint: &str) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = self.url(endpoint);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        Self::parse_json(response).await
    }

    /// Generic multipart POST
    pub async fn post_multipart<R>(&self, endpoint: &str, form: Form) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = self.url(endpoint);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        Self::parse_json(response).await
    }

    async fn parse_json<R>(response: reqwest::Response) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        if status.is_success() {
            response
                .json::<R>()
                .await
                .context("Failed to parse JSON response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }
    }

    fn part(file: UploadFile) -> Result<Part> {
        Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(file.content_type)
            .context("Failed to create multipart")
    }
}

#[async_trait]
impl ScreeningApi for ServiceClient {
    async fn fetch_status(&self) -> Result<DatabaseStatus> {
        self.get(STATUS_ENDPOINT).await
    }

    async fn fetch_resumes(&self) -> Result<Vec<ResumeFile>> {
        let list: ResumeListResponse = self.get(RESUMES_ENDPOINT).await?;
        Ok(list.resumes)
    }

    async fn upload_resumes(&self, files: Vec<UploadFile>) -> Result<UploadAck> {
        let count = files.len();
        let mut form = Form::new();
        for file in files {
            form = form.part(RESUME_FIELD, Self::part(file)?);
        }

        app_log!(info, "Uploading {} resume(s) to {}", count, self.url(UPLOAD_ENDPOINT));
        let ack: UploadAck = self.post_multipart(UPLOAD_ENDPOINT, form).await?;
        app_log!(info, "Upload successful: {}", ack);
        Ok(ack)
    }

    async fn upload_job_description(&self, job_description: JobDescription) -> Result<UploadAck> {
        let file = job_description.into_upload_file();
        app_log!(info, "Uploading job description {}", file.file_name);

        let form = Form::new().part(JOB_DESCRIPTION_FIELD, Self::part(file)?);
        self.post_multipart(UPLOAD_JD_ENDPOINT, form).await
    }

    async fn search(&self, query: &str) -> Result<SearchResult> {
        app_log!(trace, "Calling search service: {}", self.url(SEARCH_ENDPOINT));

        let response: SearchResponse = self
            .post_json(SEARCH_ENDPOINT, &SearchRequest { query })
            .await?;

        response.into_result()
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let url = resolve_url(&self.base_url, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Download failed with status {}", status);
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read download body")?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl<T: ScreeningApi + ?Sized> ScreeningApi for std::sync::Arc<T> {
    async fn fetch_status(&self) -> Result<DatabaseStatus> {
        (**self).fetch_status().await
    }

    async fn fetch_resumes(&self) -> Result<Vec<ResumeFile>> {
        (**self).fetch_resumes().await
    }

    async fn upload_resumes(&self, files: Vec<UploadFile>) -> Result<UploadAck> {
        (**self).upload_resumes(files).await
    }

    async fn upload_job_description(&self, job_description: JobDescription) -> Result<UploadAck> {
        (**self).upload_job_description(job_description).await
    }

    async fn search(&self, query: &str) -> Result<SearchResult> {
        (**self).search(query).await
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        (**self).download(url).await
    }
}
