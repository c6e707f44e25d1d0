// src/utils.rs
use anyhow::Result;
use std::path::Path;

use crate::types::upload::{DOCX_CONTENT_TYPE, PDF_CONTENT_TYPE, TEXT_CONTENT_TYPE};

/// Normalize backend base URL: trimmed, no trailing slash
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Deployment sub-path always starts and ends with a slash
pub fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Absolute URLs pass through, relative ones are joined to `base_url`
pub fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), url.trim_start_matches('/'))
    }
}

/// A typed query is only dispatched once it is longer than `min_len`
/// characters after trimming.
pub fn is_dispatchable_query(query: &str, min_len: usize) -> bool {
    query.trim().chars().count() > min_len
}

/// Lowercased extension, `None` for names without one
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Case-insensitive extension check; names without an extension never pass.
pub fn has_allowed_extension(file_name: &str, allowed: &[&str]) -> bool {
    extension_of(file_name).is_some_and(|ext| allowed.contains(&ext.as_str()))
}

/// Get content type for an uploadable file
pub fn content_type_for(file_name: &str) -> Result<&'static str> {
    match extension_of(file_name).as_deref() {
        Some("pdf") => Ok(PDF_CONTENT_TYPE),
        Some("docx") => Ok(DOCX_CONTENT_TYPE),
        Some("txt") => Ok(TEXT_CONTENT_TYPE),
        _ => anyhow::bail!("Unsupported file format: {}", file_name),
    }
}

pub fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .ok_or_else(|| anyhow::anyhow!("Path has no file name: {}", path.display()))
}

/// Keep only the final path component of a server-supplied file name
pub fn sanitize_file_name(name: &str) -> String {
    let last = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    match last {
        "" | "." | ".." => "download".to_string(),
        other => other.to_string(),
    }
}
