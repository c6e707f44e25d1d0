use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::types::resume::{ResumeFile, SearchResult};

// ===== Service Request/Response Types =====

#[derive(Debug, Serialize, Deserialize)]
pub struct ResumeListResponse {
    #[serde(default)]
    pub resumes: Vec<ResumeFile>,
}

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}

/// Body of `/search`. The backend reports application errors inside an
/// otherwise successful response; a present, non-empty `error` wins over
/// any result fields and an empty one is ignored.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    body: serde_json::Map<String, serde_json::Value>,
}

impl SearchResponse {
    pub fn into_result(self) -> anyhow::Result<SearchResult> {
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            anyhow::bail!(error);
        }

        serde_json::from_value(serde_json::Value::Object(self.body))
            .context("Malformed search response")
    }
}

/// Acknowledgement of an upload. The body shape is owned by the backend.
pub type UploadAck = serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_wins_over_result_fields() {
        let body = r#"{"error":"index offline","agent_used":"skill_matcher","answer":"x"}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.to_string(), "index offline");
    }

    #[test]
    fn test_empty_error_keeps_result() {
        let body = r#"{"error":"","agent_used":"skill_matcher","answer":"A fits"}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let result = response.into_result().unwrap();
        assert_eq!(result.agent_used, "skill_matcher");
        assert_eq!(result.answer, "A fits");
    }

    #[test]
    fn test_null_error_keeps_result() {
        let body = r#"{"error":null,"agent_used":"general_analyzer","answer":"ok"}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(response.into_result().is_ok());
    }

    #[test]
    fn test_empty_error_without_result_is_malformed() {
        let response: SearchResponse = serde_json::from_str(r#"{"error":""}"#).unwrap();
        let err = response.into_result().unwrap_err();
        assert!(err.to_string().contains("Malformed search response"));
    }

    #[test]
    fn test_found_body() {
        let body = r#"{"agent_used":"general_analyzer","answer":"ok","matched_candidates":["A"]}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let result = response.into_result().unwrap();
        assert_eq!(result.agent_used, "general_analyzer");
        assert_eq!(result.matched_candidates, vec!["A".to_string()]);
    }

    #[test]
    fn test_missing_resumes_field_is_empty_list() {
        let list: ResumeListResponse = serde_json::from_str("{}").unwrap();
        assert!(list.resumes.is_empty());
    }
}
