use resume_screener::core::{ScreeningApi, ServiceClient};
use resume_screener::types::{JobDescription, UploadFile};
use resume_screener::ClientConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one HTTP response and hand back the raw request.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        request
    });

    (base_url, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];

    loop {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let headers = text[..header_end].to_ascii_lowercase();
        let body_len = raw.len() - header_end - 4;

        if let Some(len) = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
        {
            if body_len >= len {
                break;
            }
        } else if headers.contains("transfer-encoding: chunked") {
            if text.ends_with("0\r\n\r\n") {
                break;
            }
        } else {
            break;
        }
    }

    String::from_utf8_lossy(&raw).into_owned()
}

fn client(base_url: &str) -> ServiceClient {
    ServiceClient::new(&ClientConfig::new(base_url)).unwrap()
}

#[tokio::test]
async fn test_fetch_status_parses_chunks() {
    let (base_url, server) = serve_once("200 OK", r#"{"chunks": 42}"#).await;

    let status = client(&base_url).fetch_status().await.unwrap();
    assert_eq!(status.chunks, 42);

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /status HTTP/1.1"));
}

#[tokio::test]
async fn test_fetch_resumes_unwraps_list() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"resumes": [{"filename": "alice.pdf", "url": "/files/alice.pdf"}]}"#,
    )
    .await;

    let resumes = client(&base_url).fetch_resumes().await.unwrap();
    assert_eq!(resumes.len(), 1);
    assert_eq!(resumes[0].filename, "alice.pdf");

    server.await.unwrap();
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let (base_url, server) = serve_once("500 Internal Server Error", r#"{"detail": "boom"}"#).await;

    let err = client(&base_url).fetch_status().await.unwrap_err();
    assert!(err.to_string().contains("500"));

    server.await.unwrap();
}

#[tokio::test]
async fn test_search_sends_query_and_parses_result() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"agent_used": "skill_matcher", "answer": "A fits", "matched_candidates": ["A"],
            "preview_urls": [{"name": "A", "resume_url": "u1"}]}"#,
    )
    .await;

    let result = client(&base_url).search("React developer").await.unwrap();
    assert_eq!(result.agent_used, "skill_matcher");
    assert_eq!(result.preview(0).unwrap().resume_url, "u1");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /search HTTP/1.1"));
    assert!(request.contains(r#"{"query":"React developer"}"#));
}

#[tokio::test]
async fn test_search_error_body_is_an_error() {
    let (base_url, server) = serve_once("200 OK", r#"{"error": "No resumes indexed"}"#).await;

    let err = client(&base_url).search("React").await.unwrap_err();
    assert!(err.to_string().contains("No resumes indexed"));

    server.await.unwrap();
}

#[tokio::test]
async fn test_upload_resumes_sends_multipart_files() {
    let (base_url, server) = serve_once("200 OK", r#"{"message": "ok"}"#).await;

    let files = vec![
        UploadFile::new("a.pdf", "application/pdf", b"%PDF-a".to_vec()),
        UploadFile::new("b.pdf", "application/pdf", b"%PDF-b".to_vec()),
    ];
    let ack = client(&base_url).upload_resumes(files).await.unwrap();
    assert_eq!(ack["message"], "ok");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /upload HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("multipart/form-data"));
    assert_eq!(request.matches(r#"name="files""#).count(), 2);
    assert!(request.contains(r#"filename="a.pdf""#));
    assert!(request.contains(r#"filename="b.pdf""#));
}

#[tokio::test]
async fn test_job_description_text_goes_as_file_field() {
    let (base_url, server) = serve_once("200 OK", r#"{"message": "ok"}"#).await;

    client(&base_url)
        .upload_job_description(JobDescription::Text("Senior Rust engineer".to_string()))
        .await
        .unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /upload-jd HTTP/1.1"));
    assert!(request.contains(r#"name="file""#));
    assert!(request.contains(r#"filename="job_description.txt""#));
    assert!(request.contains("Senior Rust engineer"));
}

#[tokio::test]
async fn test_download_resolves_relative_url() {
    let (base_url, server) = serve_once("200 OK", "%PDF-1.4").await;

    let bytes = client(&base_url).download("/files/alice.pdf").await.unwrap();
    assert_eq!(bytes, b"%PDF-1.4");

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /files/alice.pdf HTTP/1.1"));
}
