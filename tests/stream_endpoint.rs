use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use jobcast::{app, standard_registry, ServerConfig};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use tower::ServiceExt;

fn server() -> Router {
    app(&ServerConfig::default(), standard_registry())
}

async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn frames(body: &str) -> Vec<&str> {
    body.split("\n\n").filter(|frame| !frame.is_empty()).collect()
}

#[tokio::test(start_paused = true)]
async fn test_api_pagination_streams_five_pages() {
    let started = tokio::time::Instant::now();

    let (status, body) = get_text(server(), "/stream?job=job1").await;

    assert_eq!(status, StatusCode::OK);
    let expected: Vec<String> = (1..=5)
        .map(|k| format!("data: Fetched page {} from API", k))
        .collect();
    assert_eq!(frames(&body), expected);

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(4), "finished too fast: {:?}", elapsed);
    assert!(elapsed <= Duration::from_secs(30), "took too long: {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_directory_walk_reports_subdirectories() {
    let temp_dir = tempdir().unwrap();
    fs::create_dir(temp_dir.path().join("beta")).unwrap();
    fs::create_dir(temp_dir.path().join("alpha")).unwrap();
    fs::write(temp_dir.path().join("readme.txt"), "ignored").unwrap();

    let uri = format!("/stream?job=job2&path={}", temp_dir.path().display());
    let (status, body) = get_text(server(), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        frames(&body),
        vec!["data: Found directory: alpha", "data: Found directory: beta"]
    );
}

#[tokio::test]
async fn test_directory_walk_missing_directory() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("does-not-exist");

    let uri = format!("/stream?job=job2&path={}", missing.display());
    let (status, body) = get_text(server(), &uri).await;

    assert_eq!(status, StatusCode::OK);
    let frames = frames(&body);
    assert_eq!(frames.len(), 1);
    assert!(
        frames[0].starts_with("event: error\ndata: Error reading directory: "),
        "unexpected frame: {:?}",
        frames[0]
    );
}

#[tokio::test]
async fn test_directory_walk_blank_path_is_not_current_directory() {
    let (status, body) = get_text(server(), "/stream?job=job2&path=%20%20").await;

    assert_eq!(status, StatusCode::OK);
    let frames = frames(&body);
    assert_eq!(frames.len(), 1);
    assert!(frames[0].starts_with("event: error\ndata: Error reading directory: "));
}

#[tokio::test]
async fn test_unknown_job_single_diagnostic() {
    let (status, body) = get_text(server(), "/stream?job=doesnotexist").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(frames(&body), vec!["event: error\ndata: Invalid job selected."]);
}

#[tokio::test]
async fn test_static_files_served() {
    let static_dir = tempdir().unwrap();
    fs::write(static_dir.path().join("app.css"), "body { color: black; }").unwrap();
    let config = ServerConfig {
        static_dir: static_dir.path().to_string_lossy().into_owned(),
        ..ServerConfig::default()
    };

    let (status, body) = get_text(app(&config, standard_registry()), "/static/app.css").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "body { color: black; }");
}
