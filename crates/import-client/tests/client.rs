//! Client tests against an in-process service.

use std::time::Duration;

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

use import_client::{ApiClient, ClientConfig, ClientError, ImportApi};
use import_model::{Row, Table, TemplateType};

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(&ClientConfig::default().with_api_url(base_url)).unwrap()
}

fn sample_table() -> Table {
    let rows: Vec<Row> = vec![
        [("Email", "a@b.co"), ("Price", "12.5")].into_iter().collect(),
        [("Email", "c@d.co"), ("Price", "3")].into_iter().collect(),
    ];
    Table::from_rows(rows).unwrap()
}

async fn upload(mut multipart: Multipart) -> Json<Value> {
    let mut file_name = String::new();
    let mut size = 0usize;
    let mut template = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                file_name = field.file_name().unwrap_or_default().to_string();
                size = field.bytes().await.unwrap().len();
            }
            "template" => template = field.text().await.unwrap(),
            _ => {}
        }
    }
    Json(json!({
        "data": [{"file": file_name, "template": template, "size": size}],
        "emptyFields": ["Email"],
        "targetFields": [{"name": "Email", "validation": "@"}]
    }))
}

/// Echo the posted rows back as a base64 file.
async fn save_echo(Json(body): Json<Value>) -> Json<Value> {
    let rows = body["data"].to_string();
    Json(json!({
        "message": "Saved",
        "data": STANDARD.encode(rows),
        "filename": "../export.json",
        "contentType": "application/json"
    }))
}

#[tokio::test]
async fn uploads_multipart_form() {
    let base = spawn(Router::new().route("/api", post(upload))).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.csv");
    std::fs::write(&path, "Email\na@b.co\n").unwrap();

    let response = client(&base)
        .process_file(&path, TemplateType::Shopify)
        .await
        .unwrap();

    let row = &response.data.rows()[0];
    assert_eq!(row.get("file"), Some("orders.csv"));
    assert_eq!(row.get("template"), Some("shopify"));
    assert_eq!(row.get("size"), Some("13"));
    assert_eq!(response.target_fields[0].name, "Email");
}

#[tokio::test]
async fn unsupported_file_is_refused_before_sending() {
    let err = client("http://127.0.0.1:9/api")
        .process_file("notes.txt".as_ref(), TemplateType::Other)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::UnsupportedFile(_)));
}

#[tokio::test]
async fn upload_failure_status() {
    let router = Router::new().route("/api", post(|| async { StatusCode::BAD_GATEWAY }));
    let base = spawn(router).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.xlsx");
    std::fs::write(&path, b"PK").unwrap();

    let err = client(&base)
        .process_file(&path, TemplateType::Other)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 502, .. }));
}

#[tokio::test]
async fn save_round_trips_rows_through_download() {
    let base = spawn(Router::new().route("/api/save", post(save_echo))).await;
    let table = sample_table();

    let outcome = client(&base).save_data(&table).await.unwrap();

    assert_eq!(outcome.message.as_deref(), Some("Saved"));
    let download = outcome.download.expect("download");
    assert_eq!(download.safe_filename(), "export.json");
    assert_eq!(download.content_type, "application/json");
    let echoed: Table = serde_json::from_slice(&download.bytes).unwrap();
    assert_eq!(echoed, table);
}

#[tokio::test]
async fn payload_too_large_maps_to_message() {
    let router = Router::new().route(
        "/api/save",
        post(|| async { (StatusCode::PAYLOAD_TOO_LARGE, "too big") }),
    );
    let base = spawn(router).await;

    let err = client(&base).save_data(&sample_table()).await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 413, .. }));
    assert!(err.user_message().starts_with("The data size is too large"));
}

#[tokio::test]
async fn rejected_save_is_an_error() {
    let router = Router::new().route(
        "/api/save",
        post(|| async { Json(json!({"success": false, "message": "Quota exceeded"})) }),
    );
    let base = spawn(router).await;

    let err = client(&base).save_data(&sample_table()).await.unwrap_err();
    assert_eq!(err.user_message(), "Quota exceeded");
}

#[tokio::test]
async fn template_save_sends_name() {
    let router = Router::new().route(
        "/api/save/templates",
        post(|Json(body): Json<Value>| async move {
            Json(json!({"message": format!("Template {} saved", body["templateName"].as_str().unwrap_or("?"))}))
        }),
    );
    let base = spawn(router).await;

    let outcome = client(&base)
        .save_template(&sample_table(), "weekly")
        .await
        .unwrap();
    assert_eq!(outcome.message.as_deref(), Some("Template weekly saved"));
    assert!(outcome.download.is_none());
}

#[tokio::test]
async fn template_save_times_out() {
    let router = Router::new().route(
        "/api/save/templates",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"message": "late"}))
        }),
    );
    let base = spawn(router).await;
    let client = client(&base).with_template_timeout(Duration::from_millis(100));

    let err = client
        .save_template(&sample_table(), "slow")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Timeout { after } if after == Duration::from_millis(100)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn request_timeout_leaves_template_saves_alone() {
    let slow = || async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        Json(json!({"message": "Template slow saved"}))
    };
    let router = Router::new()
        .route("/api/save", post(slow))
        .route("/api/save/templates", post(slow));
    let base = spawn(router).await;
    let client = client(&base)
        .with_request_timeout(Duration::from_millis(50))
        .with_template_timeout(Duration::from_secs(5));

    let err = client.save_data(&sample_table()).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));

    let outcome = client
        .save_template(&sample_table(), "slow")
        .await
        .unwrap();
    assert_eq!(outcome.message.as_deref(), Some("Template slow saved"));
}

#[tokio::test]
async fn template_timeout_wins_over_a_shorter_request_timeout() {
    let router = Router::new().route(
        "/api/save/templates",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"message": "late"}))
        }),
    );
    let base = spawn(router).await;
    let client = client(&base)
        .with_request_timeout(Duration::from_millis(20))
        .with_template_timeout(Duration::from_millis(200));

    let err = client
        .save_template(&sample_table(), "slow")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Timeout { after } if after == Duration::from_millis(200)));
}
