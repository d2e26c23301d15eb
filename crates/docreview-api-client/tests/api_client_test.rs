use std::time::Duration;

use docreview_api_client::{ApiClient, DocumentApi, DocumentType, ReviewStatus, UploadRequest};
use docreview_core::{ClientError, ErrorMetadata};
use mockito::Matcher;
use serde_json::json;

fn client_for(server: &mockito::ServerGuard) -> ApiClient {
    ApiClient::new(&server.url(), Duration::from_secs(5)).unwrap()
}

fn passport_upload() -> UploadRequest {
    UploadRequest {
        document_base64: "iVBORw0KGgo=".to_string(),
        document_type: DocumentType::ProofOfCitizenship,
        student_id: "student123".to_string(),
        file_name: "passport.png".to_string(),
    }
}

#[tokio::test]
async fn upload_posts_json_body_and_reads_score() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "document": "iVBORw0KGgo=",
            "document_type": "Proof of Citizenship",
            "student_id": "student123",
            "file_name": "passport.png"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Document uploaded successfully", "document_id": "d1", "score": 87}"#)
        .create_async()
        .await;

    let response = client_for(&server)
        .upload_document(&passport_upload())
        .await
        .unwrap();

    assert_eq!(response.score, 87.0);
    assert_eq!(response.document_id.as_deref(), Some("d1"));
    mock.assert_async().await;
}

#[tokio::test]
async fn upload_error_body_is_extracted() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/upload")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Missing required field: file_name"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .upload_document(&passport_upload())
        .await
        .unwrap_err();

    match &err {
        ClientError::Server { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message.as_deref(), Some("Missing required field: file_name"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "Missing required field: file_name");
}

#[tokio::test]
async fn non_json_error_body_has_no_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/action-items")
        .with_status(500)
        .with_body("<html>Internal Server Error</html>")
        .create_async()
        .await;

    let err = client_for(&server).list_action_items().await.unwrap_err();
    assert_eq!(err.server_message(), None);
    assert_eq!(err.user_message(), "Unknown error");
}

#[tokio::test]
async fn action_items_keep_server_order() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/action-items")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"document_id": "z", "document_type": "Student W2", "student_id": "student123", "score": 4},
                {"document_id": "a", "document_type": "Proof of Citizenship", "student_id": "student123", "score": 9}
            ]"#,
        )
        .create_async()
        .await;

    let items = client_for(&server).list_action_items().await.unwrap();
    let ids: Vec<_> = items.iter().map(|i| i.document_id.as_str()).collect();
    assert_eq!(ids, vec!["z", "a"]);
}

#[tokio::test]
async fn malformed_action_items_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/action-items")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = client_for(&server).list_action_items().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn fetch_document_reads_headers() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/document/doc42")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_header("content-disposition", "attachment; filename=\"w2-2023.pdf\"")
        .with_body(b"%PDF-1.4\n".to_vec())
        .create_async()
        .await;

    let payload = client_for(&server).fetch_document("doc42").await.unwrap();
    assert_eq!(payload.declared_content_type, "application/pdf");
    assert_eq!(payload.filename, "w2-2023.pdf");
    assert_eq!(&payload.bytes[..], b"%PDF-1.4\n");
}

#[tokio::test]
async fn fetch_document_without_disposition_is_unknown() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/document/doc7")
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(vec![0x89, 0x50, 0x4E, 0x47])
        .create_async()
        .await;

    let payload = client_for(&server).fetch_document("doc7").await.unwrap();
    assert_eq!(payload.filename, "unknown");
}

#[tokio::test]
async fn fetch_missing_document_is_server_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/document/missing")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Document not found"}"#)
        .create_async()
        .await;

    let err = client_for(&server).fetch_document("missing").await.unwrap_err();
    assert_eq!(err.server_message(), Some("Document not found"));
}

#[tokio::test]
async fn submit_review_posts_status_label() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/review")
        .match_body(Matcher::Json(json!({
            "document_id": "doc42",
            "status": "Approved"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Document doc42 has been Approved"}"#)
        .create_async()
        .await;

    let ack = client_for(&server)
        .submit_review("doc42", ReviewStatus::Approved)
        .await
        .unwrap();

    assert_eq!(ack["message"], "Document doc42 has been Approved");
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Port 9 (discard) is not expected to accept HTTP connections.
    let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let err = client.list_action_items().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.is_recoverable());
}
