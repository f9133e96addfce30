//! Integration tests for the pool-dataset service.
//!
//! These tests drive the full client through a mock transport and assert
//! on the exact requests the client produces.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use truenas_client::errors::{NetworkError, TransportError, TrueNasError};
use truenas_client::mocks::MockHttpTransport;
use truenas_client::transport::HttpMethod;
use truenas_client::types::{DatasetType, ListOptions, PoolDatasetCreate, PropertySource};
use truenas_client::{ApiKeyAuth, TrueNasClient, TrueNasConfig};

/// Helper to create a test client with a mock transport.
fn create_test_client(transport: Arc<MockHttpTransport>) -> TrueNasClient {
    let config = TrueNasConfig::builder()
        .auth_provider(ApiKeyAuth::from_string("1-testkey"))
        .base_url("https://nas.local/api/v2.0")
        .build()
        .unwrap();

    TrueNasClient::with_transport(config, transport)
}

#[tokio::test]
async fn test_create_sends_one_post_with_minimal_body() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(
        200,
        r#"{"id": "tank/data", "name": "tank/data", "pool": "tank", "type": "FILESYSTEM"}"#,
    );
    let client = create_test_client(transport.clone());

    let body = PoolDatasetCreate::new("tank/data", DatasetType::Filesystem);

    // Act
    let dataset = client.pool_datasets().create(&body).await.unwrap();

    // Assert
    assert_eq!(dataset.name.as_deref(), Some("tank/data"));
    transport.verify_request_count(1);
    transport.verify_request(0, HttpMethod::Post, "/api/v2.0/pool/dataset");

    // The serialized body carries exactly the documented keys: the two
    // mandatory fields and nothing else.
    let request = transport.last_request().unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&request.body.unwrap()).unwrap();
    assert_eq!(sent, json!({"name": "tank/data", "type": "FILESYSTEM"}));
}

#[tokio::test]
async fn test_create_includes_set_optional_fields() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, r#"{"id": "tank/vol1", "type": "VOLUME"}"#);
    let client = create_test_client(transport.clone());

    let body = PoolDatasetCreate {
        volsize: Some(10737418240),
        volblocksize: Some(16384),
        sparse: Some(true),
        comments: Some("scratch volume".to_string()),
        ..PoolDatasetCreate::new("tank/vol1", DatasetType::Volume)
    };

    client.pool_datasets().create(&body).await.unwrap();

    let request = transport.last_request().unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&request.body.unwrap()).unwrap();
    assert_eq!(
        sent,
        json!({
            "name": "tank/vol1",
            "type": "VOLUME",
            "volsize": 10737418240i64,
            "volblocksize": 16384,
            "sparse": true,
            "comments": "scratch volume"
        })
    );
}

#[tokio::test]
async fn test_create_server_error_passes_through() {
    let transport = Arc::new(MockHttpTransport::new());
    let error_body = r#"{"message": "Dataset tank/data already exists", "errno": 17}"#;
    transport.enqueue_json_response(422, error_body);
    let client = create_test_client(transport.clone());

    let body = PoolDatasetCreate::new("tank/data", DatasetType::Filesystem);
    let error = client.pool_datasets().create(&body).await.unwrap_err();

    assert_eq!(error.status_code().map(|s| s.as_u16()), Some(422));
    assert_eq!(error.response_body(), Some(error_body));
    assert!(error.to_string().contains("already exists"));
}

#[tokio::test]
async fn test_get_builds_verbatim_id_path() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, r#"{"id": "tank/data", "name": "tank/data"}"#);
    let client = create_test_client(transport.clone());

    let dataset = client.pool_datasets().get("tank/data").await.unwrap();

    assert_eq!(dataset.id.as_deref(), Some("tank/data"));
    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Get);
    // Path-like ids keep their slashes, never re-encoded.
    assert_eq!(request.url.path(), "/api/v2.0/pool/dataset/id/tank/data");
    assert_eq!(request.url.query(), None);
}

#[tokio::test]
async fn test_get_decodes_nested_tree_and_properties() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(
        200,
        r#"{
            "id": "tank",
            "name": "tank",
            "pool": "tank",
            "type": "FILESYSTEM",
            "mountpoint": "/mnt/tank",
            "encryption": false,
            "key_loaded": false,
            "locked": false,
            "compression": {
                "parsed": "LZ4",
                "rawvalue": "lz4",
                "value": "LZ4",
                "source": "DEFAULT"
            },
            "children": [
                {
                    "id": "tank/data",
                    "name": "tank/data",
                    "type": "FILESYSTEM",
                    "compression": {
                        "parsed": "ZSTD",
                        "rawvalue": "zstd",
                        "value": "ZSTD",
                        "source": "LOCAL"
                    },
                    "children": []
                }
            ]
        }"#,
    );
    let client = create_test_client(transport.clone());

    let dataset = client.pool_datasets().get("tank").await.unwrap();

    assert_eq!(dataset.mountpoint.as_deref(), Some("/mnt/tank"));
    assert_eq!(dataset.encryption, Some(false));

    let root_compression = dataset.compression.unwrap();
    assert_eq!(root_compression.source, Some(PropertySource::Default));

    let children = dataset.children.unwrap();
    assert_eq!(children.len(), 1);
    let child_compression = children[0].compression.as_ref().unwrap();
    assert_eq!(child_compression.parsed, Some(json!("ZSTD")));
    assert_eq!(child_compression.rawvalue.as_deref(), Some("zstd"));
    assert_eq!(child_compression.value.as_deref(), Some("ZSTD"));
    assert_eq!(child_compression.source, Some(PropertySource::Local));
    assert_eq!(children[0].children.as_ref().unwrap().len(), 0);
}

#[tokio::test]
async fn test_get_not_found() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(404, r#"{"message": "Dataset does not exist"}"#);
    let client = create_test_client(transport.clone());

    let error = client.pool_datasets().get("tank/missing").await.unwrap_err();

    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_list_without_options_sends_no_query_string() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, r#"[{"id": "tank"}, {"id": "tank/data"}]"#);
    let client = create_test_client(transport.clone());

    let datasets = client.pool_datasets().list(None).await.unwrap();

    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[1].id.as_deref(), Some("tank/data"));

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url.path(), "/api/v2.0/pool/dataset");
    assert_eq!(request.url.query(), None);
}

#[tokio::test]
async fn test_list_with_options_appends_query_parameters() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "[]");
    let client = create_test_client(transport.clone());

    let options = ListOptions {
        limit: Some(10),
        offset: Some(5),
        sort: Some("name".to_string()),
        count: None,
    };
    client.pool_datasets().list(Some(&options)).await.unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.url.query(), Some("limit=10&offset=5&sort=name"));
}

#[tokio::test]
async fn test_list_with_empty_options_sends_no_query_string() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "[]");
    let client = create_test_client(transport.clone());

    client
        .pool_datasets()
        .list(Some(&ListOptions::default()))
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.url.query(), None);
}

#[tokio::test]
async fn test_delete_builds_verbatim_id_path_and_discards_body() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "null");
    let client = create_test_client(transport.clone());

    client.pool_datasets().delete("tank/data").await.unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.url.path(), "/api/v2.0/pool/dataset/id/tank/data");
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_delete_twice_surfaces_not_found() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "null");
    transport.enqueue_json_response(404, r#"{"message": "Dataset does not exist"}"#);
    let client = create_test_client(transport.clone());

    client.pool_datasets().delete("tank/data").await.unwrap();
    let error = client.pool_datasets().delete("tank/data").await.unwrap_err();

    assert!(error.is_not_found());
    transport.verify_request_count(2);
}

#[tokio::test]
async fn test_transport_timeout_surfaces_as_network_error() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_error(TransportError::Timeout("deadline exceeded".to_string()));
    let client = create_test_client(transport.clone());

    let error = client.pool_datasets().get("tank").await.unwrap_err();

    assert!(matches!(
        error,
        TrueNasError::Network(NetworkError::Timeout(_))
    ));
}

#[tokio::test]
async fn test_malformed_response_surfaces_as_response_error() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "not json at all");
    let client = create_test_client(transport.clone());

    let error = client.pool_datasets().get("tank").await.unwrap_err();

    assert!(matches!(error, TrueNasError::Response(_)));
}

#[tokio::test]
async fn test_requests_carry_auth_and_content_headers() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "[]");
    let client = create_test_client(transport.clone());

    client.pool_datasets().list(None).await.unwrap();

    transport.verify_header(0, "authorization", "Bearer 1-testkey");
    transport.verify_header(0, "content-type", "application/json");
    transport.verify_header(0, "accept", "application/json");
}
