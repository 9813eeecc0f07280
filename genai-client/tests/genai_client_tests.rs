use mockito::{Matcher, Server};
use outfit_stylist_core::{EncodedImage, ImageService, PromptPart, ServiceError};
use outfit_stylist_genai_client::{ClientError, GeminiImageClient};
use serde_json::json;
use serial_test::serial;
use std::io::Write;
use std::time::Duration;

const GENERATE_PATH: &str = "/v1beta/models/test-image-model:generateContent";

/// Keep reqwest from routing localhost traffic through a proxy
fn disable_proxy_for_test() {
    std::env::remove_var("HTTP_PROXY");
    std::env::remove_var("HTTPS_PROXY");
    std::env::remove_var("http_proxy");
    std::env::remove_var("https_proxy");
    std::env::set_var("NO_PROXY", "localhost,127.0.0.1");
}

fn client_for(server: &Server, timeout: Duration) -> GeminiImageClient {
    GeminiImageClient::with_options(
        "test-key",
        format!("{}/v1beta", server.url()),
        "test-image-model",
        timeout,
    )
    .unwrap()
}

fn sample_parts() -> Vec<PromptPart> {
    vec![
        PromptPart::text("compose an outfit"),
        PromptPart::Image(EncodedImage::png(vec![1, 2, 3])),
    ]
}

#[tokio::test]
#[serial]
async fn test_generate_returns_image() {
    disable_proxy_for_test();
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": "compose an outfit" },
                    { "inlineData": { "mimeType": "image/png", "data": "AQID" } }
                ]
            }],
            "generationConfig": { "responseModalities": ["IMAGE"] }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": { "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "BAUG" } }
                    ]}
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let result = client.generate(&sample_parts()).await;

    let image = result.unwrap().unwrap();
    assert_eq!(image, EncodedImage::png(vec![4, 5, 6]));
    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn test_generate_without_image_is_none() {
    disable_proxy_for_test();
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{ "content": { "parts": [{ "text": "I cannot do that" }] } }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let result = client.generate(&sample_parts()).await;

    assert!(result.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_generate_api_error() {
    disable_proxy_for_test();
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(429)
        .with_body(
            json!({
                "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let result = client.generate(&sample_parts()).await;

    match result {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 429);
            assert_eq!(message, "RESOURCE_EXHAUSTED: Quota exceeded");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
#[serial]
async fn test_generate_malformed_body() {
    disable_proxy_for_test();
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let result = client.generate(&sample_parts()).await;

    assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
}

#[tokio::test]
#[serial]
async fn test_image_service_maps_errors() {
    disable_proxy_for_test();
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let result = client.generate_image(&sample_parts()).await;

    assert_eq!(
        result,
        Err(ServiceError::Rejected {
            status: 500,
            message: "boom".to_string()
        })
    );
}

#[tokio::test]
#[serial]
async fn test_generate_network_error_connection_refused() {
    disable_proxy_for_test();
    let client = GeminiImageClient::with_options(
        "test-key",
        "http://127.0.0.1:9",
        "test-image-model",
        Duration::from_secs(5),
    )
    .unwrap();

    let result = client.generate(&sample_parts()).await;

    assert!(matches!(result, Err(ClientError::Network(_))));
}

#[tokio::test]
#[serial]
async fn test_generate_timeout() {
    disable_proxy_for_test();
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_chunked_body(|w| {
            // longer than the client timeout
            std::thread::sleep(Duration::from_secs(3));
            w.write_all(b"{}")
        })
        .create_async()
        .await;

    let client = client_for(&server, Duration::from_secs(1));
    let result = client.generate(&sample_parts()).await;

    assert!(matches!(
        result,
        Err(ClientError::Timeout) | Err(ClientError::InvalidResponse(_))
    ));
}
