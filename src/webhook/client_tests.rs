//! Tests for `ReqwestClient`.
//!
//! Request round trips run against a local `wiremock` server.

use super::{DeliveryMethod, HttpClient, HttpError, HttpRequest, ReqwestClient};
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn url_for(server: &MockServer, route: &str) -> url::Url {
    url::Url::parse(&format!("{}{route}", server.uri())).unwrap()
}

/// Returns a URL on a local port that was just released, so nothing listens.
fn closed_port_url() -> url::Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    url::Url::parse(&format!("http://{addr}/hook")).unwrap()
}

mod construction {
    use super::*;

    #[test]
    fn default_creates_same_as_new() {
        let client1 = ReqwestClient::new();
        let client2 = ReqwestClient::default();

        assert!(format!("{client1:?}").contains("ReqwestClient"));
        assert!(format!("{client2:?}").contains("ReqwestClient"));
    }

    #[test]
    fn from_client_accepts_custom_client() {
        let custom = reqwest::Client::builder()
            .user_agent("webhook-courier-tests")
            .build()
            .unwrap();
        let client = ReqwestClient::from_client(custom);

        assert!(format!("{client:?}").contains("ReqwestClient"));
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }
}

mod round_trip {
    use super::*;

    #[tokio::test]
    async fn sends_method_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(header("content-type", "application/json"))
            .and(body_bytes(br#"{"content":"hi"}"#.to_vec()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let request = HttpRequest::new(DeliveryMethod::Post, url_for(&server, "/hook"))
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            )
            .with_body(br#"{"content":"hi"}"#.to_vec());

        let response = ReqwestClient::new().request(request).await.unwrap();

        assert_eq!(response.status, http::StatusCode::NO_CONTENT);
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn error_status_is_a_response_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_string("You are being rate limited.")
                    .append_header("Retry-After", "2"),
            )
            .mount(&server)
            .await;

        let response = ReqwestClient::new()
            .request(HttpRequest::new(DeliveryMethod::Post, url_for(&server, "/hook")))
            .await
            .unwrap();

        assert_eq!(response.status, http::StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.body_text(), "You are being rate limited.");
        assert_eq!(response.retry_after(), Some(std::time::Duration::from_secs(2)));
    }

    #[tokio::test]
    async fn get_and_patch_use_their_methods() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"name":"hook"}"#))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ReqwestClient::new();
        let fetched = client
            .request(HttpRequest::new(DeliveryMethod::Get, url_for(&server, "/hook")))
            .await
            .unwrap();
        let patch = HttpRequest::new(DeliveryMethod::Patch, url_for(&server, "/hook"))
            .with_body(b"{}".to_vec());
        client.request(patch).await.unwrap();

        assert_eq!(fetched.body_text(), r#"{"name":"hook"}"#);
    }

    #[tokio::test]
    async fn closed_port_is_connection_error() {
        let result = ReqwestClient::new()
            .request(HttpRequest::new(DeliveryMethod::Post, closed_port_url()))
            .await;

        assert!(
            matches!(result, Err(HttpError::Connection(_))),
            "got {result:?}"
        );
    }
}
