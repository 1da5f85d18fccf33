//! Tests for `Webhook` verbs.

use super::{
    DeliveryEngine, FixedJitter, HttpClient, HttpError, HttpRequest, HttpResponse,
    RequestOptions, Webhook,
};
use crate::payload::{Embed, Message, WebhookProfile};
use crate::time::InstantSleeper;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Records every request and answers with a fixed status.
#[derive(Debug)]
struct RecordingClient {
    status: http::StatusCode,
    body: &'static str,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingClient {
    fn new(status: http::StatusCode, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for Arc<RecordingClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        Ok(HttpResponse::new(
            self.status,
            http::HeaderMap::new(),
            self.body.as_bytes().to_vec(),
        ))
    }
}

fn webhook(
    client: &Arc<RecordingClient>,
) -> Webhook<Arc<RecordingClient>, InstantSleeper, FixedJitter> {
    let url = url::Url::parse("https://hooks.example.com/api/webhooks/1/token").unwrap();
    Webhook::new(
        DeliveryEngine::new(Arc::clone(client), url)
            .with_sleeper(InstantSleeper)
            .with_jitter(FixedJitter(0.0)),
    )
}

fn body_json(req: &HttpRequest) -> serde_json::Value {
    serde_json::from_slice(req.body.as_deref().unwrap()).unwrap()
}

mod execute {
    use super::*;

    #[tokio::test]
    async fn posts_message_json() {
        let client = RecordingClient::new(http::StatusCode::NO_CONTENT, "");
        let hook = webhook(&client);
        let message = Message {
            username: Some("ci".to_string()),
            ..Message::from_embeds([Embed {
                title: Some("Build passed".to_string()),
                color: Some(0x2e_cc71),
                ..Embed::default()
            }])
        };

        let outcome = hook.execute(&message).await.unwrap();

        assert!(outcome.is_ok());
        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, http::Method::POST);
        assert_eq!(
            body_json(&requests[0]),
            json!({
                "username": "ci",
                "embeds": [{ "title": "Build passed", "color": 3_066_993 }]
            })
        );
    }

    #[tokio::test]
    async fn execute_with_applies_options() {
        let client = RecordingClient::new(http::StatusCode::NO_CONTENT, "");
        let hook = webhook(&client);
        let options = RequestOptions::new().with_header("X-Trace", "abc");

        hook.execute_with(&Message::text("hi"), &options)
            .await
            .unwrap();

        let requests = client.requests();
        assert_eq!(requests[0].headers.get("x-trace").unwrap(), "abc");
    }
}

mod fetch {
    use super::*;

    #[tokio::test]
    async fn gets_without_body() {
        let client = RecordingClient::new(http::StatusCode::OK, r#"{"name":"alerts"}"#);
        let hook = webhook(&client);

        let outcome = hook.fetch().await.unwrap();

        assert_eq!(outcome.body(), Some(r#"{"name":"alerts"}"#));
        let requests = client.requests();
        assert_eq!(requests[0].method, http::Method::GET);
        assert!(requests[0].body.is_none());
        assert!(requests[0].headers.get(http::header::CONTENT_TYPE).is_none());
    }
}

mod modify {
    use super::*;

    #[tokio::test]
    async fn patches_profile_json() {
        let client = RecordingClient::new(http::StatusCode::OK, "{}");
        let hook = webhook(&client);
        let profile = WebhookProfile {
            name: Some("alerts".to_string()),
            avatar: None,
        };

        hook.modify(&profile).await.unwrap();

        let requests = client.requests();
        assert_eq!(requests[0].method, http::Method::PATCH);
        assert_eq!(body_json(&requests[0]), json!({ "name": "alerts" }));
    }

    #[tokio::test]
    async fn rejected_modify_reports_outcome() {
        let client = RecordingClient::new(http::StatusCode::UNAUTHORIZED, "401: Unauthorized");
        let hook = webhook(&client);

        let outcome = hook.modify(&WebhookProfile::default()).await.unwrap();

        assert_eq!(outcome.status_code(), 401);
        assert_eq!(outcome.error_message(), Some("401: Unauthorized"));
        assert_eq!(client.requests().len(), 1);
    }
}

#[test]
fn engine_accessor_exposes_url() {
    let client = RecordingClient::new(http::StatusCode::OK, "");
    let hook = webhook(&client);

    assert_eq!(hook.engine().url().path(), "/api/webhooks/1/token");
}
