//! Tests for HTTP request/response types.

use super::{DeliveryMethod, HttpError, HttpRequest, HttpResponse};
use std::time::Duration;

mod delivery_method {
    use super::*;

    #[test]
    fn converts_to_http_methods() {
        assert_eq!(http::Method::from(DeliveryMethod::Get), http::Method::GET);
        assert_eq!(http::Method::from(DeliveryMethod::Post), http::Method::POST);
        assert_eq!(http::Method::from(DeliveryMethod::Patch), http::Method::PATCH);
    }

    #[test]
    fn only_get_has_no_body() {
        assert!(!DeliveryMethod::Get.has_body());
        assert!(DeliveryMethod::Post.has_body());
        assert!(DeliveryMethod::Patch.has_body());
    }
}

mod http_request {
    use super::*;

    #[test]
    fn new_creates_request_with_method_and_url() {
        let url = url::Url::parse("https://example.com/api").unwrap();
        let req = HttpRequest::new(DeliveryMethod::Patch, url.clone());

        assert_eq!(req.method, http::Method::PATCH);
        assert_eq!(req.url, url);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn with_header_replaces_existing_value() {
        let url = url::Url::parse("https://example.com/").unwrap();
        let req = HttpRequest::new(DeliveryMethod::Post, url)
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("text/plain"),
            )
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(req.headers.get_all(http::header::CONTENT_TYPE).iter().count(), 1);
        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn with_body_sets_body() {
        let url = url::Url::parse("https://example.com/").unwrap();
        let req = HttpRequest::new(DeliveryMethod::Post, url).with_body(b"{}".to_vec());

        assert_eq!(req.body, Some(b"{}".to_vec()));
    }
}

mod http_response {
    use super::*;

    fn with_headers(headers: &[(&'static str, &'static str)]) -> HttpResponse {
        let mut map = http::HeaderMap::new();
        for (name, value) in headers {
            map.insert(*name, http::HeaderValue::from_static(value));
        }
        HttpResponse::new(http::StatusCode::TOO_MANY_REQUESTS, map, Vec::new())
    }

    #[test]
    fn is_success_for_2xx() {
        let ok = HttpResponse::new(http::StatusCode::NO_CONTENT, http::HeaderMap::new(), vec![]);
        let err = HttpResponse::new(http::StatusCode::NOT_FOUND, http::HeaderMap::new(), vec![]);

        assert!(ok.is_success());
        assert!(!err.is_success());
    }

    #[test]
    fn body_text_replaces_invalid_utf8() {
        let body = b"ok\xff".to_vec();
        let resp = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), body);
        assert_eq!(resp.body_text(), "ok\u{fffd}");
    }

    #[test]
    fn body_text_of_empty_body_is_empty() {
        let resp = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), Vec::new());
        assert!(resp.body_text().is_empty());
    }

    #[test]
    fn retry_after_reads_seconds() {
        let resp = with_headers(&[("retry-after", "3")]);
        assert_eq!(resp.retry_after(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn retry_after_accepts_fractions() {
        let resp = with_headers(&[("retry-after", "0.5")]);
        assert_eq!(resp.retry_after(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn retry_after_prefers_standard_header() {
        let resp = with_headers(&[("retry-after", "2"), ("x-ratelimit-reset-after", "9")]);
        assert_eq!(resp.retry_after(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn retry_after_falls_back_to_ratelimit_reset() {
        let resp = with_headers(&[("x-ratelimit-reset-after", "1.25")]);
        assert_eq!(resp.retry_after(), Some(Duration::from_millis(1250)));
    }

    #[test]
    fn retry_after_absent_is_none() {
        assert_eq!(with_headers(&[]).retry_after(), None);
    }

    #[test]
    fn retry_after_discards_unusable_values() {
        for value in ["soon", "-1", "0", "NaN", "inf", "Wed, 21 Oct 2015 07:28:00 GMT", "1e400"] {
            let resp = with_headers(&[("retry-after", value)]);
            assert_eq!(resp.retry_after(), None, "value {value:?}");
        }
    }
}

mod http_error {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(HttpError::Timeout.to_string(), "Request timed out");
        assert_eq!(HttpError::Cancelled.to_string(), "Request cancelled");
        assert_eq!(
            HttpError::InvalidUrl("relative URL".to_string()).to_string(),
            "Invalid URL: relative URL"
        );
    }

    #[test]
    fn connection_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = HttpError::Connection(Box::new(io));

        assert_eq!(error.to_string(), "Connection error: refused");
        assert!(std::error::Error::source(&error).is_some());
    }
}
