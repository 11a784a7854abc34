//! Twitter HTTP error classification.
//!
//! Twitter v1.1 reports failures as `{"errors": [{"code": 88, "message": "..."}]}`;
//! a few write routes use a flat `{"error": "..."}` instead, and some error
//! paths only carry text. Messages are kept losslessly when they exist.

use serde_json::Value;

use super::http::HttpTransportResponse;
use crate::error::WebserviceError;
use crate::types::QueryAction;

/// `errors[0].message`
pub fn errors_message(json: &Value) -> Option<String> {
    json.get("errors")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("message"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Flat `error` field.
pub fn error_field_message(json: &Value) -> Option<String> {
    json.get("error")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Unix timestamp from `x-rate-limit-reset`.
fn rate_limit_reset(resp: &HttpTransportResponse) -> Option<u64> {
    resp.header("x-rate-limit-reset")
        .and_then(|v| v.trim().parse().ok())
}

/// Classify a read response. `None` means the response is a success.
///
/// | status        | outcome             |
/// |---------------|---------------------|
/// | 404           | `NotFound`          |
/// | 429           | `RateLimitExceeded` |
/// | other non-2xx | `UnknownError`      |
pub fn classify_twitter_http_error(resp: &HttpTransportResponse) -> Option<WebserviceError> {
    let message = || {
        resp.json()
            .as_ref()
            .and_then(errors_message)
            .unwrap_or_else(|| resp.text())
    };

    match resp.status {
        404 => Some(WebserviceError::NotFound(message())),
        429 => Some(WebserviceError::rate_limited(
            message(),
            rate_limit_reset(resp),
        )),
        _ if !resp.is_success() => Some(WebserviceError::unknown(resp.status, message())),
        _ => None,
    }
}

/// Classify a create/update/delete response. `None` means the write succeeded.
///
/// Create routes report `error`, update and destroy routes report
/// `errors[0].message`; the other shape and then the raw text are fallbacks.
pub fn classify_write_error(
    action: QueryAction,
    resp: &HttpTransportResponse,
) -> Option<WebserviceError> {
    if resp.is_success() {
        return None;
    }

    let json = resp.json();
    let message = json.as_ref().and_then(|json| match action {
        QueryAction::Create => error_field_message(json).or_else(|| errors_message(json)),
        _ => errors_message(json).or_else(|| error_field_message(json)),
    });

    Some(WebserviceError::RequestFailed {
        status: resp.status,
        message: message.unwrap_or_else(|| resp.text()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn twitter_error(code: i64, message: &str) -> Value {
        json!({"errors": [{"code": code, "message": message}]})
    }

    #[test]
    fn not_found_keeps_the_api_message() {
        let resp = HttpTransportResponse::json_body(
            404,
            &twitter_error(34, "Sorry, that page does not exist."),
        );
        assert_eq!(
            classify_twitter_http_error(&resp),
            Some(WebserviceError::NotFound(
                "Sorry, that page does not exist.".into()
            ))
        );
    }

    #[test]
    fn rate_limit_carries_message_code_and_reset() {
        let resp = HttpTransportResponse::json_body(429, &twitter_error(88, "Rate limit exceeded"))
            .with_header("x-rate-limit-reset", "1700000000");
        match classify_twitter_http_error(&resp) {
            Some(WebserviceError::RateLimitExceeded {
                message,
                code,
                reset_at,
            }) => {
                assert_eq!(message, "Rate limit exceeded");
                assert_eq!(code, 429);
                assert_eq!(reset_at, Some(1_700_000_000));
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn rate_limit_without_structured_body_uses_text() {
        let resp = HttpTransportResponse::new(429, "Too Many Requests");
        assert_eq!(
            classify_twitter_http_error(&resp),
            Some(WebserviceError::rate_limited("Too Many Requests", None))
        );
    }

    #[test]
    fn other_failures_are_unknown_with_structured_message() {
        let resp = HttpTransportResponse::json_body(401, &twitter_error(32, "Could not authenticate you."));
        assert_eq!(
            classify_twitter_http_error(&resp),
            Some(WebserviceError::unknown(401, "Could not authenticate you."))
        );
    }

    #[test]
    fn other_failures_fall_back_to_raw_text() {
        let resp = HttpTransportResponse::new(503, "<html>Over capacity</html>");
        assert_eq!(
            classify_twitter_http_error(&resp),
            Some(WebserviceError::unknown(503, "<html>Over capacity</html>"))
        );

        let no_message = HttpTransportResponse::json_body(500, &json!({"errors": []}));
        assert_eq!(
            classify_twitter_http_error(&no_message),
            Some(WebserviceError::unknown(500, r#"{"errors":[]}"#))
        );
    }

    #[test]
    fn success_is_not_classified() {
        let resp = HttpTransportResponse::json_body(200, &json!([]));
        assert_eq!(classify_twitter_http_error(&resp), None);
    }

    #[test]
    fn create_failures_read_the_flat_error_field() {
        let resp = HttpTransportResponse::json_body(403, &json!({"error": "List limit reached"}));
        assert_eq!(
            classify_write_error(QueryAction::Create, &resp),
            Some(WebserviceError::RequestFailed {
                status: 403,
                message: "List limit reached".into()
            })
        );
    }

    #[test]
    fn update_and_delete_failures_read_errors_array() {
        let resp = HttpTransportResponse::json_body(
            403,
            &twitter_error(220, "Your credentials do not allow access to this resource."),
        );
        for action in [QueryAction::Update, QueryAction::Delete] {
            assert_eq!(
                classify_write_error(action, &resp),
                Some(WebserviceError::RequestFailed {
                    status: 403,
                    message: "Your credentials do not allow access to this resource.".into()
                })
            );
        }
    }

    #[test]
    fn write_success_is_not_classified() {
        let resp = HttpTransportResponse::json_body(200, &json!({"id": 1}));
        assert_eq!(classify_write_error(QueryAction::Create, &resp), None);
    }
}
