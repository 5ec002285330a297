//! Lenient JSON body extractor.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

/// JSON extractor that treats an empty body as `T::default()`.
///
/// Request DTOs model required fields as `Option`s so the service layer can
/// report the first missing field by name. A request without a body therefore
/// has to reach the service as "every field missing" instead of being rejected
/// here. The `Content-Type` header is not enforced.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
/// use serde::Deserialize;
///
/// #[derive(Default, Deserialize)]
/// struct NewMake {
///     make_name: Option<String>,
/// }
///
/// async fn create_make(JsonBody(payload): JsonBody<NewMake>) -> String {
///     format!("{:?}", payload.make_name)
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| AppError::BadRequest(describe(&e)))
    }
}

/// Location and kind of a parse failure, never the offending value.
///
/// serde_json's own `Display` quotes scalars from the input, which may be a
/// password.
fn describe(err: &serde_json::Error) -> String {
    let kind = match err.classify() {
        Category::Syntax => "malformed JSON",
        Category::Data => "unexpected shape",
        Category::Eof => "unexpected end of input",
        Category::Io => "unreadable input",
    };
    format!(
        "Invalid JSON body: {} at line {} column {}",
        kind,
        err.line(),
        err.column()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Payload {
        name: Option<String>,
    }

    fn request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_body_is_default() {
        let JsonBody(payload) = JsonBody::<Payload>::from_request(request(""), &())
            .await
            .unwrap();
        assert_eq!(payload, Payload::default());
    }

    #[tokio::test]
    async fn test_null_field_is_none() {
        let JsonBody(payload) = JsonBody::<Payload>::from_request(request(r#"{"name":null}"#), &())
            .await
            .unwrap();
        assert_eq!(payload.name, None);
    }

    #[tokio::test]
    async fn test_present_field_is_parsed() {
        let JsonBody(payload) = JsonBody::<Payload>::from_request(request(r#"{"name":"red"}"#), &())
            .await
            .unwrap();
        assert_eq!(payload.name.as_deref(), Some("red"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let result = JsonBody::<Payload>::from_request(request("{not json"), &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg.starts_with("Invalid JSON body")));
    }

    #[tokio::test]
    async fn test_rejected_values_are_not_echoed() {
        for body in [r#""1Aa!2Bb@""#, r#"{"name":12345678}"#] {
            let result = JsonBody::<Payload>::from_request(request(body), &()).await;
            let Err(AppError::BadRequest(msg)) = result else {
                panic!("expected bad request for {body}");
            };
            assert!(msg.starts_with("Invalid JSON body: unexpected shape at line 1"), "{msg}");
            assert!(!msg.contains("1Aa!2Bb@"), "{msg}");
            assert!(!msg.contains("12345678"), "{msg}");
        }
    }

    #[tokio::test]
    async fn test_truncated_body_reports_position() {
        let result = JsonBody::<Payload>::from_request(request(r#"{"name":"#), &()).await;
        assert!(matches!(
            result,
            Err(AppError::BadRequest(msg))
                if msg.starts_with("Invalid JSON body: unexpected end of input at line 1")
        ));
    }
}
