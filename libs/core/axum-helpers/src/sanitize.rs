//! Sanitize-before-serialize for outward-facing text.
//!
//! Any response body that echoes text read from storage goes through
//! [`SanitizedJson`], which runs [`Sanitize::sanitize`] on the value right
//! before it is serialized. Types opt in by implementing [`Sanitize`] and
//! passing each of their text fields through [`escape_html`].

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Escape markup so stored text cannot inject tags or scripts into a client.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Values whose text fields must be cleansed before leaving the process.
pub trait Sanitize {
    fn sanitize(self) -> Self;
}

impl<T: Sanitize> Sanitize for Vec<T> {
    fn sanitize(self) -> Self {
        self.into_iter().map(Sanitize::sanitize).collect()
    }
}

impl<T: Sanitize> Sanitize for Option<T> {
    fn sanitize(self) -> Self {
        self.map(Sanitize::sanitize)
    }
}

/// JSON response that sanitizes its payload before serialization.
#[derive(Debug, Clone)]
pub struct SanitizedJson<T>(pub T);

impl<T> IntoResponse for SanitizedJson<T>
where
    T: Sanitize + Serialize,
{
    fn into_response(self) -> Response {
        Json(self.0.sanitize()).into_response()
    }
}
