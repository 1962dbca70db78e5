use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use http_body_util::BodyExt;

/// Collects a response body into a string
pub async fn response_to_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Response body is not UTF-8")
}

/// Collects a response body and parses it as JSON
pub async fn response_to_json(response: Response) -> serde_json::Value {
    let text = response_to_text(response).await;
    serde_json::from_str(&text).expect("Response body is not JSON")
}

/// Builds a request with an optional urlencoded form body and cookie header
pub fn create_form_request(
    method: &str,
    uri: &str,
    form: Option<&[(&str, &str)]>,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let body = match form {
        Some(fields) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(serde_urlencoded::to_string(fields).expect("Failed to encode form"))
        }
        None => Body::empty(),
    };

    builder.body(body).expect("Failed to build test request")
}
