//! HTTP implementation of [`Backend`] using reqwest.
//!
//! Attaches the base URL and bearer token to every request and unwraps the
//! `{ success, message, data, errors }` envelope into `data` or an [`ApiError`].

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use admin_wire::ApiResponse;

use crate::backend::{ApiRequest, Backend, Method, ProgressSender, StagedFile};
use crate::error::ApiError;

#[cfg(not(target_arch = "wasm32"))]
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);
#[cfg(not(target_arch = "wasm32"))]
const UPLOAD_CHUNK: usize = 64 * 1024;

/// REST client for the platform backend.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: build_http_client(),
            base_url,
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn url(&self, target: &str) -> String {
        format!("{}{}", self.base_url, target)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Build the HTTP request for `request` without sending it.
    pub fn build_request(&self, request: &ApiRequest) -> Result<reqwest::Request, ApiError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .http
            .request(method, self.url(&request.target()))
            .header(ACCEPT, "application/json");
        builder = self.authorize(builder);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn execute(&self, request: reqwest::Request) -> Result<Value, ApiError> {
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!(status, bytes = body.len(), "API response");
        decode_envelope(status, &body)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to default HTTP client");
            Client::new()
        })
}

#[cfg(target_arch = "wasm32")]
fn build_http_client() -> Client {
    Client::new()
}

/// Turn a raw HTTP status and body into the envelope's `data` or an error.
pub fn decode_envelope(status: u16, body: &str) -> Result<Value, ApiError> {
    let ok_status = (200..300).contains(&status);

    if body.trim().is_empty() {
        return if ok_status {
            Ok(Value::Null)
        } else {
            Err(ApiError::Backend {
                status,
                message: format!("HTTP {}", status),
            })
        };
    }

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if ok_status => return Err(ApiError::decode(e)),
        Err(_) => {
            return Err(ApiError::Backend {
                status,
                message: format!("HTTP {}", status),
            })
        }
    };

    let envelope: ApiResponse = match value {
        Value::Object(_) => serde_json::from_value(value).map_err(ApiError::decode)?,
        other if ok_status => return Ok(other),
        _ => ApiResponse::default(),
    };

    if !ok_status {
        return Err(ApiError::Backend {
            status,
            message: envelope
                .error_text()
                .unwrap_or_else(|| format!("HTTP {}", status)),
        });
    }

    if !envelope.is_success() {
        return Err(ApiError::Backend {
            status,
            message: envelope
                .error_text()
                .unwrap_or_else(|| "Request failed".to_string()),
        });
    }

    Ok(envelope.data.unwrap_or(Value::Null))
}

fn percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        100
    } else {
        ((sent.min(total) * 100) / total) as u8
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn file_part(file: StagedFile, progress: Option<ProgressSender>) -> Result<Part, ApiError> {
    use futures::StreamExt;

    let total = file.size();
    let mime = file.mime();
    let name = file.name.clone();

    let chunks: Vec<Result<Vec<u8>, std::io::Error>> = file
        .bytes
        .chunks(UPLOAD_CHUNK)
        .map(|chunk| Ok(chunk.to_vec()))
        .collect();

    let mut sent = 0u64;
    let stream = futures::stream::iter(chunks).map(move |chunk| {
        if let Ok(bytes) = &chunk {
            sent += bytes.len() as u64;
            if let Some(progress) = &progress {
                let _ = progress.unbounded_send(percent(sent, total));
            }
        }
        chunk
    });

    Part::stream_with_length(reqwest::Body::wrap_stream(stream), total)
        .file_name(name)
        .mime_str(&mime)
        .map_err(|e| ApiError::Network(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn file_part(file: StagedFile, _progress: Option<ProgressSender>) -> Result<Part, ApiError> {
    let mime = file.mime();
    let name = file.name.clone();
    Part::bytes(file.bytes)
        .file_name(name)
        .mime_str(&mime)
        .map_err(|e| ApiError::Network(e.to_string()))
}

#[async_trait(?Send)]
impl Backend for ApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        debug!(
            method = request.method.as_str(),
            path = %request.path,
            query = ?request.query,
            "API request"
        );
        let http_request = self.build_request(&request)?;
        let result = self.execute(http_request).await;
        if let Err(e) = &result {
            debug!(method = request.method.as_str(), path = %request.path, error = %e, "API request failed");
        }
        result
    }

    async fn upload(
        &self,
        path: &str,
        file: StagedFile,
        progress: Option<ProgressSender>,
    ) -> Result<Value, ApiError> {
        debug!(path, file = %file.name, size = file.size(), "Uploading file");

        if let Some(progress) = &progress {
            let _ = progress.unbounded_send(0);
        }

        let form = Form::new().part("file", file_part(file, progress.clone())?);
        let builder = self.authorize(self.http.post(self.url(path)).multipart(form));
        let request = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let result = self.execute(request).await;
        match &result {
            Ok(_) => {
                if let Some(progress) = &progress {
                    let _ = progress.unbounded_send(100);
                }
            }
            Err(e) => warn!(path, error = %e, "Upload failed"),
        }
        result
    }

    fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_unwraps_data() {
        let body = r#"{"success":true,"data":{"items":[],"totalCount":3}}"#;
        let data = decode_envelope(200, body).unwrap();
        assert_eq!(data["totalCount"], 3);
    }

    #[test]
    fn test_decode_empty_success_is_null() {
        assert_eq!(decode_envelope(204, "").unwrap(), Value::Null);
        assert_eq!(decode_envelope(200, r#"{"success":true}"#).unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_failure_status_uses_backend_message() {
        let err = decode_envelope(400, r#"{"success":false,"message":"Title is too long"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Backend {
                status: 400,
                message: "Title is too long".into()
            }
        );
    }

    #[test]
    fn test_decode_failure_without_json() {
        let err = decode_envelope(502, "<html>Bad gateway</html>").unwrap_err();
        assert_eq!(
            err,
            ApiError::Backend {
                status: 502,
                message: "HTTP 502".into()
            }
        );
    }

    #[test]
    fn test_decode_success_flag_false_on_200() {
        let err = decode_envelope(200, r#"{"success":false,"errors":["code: duplicate"]}"#)
            .unwrap_err();
        assert_eq!(err.user_message(), "code: duplicate");
    }

    #[test]
    fn test_decode_garbage_on_200_is_decode_error() {
        assert!(matches!(
            decode_envelope(200, "not json"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_build_request_attaches_base_url_and_token() {
        let client = ApiClient::new("http://backend.test/api/");
        client.set_token(Some("abc".into()));

        let request = client
            .build_request(
                &ApiRequest::get("/web/courses")
                    .query("pageNumber", 2)
                    .query("pageSize", 10),
            )
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "http://backend.test/api/web/courses?pageNumber=2&pageSize=10"
        );
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer abc"
        );
    }

    #[test]
    fn test_build_request_without_token_and_with_body() {
        let client = ApiClient::new("http://backend.test/api");
        let request = client
            .build_request(&ApiRequest::put(
                "/web/promo-codes/p1",
                json!({"isActive": false}),
            ))
            .unwrap();

        assert!(request.headers().get(AUTHORIZATION).is_none());
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let sent: Value = serde_json::from_slice(body).unwrap();
        assert_eq!(sent, json!({"isActive": false}));
    }

    #[test]
    fn test_clearing_token() {
        let client = ApiClient::new("http://backend.test/api");
        client.set_token(Some("abc".into()));
        client.set_token(None);
        let request = client.build_request(&ApiRequest::get("/web/auth/me")).unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 200), 0);
        assert_eq!(percent(50, 200), 25);
        assert_eq!(percent(300, 200), 100);
        assert_eq!(percent(0, 0), 100);
    }
}
