//! Backend seam: the request model and the trait every screen talks to.
//!
//! [`crate::client::ApiClient`] implements [`Backend`] over HTTP. Tests use
//! the recording [`mock::MockBackend`] instead.

use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::mpsc::UnboundedSender;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use admin_wire::{Page, TotalShape};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One REST call, relative to the configured API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, None)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path, Some(body))
    }

    /// POST to an action endpoint that takes no body.
    pub fn post_empty(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path, None)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path, Some(body))
    }

    pub fn put_empty(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path, None)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path, None)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append `key` only when a value is present.
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Path plus url-encoded query string, in insertion order.
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.query {
            serializer.append_pair(key, value);
        }
        format!("{}?{}", self.path, serializer.finish())
    }
}

/// A file picked by the user but not yet sent anywhere.
#[derive(Clone, PartialEq)]
pub struct StagedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Declared content type, else one guessed from the file extension.
    pub fn mime(&self) -> String {
        self.content_type
            .clone()
            .filter(|ct| !ct.is_empty())
            .unwrap_or_else(|| {
                mime_guess::from_path(&self.name)
                    .first_or_octet_stream()
                    .to_string()
            })
    }
}

impl std::fmt::Debug for StagedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Receives upload progress as whole percentages.
pub type ProgressSender = UnboundedSender<u8>;

/// The REST backend as seen by the dashboard.
///
/// Futures are not `Send`: the UI runs on a single-threaded event loop.
#[async_trait(?Send)]
pub trait Backend {
    /// Issue one request and return the envelope's `data` member.
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;

    /// POST `file` as `multipart/form-data` (field `file`) to `path`.
    async fn upload(
        &self,
        path: &str,
        file: StagedFile,
        progress: Option<ProgressSender>,
    ) -> Result<Value, ApiError>;

    /// Install or clear the bearer token attached to later requests.
    fn set_token(&self, token: Option<String>);
}

pub type SharedBackend = Rc<dyn Backend>;

/// Send `request` and decode its `data` into `T`.
pub async fn fetch_json<T: DeserializeOwned>(
    backend: &dyn Backend,
    request: ApiRequest,
) -> Result<T, ApiError> {
    let data = backend.send(request).await?;
    serde_json::from_value(data).map_err(ApiError::decode)
}

/// Send a list request and decode it as a page.
pub async fn fetch_page<T: DeserializeOwned>(
    backend: &dyn Backend,
    request: ApiRequest,
    shape: TotalShape,
) -> Result<Page<T>, ApiError> {
    let data = backend.send(request).await?;
    Page::from_data(data, shape).map_err(ApiError::decode)
}

/// Serialize a request body, mapping failures into the crate error.
pub fn to_body<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(ApiError::decode)
}

#[cfg(test)]
pub mod mock {
    //! Recording backend for controller tests.

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    #[derive(Default)]
    pub struct MockBackend {
        requests: RefCell<Vec<ApiRequest>>,
        responses: RefCell<VecDeque<Result<Value, ApiError>>>,
        uploads: RefCell<Vec<StagedFile>>,
        token: RefCell<Option<String>>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue the `data` of the next response.
        pub fn push_ok(&self, data: Value) -> &Self {
            self.responses.borrow_mut().push_back(Ok(data));
            self
        }

        pub fn push_err(&self, err: ApiError) -> &Self {
            self.responses.borrow_mut().push_back(Err(err));
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.borrow().clone()
        }

        /// `"METHOD target"` for every request, in order.
        pub fn calls(&self) -> Vec<String> {
            self.requests
                .borrow()
                .iter()
                .map(|r| format!("{} {}", r.method.as_str(), r.target()))
                .collect()
        }

        pub fn uploads(&self) -> Vec<StagedFile> {
            self.uploads.borrow().clone()
        }

        pub fn token(&self) -> Option<String> {
            self.token.borrow().clone()
        }

        fn next_response(&self) -> Result<Value, ApiError> {
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or(Ok(Value::Null))
        }
    }

    #[async_trait(?Send)]
    impl Backend for MockBackend {
        async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
            self.requests.borrow_mut().push(request);
            self.next_response()
        }

        async fn upload(
            &self,
            path: &str,
            file: StagedFile,
            progress: Option<ProgressSender>,
        ) -> Result<Value, ApiError> {
            self.requests.borrow_mut().push(ApiRequest::post_empty(path));
            self.uploads.borrow_mut().push(file);
            let response = self.next_response();
            if let Some(progress) = progress {
                let _ = progress.unbounded_send(0);
                if response.is_ok() {
                    let _ = progress.unbounded_send(50);
                    let _ = progress.unbounded_send(100);
                }
            }
            response
        }

        fn set_token(&self, token: Option<String>) {
            *self.token.borrow_mut() = token;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_target_encodes_query_in_order() {
        let request = ApiRequest::get("/web/courses")
            .query("pageNumber", 2)
            .query("pageSize", 10);
        assert_eq!(request.target(), "/web/courses?pageNumber=2&pageSize=10");
    }

    #[test]
    fn test_target_escapes_values_and_skips_missing() {
        let request = ApiRequest::get("/web/lessons")
            .query("search", "borrow & move")
            .query_opt("courseId", None::<String>);
        assert_eq!(request.target(), "/web/lessons?search=borrow+%26+move");
        assert_eq!(ApiRequest::delete("/web/courses/c1").target(), "/web/courses/c1");
    }

    #[test]
    fn test_staged_file_mime() {
        let pdf = StagedFile::new("notes.pdf", None, vec![1, 2, 3]);
        assert_eq!(pdf.mime(), "application/pdf");
        assert_eq!(pdf.size(), 3);

        let declared = StagedFile::new("blob", Some("text/plain".into()), vec![]);
        assert_eq!(declared.mime(), "text/plain");

        let unknown = StagedFile::new("blob", None, vec![]);
        assert_eq!(unknown.mime(), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_fetch_json_decodes_data() {
        let backend = mock::MockBackend::new();
        backend.push_ok(json!({"id": "c1", "title": "Rust"}));

        let course: admin_wire::Course = fetch_json(&backend, ApiRequest::get("/web/courses/c1"))
            .await
            .unwrap();
        assert_eq!(course.title, "Rust");
        assert_eq!(backend.calls(), vec!["GET /web/courses/c1"]);
    }

    #[tokio::test]
    async fn test_fetch_json_reports_shape_mismatch() {
        let backend = mock::MockBackend::new();
        backend.push_ok(json!("not an object"));

        let result: Result<admin_wire::Course, _> =
            fetch_json(&backend, ApiRequest::get("/web/courses/c1")).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
