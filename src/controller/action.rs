//! Action endpoints: state transitions that are not field updates.

use serde_json::json;

use crate::backend::{ApiRequest, Backend, Method};
use crate::error::ApiError;
use crate::resources::Resource;

use super::list::{self, FetchOutcome, ListController};
use super::StateCell;

/// An on/off pair such as `publish`/`unpublish` under `<collection>/{id}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleAction {
    pub collection: &'static str,
    pub on: &'static str,
    pub off: &'static str,
    pub method: Method,
}

impl ToggleAction {
    pub const fn put(collection: &'static str, on: &'static str, off: &'static str) -> Self {
        Self {
            collection,
            on,
            off,
            method: Method::Put,
        }
    }

    pub const fn post(collection: &'static str, on: &'static str, off: &'static str) -> Self {
        Self {
            collection,
            on,
            off,
            method: Method::Post,
        }
    }

    /// Request moving record `id` to the `turn_on` state.
    pub fn request(&self, id: &str, turn_on: bool) -> ApiRequest {
        let action = if turn_on { self.on } else { self.off };
        let path = format!("{}/{}/{}", self.collection, id, action);
        match self.method {
            Method::Post => ApiRequest::post_empty(path),
            _ => ApiRequest::put_empty(path),
        }
    }

    /// Label of the action that flips `currently_on`.
    pub fn label(&self, currently_on: bool) -> &'static str {
        if currently_on {
            self.off
        } else {
            self.on
        }
    }
}

/// Flip a boolean field through a regular update: `PUT <collection>/{id} {field: !current}`.
pub fn field_toggle(collection: &str, id: &str, field: &str, current: bool) -> ApiRequest {
    ApiRequest::put(format!("{}/{}", collection, id), json!({ field: !current }))
}

/// Send `request`, then re-fetch `list` so the new state comes from the server.
pub async fn run_then_reload<R, C>(
    request: ApiRequest,
    rows: C,
    backend: &dyn Backend,
) -> Result<FetchOutcome, ApiError>
where
    R: Resource,
    C: StateCell<ListController<R>>,
{
    backend.send(request).await?;
    Ok(list::load(rows, backend).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::resources::courses::{CoursesResource, COURSE_PUBLISH};
    use crate::resources::lessons::LESSON_PUBLISH;
    use serde_json::json;

    #[test]
    fn test_toggle_paths_and_methods() {
        assert_eq!(
            COURSE_PUBLISH.request("c1", true).target(),
            "/web/courses/c1/publish"
        );
        assert_eq!(COURSE_PUBLISH.request("c1", false).method, Method::Put);

        let lesson = LESSON_PUBLISH.request("l1", false);
        assert_eq!(lesson.method, Method::Post);
        assert_eq!(lesson.target(), "/web/lessons/l1/unpublish");
        assert_eq!(LESSON_PUBLISH.label(true), "unpublish");
    }

    #[test]
    fn test_field_toggle_negates_current() {
        let request = field_toggle("/web/promo-codes", "p1", "isActive", true);
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.target(), "/web/promo-codes/p1");
        assert_eq!(request.body, Some(json!({"isActive": false})));
    }

    #[tokio::test]
    async fn test_publish_state_comes_from_refetch() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"items": [{"id": "c1", "title": "Rust", "isPublished": false}], "totalCount": 1}));
        let mut list = ListController::<CoursesResource>::new(10);
        list::load(&mut list, &backend).await;
        assert!(!list.items()[0].is_published);

        backend.push_ok(json!(null));
        backend.push_ok(json!({"items": [{"id": "c1", "title": "Rust", "isPublished": true}], "totalCount": 1}));
        let outcome = run_then_reload(COURSE_PUBLISH.request("c1", true), &mut list, &backend)
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(
            backend.calls(),
            vec![
                "GET /web/courses?pageNumber=1&pageSize=10",
                "PUT /web/courses/c1/publish",
                "GET /web/courses?pageNumber=1&pageSize=10",
            ]
        );
        assert!(list.items()[0].is_published, "state reflects the re-fetch");
    }

    #[tokio::test]
    async fn test_failed_action_skips_refetch() {
        let backend = MockBackend::new();
        backend.push_err(ApiError::Backend {
            status: 400,
            message: "Course has no lessons".into(),
        });
        let mut list = ListController::<CoursesResource>::new(10);

        let err = run_then_reload(COURSE_PUBLISH.request("c1", true), &mut list, &backend)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Course has no lessons");
        assert_eq!(backend.calls(), vec!["PUT /web/courses/c1/publish"]);
    }
}
