//! Parent detail with independently edited children.
//!
//! The parent is fetched once when the dialog opens; each child operation is
//! its own request followed by a full re-fetch of the parent.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::backend::{ApiRequest, Backend};
use crate::error::ApiError;

use super::StateCell;

/// One detail fetch. Hand it back to [`NestedEditor::finish_load`].
#[derive(Debug, Clone, PartialEq)]
pub struct DetailTicket {
    detail_path: String,
    generation: u64,
    pub request: ApiRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NestedEditor<P> {
    detail_path: String,
    parent: Option<P>,
    loading: bool,
    generation: u64,
}

impl<P: DeserializeOwned + Clone> NestedEditor<P> {
    /// `detail_path` is the parent's detail URL, e.g. `/web/quizzes/q1`.
    pub fn new(detail_path: impl Into<String>) -> Self {
        Self {
            detail_path: detail_path.into(),
            parent: None,
            loading: false,
            generation: 0,
        }
    }

    pub fn parent(&self) -> Option<&P> {
        self.parent.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_load(&mut self) -> DetailTicket {
        self.generation += 1;
        self.loading = true;
        DetailTicket {
            detail_path: self.detail_path.clone(),
            generation: self.generation,
            request: ApiRequest::get(self.detail_path.clone()),
        }
    }

    /// Replace the parent with a fresh detail response. On error the old parent stays.
    ///
    /// Responses for another parent, or older than the latest fetch, are dropped.
    pub fn finish_load(
        &mut self,
        ticket: DetailTicket,
        result: Result<Value, ApiError>,
    ) -> Result<(), ApiError> {
        if ticket.detail_path != self.detail_path || ticket.generation != self.generation {
            debug!(
                stale = %ticket.detail_path,
                current = %self.detail_path,
                "Dropping stale detail response"
            );
            return Ok(());
        }
        self.loading = false;
        let parent = serde_json::from_value(result?).map_err(ApiError::decode)?;
        self.parent = Some(parent);
        Ok(())
    }
}

/// Fetch the parent of whichever editor is open. A closed editor is a no-op.
pub async fn load<P, C>(mut editor: C, backend: &dyn Backend) -> Result<(), ApiError>
where
    P: DeserializeOwned + Clone,
    C: StateCell<Option<NestedEditor<P>>>,
{
    let Some(ticket) = editor.modify(|e| e.as_mut().map(NestedEditor::begin_load)) else {
        return Ok(());
    };
    let result = backend.send(ticket.request.clone()).await;
    editor.modify(|e| match e.as_mut() {
        Some(e) => e.finish_load(ticket, result),
        None => Ok(()),
    })
}

/// Run one child operation, then re-fetch the parent.
pub async fn apply<P, C>(editor: C, op: ApiRequest, backend: &dyn Backend) -> Result<Value, ApiError>
where
    P: DeserializeOwned + Clone,
    C: StateCell<Option<NestedEditor<P>>>,
{
    debug!(method = op.method.as_str(), path = %op.path, "Child operation");
    let data = backend.send(op).await?;
    load(editor, backend).await?;
    Ok(data)
}

/// One past the highest existing order, or 0 for the first child.
pub fn next_display_order(orders: impl IntoIterator<Item = i32>) -> i32 {
    orders.into_iter().max().map_or(0, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::resources::quizzes::QuestionDraft;
    use admin_wire::Quiz;
    use serde_json::json;

    fn quiz_editor(id: &str) -> Option<NestedEditor<Quiz>> {
        Some(NestedEditor::new(format!("/web/quizzes/{}", id)))
    }

    #[tokio::test]
    async fn test_child_op_refetches_parent() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"id": "q1", "title": "Ownership", "questions": []}));
        backend.push_ok(json!({"id": "qq1"}));
        backend.push_ok(json!({
            "id": "q1",
            "title": "Ownership",
            "questions": [{"id": "qq1", "questionText": "Who owns it?", "displayOrder": 0}]
        }));

        let mut editor = quiz_editor("q1");
        load(&mut editor, &backend).await.unwrap();
        let current = editor.as_ref().unwrap();
        assert_eq!(current.parent().unwrap().questions.as_deref().map(<[_]>::len), Some(0));

        apply(
            &mut editor,
            ApiRequest::post("/web/quizzes/questions", json!({"quizId": "q1"})),
            &backend,
        )
        .await
        .unwrap();

        assert_eq!(
            backend.calls(),
            vec![
                "GET /web/quizzes/q1",
                "POST /web/quizzes/questions",
                "GET /web/quizzes/q1",
            ]
        );
        let current = editor.as_ref().unwrap();
        let questions = current.parent().unwrap().questions.clone().unwrap_or_default();
        assert_eq!(questions.len(), 1);
        assert!(!current.is_loading());
    }

    #[tokio::test]
    async fn test_failed_child_op_keeps_parent() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"id": "q1", "title": "Ownership"}));
        backend.push_err(ApiError::Backend {
            status: 400,
            message: "Question text is required".into(),
        });

        let mut editor = quiz_editor("q1");
        load(&mut editor, &backend).await.unwrap();
        let result = apply(&mut editor, ApiRequest::delete("/web/quizzes/questions/qq9"), &backend).await;

        assert!(result.is_err());
        assert_eq!(backend.calls().len(), 2, "no re-fetch after a failed child op");
        assert_eq!(editor.unwrap().parent().unwrap().title, "Ownership");
    }

    #[test]
    fn test_response_for_previous_parent_is_dropped() {
        // Quiz A was opened, then closed, then quiz B opened before A's detail came back.
        let mut editor = quiz_editor("qa");
        let for_a = editor.as_mut().unwrap().begin_load();
        editor = quiz_editor("qb");
        let for_b = editor.as_mut().unwrap().begin_load();

        let current = editor.as_mut().unwrap();
        current
            .finish_load(for_b, Ok(json!({"id": "qb", "title": "Lifetimes"})))
            .unwrap();
        current
            .finish_load(for_a, Ok(json!({"id": "qa", "title": "Ownership"})))
            .unwrap();

        let parent = current.parent().unwrap();
        assert_eq!(parent.id, "qb");
        assert_eq!(QuestionDraft::new_for(parent).quiz_id, "qb", "new questions target the open quiz");
    }

    #[test]
    fn test_late_response_before_current_one_is_dropped() {
        let mut editor = quiz_editor("qa").unwrap();
        let old = editor.begin_load();
        let new = editor.begin_load();

        editor.finish_load(old, Ok(json!({"id": "qa", "title": "Old"}))).unwrap();
        assert!(editor.parent().is_none());
        assert!(editor.is_loading(), "the newer fetch is still out");

        editor.finish_load(new, Ok(json!({"id": "qa", "title": "New"}))).unwrap();
        assert_eq!(editor.parent().unwrap().title, "New");
        assert!(!editor.is_loading());
    }

    #[tokio::test]
    async fn test_closed_editor_sends_nothing() {
        let backend = MockBackend::new();
        let mut editor: Option<NestedEditor<Quiz>> = None;
        load(&mut editor, &backend).await.unwrap();
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_next_display_order() {
        assert_eq!(next_display_order([]), 0);
        assert_eq!(next_display_order([0, 4, 2]), 5);
    }
}
