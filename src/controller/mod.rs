//! Reusable page controllers.
//!
//! Each screen composes these with a resource definition from
//! [`crate::resources`]. Controllers hold plain state behind a [`StateCell`]:
//! a `&mut` in tests, a signal in the UI. The async flows below touch the
//! cell in short, synchronous steps and never hold it across an await.

pub mod action;
pub mod confirm;
pub mod form;
pub mod list;
pub mod nested;
pub mod upload;

pub use action::{field_toggle, run_then_reload, ToggleAction};
pub use confirm::{ConfirmGate, PendingConfirm};
pub use form::{DialogMode, Draft, FormDialog, Saved, SubmitOutcome, SubmitStart, SubmitTicket};
pub use list::{FetchOutcome, FetchTicket, ListController, ListFilter, PageParam};
pub use nested::{next_display_order, DetailTicket, NestedEditor};
pub use upload::{progress_channel, upload_after_save, StagedUpload, UploadOutcome};

use crate::backend::Backend;
use crate::error::ApiError;
use crate::resources::Resource;

/// Somewhere a controller lives between awaits.
pub trait StateCell<T> {
    /// Run `change` against the current value. Keep it synchronous and short.
    fn modify<O>(&mut self, change: impl FnOnce(&mut T) -> O) -> O;
}

impl<T> StateCell<T> for &mut T {
    fn modify<O>(&mut self, change: impl FnOnce(&mut T) -> O) -> O {
        change(&mut **self)
    }
}

/// Submit `dialog` and, when saved, re-fetch `list`. The fetch is `None` when nothing was saved.
pub async fn save_and_reload<R, D, DC, LC>(
    dialog: DC,
    list: LC,
    backend: &dyn Backend,
) -> Result<(SubmitOutcome, Option<FetchOutcome>), ApiError>
where
    R: Resource,
    D: Draft,
    DC: StateCell<FormDialog<D>>,
    LC: StateCell<ListController<R>>,
{
    let outcome = form::submit(dialog, backend).await?;
    let fetched = match &outcome {
        SubmitOutcome::Saved(_) => Some(list::load(list, backend).await),
        SubmitOutcome::Invalid(_) | SubmitOutcome::Skipped => None,
    };
    Ok((outcome, fetched))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::resources::courses::{CourseDraft, CoursesResource};
    use serde_json::json;

    #[tokio::test]
    async fn test_valid_create_posts_once_then_refetches_once() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"id": "c9"}));
        backend.push_ok(json!({"items": [{"id": "c9", "title": "Async Rust"}], "totalCount": 1}));

        let mut list = ListController::<CoursesResource>::new(10);
        let mut dialog = FormDialog::<CourseDraft>::new("/web/courses");
        dialog.open_create();
        dialog.edit(|d| {
            d.title = "Async Rust".into();
            d.category_id = "cat-1".into();
        });

        let (outcome, fetched) = save_and_reload(&mut dialog, &mut list, &backend).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Saved(_)));
        assert_eq!(fetched, Some(FetchOutcome::Applied));
        assert_eq!(
            backend.calls(),
            vec!["POST /web/courses", "GET /web/courses?pageNumber=1&pageSize=10"]
        );
        assert!(!dialog.is_open());
        assert_eq!(list.items().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_create_skips_both_requests() {
        let backend = MockBackend::new();
        let mut list = ListController::<CoursesResource>::new(10);
        let mut dialog = FormDialog::<CourseDraft>::new("/web/courses");
        dialog.open_create();

        let (outcome, fetched) = save_and_reload(&mut dialog, &mut list, &backend).await.unwrap();

        assert!(fetched.is_none());
        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.contains("title") && e.contains("categoryId")));
        assert!(backend.calls().is_empty());
        assert!(dialog.is_open());
    }
}
