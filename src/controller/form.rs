//! Edit-dialog state: a draft, local validation, and the create/update call.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::backend::{fetch_json, ApiRequest, Backend};
use crate::error::{ApiError, ValidationErrors};

use super::StateCell;

/// In-memory, not-yet-submitted copy of an entity.
pub trait Draft: Clone + Default + PartialEq + 'static {
    /// Required-field checks run before any request is made.
    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Body for `POST <collection>`.
    fn create_body(&self) -> Value;

    /// Body for `PUT <collection>/{id}`.
    fn update_body(&self) -> Value {
        self.create_body()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit(String),
}

impl DialogMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, DialogMode::Edit(_))
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            DialogMode::Create => None,
            DialogMode::Edit(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct OpenForm<D> {
    mode: DialogMode,
    draft: D,
    errors: ValidationErrors,
    submitted: bool,
    saving: bool,
}

/// One in-flight save. Hand it back to [`FormDialog::finish_submit`].
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    generation: u64,
    mode: DialogMode,
    pub request: ApiRequest,
}

/// What `begin_submit` decided.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    /// Send this request, then pass the result to `finish_submit`
    Send(SubmitTicket),
    /// Validation failed; offending fields are marked and nothing is sent
    Invalid(ValidationErrors),
    /// Dialog closed or a save is already in flight
    Idle,
}

/// A successful create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved {
    pub mode: DialogMode,
    pub data: Value,
}

impl Saved {
    /// Id of the saved record: the edited id, or `data.id` from a create.
    pub fn id(&self) -> Option<String> {
        match &self.mode {
            DialogMode::Edit(id) => Some(id.clone()),
            DialogMode::Create => self
                .data
                .get("id")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved(Saved),
    Invalid(ValidationErrors),
    /// Nothing was sent: the dialog was closed or already saving
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormDialog<D: Draft> {
    collection: String,
    open: Option<OpenForm<D>>,
    // Bumped whenever a form is opened or closed.
    generation: u64,
}

impl<D: Draft> FormDialog<D> {
    /// `collection` is the resource path, e.g. `/web/courses`.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            open: None,
            generation: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn mode(&self) -> Option<&DialogMode> {
        self.open.as_ref().map(|f| &f.mode)
    }

    pub fn is_edit(&self) -> bool {
        self.mode().is_some_and(DialogMode::is_edit)
    }

    pub fn draft(&self) -> Option<&D> {
        self.open.as_ref().map(|f| &f.draft)
    }

    pub fn is_saving(&self) -> bool {
        self.open.as_ref().is_some_and(|f| f.saving)
    }

    /// True once a submit was attempted and `field` failed validation.
    pub fn is_invalid(&self, field: &str) -> bool {
        self.open
            .as_ref()
            .is_some_and(|f| f.submitted && f.errors.contains(field))
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.open
            .as_ref()
            .filter(|f| f.submitted && !f.errors.is_empty())
            .map(|f| &f.errors)
    }

    pub fn open_create(&mut self) {
        self.open_create_with(D::default());
    }

    pub fn open_create_with(&mut self, draft: D) {
        self.open_with(DialogMode::Create, draft);
    }

    pub fn open_edit(&mut self, id: impl Into<String>, draft: D) {
        self.open_with(DialogMode::Edit(id.into()), draft);
    }

    fn open_with(&mut self, mode: DialogMode, draft: D) {
        self.generation += 1;
        self.open = Some(OpenForm {
            mode,
            draft,
            errors: ValidationErrors::new(),
            submitted: false,
            saving: false,
        });
    }

    /// `GET <collection>/{id}`, used to seed edits of entities with children.
    pub fn detail_request(&self, id: &str) -> ApiRequest {
        ApiRequest::get(format!("{}/{}", self.collection, id))
    }

    /// Mutate the draft. After a failed submit, markers are refreshed as fields are fixed.
    pub fn edit(&mut self, change: impl FnOnce(&mut D)) {
        if let Some(form) = self.open.as_mut() {
            change(&mut form.draft);
            if form.submitted {
                form.errors = form.draft.validate().err().unwrap_or_default();
            }
        }
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.open = None;
    }

    /// Validate and produce the POST/PUT to send.
    pub fn begin_submit(&mut self) -> SubmitStart {
        let collection = self.collection.clone();
        let Some(form) = self.open.as_mut() else {
            return SubmitStart::Idle;
        };
        if form.saving {
            return SubmitStart::Idle;
        }

        form.submitted = true;
        if let Err(errors) = form.draft.validate() {
            debug!(path = %collection, fields = errors.fields().len(), "Draft failed validation");
            form.errors = errors.clone();
            return SubmitStart::Invalid(errors);
        }
        form.errors = ValidationErrors::new();
        form.saving = true;

        let request = match &form.mode {
            DialogMode::Create => ApiRequest::post(collection, form.draft.create_body()),
            DialogMode::Edit(id) => {
                ApiRequest::put(format!("{}/{}", collection, id), form.draft.update_body())
            }
        };
        SubmitStart::Send(SubmitTicket {
            generation: self.generation,
            mode: form.mode.clone(),
            request,
        })
    }

    /// Close on success; keep the dialog and draft on failure.
    ///
    /// A ticket from a form that has since been closed or replaced still
    /// reports its save, but leaves the current form alone.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<Value, ApiError>,
    ) -> Result<Saved, ApiError> {
        let current = ticket.generation == self.generation;
        if current {
            if let Some(form) = self.open.as_mut() {
                form.saving = false;
            }
        } else {
            debug!(
                path = %self.collection,
                stale = ticket.generation,
                current = self.generation,
                "Save finished after its form was closed"
            );
        }
        let data = result?;
        if current {
            self.open = None;
        }
        Ok(Saved {
            mode: ticket.mode,
            data,
        })
    }
}

/// Validate, send and finish the open form.
pub async fn submit<D, C>(mut dialog: C, backend: &dyn Backend) -> Result<SubmitOutcome, ApiError>
where
    D: Draft,
    C: StateCell<FormDialog<D>>,
{
    match dialog.modify(FormDialog::begin_submit) {
        SubmitStart::Send(ticket) => {
            let result = backend.send(ticket.request.clone()).await;
            dialog
                .modify(|d| d.finish_submit(ticket, result))
                .map(SubmitOutcome::Saved)
        }
        SubmitStart::Invalid(errors) => Ok(SubmitOutcome::Invalid(errors)),
        SubmitStart::Idle => Ok(SubmitOutcome::Skipped),
    }
}

/// Open for edit seeded from the full detail record rather than the list row.
pub async fn open_edit_from_detail<D, T, C>(
    mut dialog: C,
    backend: &dyn Backend,
    id: &str,
    seed: impl FnOnce(T) -> D,
) -> Result<(), ApiError>
where
    D: Draft,
    T: DeserializeOwned,
    C: StateCell<FormDialog<D>>,
{
    let request = dialog.modify(|d| d.detail_request(id));
    let detail: T = fetch_json(backend, request).await?;
    dialog.modify(|d| d.open_edit(id, seed(detail)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::resources::categories::CategoryDraft;
    use serde_json::json;

    fn dialog() -> FormDialog<CategoryDraft> {
        FormDialog::new("/web/categories")
    }

    #[tokio::test]
    async fn test_invalid_create_sends_nothing() {
        let backend = MockBackend::new();
        let mut dialog = dialog();
        dialog.open_create();

        let outcome = submit(&mut dialog, &backend).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert!(backend.calls().is_empty(), "no request for an invalid draft");
        assert!(dialog.is_open());
        assert!(dialog.is_invalid("name"));
    }

    #[tokio::test]
    async fn test_valid_create_posts_and_closes() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"id": "cat-9"}));
        let mut dialog = dialog();
        dialog.open_create();
        dialog.edit(|d| d.name = "Systems".into());

        let outcome = submit(&mut dialog, &backend).await.unwrap();

        let SubmitOutcome::Saved(saved) = outcome else {
            panic!("expected save");
        };
        assert_eq!(saved.id().as_deref(), Some("cat-9"));
        assert_eq!(backend.calls(), vec!["POST /web/categories"]);
        assert_eq!(backend.requests()[0].body.as_ref().unwrap()["name"], "Systems");
        assert!(!dialog.is_open());
    }

    #[tokio::test]
    async fn test_edit_puts_to_record() {
        let backend = MockBackend::new();
        let mut dialog = dialog();
        dialog.open_edit(
            "cat-1",
            CategoryDraft {
                name: "Web".into(),
                ..Default::default()
            },
        );

        submit(&mut dialog, &backend).await.unwrap();
        assert_eq!(backend.calls(), vec!["PUT /web/categories/cat-1"]);
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_dialog_open() {
        let backend = MockBackend::new();
        backend.push_err(ApiError::Backend {
            status: 409,
            message: "Name already exists".into(),
        });
        let mut dialog = dialog();
        dialog.open_create_with(CategoryDraft {
            name: "Web".into(),
            ..Default::default()
        });

        let err = submit(&mut dialog, &backend).await.unwrap_err();
        assert_eq!(err.user_message(), "Name already exists");
        assert!(dialog.is_open());
        assert!(!dialog.is_saving());
        assert_eq!(dialog.draft().unwrap().name, "Web");
    }

    #[test]
    fn test_markers_clear_as_fields_are_fixed() {
        let mut dialog = dialog();
        dialog.open_create();
        assert!(!dialog.is_invalid("name"), "no markers before first submit");

        assert!(matches!(dialog.begin_submit(), SubmitStart::Invalid(_)));
        assert!(dialog.is_invalid("name"));

        dialog.edit(|d| d.name = "Data".into());
        assert!(!dialog.is_invalid("name"));
        assert!(dialog.errors().is_none());
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut dialog = dialog();
        dialog.open_create_with(CategoryDraft {
            name: "Data".into(),
            ..Default::default()
        });
        assert!(matches!(dialog.begin_submit(), SubmitStart::Send(_)));
        assert_eq!(dialog.begin_submit(), SubmitStart::Idle);
    }

    #[tokio::test]
    async fn test_submit_while_saving_is_skipped() {
        let backend = MockBackend::new();
        let mut dialog = dialog();
        dialog.open_create_with(CategoryDraft {
            name: "Data".into(),
            ..Default::default()
        });
        let _in_flight = dialog.begin_submit();

        let outcome = submit(&mut dialog, &backend).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Skipped);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_late_save_leaves_the_next_form_alone() {
        let mut dialog = dialog();
        dialog.open_edit(
            "cat-1",
            CategoryDraft {
                name: "Web".into(),
                ..Default::default()
            },
        );
        let SubmitStart::Send(ticket) = dialog.begin_submit() else {
            panic!("expected a request");
        };

        // Closed while the PUT is out, then a new create is opened.
        dialog.cancel();
        dialog.open_create();
        dialog.edit(|d| d.name = "Half typed".into());

        let saved = dialog.finish_submit(ticket, Ok(json!({}))).unwrap();

        assert_eq!(saved.mode, DialogMode::Edit("cat-1".into()));
        assert!(dialog.is_open(), "the new form stays open");
        assert_eq!(dialog.mode(), Some(&DialogMode::Create));
        assert_eq!(dialog.draft().unwrap().name, "Half typed");
        assert!(!dialog.is_saving());
    }

    #[test]
    fn test_late_failure_leaves_the_next_form_alone() {
        let mut dialog = dialog();
        dialog.open_create_with(CategoryDraft {
            name: "Web".into(),
            ..Default::default()
        });
        let SubmitStart::Send(ticket) = dialog.begin_submit() else {
            panic!("expected a request");
        };
        dialog.cancel();
        dialog.open_create_with(CategoryDraft {
            name: "Mobile".into(),
            ..Default::default()
        });
        assert!(matches!(dialog.begin_submit(), SubmitStart::Send(_)));

        let err = dialog
            .finish_submit(ticket, Err(ApiError::Network("offline".into())))
            .unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
        assert!(dialog.is_saving(), "the newer save is still in flight");
    }

    #[tokio::test]
    async fn test_open_edit_from_detail_fetches_record() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"id": "cat-2", "name": "Mobile", "displayOrder": 4}));
        let mut dialog = dialog();

        open_edit_from_detail(&mut dialog, &backend, "cat-2", |c: admin_wire::Category| {
            CategoryDraft::from(&c)
        })
        .await
        .unwrap();

        assert_eq!(backend.calls(), vec!["GET /web/categories/cat-2"]);
        assert_eq!(dialog.mode(), Some(&DialogMode::Edit("cat-2".into())));
        assert_eq!(dialog.draft().unwrap().display_order, 4);
    }
}
