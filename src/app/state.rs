//! Shared UI state and the glue between controllers and signals.
//!
//! Controllers live in signals, and a signal is a [`StateCell`]: the async
//! flows in [`crate::controller`] run against it directly. Each `modify` takes
//! the write guard for one synchronous step, so no guard crosses an await.

use dioxus::prelude::*;
use serde::de::DeserializeOwned;

use crate::backend::{ApiRequest, SharedBackend};
use crate::client_config::ClientConfig;
use crate::controller::{
    form, list, nested, run_then_reload, save_and_reload, Draft, FetchOutcome, FormDialog,
    ListController, NestedEditor, Saved, StateCell, SubmitOutcome,
};
use crate::error::ApiError;
use crate::notify::NoticeQueue;
use crate::resources::Resource;
use crate::session::{AuthService, SessionState};

impl<T: 'static> StateCell<T> for Signal<T> {
    fn modify<O>(&mut self, change: impl FnOnce(&mut T) -> O) -> O {
        change(&mut *self.write())
    }
}

/// Everything a page needs, provided once at the app root.
#[derive(Clone)]
pub struct AdminContext {
    pub backend: SharedBackend,
    pub auth: AuthService,
    pub config: ClientConfig,
    pub session: Signal<SessionState>,
    pub notices: Signal<NoticeQueue>,
}

impl AdminContext {
    pub fn success(&self, detail: impl Into<String>) {
        let mut notices = self.notices;
        notices.write().success(detail);
    }

    pub fn warn(&self, detail: impl Into<String>) {
        let mut notices = self.notices;
        notices.write().warn(detail);
    }

    /// Show `err`; a 401 also ends the session.
    pub fn fail(&self, err: &ApiError) {
        if err.is_unauthorized() {
            self.sign_out();
        }
        let mut notices = self.notices;
        notices.write().error(err);
    }

    pub fn sign_out(&self) {
        self.auth.logout();
        let mut session = self.session;
        session.set(SessionState::Anonymous);
    }
}

pub fn use_admin() -> AdminContext {
    use_context::<AdminContext>()
}

/// A list controller that fetches its first page on mount.
pub fn use_list<R: Resource>() -> Signal<ListController<R>> {
    let ctx = use_admin();
    let page_size = ctx.config.default_page_size;
    let list = use_signal(|| ListController::<R>::new(page_size));
    use_effect(move || reload(list, ctx.clone()));
    list
}

/// Page and page-size callbacks for a paginator.
#[derive(Clone, Copy, PartialEq)]
pub struct Paging {
    pub on_page: Callback<u32>,
    pub on_page_size: Callback<u32>,
}

pub fn use_paging<R: Resource>(list: Signal<ListController<R>>) -> Paging {
    let ctx = use_admin();
    let page_ctx = ctx.clone();
    Paging {
        on_page: use_callback(move |page: u32| {
            change_list(list, page_ctx.clone(), |l| l.set_page(page))
        }),
        on_page_size: use_callback(move |size: u32| {
            change_list(list, ctx.clone(), |l| l.set_page_size(size))
        }),
    }
}

/// A callback that edits the list filter with `apply` and re-fetches page 1.
pub fn use_filter<R: Resource, T: 'static>(
    list: Signal<ListController<R>>,
    apply: fn(&mut R::Filter, T),
) -> Callback<T> {
    let ctx = use_admin();
    use_callback(move |value: T| {
        change_list(list, ctx.clone(), |l| l.update_filter(|f| apply(f, value)))
    })
}

/// A callback that sends a request, then re-fetches the list.
pub fn use_action<R: Resource>(
    list: Signal<ListController<R>>,
    done: &'static str,
) -> Callback<ApiRequest> {
    let ctx = use_admin();
    use_callback(move |request: ApiRequest| act_then_reload(request, list, ctx.clone(), done))
}

/// A callback that saves the dialog, then re-fetches the list.
pub fn use_save<D: Draft, R: Resource>(
    dialog: Signal<FormDialog<D>>,
    list: Signal<ListController<R>>,
) -> Callback<()> {
    let ctx = use_admin();
    use_callback(move |_: ()| save_then_reload(dialog, list, ctx.clone()))
}

/// Fetch the list's current page; older in-flight fetches lose.
pub fn reload<R: Resource>(list: Signal<ListController<R>>, ctx: AdminContext) {
    spawn(async move {
        let outcome = list::load(list, ctx.backend.as_ref()).await;
        report_fetch(outcome, &ctx);
    });
}

fn report_fetch(outcome: FetchOutcome, ctx: &AdminContext) {
    if let FetchOutcome::Failed(e) = outcome {
        ctx.fail(&e);
    }
}

/// Toast the result of a submit; `Some` only for a completed save.
fn report_submit(outcome: Result<SubmitOutcome, ApiError>, ctx: &AdminContext) -> Option<Saved> {
    match outcome {
        Ok(SubmitOutcome::Saved(saved)) => Some(saved),
        Ok(SubmitOutcome::Invalid(_)) => {
            ctx.warn("Please fill in the required fields.");
            None
        }
        Ok(SubmitOutcome::Skipped) => None,
        Err(e) => {
            ctx.fail(&e);
            None
        }
    }
}

pub fn saved_message(saved: &Saved) -> &'static str {
    if saved.mode.is_edit() {
        "Changes saved."
    } else {
        "Created."
    }
}

/// Apply a list change and fetch when it asked for one.
pub fn change_list<R: Resource>(
    mut list: Signal<ListController<R>>,
    ctx: AdminContext,
    change: impl FnOnce(&mut ListController<R>) -> bool,
) {
    let needs_fetch = change(&mut *list.write());
    if needs_fetch {
        reload(list, ctx);
    }
}

/// Send a one-off request (delete, publish, activate...), then re-fetch the list.
pub fn act_then_reload<R: Resource>(
    request: ApiRequest,
    list: Signal<ListController<R>>,
    ctx: AdminContext,
    done: &'static str,
) {
    spawn(async move {
        match run_then_reload(request, list, ctx.backend.as_ref()).await {
            Ok(outcome) => {
                ctx.success(done);
                report_fetch(outcome, &ctx);
            }
            Err(e) => ctx.fail(&e),
        }
    });
}

/// Save the dialog and re-fetch the list it belongs to.
pub fn save_then_reload<D: Draft, R: Resource>(
    dialog: Signal<FormDialog<D>>,
    list: Signal<ListController<R>>,
    ctx: AdminContext,
) {
    spawn(async move {
        let result = save_and_reload(dialog, list, ctx.backend.as_ref()).await;
        let (outcome, fetched) = match result {
            Ok((outcome, fetched)) => (Ok(outcome), fetched),
            Err(e) => (Err(e), None),
        };
        if let Some(saved) = report_submit(outcome, &ctx) {
            ctx.success(saved_message(&saved));
        }
        if let Some(fetched) = fetched {
            report_fetch(fetched, &ctx);
        }
    });
}

/// Open an edit dialog seeded from `GET {collection}/{id}`.
pub fn open_edit_from_detail<D, T>(
    dialog: Signal<FormDialog<D>>,
    ctx: AdminContext,
    id: String,
    seed: impl FnOnce(T) -> D + 'static,
) where
    D: Draft,
    T: DeserializeOwned + 'static,
{
    spawn(async move {
        let opened = form::open_edit_from_detail(dialog, ctx.backend.as_ref(), &id, seed).await;
        if let Err(e) = opened {
            ctx.fail(&e);
        }
    });
}

/// A parent-with-children editor shown in a modal; `None` while closed.
pub type Nested<P> = Signal<Option<NestedEditor<P>>>;

/// Show `fresh` and fetch its parent.
pub fn open_nested<P>(mut editor: Nested<P>, fresh: NestedEditor<P>, ctx: AdminContext)
where
    P: DeserializeOwned + Clone + 'static,
{
    editor.set(Some(fresh));
    refresh_nested(editor, ctx);
}

/// Re-fetch the parent shown in a nested editor.
pub fn refresh_nested<P>(editor: Nested<P>, ctx: AdminContext)
where
    P: DeserializeOwned + Clone + 'static,
{
    spawn(async move {
        if let Err(e) = nested::load(editor, ctx.backend.as_ref()).await {
            ctx.fail(&e);
        }
    });
}

/// Run one child operation, then re-fetch the parent and the list behind it.
pub fn nested_op<P, R>(
    request: ApiRequest,
    editor: Nested<P>,
    list: Signal<ListController<R>>,
    ctx: AdminContext,
    done: &'static str,
) where
    P: DeserializeOwned + Clone + 'static,
    R: Resource,
{
    spawn(async move {
        match nested::apply(editor, request, ctx.backend.as_ref()).await {
            Ok(_) => {
                ctx.success(done);
                reload(list, ctx);
            }
            Err(e) => ctx.fail(&e),
        }
    });
}

/// Reference data for selects, loaded once per page.
pub fn use_options<T, F>(load: impl FnMut() -> F + 'static) -> dioxus::prelude::Resource<Vec<T>>
where
    T: Clone + 'static,
    F: std::future::Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let ctx = use_admin();
    let mut load = load;
    use_resource(move || {
        let ctx = ctx.clone();
        let future = load();
        async move {
            match future.await {
                Ok(items) => items,
                Err(e) => {
                    ctx.fail(&e);
                    Vec::new()
                }
            }
        }
    })
}
