//! Dioxus application entry point.
//!
//! `App` loads the client config, builds the API client and session, provides
//! them as context and mounts the router. Every page except the login form
//! renders inside [`components::AdminShell`], which enforces the auth gate.

use std::rc::Rc;

use chrono::Utc;
use dioxus::prelude::*;
use tracing::debug;

pub mod components;
pub mod pages;
pub mod state;

use crate::backend::SharedBackend;
use crate::client::ApiClient;
use crate::client_config::{page_origin, ClientConfig};
use crate::notify::NoticeQueue;
use crate::session::{default_store, AuthService, SessionState};
use components::theme::THEME_SCRIPT;
use components::{AdminShell, Toasts};
use pages::{
    Applications, Categories, Courses, Dashboard, Enrollments, Lessons, Login, NotFound,
    Notifications, PromoCodes, Quizzes, Reports, Settings, Users,
};
use state::AdminContext;

/// CSS styles for the application (extends Pico CSS).
const CUSTOM_STYLES: &str = r#"
:root { --pico-font-size: 15px; }
.status-ok { color: var(--pico-ins-color); }
.status-err { color: var(--pico-del-color); }
small { color: var(--pico-muted-color); }
.admin-shell { display: flex; min-height: 100vh; }
.sidebar { width: 230px; flex-shrink: 0; padding: 1rem; border-right: 1px solid var(--pico-muted-border-color); }
.sidebar-brand { display: flex; justify-content: space-between; align-items: center; font-weight: 700; margin-bottom: 1rem; }
.sidebar-toggle { display: none; margin: 0; padding: 0.25rem 0.5rem; }
.sidebar ul { list-style: none; padding: 0; margin: 0 0 1rem; }
.sidebar li { list-style: none; margin: 0; }
.nav-section { display: block; text-transform: uppercase; font-size: 0.7rem; letter-spacing: 0.05em; margin: 0.5rem 0 0.25rem; }
.nav-link { display: block; padding: 0.35rem 0.6rem; border-radius: 6px; text-decoration: none; }
.nav-link.active { background: var(--pico-primary-background); color: var(--pico-primary-inverse); }
.admin-main { flex: 1; min-width: 0; display: flex; flex-direction: column; }
.topbar { display: flex; justify-content: space-between; align-items: center; padding: 0.75rem 1.5rem; border-bottom: 1px solid var(--pico-muted-border-color); }
.topbar h1 { font-size: 1.3rem; margin: 0; }
.topbar-user { display: flex; gap: 1rem; align-items: center; }
.page { padding: 1.5rem; flex: 1; }
.page-footer { padding: 0.5rem 1.5rem; }
.toolbar { display: flex; flex-wrap: wrap; gap: 0.5rem; align-items: center; margin-bottom: 1rem; }
.toolbar input, .toolbar select { width: auto; margin: 0; }
.toolbar .spacer { flex: 1; }
.card { border: 1px solid var(--pico-muted-border-color); border-radius: 8px; background: var(--pico-card-background-color); }
.p-6 { padding: 1.5rem; }
.table-wrap { overflow-x: auto; position: relative; }
.table-wrap.is-loading table { opacity: 0.5; pointer-events: none; transition: opacity 0.15s; }
.table-refreshing { position: absolute; top: 0.5rem; right: 1rem; font-size: 0.8rem; color: var(--pico-muted-color); }
.table-notice { text-align: center; color: var(--pico-muted-color); }
.row-actions { display: flex; gap: 0.35rem; flex-wrap: wrap; }
.btn { margin: 0; }
.btn-sm { padding: 0.2rem 0.55rem; font-size: 0.8rem; }
.btn-danger { background: var(--pico-del-color); border-color: var(--pico-del-color); color: #fff; }
.badge { padding: 0.1rem 0.5rem; border-radius: 999px; font-size: 0.75rem; }
.badge-ok { background: var(--pico-ins-color); color: #fff; }
.badge-muted { background: var(--pico-muted-border-color); }
.paginator { display: flex; flex-wrap: wrap; gap: 1rem; align-items: center; justify-content: space-between; margin-top: 0.75rem; }
.paginator-pages { display: flex; gap: 0.25rem; align-items: center; }
.paginator select { width: auto; margin: 0; }
.modal-backdrop { position: fixed; inset: 0; background: rgba(0,0,0,.5); display: flex; align-items: center; justify-content: center; z-index: 50; }
.modal { width: min(640px, 94vw); max-height: 90vh; overflow-y: auto; padding: 1.5rem; }
.modal-wide { width: min(960px, 96vw); }
.modal-narrow { width: min(420px, 94vw); }
.modal-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1rem; }
.modal-header h2 { margin: 0; font-size: 1.2rem; }
.modal-close { background: none; border: none; color: inherit; font-size: 1.3rem; padding: 0 0.25rem; margin: 0; }
.modal-actions { display: flex; gap: 0.5rem; justify-content: flex-end; margin-top: 1rem; }
.form-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 0 1rem; }
.field.invalid span { color: var(--pico-del-color); }
.field-hint { display: block; margin-top: -0.5rem; }
.checkbox-field { display: flex; gap: 0.5rem; align-items: center; }
.stat-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 1rem; margin-bottom: 1.5rem; }
.stat-grid .card { padding: 1rem; }
.stat-value { font-size: 1.6rem; font-weight: 700; }
.progress { height: 6px; margin: 0 0 0.25rem; }
.toasts { position: fixed; top: 1rem; right: 1rem; display: flex; flex-direction: column; gap: 0.5rem; z-index: 60; width: 320px; }
.toast { display: flex; justify-content: space-between; gap: 0.5rem; padding: 0.75rem 1rem; border-radius: 8px; background: var(--pico-card-background-color); border-left: 4px solid var(--pico-muted-border-color); box-shadow: 0 2px 8px rgba(0,0,0,.15); }
.toast p { margin: 0; }
.toast-success { border-left-color: var(--pico-ins-color); }
.toast-info { border-left-color: var(--pico-primary-background); }
.toast-warn { border-left-color: #e0a800; }
.toast-error { border-left-color: var(--pico-del-color); }
.theme-switcher { display: flex; gap: 0.25rem; }
.theme-switcher button { padding: 0.25rem 0.5rem; font-size: 0.8rem; margin: 0; }
.theme-switcher button.active { background: var(--pico-primary-background); color: var(--pico-primary-inverse); }
.login { max-width: 400px; margin: 10vh auto; }
.mb-4 { margin-bottom: 1rem; }
.mb-8 { margin-bottom: 2rem; }
.text-xl { font-size: 1.2rem; margin: 0; }
.text-sm { font-size: 0.85rem; margin: 0; }
.text-gray-400 { color: var(--pico-muted-color); }
.font-semibold { font-weight: 600; }
.notice { padding: 0.75rem 1rem; border-radius: 8px; margin: 1rem 0; border-left: 4px solid var(--pico-muted-border-color); }
.notice p { margin: 0.25rem 0 0; }
.notice-success { border-left-color: var(--pico-ins-color); }
.notice-error { border-left-color: var(--pico-del-color); }
@media (max-width: 900px) {
    .admin-shell { flex-direction: column; }
    .sidebar { width: auto; border-right: none; border-bottom: 1px solid var(--pico-muted-border-color); }
    .sidebar-toggle { display: inline-block; }
    .sidebar .sidebar-links { display: none; }
    .sidebar.open .sidebar-links { display: block; }
}
"#;

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login")]
    Login {},
    #[layout(AdminShell)]
        #[route("/")]
        Dashboard {},
        #[route("/users")]
        Users {},
        #[route("/courses")]
        Courses {},
        #[route("/categories")]
        Categories {},
        #[route("/lessons")]
        Lessons {},
        #[route("/quizzes")]
        Quizzes {},
        #[route("/enrollments")]
        Enrollments {},
        #[route("/promo-codes")]
        PromoCodes {},
        #[route("/applications")]
        Applications {},
        #[route("/notifications")]
        Notifications {},
        #[route("/reports")]
        Reports {},
        #[route("/settings")]
        Settings {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// Heading shown in the topbar and browser tab.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login {} => "Sign in",
            Route::Dashboard {} => "Dashboard",
            Route::Users {} => "Users",
            Route::Courses {} => "Courses",
            Route::Categories {} => "Categories",
            Route::Lessons {} => "Lessons",
            Route::Quizzes {} => "Quizzes",
            Route::Enrollments {} => "Enrollments",
            Route::PromoCodes {} => "Promo Codes",
            Route::Applications {} => "Applications",
            Route::Notifications {} => "Notifications",
            Route::Reports {} => "Reports",
            Route::Settings {} => "System Settings",
            Route::NotFound { .. } => "Not found",
        }
    }
}

/// Root app component: resolves the client config, then mounts the admin.
#[component]
pub fn App() -> Element {
    let config = use_resource(|| async {
        match page_origin() {
            Some(origin) => ClientConfig::fetch(&origin).await,
            None => ClientConfig::default(),
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css" }
        document::Style { {CUSTOM_STYLES} }
        // Theme init runs immediately (no DOM needed) to prevent flash
        document::Script { {THEME_SCRIPT} }

        {match config.read().clone() {
            Some(config) => rsx! { AdminRoot { config } },
            None => rsx! { div { class: "container card p-6", aria_busy: "true", "Loading..." } },
        }}
    }
}

/// Builds the client and session once, then provides them to every page.
#[component]
fn AdminRoot(config: ClientConfig) -> Element {
    let ctx = use_context_provider(|| {
        let backend: SharedBackend = Rc::new(ApiClient::new(config.api_base_url.clone()));
        let auth = AuthService::new(backend.clone(), default_store(&config.session_key));
        let session = Signal::new(auth.hydrate(Utc::now()));
        AdminContext {
            backend,
            auth,
            config: config.clone(),
            session,
            notices: Signal::new(NoticeQueue::default()),
        }
    });

    // Confirm a restored session with the backend once per load
    use_hook(move || {
        let mut session = ctx.session;
        if matches!(*session.peek(), SessionState::Authenticated(_)) {
            let auth = ctx.auth.clone();
            spawn(async move {
                match auth.revalidate().await {
                    Ok(Some(user)) => session.set(SessionState::Authenticated(user)),
                    Ok(None) => session.set(SessionState::Anonymous),
                    Err(e) => debug!(error = %e, "Keeping restored session"),
                }
            });
        }
    });

    rsx! {
        Router::<Route> {}
        Toasts {}
    }
}
