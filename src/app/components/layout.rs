//! Admin shell wrapping every signed-in page.

use dioxus::prelude::*;

use super::nav::Sidebar;
use super::theme::ThemeSwitcher;
use crate::app::state::use_admin;
use crate::app::Route;
use crate::session::{gate, Gate};

/// Layout route: gates on the session, then renders sidebar, topbar and the page.
#[component]
pub fn AdminShell() -> Element {
    let ctx = use_admin();
    let session = ctx.session;
    let route: Route = use_route();
    let nav = navigator();

    use_effect(move || {
        if gate(&session.read()) == Gate::RedirectToLogin {
            nav.replace(Route::Login {});
        }
    });

    let state = session.read().clone();
    match gate(&state) {
        Gate::Loading | Gate::RedirectToLogin => rsx! {
            div { class: "container card p-6", aria_busy: "true", "Loading..." }
        },
        Gate::Denied => {
            let ctx = ctx.clone();
            rsx! {
                main { class: "container",
                    article { class: "card p-6",
                        h2 { "Access denied" }
                        p { "You do not have permission to access this area." }
                        button { class: "btn btn-outline", onclick: move |_| ctx.sign_out(), "Sign out" }
                    }
                }
            }
        }
        Gate::Allowed => {
            let user = state.user().cloned().unwrap_or_default();
            let name = user.full_name();
            let role = user.role.label();
            let title = route.title();
            let version = env!("CARGO_PKG_VERSION");
            rsx! {
                document::Title { "{title} - Education Admin" }
                div { class: "admin-shell",
                    Sidebar {}
                    div { class: "admin-main",
                        header { class: "topbar",
                            h1 { "{title}" }
                            div { class: "topbar-user",
                                span {
                                    strong { "{name}" }
                                    small { " {role}" }
                                }
                                ThemeSwitcher {}
                                button {
                                    class: "btn btn-outline btn-sm",
                                    onclick: move |_| ctx.sign_out(),
                                    "Logout"
                                }
                            }
                        }
                        main { class: "page",
                            Outlet::<Route> {}
                        }
                        footer { class: "page-footer",
                            small { "Education Admin v{version}" }
                        }
                    }
                }
            }
        }
    }
}
