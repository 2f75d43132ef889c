//! Dashboard page component.
//!
//! User and course totals plus shortcuts into each screen.

use dioxus::prelude::*;

use crate::app::state::use_admin;
use crate::app::Route;
use crate::resources::dashboard::load_counts;

/// Dashboard page component.
#[component]
pub fn Dashboard() -> Element {
    let ctx = use_admin();
    let counts = use_resource(move || {
        let backend = ctx.backend.clone();
        async move { load_counts(backend.as_ref()).await }
    });

    let counts = counts.read().as_ref().copied();

    rsx! {
        section { class: "mb-8",
            if let Some(counts) = counts {
                div { class: "stat-grid",
                    div { class: "card",
                        small { "Users" }
                        div { class: "stat-value", "{counts.users}" }
                    }
                    div { class: "card",
                        small { "Courses" }
                        div { class: "stat-value", "{counts.courses}" }
                    }
                }
            } else {
                div { class: "card p-6", aria_busy: "true", "Loading dashboard..." }
            }
        }

        section {
            h2 { "Quick links" }
            div { class: "stat-grid",
                QuickLink { to: Route::Courses {}, title: "Courses", text: "Create, publish and price courses" }
                QuickLink { to: Route::Lessons {}, title: "Lessons", text: "Videos, documents and ordering" }
                QuickLink { to: Route::Quizzes {}, title: "Quizzes", text: "Questions and answer options" }
                QuickLink { to: Route::Users {}, title: "Users", text: "Accounts and activation" }
                QuickLink { to: Route::Enrollments {}, title: "Enrollments", text: "Who is taking what" }
                QuickLink { to: Route::Reports {}, title: "Reports", text: "Growth, completion and revenue" }
            }
        }
    }
}

#[component]
fn QuickLink(to: Route, #[props(into)] title: String, #[props(into)] text: String) -> Element {
    rsx! {
        Link { class: "card p-6", to,
            strong { "{title}" }
            p { small { "{text}" } }
        }
    }
}
