//! Sidebar navigation grouped by area.

use dioxus::prelude::*;

use crate::app::Route;

fn sections() -> Vec<(Option<&'static str>, Vec<(&'static str, Route)>)> {
    vec![
        (None, vec![("Dashboard", Route::Dashboard {})]),
        (
            Some("Management"),
            vec![
                ("Users", Route::Users {}),
                ("Courses", Route::Courses {}),
                ("Categories", Route::Categories {}),
                ("Notifications", Route::Notifications {}),
                ("Promo Codes", Route::PromoCodes {}),
            ],
        ),
        (
            Some("Content"),
            vec![("Lessons", Route::Lessons {}), ("Quizzes", Route::Quizzes {})],
        ),
        (
            Some("Reports"),
            vec![
                ("Reports", Route::Reports {}),
                ("Enrollments", Route::Enrollments {}),
            ],
        ),
        (
            Some("Settings"),
            vec![
                ("Applications", Route::Applications {}),
                ("System", Route::Settings {}),
            ],
        ),
    ]
}

/// Sidebar with the active item highlighted; collapses behind a toggle on small screens.
#[component]
pub fn Sidebar() -> Element {
    let mut menu_open = use_signal(|| false);

    rsx! {
        aside { class: if menu_open() { "sidebar open" } else { "sidebar" },
            div { class: "sidebar-brand",
                Link { to: Route::Dashboard {}, "Education Admin" }
                button {
                    class: "sidebar-toggle",
                    r#type: "button",
                    aria_label: "Toggle menu",
                    onclick: move |_| menu_open.toggle(),
                    if menu_open() { "×" } else { "☰" }
                }
            }
            nav { class: "sidebar-links",
                for (title, items) in sections() {
                    if let Some(title) = title {
                        small { class: "nav-section", "{title}" }
                    }
                    ul {
                        for (label, route) in items {
                            li { key: "{label}",
                                Link {
                                    class: "nav-link",
                                    active_class: "active",
                                    to: route,
                                    onclick: move |_| menu_open.set(false),
                                    "{label}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
