//! On-screen notices. Each one dismisses itself after its lifetime.

use std::time::Duration;

use chrono::Utc;
use dioxus::prelude::*;

use crate::app::state::use_admin;
use crate::notify::{Notice, NOTICE_LIFETIME_MS};

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

// No timers outside the browser; notices stay until dismissed.
#[cfg(not(target_arch = "wasm32"))]
async fn sleep(_duration: Duration) {
    futures::future::pending::<()>().await;
}

#[component]
pub fn Toasts() -> Element {
    let notices = use_admin().notices;
    let shown: Vec<Notice> = notices.read().iter().cloned().collect();

    rsx! {
        div { class: "toasts", aria_live: "polite",
            for notice in shown {
                Toast { key: "{notice.id}", notice }
            }
        }
    }
}

#[component]
fn Toast(notice: Notice) -> Element {
    let mut notices = use_admin().notices;
    let id = notice.id;

    // Dropped with the component when the notice is dismissed by hand.
    use_hook(move || {
        spawn(async move {
            sleep(Duration::from_millis(u64::from(NOTICE_LIFETIME_MS))).await;
            let mut queue = notices.write();
            queue.dismiss(id);
            queue.expire(Utc::now());
        })
    });

    let class = format!("toast {}", notice.severity.css_class());

    rsx! {
        div { class: "{class}",
            div {
                strong { "{notice.summary}" }
                p { "{notice.detail}" }
            }
            button {
                class: "modal-close",
                aria_label: "Dismiss",
                onclick: move |_| notices.write().dismiss(id),
                "×"
            }
        }
    }
}
