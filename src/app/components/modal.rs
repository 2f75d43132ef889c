//! Modal edit dialogs and the confirmation prompt.

use dioxus::prelude::*;

use crate::backend::ApiRequest;
use crate::controller::ConfirmGate;

/// Modal card around a form. Clicking the backdrop or Cancel closes it.
#[component]
pub fn FormModal(
    #[props(into)] title: String,
    saving: bool,
    #[props(default = "Save".to_string(), into)] submit_label: String,
    #[props(default = false)] wide: bool,
    on_submit: EventHandler<()>,
    on_close: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),

            div {
                class: if wide { "card modal modal-wide" } else { "card modal" },
                onclick: move |e| e.stop_propagation(),

                div { class: "modal-header",
                    h2 { "{title}" }
                    button {
                        class: "modal-close",
                        r#type: "button",
                        aria_label: "Close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }

                form {
                    onsubmit: move |e| {
                        e.prevent_default();
                        on_submit.call(());
                    },

                    {children}

                    div { class: "modal-actions",
                        button {
                            r#type: "button",
                            class: "btn btn-outline",
                            onclick: move |_| on_close.call(()),
                            "Cancel"
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: saving,
                            aria_busy: if saving { "true" } else { "false" },
                            "{submit_label}"
                        }
                    }
                }
            }
        }
    }
}

/// Renders the gate's pending confirmation; accepting hands its request to `on_accept`.
#[component]
pub fn ConfirmDialog(gate: Signal<ConfirmGate>, on_accept: EventHandler<ApiRequest>) -> Element {
    let mut gate = gate;
    let Some(pending) = gate.read().pending().cloned() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| gate.write().dismiss(),

            div {
                class: "card modal modal-narrow",
                role: "alertdialog",
                onclick: move |e| e.stop_propagation(),

                h3 { "{pending.title}" }
                p { "{pending.message}" }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| gate.write().dismiss(),
                        "Cancel"
                    }
                    button {
                        class: if pending.danger { "btn btn-danger" } else { "btn btn-primary" },
                        onclick: move |_| {
                            let accepted = gate.write().accept();
                            if let Some(request) = accepted {
                                on_accept.call(request);
                            }
                        },
                        "{pending.accept_label}"
                    }
                }
            }
        }
    }
}
