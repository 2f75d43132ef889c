//! Sign-in form.

use dioxus::prelude::*;

use crate::app::components::TextField;
use crate::app::state::use_admin;
use crate::app::Route;
use crate::error::ApiError;
use crate::session::SessionState;

#[component]
pub fn Login() -> Element {
    let ctx = use_admin();
    let nav = navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut signing_in = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut invalid = use_signal(|| (false, false));

    // Already signed in: straight to the dashboard
    let session = ctx.session;
    use_effect(move || {
        if matches!(*session.read(), SessionState::Authenticated(ref u) if u.role.can_administer()) {
            nav.replace(Route::Dashboard {});
        }
    });

    let mut submit = move |_: ()| {
        if signing_in() {
            return;
        }
        let ctx = ctx.clone();
        let (address, secret) = (email(), password());
        signing_in.set(true);
        error.set(None);
        spawn(async move {
            match ctx.auth.login(&address, &secret).await {
                Ok(user) => {
                    let mut session = ctx.session;
                    session.set(SessionState::Authenticated(user));
                    nav.replace(Route::Dashboard {});
                }
                Err(ApiError::Validation(errors)) => {
                    invalid.set((errors.contains("email"), errors.contains("password")));
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            signing_in.set(false);
        });
    };

    let (email_invalid, password_invalid) = invalid();

    rsx! {
        document::Title { "Sign in - Education Admin" }
        main { class: "container",
            article { class: "card p-6 login",
                h2 { "Education Admin" }
                p { "Sign in with an administrator or content manager account." }
                form {
                    onsubmit: move |e| {
                        e.prevent_default();
                        submit(());
                    },
                    TextField {
                        label: "Email",
                        input_type: "email",
                        value: email(),
                        invalid: email_invalid,
                        required: true,
                        on_input: move |v| email.set(v),
                    }
                    TextField {
                        label: "Password",
                        input_type: "password",
                        value: password(),
                        invalid: password_invalid,
                        required: true,
                        on_input: move |v| password.set(v),
                    }
                    if let Some(message) = error() {
                        p { class: "status-err", "{message}" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: signing_in(),
                        aria_busy: if signing_in() { "true" } else { "false" },
                        "Sign in"
                    }
                }
            }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        main { class: "container",
            article { class: "card p-6",
                h2 { "Page not found" }
                p { "Nothing lives at /{path}." }
                Link { to: Route::Dashboard {}, "Back to the dashboard" }
            }
        }
    }
}
