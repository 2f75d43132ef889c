//! Settings page: content limits and the storage provider.

use dioxus::prelude::*;

use admin_wire::{GeneralSettings, StorageConnectionTestResult, StorageProvider, StorageSettings};

use crate::app::components::{NumberField, SelectField, TextField};
use crate::app::state::{use_admin, use_options, AdminContext};
use crate::backend::ApiRequest;
use crate::error::ApiError;
use crate::resources::settings::{
    fetch_aws_regions, fetch_general, fetch_storage, save_general, save_storage,
    shows_aws_fields, shows_azure_fields, test_connection,
};

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.trim().is_empty())
}

fn limit(value: Option<f64>) -> Option<u32> {
    value.filter(|v| *v > 0.0).map(|v| v as u32)
}

fn save(request: Result<ApiRequest, ApiError>, mut saving: Signal<bool>, ctx: AdminContext, done: &'static str) {
    let request = match request {
        Ok(request) => request,
        Err(e) => return ctx.fail(&e),
    };
    saving.set(true);
    spawn(async move {
        let result = ctx.backend.send(request).await;
        saving.set(false);
        match result {
            Ok(_) => ctx.success(done),
            Err(e) => ctx.fail(&e),
        }
    });
}

#[component]
pub fn Settings() -> Element {
    let ctx = use_admin();
    let mut general = use_signal(|| None::<GeneralSettings>);
    let mut storage = use_signal(|| None::<StorageSettings>);

    let mount_ctx = ctx.clone();
    use_hook(move || {
        spawn(async move {
            match fetch_general(mount_ctx.backend.as_ref()).await {
                Ok(loaded) => general.set(Some(loaded)),
                Err(e) => mount_ctx.fail(&e),
            }
            match fetch_storage(mount_ctx.backend.as_ref()).await {
                Ok(loaded) => storage.set(Some(loaded)),
                Err(e) => mount_ctx.fail(&e),
            }
        });
    });

    let loaded_general = general.read().clone();
    let loaded_storage = storage.read().clone();

    rsx! {
        section { class: "mb-8",
            div { class: "mb-4",
                h2 { class: "text-xl font-semibold", "Content limits" }
                p { class: "text-gray-400 text-sm", "Empty fields mean no limit" }
            }
            if let Some(settings) = loaded_general {
                GeneralForm { general, settings }
            } else {
                div { class: "card p-6", aria_busy: "true", "Loading..." }
            }
        }

        section { class: "mb-8",
            div { class: "mb-4",
                h2 { class: "text-xl font-semibold", "Storage" }
                p { class: "text-gray-400 text-sm", "Where lesson videos and documents are stored" }
            }
            if let Some(settings) = loaded_storage {
                StorageForm { storage, settings }
            } else {
                div { class: "card p-6", aria_busy: "true", "Loading..." }
            }
        }
    }
}

#[component]
fn GeneralForm(general: Signal<Option<GeneralSettings>>, settings: GeneralSettings) -> Element {
    let ctx = use_admin();
    let mut general = general;
    let saving = use_signal(|| false);
    let busy = *saving.read();

    let mut edit = move |f: fn(&mut GeneralSettings, Option<f64>), v: Option<f64>| {
        if let Some(s) = general.write().as_mut() {
            f(s, v);
        }
    };

    let on_save = move |_: MouseEvent| {
        let request = general.read().as_ref().map(save_general);
        if let Some(request) = request {
            save(request, saving, ctx.clone(), "Limits saved.");
        }
    };

    rsx! {
        div { class: "card p-6",
            div { class: "form-grid",
                NumberField {
                    label: "Max lesson title length",
                    value: settings.max_lesson_name_length.map(f64::from),
                    step: "1",
                    on_input: move |v| edit(|s, v| s.max_lesson_name_length = limit(v), v),
                }
                NumberField {
                    label: "Max course title length",
                    value: settings.max_course_name_length.map(f64::from),
                    step: "1",
                    on_input: move |v| edit(|s, v| s.max_course_name_length = limit(v), v),
                }
                NumberField {
                    label: "Max description length",
                    value: settings.max_description_length.map(f64::from),
                    step: "1",
                    on_input: move |v| edit(|s, v| s.max_description_length = limit(v), v),
                }
                NumberField {
                    label: "Max video duration (min)",
                    value: settings.max_video_duration.map(f64::from),
                    step: "1",
                    on_input: move |v| edit(|s, v| s.max_video_duration = limit(v), v),
                }
                NumberField {
                    label: "Max document size (MB)",
                    value: settings.max_document_size.map(|v| v as f64),
                    step: "1",
                    on_input: move |v| edit(|s, v| s.max_document_size = limit(v).map(u64::from), v),
                }
            }
            button {
                class: "btn btn-primary",
                disabled: busy,
                aria_busy: if busy { "true" } else { "false" },
                onclick: on_save,
                "Save limits"
            }
        }
    }
}

#[component]
fn StorageForm(storage: Signal<Option<StorageSettings>>, settings: StorageSettings) -> Element {
    let ctx = use_admin();
    let mut storage = storage;
    let saving = use_signal(|| false);
    let mut testing = use_signal(|| false);
    let mut tested = use_signal(|| None::<StorageConnectionTestResult>);

    let backend = ctx.backend.clone();
    let regions = use_options(move || {
        let backend = backend.clone();
        async move { fetch_aws_regions(backend.as_ref()).await }
    });
    let region_choices: Vec<(String, String)> = regions
        .read()
        .iter()
        .flatten()
        .map(|r| (r.value.clone(), r.label.clone()))
        .collect();

    let mut edit = move |f: fn(&mut StorageSettings, String), v: String| {
        if let Some(s) = storage.write().as_mut() {
            f(s, v);
        }
    };

    let providers: Vec<(String, String)> = StorageProvider::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), p.as_str().to_string()))
        .collect();
    let provider = settings.provider;
    let busy = *saving.read();
    let test_busy = *testing.read();
    let result = tested.read().clone();

    let save_ctx = ctx.clone();
    let on_save = move |_: MouseEvent| {
        let request = storage.read().as_ref().map(save_storage);
        if let Some(request) = request {
            save(request, saving, save_ctx.clone(), "Storage settings saved.");
        }
    };
    let on_test = move |_: MouseEvent| {
        let Some(current) = storage.read().clone() else {
            return;
        };
        let backend = ctx.backend.clone();
        testing.set(true);
        tested.set(None);
        spawn(async move {
            let result = test_connection(backend.as_ref(), &current).await;
            testing.set(false);
            tested.set(Some(result));
        });
    };

    rsx! {
        div { class: "card p-6",
            SelectField {
                label: "Provider",
                value: provider.as_str().to_string(),
                options: providers,
                on_change: move |v: String| {
                    if let Some(p) = StorageProvider::parse(&v) {
                        if let Some(s) = storage.write().as_mut() {
                            s.provider = p;
                        }
                        tested.set(None);
                    }
                },
            }

            if shows_aws_fields(provider) {
                div { class: "form-grid",
                    TextField {
                        label: "Access key ID",
                        value: text(&settings.aws_access_key_id),
                        on_input: move |v| edit(|s, v| s.aws_access_key_id = non_empty(v), v),
                    }
                    TextField {
                        label: "Secret access key",
                        input_type: "password",
                        value: text(&settings.aws_secret_access_key),
                        on_input: move |v| edit(|s, v| s.aws_secret_access_key = non_empty(v), v),
                    }
                    TextField {
                        label: "Bucket",
                        value: text(&settings.aws_bucket_name),
                        on_input: move |v| edit(|s, v| s.aws_bucket_name = non_empty(v), v),
                    }
                    SelectField {
                        label: "Region",
                        value: text(&settings.aws_region),
                        options: region_choices,
                        placeholder: "Select a region",
                        on_change: move |v| edit(|s, v| s.aws_region = non_empty(v), v),
                    }
                }
            }

            if shows_azure_fields(provider) {
                div { class: "form-grid",
                    TextField {
                        label: "Connection string",
                        input_type: "password",
                        value: text(&settings.azure_connection_string),
                        on_input: move |v| edit(|s, v| s.azure_connection_string = non_empty(v), v),
                    }
                    TextField {
                        label: "Container",
                        value: text(&settings.azure_container_name),
                        on_input: move |v| edit(|s, v| s.azure_container_name = non_empty(v), v),
                    }
                }
            }

            if provider != StorageProvider::Local {
                TextField {
                    label: "CDN base URL",
                    value: text(&settings.cdn_base_url),
                    placeholder: "https://cdn.example.com",
                    on_input: move |v| edit(|s, v| s.cdn_base_url = non_empty(v), v),
                }
            }

            if let Some(result) = result {
                ConnectionResult { result }
            }

            div { class: "row-actions",
                button {
                    class: "btn btn-primary",
                    disabled: busy,
                    aria_busy: if busy { "true" } else { "false" },
                    onclick: on_save,
                    "Save storage"
                }
                if provider != StorageProvider::Local {
                    button {
                        class: "btn btn-outline",
                        disabled: test_busy,
                        aria_busy: if test_busy { "true" } else { "false" },
                        onclick: on_test,
                        "Test connection"
                    }
                }
            }
        }
    }
}

#[component]
fn ConnectionResult(result: StorageConnectionTestResult) -> Element {
    let (class, headline) = if result.success {
        ("notice notice-success", "Connection succeeded")
    } else {
        ("notice notice-error", "Connection failed")
    };
    let message = result.message.clone().unwrap_or_default();
    let location = result.bucket_location.clone();
    rsx! {
        div { class, role: "status",
            strong { "{headline}" }
            if !message.is_empty() {
                p { "{message}" }
            }
            if let Some(location) = location {
                small { "Bucket location: {location}" }
            }
        }
    }
}
