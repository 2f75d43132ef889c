//! Notifications page: delivery stats, batch history, send and resend.

use dioxus::prelude::*;

use admin_wire::notification::NOTIFICATION_TYPES;
use admin_wire::{BatchStatus, NotificationBatch, NotificationStats, RecipientType, Role, User};

use crate::app::components::{
    CheckboxField, ConfirmDialog, FormModal, Paginator, SelectField, TableCard, TableNotice,
    TextArea, TextField,
};
use crate::app::state::{use_admin, use_list, use_options, use_paging, AdminContext};
use crate::backend::ApiRequest;
use crate::controller::{ConfirmGate, FetchOutcome, FormDialog, SubmitOutcome};
use crate::resources::courses::course_options;
use crate::resources::notifications::{
    fetch_stats, refresh, resend_confirm, send_and_refresh, send_dialog, BatchesResource,
    NotificationDraft, Refreshed,
};
use crate::resources::short_date;
use crate::resources::users::user_options;

fn load_stats(mut stats: Signal<Option<NotificationStats>>, ctx: AdminContext) {
    spawn(async move {
        match fetch_stats(ctx.backend.as_ref()).await {
            Ok(loaded) => stats.set(Some(loaded)),
            Err(e) => ctx.fail(&e),
        }
    });
}

/// Batches and stats both change after a send or resend.
fn show_refreshed(refreshed: Refreshed, mut stats: Signal<Option<NotificationStats>>, ctx: &AdminContext) {
    if let FetchOutcome::Failed(e) = refreshed.batches {
        ctx.fail(&e);
    }
    match refreshed.stats {
        Ok(loaded) => stats.set(Some(loaded)),
        Err(e) => ctx.fail(&e),
    }
}

#[component]
pub fn Notifications() -> Element {
    let ctx = use_admin();
    let list = use_list::<BatchesResource>();
    let paging = use_paging(list);
    let stats = use_signal(|| None::<NotificationStats>);
    let mut dialog = use_signal(send_dialog);
    let mut confirm = use_signal(ConfirmGate::default);

    let mount_ctx = ctx.clone();
    use_hook(move || load_stats(stats, mount_ctx));

    let send_ctx = ctx.clone();
    let send = use_callback(move |_: ()| {
        let ctx = send_ctx.clone();
        spawn(async move {
            match send_and_refresh(dialog, list, ctx.backend.as_ref()).await {
                Ok((SubmitOutcome::Saved(_), refreshed)) => {
                    ctx.success("Notification sent.");
                    if let Some(refreshed) = refreshed {
                        show_refreshed(refreshed, stats, &ctx);
                    }
                }
                Ok((SubmitOutcome::Invalid(_), _)) => ctx.warn("Please fill in the required fields."),
                Ok((SubmitOutcome::Skipped, _)) => {}
                Err(e) => ctx.fail(&e),
            }
        });
    });
    let resend_ctx = ctx.clone();
    let resend = use_callback(move |request: ApiRequest| {
        let ctx = resend_ctx.clone();
        spawn(async move {
            match ctx.backend.send(request).await {
                Ok(_) => {
                    ctx.success("Notification queued again.");
                    let refreshed = refresh(list, ctx.backend.as_ref()).await;
                    show_refreshed(refreshed, stats, &ctx);
                }
                Err(e) => ctx.fail(&e),
            }
        });
    });

    let current_stats = stats.read().clone();
    let view = list.read();
    let batches = view.items().to_vec();

    rsx! {
        if let Some(s) = current_stats {
            StatsCards { stats: s }
        }

        div { class: "toolbar",
            h2 { "Sent notifications" }
            span { class: "spacer" }
            button { class: "btn btn-primary", onclick: move |_| dialog.write().open_create(), "Send notification" }
        }

        TableCard { loading: view.is_loading(),
            table {
                thead {
                    tr {
                        th { "Title" }
                        th { "Recipients" }
                        th { "Delivered" }
                        th { "Push" }
                        th { "Status" }
                        th { "Sent" }
                        th {}
                    }
                }
                tbody {
                    if batches.is_empty() {
                        TableNotice { columns: 7, loading: view.is_loading(), empty_text: "No notifications sent yet." }
                    }
                    for batch in batches {
                        BatchRow {
                            key: "{batch.id}",
                            batch: batch.clone(),
                            on_resend: move |b: NotificationBatch| confirm.write().request(resend_confirm(&b)),
                        }
                    }
                }
            }
            Paginator {
                page: view.page(),
                total_pages: view.total_pages(),
                page_size: view.page_size(),
                page_sizes: ctx.config.page_sizes(),
                first_row: view.first_row(),
                last_row: view.last_row(),
                total: view.total(),
                on_page: paging.on_page,
                on_page_size: paging.on_page_size,
            }
        }

        if dialog.read().is_open() {
            SendDialog { dialog, on_send: send }
        }
        ConfirmDialog { gate: confirm, on_accept: resend }
    }
}

#[component]
fn StatsCards(stats: NotificationStats) -> Element {
    let read_rate = format!("{:.1}%", stats.read_rate * 100.0);
    rsx! {
        div { class: "stat-grid mb-8",
            div { class: "card",
                small { "Delivered" }
                div { class: "stat-value", "{stats.total_sent}" }
            }
            div { class: "card",
                small { "Read rate" }
                div { class: "stat-value", "{read_rate}" }
            }
            div { class: "card",
                small { "Push sent" }
                div { class: "stat-value", "{stats.total_push_sent}" }
            }
            div { class: "card",
                small { "Scheduled" }
                div { class: "stat-value", "{stats.pending_scheduled}" }
            }
            div { class: "card",
                small { "Failed batches" }
                div { class: "stat-value", "{stats.failed_batches}" }
            }
        }
    }
}

fn status_label(status: BatchStatus) -> &'static str {
    match status {
        BatchStatus::Pending => "Pending",
        BatchStatus::Processing => "Processing",
        BatchStatus::Completed => "Completed",
        BatchStatus::Failed => "Failed",
    }
}

#[component]
fn BatchRow(batch: NotificationBatch, on_resend: EventHandler<NotificationBatch>) -> Element {
    let title = batch.title.clone();
    let message = batch.message.clone();
    let recipients = match (batch.recipient_type, batch.target_role.as_deref()) {
        (RecipientType::Role, Some(role)) => format!("Role: {}", role),
        (kind, _) => kind.label().to_string(),
    };
    let delivered = format!("{} / {}", batch.sent_count, batch.total_recipients);
    let failed = batch.failed_count;
    let push = if batch.send_push { "Yes" } else { "No" };
    let status = status_label(batch.status);
    let status_class = match batch.status {
        BatchStatus::Completed => "badge badge-ok",
        _ => "badge badge-muted",
    };
    let sent = short_date(&batch.created_at);

    rsx! {
        tr {
            td {
                "{title}"
                br {}
                small { "{message}" }
            }
            td { "{recipients}" }
            td {
                "{delivered}"
                if failed > 0 {
                    br {}
                    small { "{failed} failed" }
                }
            }
            td { "{push}" }
            td { span { class: status_class, "{status}" } }
            td { "{sent}" }
            td {
                button {
                    class: "btn btn-outline btn-sm",
                    onclick: move |_| on_resend.call(batch.clone()),
                    "Resend"
                }
            }
        }
    }
}

#[component]
fn SendDialog(dialog: Signal<FormDialog<NotificationDraft>>, on_send: EventHandler<()>) -> Element {
    let ctx = use_admin();
    let mut dialog = dialog;

    let backend = ctx.backend.clone();
    let users = use_options(move || {
        let backend = backend.clone();
        async move { user_options(backend.as_ref()).await }
    });
    let backend = ctx.backend.clone();
    let courses = use_options(move || {
        let backend = backend.clone();
        async move { course_options(backend.as_ref()).await }
    });

    let form = dialog.read();
    let Some(draft) = form.draft().cloned() else {
        return rsx! {};
    };
    let title_invalid = form.is_invalid("title");
    let message_invalid = form.is_invalid("message");
    let role_invalid = form.is_invalid("targetRole");
    let users_invalid = form.is_invalid("targetUserIds");
    let saving = form.is_saving();
    drop(form);

    let kinds: Vec<(String, String)> = NOTIFICATION_TYPES
        .iter()
        .map(|k| (k.to_string(), k.to_string()))
        .collect();
    let recipient_types: Vec<(String, String)> = RecipientType::ALL
        .iter()
        .map(|t| (t.as_str().to_string(), t.label().to_string()))
        .collect();
    let roles: Vec<(String, String)> = Role::ALL
        .iter()
        .map(|r| (r.as_str().to_string(), r.label().to_string()))
        .collect();
    let course_choices: Vec<(String, String)> = courses
        .read()
        .iter()
        .flatten()
        .map(|c| (c.id.clone(), c.title.clone()))
        .collect();
    let user_list: Vec<User> = users.read().clone().unwrap_or_default();
    let chosen_users = draft.target_user_ids.clone();
    let chosen_count = chosen_users.len();

    rsx! {
        FormModal {
            title: "Send notification",
            saving,
            wide: true,
            submit_label: "Send",
            on_submit: move |_| on_send.call(()),
            on_close: move |_| dialog.write().cancel(),

            TextField {
                label: "Title",
                value: draft.title.clone(),
                required: true,
                invalid: title_invalid,
                on_input: move |v| dialog.write().edit(|d| d.title = v),
            }
            TextArea {
                label: "Message",
                value: draft.message.clone(),
                required: true,
                invalid: message_invalid,
                rows: 4,
                on_input: move |v| dialog.write().edit(|d| d.message = v),
            }
            div { class: "form-grid",
                SelectField {
                    label: "Type",
                    value: draft.kind.clone(),
                    options: kinds,
                    on_change: move |v| dialog.write().edit(|d| d.kind = v),
                }
                SelectField {
                    label: "Recipients",
                    value: draft.recipient_type.as_str().to_string(),
                    options: recipient_types,
                    on_change: move |v: String| {
                        if let Some(kind) = RecipientType::parse(&v) {
                            dialog.write().edit(|d| d.set_recipient_type(kind));
                        }
                    },
                }
                if draft.recipient_type == RecipientType::Role {
                    SelectField {
                        label: "Role",
                        value: draft.target_role.map(|r| r.as_str().to_string()).unwrap_or_default(),
                        options: roles,
                        required: true,
                        invalid: role_invalid,
                        placeholder: "Select a role",
                        on_change: move |v: String| {
                            let role = Role::ALL.into_iter().find(|r| r.as_str() == v);
                            dialog.write().edit(|d| d.target_role = role);
                        },
                    }
                }
                SelectField {
                    label: "Related course",
                    value: draft.related_course_id.clone(),
                    options: course_choices,
                    placeholder: "None",
                    on_change: move |v| dialog.write().edit(|d| d.related_course_id = v),
                }
                TextField {
                    label: "Schedule for",
                    input_type: "datetime-local",
                    value: draft.scheduled_at.clone(),
                    hint: "Leave empty to send now",
                    on_input: move |v| dialog.write().edit(|d| d.scheduled_at = v),
                }
            }

            if draft.recipient_type == RecipientType::SpecificUsers {
                fieldset { class: if users_invalid { "field invalid" } else { "field" },
                    legend { "Users ({chosen_count} selected)" }
                    div { class: "table-wrap", style: "max-height: 14rem; overflow-y: auto;",
                        for user in user_list {
                            RecipientOption {
                                key: "{user.id}",
                                checked: chosen_users.contains(&user.id),
                                user: user.clone(),
                                on_toggle: move |id: String| dialog.write().edit(|d| d.toggle_user(&id)),
                            }
                        }
                    }
                }
            }

            CheckboxField {
                label: "Also send as push notification",
                checked: draft.send_push,
                on_change: move |v| dialog.write().edit(|d| d.send_push = v),
            }
        }
    }
}

#[component]
fn RecipientOption(user: User, checked: bool, on_toggle: EventHandler<String>) -> Element {
    let label = format!("{} ({})", user.full_name(), user.email);
    let id = user.id.clone();
    rsx! {
        label { class: "checkbox-field",
            input {
                r#type: "checkbox",
                checked,
                onchange: move |_| on_toggle.call(id.clone()),
            }
            "{label}"
        }
    }
}
