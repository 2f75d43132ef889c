//! Promo codes page.

use dioxus::prelude::*;

use admin_wire::{DiscountType, PromoCode, PromoCodeDetail, PromoCodeUsage};

use crate::app::components::{
    BoolFilter, CheckboxField, ConfirmDialog, FormModal, NumberField, Paginator, SelectField,
    StatusBadge, TableCard, TableNotice, TextArea, TextField,
};
use crate::app::state::{
    open_edit_from_detail, use_action, use_admin, use_filter, use_list, use_options, use_paging,
    use_save,
};
use crate::controller::{ConfirmGate, FormDialog, PendingConfirm};
use crate::resources::courses::course_options;
use crate::resources::promo_codes::{
    active_toggle, discount_label, PromoCodesResource, PromoDraft,
};
use crate::resources::{short_date, Resource};

#[component]
pub fn PromoCodes() -> Element {
    let ctx = use_admin();
    let list = use_list::<PromoCodesResource>();
    let paging = use_paging(list);
    let on_search = use_filter(list, |f, search: String| f.search = search);
    let on_active = use_filter(list, |f, active: Option<bool>| f.is_active = active);
    let on_expired = use_filter(list, |f, expired: Option<bool>| f.is_expired = expired);
    let on_course = use_filter(list, |f, course: String| {
        f.course_id = Some(course).filter(|c| !c.is_empty())
    });
    let run = use_action(list, "Promo code updated.");
    let mut dialog = use_signal(|| FormDialog::<PromoDraft>::new(PromoCodesResource::PATH));
    let save = use_save(dialog, list);
    let mut confirm = use_signal(ConfirmGate::default);

    let backend = ctx.backend.clone();
    let courses = use_options(move || {
        let backend = backend.clone();
        async move { course_options(backend.as_ref()).await }
    });
    let course_choices: Vec<(String, String)> = courses
        .read()
        .iter()
        .flatten()
        .map(|c| (c.id.clone(), c.title.clone()))
        .collect();

    let edit_ctx = ctx.clone();
    let open_edit = use_callback(move |id: String| {
        open_edit_from_detail(dialog, edit_ctx.clone(), id, |detail: PromoCodeDetail| {
            PromoDraft::from(detail)
        })
    });

    let view = list.read();
    let codes = view.items().to_vec();
    let filter = view.filter().clone();
    let search = filter.search.clone();
    let course_value = filter.course_id.clone().unwrap_or_default();

    rsx! {
        div { class: "toolbar",
            input {
                r#type: "search",
                placeholder: "Search codes",
                value: "{search}",
                oninput: move |e| on_search.call(e.value()),
            }
            select {
                aria_label: "Course",
                value: "{course_value}",
                onchange: move |e| on_course.call(e.value()),
                option { value: "", selected: course_value.is_empty(), "All courses" }
                for (id, title) in course_choices.clone() {
                    option { key: "{id}", value: "{id}", selected: id == course_value, "{title}" }
                }
            }
            BoolFilter { label: "Status", yes: "Active", no: "Inactive", value: filter.is_active, on_change: on_active }
            BoolFilter { label: "Validity", yes: "Expired", no: "Not expired", value: filter.is_expired, on_change: on_expired }
            span { class: "spacer" }
            button { class: "btn btn-primary", onclick: move |_| dialog.write().open_create(), "New promo code" }
        }

        TableCard { loading: view.is_loading(),
            table {
                thead {
                    tr {
                        th { "Code" }
                        th { "Discount" }
                        th { "Course" }
                        th { "Usage" }
                        th { "Valid" }
                        th { "Status" }
                        th {}
                    }
                }
                tbody {
                    if codes.is_empty() {
                        TableNotice { columns: 7, loading: view.is_loading(), empty_text: "No promo codes found." }
                    }
                    for promo in codes {
                        PromoRow {
                            key: "{promo.id}",
                            promo: promo.clone(),
                            on_edit: move |c: PromoCode| open_edit.call(c.id),
                            on_toggle: move |c: PromoCode| run.call(active_toggle(&c)),
                            on_delete: move |c: PromoCode| {
                                confirm.write().request(PendingConfirm::delete(PromoCodesResource::PATH, &c.id, &c.code))
                            },
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
            PromoDialog { dialog, course_choices, on_save: save }
        }
        ConfirmDialog { gate: confirm, on_accept: run }
    }
}

fn validity_label(code: &PromoCode) -> String {
    match (code.valid_from.as_deref(), code.valid_to.as_deref()) {
        (None, None) => "Always".to_string(),
        (from, to) => format!(
            "{} - {}",
            from.map(short_date).unwrap_or_default(),
            to.map(short_date).unwrap_or_default()
        ),
    }
}

#[component]
fn PromoRow(
    promo: PromoCode,
    on_edit: EventHandler<PromoCode>,
    on_toggle: EventHandler<PromoCode>,
    on_delete: EventHandler<PromoCode>,
) -> Element {
    let text = promo.code.clone();
    let discount = discount_label(promo.discount_type, promo.discount_value);
    let course = promo.course_title.clone().unwrap_or_else(|| "All courses".to_string());
    let usage = if promo.max_usage_count == 0 {
        format!("{} / ∞", promo.usage_count)
    } else {
        format!("{} / {}", promo.usage_count, promo.max_usage_count)
    };
    let validity = validity_label(&promo);
    let active = promo.is_active;
    let for_toggle = promo.clone();
    let for_delete = promo.clone();

    rsx! {
        tr {
            td { code { "{text}" } }
            td { "{discount}" }
            td { "{course}" }
            td { "{usage}" }
            td { small { "{validity}" } }
            td { StatusBadge { on: active, on_label: "Active", off_label: "Inactive" } }
            td { class: "row-actions",
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_edit.call(promo.clone()), "Edit" }
                button {
                    class: "btn btn-outline btn-sm",
                    onclick: move |_| on_toggle.call(for_toggle.clone()),
                    if active { "Deactivate" } else { "Activate" }
                }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_delete.call(for_delete.clone()), "Delete" }
            }
        }
    }
}

#[component]
fn PromoDialog(
    dialog: Signal<FormDialog<PromoDraft>>,
    course_choices: Vec<(String, String)>,
    on_save: EventHandler<()>,
) -> Element {
    let mut dialog = dialog;
    let form = dialog.read();
    let Some(draft) = form.draft().cloned() else {
        return rsx! {};
    };
    let title = if form.is_edit() { "Edit promo code" } else { "New promo code" };
    let code_invalid = form.is_invalid("code");
    let value_invalid = form.is_invalid("discountValue");
    let saving = form.is_saving();
    drop(form);

    let kinds = vec![
        (DiscountType::Percentage.as_str().to_string(), "Percentage".to_string()),
        (DiscountType::FixedAmount.as_str().to_string(), "Fixed amount".to_string()),
    ];
    let usages = draft.recent_usages.clone();

    rsx! {
        FormModal {
            title,
            saving,
            wide: true,
            on_submit: move |_| on_save.call(()),
            on_close: move |_| dialog.write().cancel(),

            div { class: "form-grid",
                TextField {
                    label: "Code",
                    value: draft.code.clone(),
                    required: true,
                    invalid: code_invalid,
                    hint: "Stored in upper case",
                    on_input: move |v| dialog.write().edit(|d| d.code = v),
                }
                SelectField {
                    label: "Course",
                    value: draft.course_id.clone(),
                    options: course_choices,
                    placeholder: "All courses",
                    on_change: move |v| dialog.write().edit(|d| d.course_id = v),
                }
                SelectField {
                    label: "Discount type",
                    value: draft.discount_type.as_str().to_string(),
                    options: kinds,
                    on_change: move |v: String| {
                        if let Some(kind) = DiscountType::parse(&v) {
                            dialog.write().edit(|d| d.discount_type = kind);
                        }
                    },
                }
                NumberField {
                    label: "Discount value",
                    value: Some(draft.discount_value),
                    step: "0.01",
                    required: true,
                    invalid: value_invalid,
                    on_input: move |v: Option<f64>| dialog.write().edit(|d| d.discount_value = v.unwrap_or(0.0)),
                }
                NumberField {
                    label: "Max uses (0 = unlimited)",
                    value: Some(draft.max_usage_count as f64),
                    step: "1",
                    on_input: move |v: Option<f64>| {
                        dialog.write().edit(|d| d.max_usage_count = v.unwrap_or(0.0).max(0.0) as u32)
                    },
                }
                NumberField {
                    label: "Max uses per user",
                    value: Some(draft.max_usage_per_user as f64),
                    step: "1",
                    on_input: move |v: Option<f64>| {
                        dialog.write().edit(|d| d.max_usage_per_user = v.unwrap_or(1.0).max(0.0) as u32)
                    },
                }
                NumberField {
                    label: "Minimum order amount",
                    value: draft.minimum_order_amount,
                    step: "0.01",
                    on_input: move |v| dialog.write().edit(|d| d.minimum_order_amount = v),
                }
                NumberField {
                    label: "Maximum discount",
                    value: draft.max_discount_amount,
                    step: "0.01",
                    on_input: move |v| dialog.write().edit(|d| d.max_discount_amount = v),
                }
                TextField {
                    label: "Valid from",
                    input_type: "datetime-local",
                    value: draft.valid_from.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.valid_from = v),
                }
                TextField {
                    label: "Valid to",
                    input_type: "datetime-local",
                    value: draft.valid_to.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.valid_to = v),
                }
            }
            TextArea {
                label: "Description",
                value: draft.description.clone(),
                rows: 2,
                on_input: move |v| dialog.write().edit(|d| d.description = v),
            }
            CheckboxField {
                label: "Active",
                checked: draft.is_active,
                on_change: move |v| dialog.write().edit(|d| d.is_active = v),
            }

            if !usages.is_empty() {
                RecentUsages { usages }
            }
        }
    }
}

#[component]
fn RecentUsages(usages: Vec<PromoCodeUsage>) -> Element {
    rsx! {
        details {
            summary { "Recent usage" }
            table {
                thead {
                    tr {
                        th { "User" }
                        th { "Discount" }
                        th { "Used" }
                    }
                }
                tbody {
                    for usage in usages {
                        UsageRow { key: "{usage.id}", usage: usage.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn UsageRow(usage: PromoCodeUsage) -> Element {
    let used = short_date(&usage.used_at);
    let discount = format!("{:.2}", usage.discount_applied);
    let (name, email) = (usage.user_name.clone(), usage.user_email.clone());
    rsx! {
        tr {
            td {
                "{name}"
                br {}
                small { "{email}" }
            }
            td { "{discount}" }
            td { "{used}" }
        }
    }
}
