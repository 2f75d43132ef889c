//! Categories page.

use dioxus::prelude::*;

use admin_wire::Category;

use crate::app::components::{
    CheckboxField, ConfirmDialog, FormModal, NumberField, StatusBadge, TableCard, TableNotice,
    TextArea, TextField,
};
use crate::app::state::{use_action, use_list, use_save};
use crate::controller::{ConfirmGate, FormDialog, PendingConfirm};
use crate::resources::categories::{CategoriesResource, CategoryDraft};
use crate::resources::Resource;

#[component]
pub fn Categories() -> Element {
    let list = use_list::<CategoriesResource>();
    let mut dialog = use_signal(|| FormDialog::<CategoryDraft>::new(CategoriesResource::PATH));
    let mut confirm = use_signal(ConfirmGate::default);
    let save = use_save(dialog, list);
    let run = use_action(list, "Category deleted.");

    let view = list.read();
    let categories = view.items().to_vec();

    rsx! {
        div { class: "toolbar",
            span { class: "spacer" }
            button { class: "btn btn-primary", onclick: move |_| dialog.write().open_create(), "New category" }
        }

        TableCard { loading: view.is_loading(),
            table {
                thead {
                    tr {
                        th { "Order" }
                        th { "Name" }
                        th { "Description" }
                        th { "Courses" }
                        th { "Status" }
                        th {}
                    }
                }
                tbody {
                    if categories.is_empty() {
                        TableNotice { columns: 6, loading: view.is_loading(), empty_text: "No categories yet." }
                    }
                    for category in categories {
                        CategoryRow {
                            key: "{category.id}",
                            category: category.clone(),
                            on_edit: move |c: Category| dialog.write().open_edit(c.id.clone(), CategoryDraft::from(&c)),
                            on_delete: move |c: Category| {
                                confirm.write().request(PendingConfirm::delete(CategoriesResource::PATH, &c.id, &c.name))
                            },
                        }
                    }
                }
            }
        }

        if dialog.read().is_open() {
            CategoryDialog { dialog, on_save: save }
        }
        ConfirmDialog { gate: confirm, on_accept: run }
    }
}

#[component]
fn CategoryRow(category: Category, on_edit: EventHandler<Category>, on_delete: EventHandler<Category>) -> Element {
    let description = category.description.clone().unwrap_or_default();
    let courses = category.courses_count.unwrap_or(0);
    let (order, name, active) = (category.display_order, category.name.clone(), category.is_active);
    let for_delete = category.clone();

    rsx! {
        tr {
            td { "{order}" }
            td { "{name}" }
            td { small { "{description}" } }
            td { "{courses}" }
            td { StatusBadge { on: active, on_label: "Active", off_label: "Inactive" } }
            td { class: "row-actions",
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_edit.call(category.clone()), "Edit" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_delete.call(for_delete.clone()), "Delete" }
            }
        }
    }
}

#[component]
fn CategoryDialog(dialog: Signal<FormDialog<CategoryDraft>>, on_save: EventHandler<()>) -> Element {
    let mut dialog = dialog;
    let form = dialog.read();
    let Some(draft) = form.draft().cloned() else {
        return rsx! {};
    };
    let title = if form.is_edit() { "Edit category" } else { "New category" };
    let name_invalid = form.is_invalid("name");
    let saving = form.is_saving();
    drop(form);

    rsx! {
        FormModal {
            title,
            saving,
            on_submit: move |_| on_save.call(()),
            on_close: move |_| dialog.write().cancel(),

            TextField {
                label: "Name",
                value: draft.name.clone(),
                required: true,
                invalid: name_invalid,
                on_input: move |v| dialog.write().edit(|d| d.name = v),
            }
            TextArea {
                label: "Description",
                value: draft.description.clone(),
                on_input: move |v| dialog.write().edit(|d| d.description = v),
            }
            div { class: "form-grid",
                TextField {
                    label: "Icon URL",
                    value: draft.icon_url.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.icon_url = v),
                }
                NumberField {
                    label: "Display order",
                    value: Some(draft.display_order as f64),
                    step: "1",
                    on_input: move |v: Option<f64>| dialog.write().edit(|d| d.display_order = v.unwrap_or(0.0) as i32),
                }
            }
            CheckboxField {
                label: "Active",
                checked: draft.is_active,
                on_change: move |v| dialog.write().edit(|d| d.is_active = v),
            }
        }
    }
}
