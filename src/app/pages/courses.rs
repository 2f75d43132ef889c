//! Courses page: paged list, create/edit dialog, publish and delete.

use dioxus::prelude::*;

use admin_wire::{Category, Course, CourseLevel};

use crate::app::components::{
    CheckboxField, ConfirmDialog, FormModal, NumberField, Paginator, SelectField, StatusBadge,
    TableCard, TableNotice, TextArea, TextField,
};
use crate::app::state::{use_action, use_admin, use_list, use_options, use_paging, use_save};
use crate::controller::{ConfirmGate, FormDialog, PendingConfirm};
use crate::resources::courses::{category_options, CourseDraft, CoursesResource, COURSE_PUBLISH};
use crate::resources::Resource;

#[component]
pub fn Courses() -> Element {
    let ctx = use_admin();
    let list = use_list::<CoursesResource>();
    let paging = use_paging(list);
    let mut dialog = use_signal(|| FormDialog::<CourseDraft>::new(CoursesResource::PATH));
    let mut confirm = use_signal(ConfirmGate::default);
    let save = use_save(dialog, list);
    let run = use_action(list, "Course updated.");

    let backend = ctx.backend.clone();
    let categories = use_options(move || {
        let backend = backend.clone();
        async move { category_options(backend.as_ref()).await }
    });
    let categories = categories.read().clone().unwrap_or_default();

    let view = list.read();
    let courses = view.items().to_vec();

    rsx! {
        div { class: "toolbar",
            span { class: "spacer" }
            button { class: "btn btn-primary", onclick: move |_| dialog.write().open_create(), "New course" }
        }

        TableCard { loading: view.is_loading(),
            table {
                thead {
                    tr {
                        th { "Title" }
                        th { "Category" }
                        th { "Level" }
                        th { "Price" }
                        th { "Enrollments" }
                        th { "Status" }
                        th {}
                    }
                }
                tbody {
                    if courses.is_empty() {
                        TableNotice { columns: 7, loading: view.is_loading(), empty_text: "No courses yet." }
                    }
                    for course in courses {
                        CourseRow {
                            key: "{course.id}",
                            course: course.clone(),
                            on_edit: move |c: Course| dialog.write().open_edit(c.id.clone(), CourseDraft::from(&c)),
                            on_publish: move |c: Course| run.call(COURSE_PUBLISH.request(&c.id, !c.is_published)),
                            on_delete: move |c: Course| {
                                confirm.write().request(PendingConfirm::delete(CoursesResource::PATH, &c.id, &c.title))
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
            CourseDialog { dialog, categories, on_save: save }
        }
        ConfirmDialog { gate: confirm, on_accept: run }
    }
}

fn price_label(course: &Course) -> String {
    match course.discount_price {
        Some(discount) => format!("{:.2} {} (was {:.2})", discount, course.currency, course.price),
        None => format!("{:.2} {}", course.price, course.currency),
    }
}

#[component]
fn CourseRow(
    course: Course,
    on_edit: EventHandler<Course>,
    on_publish: EventHandler<Course>,
    on_delete: EventHandler<Course>,
) -> Element {
    let price = price_label(&course);
    let category = course.category_name.clone().unwrap_or_default();
    let title = course.title.clone();
    let level = course.level.as_str();
    let enrollments = course.enrollment_count;
    let published = course.is_published;
    let publish_label = COURSE_PUBLISH.label(published);
    let for_publish = course.clone();
    let for_delete = course.clone();

    rsx! {
        tr {
            td {
                "{title}"
                if course.is_featured {
                    " "
                    span { class: "badge badge-ok", "Featured" }
                }
            }
            td { "{category}" }
            td { "{level}" }
            td { "{price}" }
            td { "{enrollments}" }
            td { StatusBadge { on: published, on_label: "Published", off_label: "Draft" } }
            td { class: "row-actions",
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_edit.call(course.clone()), "Edit" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_publish.call(for_publish.clone()), "{publish_label}" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_delete.call(for_delete.clone()), "Delete" }
            }
        }
    }
}

#[component]
fn CourseDialog(
    dialog: Signal<FormDialog<CourseDraft>>,
    categories: Vec<Category>,
    on_save: EventHandler<()>,
) -> Element {
    let mut dialog = dialog;
    let form = dialog.read();
    let Some(draft) = form.draft().cloned() else {
        return rsx! {};
    };
    let title = if form.is_edit() { "Edit course" } else { "New course" };
    let title_invalid = form.is_invalid("title");
    let category_invalid = form.is_invalid("categoryId");
    let saving = form.is_saving();
    drop(form);

    let category_choices: Vec<(String, String)> =
        categories.iter().map(|c| (c.id.clone(), c.name.clone())).collect();
    let level_choices: Vec<(String, String)> = CourseLevel::ALL
        .iter()
        .map(|l| (l.as_str().to_string(), l.as_str().to_string()))
        .collect();

    rsx! {
        FormModal {
            title,
            saving,
            wide: true,
            on_submit: move |_| on_save.call(()),
            on_close: move |_| dialog.write().cancel(),

            div { class: "form-grid",
                TextField {
                    label: "Title",
                    value: draft.title.clone(),
                    required: true,
                    invalid: title_invalid,
                    on_input: move |v| dialog.write().edit(|d| d.title = v),
                }
                SelectField {
                    label: "Category",
                    value: draft.category_id.clone(),
                    options: category_choices,
                    required: true,
                    invalid: category_invalid,
                    placeholder: "Select a category",
                    on_change: move |v| dialog.write().edit(|d| d.category_id = v),
                }
            }
            TextArea {
                label: "Short description",
                value: draft.short_description.clone(),
                rows: 2,
                on_input: move |v| dialog.write().edit(|d| d.short_description = v),
            }
            TextArea {
                label: "Full description",
                value: draft.full_description.clone(),
                rows: 5,
                on_input: move |v| dialog.write().edit(|d| d.full_description = v),
            }
            div { class: "form-grid",
                TextField {
                    label: "Instructor",
                    value: draft.instructor_name.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.instructor_name = v),
                }
                TextField {
                    label: "Thumbnail URL",
                    value: draft.thumbnail_url.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.thumbnail_url = v),
                }
                NumberField {
                    label: "Price",
                    value: Some(draft.price),
                    step: "0.01",
                    on_input: move |v: Option<f64>| dialog.write().edit(|d| d.price = v.unwrap_or(0.0)),
                }
                NumberField {
                    label: "Discount price",
                    value: draft.discount_price,
                    step: "0.01",
                    on_input: move |v| dialog.write().edit(|d| d.discount_price = v),
                }
                TextField {
                    label: "Currency",
                    value: draft.currency.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.currency = v),
                }
                NumberField {
                    label: "Duration (minutes)",
                    value: Some(draft.duration_minutes as f64),
                    step: "1",
                    on_input: move |v: Option<f64>| {
                        dialog.write().edit(|d| d.duration_minutes = v.unwrap_or(0.0).max(0.0) as u32)
                    },
                }
                SelectField {
                    label: "Level",
                    value: draft.level.as_str().to_string(),
                    options: level_choices,
                    on_change: move |v: String| {
                        if let Some(level) = CourseLevel::parse(&v) {
                            dialog.write().edit(|d| d.level = level);
                        }
                    },
                }
                TextField {
                    label: "Language",
                    value: draft.language.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.language = v),
                }
            }
            CheckboxField {
                label: "Featured",
                checked: draft.is_featured,
                on_change: move |v| dialog.write().edit(|d| d.is_featured = v),
            }
        }
    }
}
