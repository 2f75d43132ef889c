//! Enrollments page.

use dioxus::prelude::*;

use admin_wire::Enrollment;

use crate::app::components::{
    BoolFilter, ConfirmDialog, FormModal, Paginator, SelectField, StatusBadge, TableCard,
    TableNotice, TextField,
};
use crate::app::state::{use_action, use_admin, use_filter, use_list, use_options, use_paging, use_save};
use crate::controller::{ConfirmGate, FormDialog, PendingConfirm};
use crate::resources::courses::course_options;
use crate::resources::enrollments::{
    activation_confirm, enrollment_choices, EnrollmentDraft, EnrollmentsResource,
};
use crate::resources::{short_date, Resource};

#[component]
pub fn Enrollments() -> Element {
    let ctx = use_admin();
    let list = use_list::<EnrollmentsResource>();
    let paging = use_paging(list);
    let on_search = use_filter(list, |f, search: String| f.search = search);
    let on_course = use_filter(list, |f, course: String| {
        f.course_id = Some(course).filter(|c| !c.is_empty())
    });
    let on_active = use_filter(list, |f, active: Option<bool>| f.is_active = active);
    let on_completed = use_filter(list, |f, completed: Option<bool>| f.is_completed = completed);
    let run = use_action(list, "Enrollment updated.");
    let mut dialog = use_signal(|| FormDialog::<EnrollmentDraft>::new(EnrollmentsResource::PATH));
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

    let view = list.read();
    let enrollments = view.items().to_vec();
    let filter = view.filter().clone();
    let course_value = filter.course_id.clone().unwrap_or_default();
    let search = filter.search.clone();

    rsx! {
        div { class: "toolbar",
            input {
                r#type: "search",
                placeholder: "Search by student or course",
                value: "{search}",
                oninput: move |e| on_search.call(e.value()),
            }
            select {
                aria_label: "Course",
                value: "{course_value}",
                onchange: move |e| on_course.call(e.value()),
                option { value: "", selected: course_value.is_empty(), "All courses" }
                for (id, title) in course_choices {
                    option { key: "{id}", value: "{id}", selected: id == course_value, "{title}" }
                }
            }
            BoolFilter { label: "Status", yes: "Active", no: "Inactive", value: filter.is_active, on_change: on_active }
            BoolFilter { label: "Progress", yes: "Completed", no: "In progress", value: filter.is_completed, on_change: on_completed }
            span { class: "spacer" }
            button { class: "btn btn-primary", onclick: move |_| dialog.write().open_create(), "New enrollment" }
        }

        TableCard { loading: view.is_loading(),
            table {
                thead {
                    tr {
                        th { "Student" }
                        th { "Course" }
                        th { "Progress" }
                        th { "Enrolled" }
                        th { "Expires" }
                        th { "Status" }
                        th {}
                    }
                }
                tbody {
                    if enrollments.is_empty() {
                        TableNotice { columns: 7, loading: view.is_loading(), empty_text: "No enrollments found." }
                    }
                    for enrollment in enrollments {
                        EnrollmentRow {
                            key: "{enrollment.id}",
                            enrollment: enrollment.clone(),
                            on_toggle: move |e: Enrollment| confirm.write().request(activation_confirm(&e)),
                            on_delete: move |e: Enrollment| {
                                let label = format!("{} / {}", e.user_name, e.course_title);
                                confirm.write().request(PendingConfirm::delete(EnrollmentsResource::PATH, &e.id, &label))
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
            EnrollmentDialog { dialog, on_save: save }
        }
        ConfirmDialog { gate: confirm, on_accept: run }
    }
}

#[component]
fn EnrollmentRow(enrollment: Enrollment, on_toggle: EventHandler<Enrollment>, on_delete: EventHandler<Enrollment>) -> Element {
    let student = enrollment.user_name.clone();
    let email = enrollment.user_email.clone();
    let course = enrollment.course_title.clone();
    let progress = enrollment.progress_percentage.clamp(0.0, 100.0);
    let progress_text = format!("{:.0}%", progress);
    let enrolled = short_date(&enrollment.enrolled_at);
    let expires = enrollment
        .expires_at
        .as_deref()
        .map(short_date)
        .unwrap_or_else(|| "Never".to_string());
    let active = enrollment.is_active;
    let completed = enrollment.is_completed();
    let for_delete = enrollment.clone();

    rsx! {
        tr {
            td {
                "{student}"
                br {}
                small { "{email}" }
            }
            td { "{course}" }
            td {
                progress { class: "progress", value: "{progress}", max: "100" }
                small { "{progress_text}" }
                if completed {
                    " "
                    span { class: "badge badge-ok", "Completed" }
                }
            }
            td { "{enrolled}" }
            td { "{expires}" }
            td { StatusBadge { on: active, on_label: "Active", off_label: "Inactive" } }
            td { class: "row-actions",
                button {
                    class: "btn btn-outline btn-sm",
                    onclick: move |_| on_toggle.call(enrollment.clone()),
                    if active { "Deactivate" } else { "Activate" }
                }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_delete.call(for_delete.clone()), "Delete" }
            }
        }
    }
}

#[component]
fn EnrollmentDialog(dialog: Signal<FormDialog<EnrollmentDraft>>, on_save: EventHandler<()>) -> Element {
    let ctx = use_admin();
    let mut dialog = dialog;
    let backend = ctx.backend.clone();
    let choices = use_resource(move || {
        let backend = backend.clone();
        let ctx = ctx.clone();
        async move {
            enrollment_choices(backend.as_ref())
                .await
                .inspect_err(|e| ctx.fail(e))
                .unwrap_or_default()
        }
    });

    let form = dialog.read();
    let Some(draft) = form.draft().cloned() else {
        return rsx! {};
    };
    let user_invalid = form.is_invalid("userId");
    let course_invalid = form.is_invalid("courseId");
    let saving = form.is_saving();
    drop(form);

    let loaded = choices.read().clone();
    let (user_choices, course_choices): (Vec<(String, String)>, Vec<(String, String)>) = loaded
        .as_ref()
        .map(|c| {
            (
                c.users
                    .iter()
                    .map(|u| (u.id.clone(), format!("{} ({})", u.full_name(), u.email)))
                    .collect(),
                c.courses.iter().map(|c| (c.id.clone(), c.title.clone())).collect(),
            )
        })
        .unwrap_or_default();

    rsx! {
        FormModal {
            title: "New enrollment",
            saving,
            submit_label: "Enroll",
            on_submit: move |_| on_save.call(()),
            on_close: move |_| dialog.write().cancel(),

            if loaded.is_none() {
                p { aria_busy: "true", "Loading students and courses..." }
            }
            SelectField {
                label: "Student",
                value: draft.user_id.clone(),
                options: user_choices,
                required: true,
                invalid: user_invalid,
                placeholder: "Select a student",
                on_change: move |v| dialog.write().edit(|d| d.user_id = v),
            }
            SelectField {
                label: "Course",
                value: draft.course_id.clone(),
                options: course_choices,
                required: true,
                invalid: course_invalid,
                placeholder: "Select a course",
                on_change: move |v| dialog.write().edit(|d| d.course_id = v),
            }
            TextField {
                label: "Expires at",
                input_type: "datetime-local",
                value: draft.expires_at.clone(),
                hint: "Leave empty for unlimited access",
                on_input: move |v| dialog.write().edit(|d| d.expires_at = v),
            }
        }
    }
}
