//! Applications page: tenant branding and course assignments.

use dioxus::prelude::*;

use admin_wire::{Application, ApplicationCourse, Course};

use crate::app::components::{
    CheckboxField, ConfirmDialog, FormModal, Paginator, StatusBadge, TableCard, TableNotice,
    TextArea, TextField,
};
use crate::app::state::{
    nested_op, open_edit_from_detail, open_nested, use_action, use_admin, use_list, use_options,
    use_paging, use_save, Nested,
};
use crate::backend::ApiRequest;
use crate::controller::{ConfirmGate, FormDialog, ListController, NestedEditor, PendingConfirm};
use crate::resources::applications::{
    assign_course, assignments_editor, make_default_course, ordered_courses, unassign_course,
    ApplicationDraft, ApplicationsResource,
};
use crate::resources::courses::course_options;
use crate::resources::Resource;

type Assignments = Nested<Application>;

#[component]
pub fn Applications() -> Element {
    let ctx = use_admin();
    let list = use_list::<ApplicationsResource>();
    let paging = use_paging(list);
    let mut dialog = use_signal(|| FormDialog::<ApplicationDraft>::new(ApplicationsResource::PATH));
    let save = use_save(dialog, list);
    let run = use_action(list, "Application deleted.");
    let mut confirm = use_signal(ConfirmGate::default);
    let assignments: Assignments = use_signal(|| None);

    let edit_ctx = ctx.clone();
    let open_edit = use_callback(move |id: String| {
        open_edit_from_detail(dialog, edit_ctx.clone(), id, |app: Application| {
            ApplicationDraft::from(app)
        })
    });
    let courses_ctx = ctx.clone();
    let open_courses = use_callback(move |id: String| {
        open_nested(assignments, assignments_editor(&id), courses_ctx.clone())
    });

    let view = list.read();
    let apps = view.items().to_vec();

    rsx! {
        div { class: "toolbar",
            span { class: "spacer" }
            button { class: "btn btn-primary", onclick: move |_| dialog.write().open_create(), "New application" }
        }

        TableCard { loading: view.is_loading(),
            table {
                thead {
                    tr {
                        th { "App ID" }
                        th { "Name" }
                        th { "Colours" }
                        th { "Courses" }
                        th { "Registration" }
                        th { "Status" }
                        th {}
                    }
                }
                tbody {
                    if apps.is_empty() {
                        TableNotice { columns: 7, loading: view.is_loading(), empty_text: "No applications yet." }
                    }
                    for app in apps {
                        ApplicationRow {
                            key: "{app.id}",
                            app: app.clone(),
                            on_edit: move |a: Application| open_edit.call(a.id),
                            on_courses: move |a: Application| open_courses.call(a.id),
                            on_delete: move |a: Application| {
                                confirm.write().request(PendingConfirm::delete(ApplicationsResource::PATH, &a.id, &a.name))
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
            ApplicationDialog { dialog, on_save: save }
        }
        if assignments.read().is_some() {
            CourseAssignments { editor: assignments, list }
        }
        ConfirmDialog { gate: confirm, on_accept: run }
    }
}

#[component]
fn Swatch(color: Option<String>) -> Element {
    let color = color.unwrap_or_default();
    rsx! {
        span {
            class: "badge",
            title: "{color}",
            style: "background: {color}; min-width: 1.5rem; display: inline-block;",
            "\u{a0}"
        }
    }
}

#[component]
fn ApplicationRow(
    app: Application,
    on_edit: EventHandler<Application>,
    on_courses: EventHandler<Application>,
    on_delete: EventHandler<Application>,
) -> Element {
    let app_id = app.app_id.clone();
    let name = app.name.clone();
    let courses = app
        .course_count
        .or_else(|| app.courses.as_ref().map(|c| c.len() as u64))
        .unwrap_or(0);
    let registration = if app.allow_registration { "Open" } else { "Closed" };
    let active = app.is_active;
    let (primary, secondary, accent) = (
        app.primary_color.clone(),
        app.secondary_color.clone(),
        app.accent_color.clone(),
    );
    let for_courses = app.clone();
    let for_delete = app.clone();

    rsx! {
        tr {
            td { code { "{app_id}" } }
            td { "{name}" }
            td {
                Swatch { color: primary }
                Swatch { color: secondary }
                Swatch { color: accent }
            }
            td { "{courses}" }
            td { "{registration}" }
            td { StatusBadge { on: active, on_label: "Active", off_label: "Inactive" } }
            td { class: "row-actions",
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_edit.call(app.clone()), "Edit" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_courses.call(for_courses.clone()), "Courses" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_delete.call(for_delete.clone()), "Delete" }
            }
        }
    }
}

#[component]
fn ApplicationDialog(dialog: Signal<FormDialog<ApplicationDraft>>, on_save: EventHandler<()>) -> Element {
    let mut dialog = dialog;
    let form = dialog.read();
    let Some(draft) = form.draft().cloned() else {
        return rsx! {};
    };
    let editing = form.is_edit();
    let title = if editing { "Edit application" } else { "New application" };
    let app_id_invalid = form.is_invalid("appId");
    let name_invalid = form.is_invalid("name");
    let saving = form.is_saving();
    drop(form);

    rsx! {
        FormModal {
            title,
            saving,
            wide: true,
            on_submit: move |_| on_save.call(()),
            on_close: move |_| dialog.write().cancel(),

            div { class: "form-grid",
                if editing {
                    label { class: "field",
                        span { "App ID" }
                        input { disabled: true, value: "{draft.app_id}" }
                    }
                } else {
                    TextField {
                        label: "App ID",
                        value: draft.app_id.clone(),
                        required: true,
                        invalid: app_id_invalid,
                        placeholder: "academy",
                        on_input: move |v| dialog.write().edit(|d| d.app_id = v),
                    }
                }
                TextField {
                    label: "Name",
                    value: draft.name.clone(),
                    required: true,
                    invalid: name_invalid,
                    on_input: move |v| dialog.write().edit(|d| d.name = v),
                }
            }
            TextArea {
                label: "Description",
                value: draft.description.clone(),
                rows: 2,
                on_input: move |v| dialog.write().edit(|d| d.description = v),
            }
            div { class: "form-grid",
                TextField {
                    label: "Logo URL",
                    value: draft.logo_url.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.logo_url = v),
                }
                TextField {
                    label: "Splash image URL",
                    value: draft.splash_image_url.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.splash_image_url = v),
                }
                TextField {
                    label: "Primary colour",
                    input_type: "color",
                    value: draft.primary_color.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.primary_color = v),
                }
                TextField {
                    label: "Secondary colour",
                    input_type: "color",
                    value: draft.secondary_color.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.secondary_color = v),
                }
                TextField {
                    label: "Accent colour",
                    input_type: "color",
                    value: draft.accent_color.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.accent_color = v),
                }
                TextField {
                    label: "Android package",
                    value: draft.android_package_name.clone(),
                    placeholder: "com.example.academy",
                    on_input: move |v| dialog.write().edit(|d| d.android_package_name = v),
                }
                TextField {
                    label: "iOS bundle ID",
                    value: draft.ios_bundle_id.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.ios_bundle_id = v),
                }
            }
            div { class: "form-grid",
                CheckboxField {
                    label: "Active",
                    checked: draft.is_active,
                    on_change: move |v| dialog.write().edit(|d| d.is_active = v),
                }
                CheckboxField {
                    label: "Allow registration",
                    checked: draft.allow_registration,
                    on_change: move |v| dialog.write().edit(|d| d.allow_registration = v),
                }
                CheckboxField {
                    label: "Require enrollment",
                    checked: draft.require_enrollment,
                    on_change: move |v| dialog.write().edit(|d| d.require_enrollment = v),
                }
            }
        }
    }
}

#[component]
fn CourseAssignments(editor: Assignments, list: Signal<ListController<ApplicationsResource>>) -> Element {
    let ctx = use_admin();
    let mut editor = editor;
    let mut picked = use_signal(String::new);
    let mut confirm = use_signal(ConfirmGate::default);

    let backend = ctx.backend.clone();
    let courses = use_options(move || {
        let backend = backend.clone();
        async move { course_options(backend.as_ref()).await }
    });
    let op_ctx = ctx.clone();
    let apply = use_callback(move |request: ApiRequest| {
        nested_op(request, editor, list, op_ctx.clone(), "Course assignments updated.")
    });

    let state = editor.read();
    let loading = state.as_ref().is_some_and(NestedEditor::is_loading);
    let app = state.as_ref().and_then(NestedEditor::parent).cloned();
    drop(state);

    let all_courses: Vec<Course> = courses.read().clone().unwrap_or_default();
    let assigned: Vec<ApplicationCourse> = app.as_ref().map(ordered_courses).unwrap_or_default();
    let available: Vec<(String, String)> = all_courses
        .iter()
        .filter(|c| !assigned.iter().any(|a| a.course_id == c.id))
        .map(|c| (c.id.clone(), c.title.clone()))
        .collect();
    let heading = app
        .as_ref()
        .map(|a| format!("Courses: {}", a.name))
        .unwrap_or_else(|| "Courses".to_string());
    let app_id = app.as_ref().map(|a| a.id.clone()).unwrap_or_default();
    let picked_value = picked.read().clone();

    let add_app_id = app_id.clone();
    let add_assigned = assigned.clone();
    let add = move |_: MouseEvent| {
        let course_id = picked.read().clone();
        if course_id.is_empty() || add_app_id.is_empty() {
            return;
        }
        apply.call(assign_course(&add_app_id, &add_assigned, &course_id));
        picked.set(String::new());
    };

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| editor.set(None),

            div {
                class: "card modal modal-wide",
                onclick: move |e| e.stop_propagation(),

                div { class: "modal-header",
                    h2 { "{heading}" }
                    button {
                        class: "modal-close",
                        aria_label: "Close",
                        onclick: move |_| editor.set(None),
                        "×"
                    }
                }

                if app.is_none() {
                    div { aria_busy: "true", "Loading courses..." }
                } else {
                    div { class: "toolbar",
                        select {
                            aria_label: "Course to assign",
                            value: "{picked_value}",
                            onchange: move |e| picked.set(e.value()),
                            option { value: "", selected: picked_value.is_empty(), "Select a course" }
                            for (id, title) in available {
                                option { key: "{id}", value: "{id}", selected: id == picked_value, "{title}" }
                            }
                        }
                        button {
                            class: "btn btn-primary btn-sm",
                            disabled: picked_value.is_empty() || loading,
                            onclick: add,
                            "Assign"
                        }
                        if loading {
                            small { aria_busy: "true", "Refreshing..." }
                        }
                    }
                    table {
                        thead {
                            tr {
                                th { "Order" }
                                th { "Course" }
                                th { "Default" }
                                th {}
                            }
                        }
                        tbody {
                            if assigned.is_empty() {
                                TableNotice { columns: 4, loading: false, empty_text: "No courses assigned." }
                            }
                            for course in assigned {
                                AssignmentRow {
                                    key: "{course.course_id}",
                                    app_id: app_id.clone(),
                                    course: course.clone(),
                                    on_default: move |request| apply.call(request),
                                    on_remove: move |c: ApplicationCourse| {
                                        let target = editor
                                            .read()
                                            .as_ref()
                                            .and_then(NestedEditor::parent)
                                            .map(|a| a.id.clone())
                                            .unwrap_or_default();
                                        confirm.write().request(PendingConfirm::new(
                                            "Remove course",
                                            format!("Remove \"{}\" from this application?", c.course_title),
                                            "Remove",
                                            unassign_course(&target, &c.course_id),
                                        ));
                                    },
                                }
                            }
                        }
                    }
                }
            }
        }

        ConfirmDialog { gate: confirm, on_accept: apply }
    }
}

#[component]
fn AssignmentRow(
    #[props(into)] app_id: String,
    course: ApplicationCourse,
    on_default: EventHandler<ApiRequest>,
    on_remove: EventHandler<ApplicationCourse>,
) -> Element {
    let order = course.display_order;
    let title = course.course_title.clone();
    let is_default = course.is_default;
    let course_id = course.course_id.clone();

    rsx! {
        tr {
            td { "{order}" }
            td { "{title}" }
            td {
                if is_default {
                    span { class: "badge badge-ok", "Default" }
                } else {
                    button {
                        class: "btn btn-outline btn-sm",
                        onclick: move |_| on_default.call(make_default_course(&app_id, &course_id)),
                        "Make default"
                    }
                }
            }
            td {
                button {
                    class: "btn btn-outline btn-sm",
                    onclick: move |_| on_remove.call(course.clone()),
                    "Remove"
                }
            }
        }
    }
}
