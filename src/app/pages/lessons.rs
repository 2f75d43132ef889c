//! Lessons page: course/section filters, bulk publish and document upload.

use dioxus::prelude::*;
use futures::StreamExt;

use admin_wire::{Course, CourseSection, GeneralSettings, Lesson};

use crate::app::components::{
    CheckboxField, ConfirmDialog, FormModal, NumberField, Paginator, SelectField, StatusBadge,
    TableCard, TableNotice, TextArea, TextField,
};
use crate::app::state::{
    reload, saved_message, use_action, use_admin, use_filter, use_list, use_options, use_paging,
};
use crate::backend::StagedFile;
use crate::controller::{
    progress_channel, ConfirmGate, FormDialog, PendingConfirm, StagedUpload,
};
use crate::resources::courses::course_options;
use crate::resources::lessons::{
    bulk_publish_request, save_lesson, section_options, sections_for, LessonDraft, LessonSave,
    LessonsResource, LESSON_PUBLISH,
};
use crate::resources::settings::{fetch_general, length_hint};
use crate::resources::Resource;

#[component]
pub fn Lessons() -> Element {
    let ctx = use_admin();
    let list = use_list::<LessonsResource>();
    let paging = use_paging(list);
    let on_course = use_filter(list, |f, course: String| f.set_course(Some(course)));
    let on_section = use_filter(list, |f, section: String| {
        f.section_id = Some(section).filter(|s| !s.is_empty())
    });
    let on_search = use_filter(list, |f, search: String| f.search = search);
    let run = use_action(list, "Lessons updated.");

    let mut dialog = use_signal(|| FormDialog::<LessonDraft>::new(LessonsResource::PATH));
    let mut staged = use_signal(StagedUpload::default);
    let mut selected = use_signal(Vec::<String>::new);
    let mut confirm = use_signal(ConfirmGate::default);

    let backend = ctx.backend.clone();
    let courses = use_options(move || {
        let backend = backend.clone();
        async move { course_options(backend.as_ref()).await }
    });
    let backend = ctx.backend.clone();
    let sections = use_options(move || {
        let backend = backend.clone();
        async move { section_options(backend.as_ref()).await }
    });
    let backend = ctx.backend.clone();
    let limits = use_resource(move || {
        let backend = backend.clone();
        async move { fetch_general(backend.as_ref()).await.ok() }
    });

    let save_ctx = ctx.clone();
    let save = use_callback(move |_: ()| {
        let ctx = save_ctx.clone();
        spawn(async move {
            let (tx, rx) = progress_channel();
            let track = rx.for_each(move |percent| {
                staged.write().set_progress(percent);
                async {}
            });
            let save = save_lesson(dialog, staged, ctx.backend.as_ref(), Some(tx));
            let (result, ()) = futures::join!(save, track);
            match result {
                Ok(LessonSave::Saved { saved, document }) => {
                    match document.warning("Lesson") {
                        Some(warning) => ctx.warn(warning),
                        None => ctx.success(saved_message(&saved)),
                    }
                    reload(list, ctx);
                }
                Ok(LessonSave::Invalid(_)) => ctx.warn("Please fill in the required fields."),
                Ok(LessonSave::Skipped) => {}
                Err(e) => ctx.fail(&e),
            }
        });
    });

    let courses = courses.read().clone().unwrap_or_default();
    let sections = sections.read().clone().unwrap_or_default();
    let limits = limits.read().clone().flatten().unwrap_or_default();

    let view = list.read();
    let lessons = view.items().to_vec();
    let filter = view.filter().clone();
    let course_value = filter.course_id.clone().unwrap_or_default();
    let section_value = filter.section_id.clone().unwrap_or_default();
    let search = filter.search.clone();
    let filter_sections: Vec<(String, String)> = sections_for(&sections, filter.course_id.as_deref())
        .into_iter()
        .map(|s| (s.id.clone(), s.title.clone()))
        .collect();
    let course_choices: Vec<(String, String)> =
        courses.iter().map(|c| (c.id.clone(), c.title.clone())).collect();

    let page_ids: Vec<String> = lessons.iter().map(|l| l.id.clone()).collect();
    let chosen = selected.read().clone();
    let all_chosen = !page_ids.is_empty() && page_ids.iter().all(|id| chosen.contains(id));
    let chosen_count = chosen.len();
    let upload_progress = staged.read().progress();

    let mut ask_bulk = move |publish: bool| {
        let ids = selected.read().clone();
        if let Some(request) = bulk_publish_request(&ids, publish) {
            let verb = if publish { "Publish" } else { "Unpublish" };
            confirm.write().request(PendingConfirm::new(
                format!("{} lessons", verb),
                format!("{} {} selected lessons?", verb, ids.len()),
                verb,
                request,
            ));
        }
    };

    let open_create = move |_: MouseEvent| {
        let filter = list.read().filter().clone();
        staged.write().clear();
        dialog.write().open_create_with(LessonDraft {
            course_id: filter.course_id.unwrap_or_default(),
            section_id: filter.section_id.unwrap_or_default(),
            ..Default::default()
        });
    };

    rsx! {
        div { class: "toolbar",
            select {
                aria_label: "Course",
                value: "{course_value}",
                onchange: move |e| on_course.call(e.value()),
                option { value: "", selected: course_value.is_empty(), "All courses" }
                for (id, title) in course_choices {
                    option { key: "{id}", value: "{id}", selected: id == course_value, "{title}" }
                }
            }
            select {
                aria_label: "Section",
                value: "{section_value}",
                onchange: move |e| on_section.call(e.value()),
                option { value: "", selected: section_value.is_empty(), "All sections" }
                for (id, title) in filter_sections {
                    option { key: "{id}", value: "{id}", selected: id == section_value, "{title}" }
                }
            }
            input {
                r#type: "search",
                placeholder: "Search lessons",
                value: "{search}",
                oninput: move |e| on_search.call(e.value()),
            }
            span { class: "spacer" }
            if chosen_count > 0 {
                small { "{chosen_count} selected" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| ask_bulk(true), "Publish" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| ask_bulk(false), "Unpublish" }
            }
            button { class: "btn btn-primary", onclick: open_create, "New lesson" }
        }

        if let Some(percent) = upload_progress {
            div { class: "card p-6",
                small { "Uploading document... {percent}%" }
                progress { class: "progress", value: "{percent}", max: "100" }
            }
        }

        TableCard { loading: view.is_loading(),
            table {
                thead {
                    tr {
                        th {
                            input {
                                r#type: "checkbox",
                                aria_label: "Select page",
                                checked: all_chosen,
                                onchange: move |e| {
                                    let mut chosen = selected.write();
                                    chosen.retain(|id| !page_ids.contains(id));
                                    if e.checked() {
                                        chosen.extend(page_ids.iter().cloned());
                                    }
                                },
                            }
                        }
                        th { "Order" }
                        th { "Title" }
                        th { "Course / section" }
                        th { "Content" }
                        th { "Duration" }
                        th { "Status" }
                        th {}
                    }
                }
                tbody {
                    if lessons.is_empty() {
                        TableNotice { columns: 8, loading: view.is_loading(), empty_text: "No lessons found." }
                    }
                    for lesson in lessons {
                        LessonRow {
                            key: "{lesson.id}",
                            checked: chosen.contains(&lesson.id),
                            lesson: lesson.clone(),
                            on_select: move |(id, on): (String, bool)| {
                                let mut chosen = selected.write();
                                chosen.retain(|c| *c != id);
                                if on {
                                    chosen.push(id);
                                }
                            },
                            on_edit: move |l: Lesson| {
                                staged.write().clear();
                                dialog.write().open_edit(l.id.clone(), LessonDraft::from(&l));
                            },
                            on_publish: move |l: Lesson| run.call(LESSON_PUBLISH.request(&l.id, !l.is_published)),
                            on_delete: move |l: Lesson| {
                                confirm.write().request(PendingConfirm::delete(LessonsResource::PATH, &l.id, &l.title))
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
            LessonDialog { dialog, staged, courses, sections, limits, on_save: save }
        }
        ConfirmDialog {
            gate: confirm,
            on_accept: move |request| {
                selected.write().clear();
                run.call(request);
            },
        }
    }
}

fn duration_label(seconds: Option<u32>) -> String {
    match seconds {
        Some(s) if s > 0 => format!("{}:{:02}", s / 60, s % 60),
        _ => "-".to_string(),
    }
}

#[component]
fn LessonRow(
    lesson: Lesson,
    checked: bool,
    on_select: EventHandler<(String, bool)>,
    on_edit: EventHandler<Lesson>,
    on_publish: EventHandler<Lesson>,
    on_delete: EventHandler<Lesson>,
) -> Element {
    let id = lesson.id.clone();
    let title = lesson.title.clone();
    let place = format!("{} / {}", lesson.course_title, lesson.section_title);
    let duration = duration_label(lesson.duration_seconds);
    let order = lesson.display_order;
    let published = lesson.is_published;
    let publish_label = LESSON_PUBLISH.label(published);
    let (has_video, has_document, free) = (
        lesson.has_video || lesson.video_url.is_some(),
        lesson.has_document || lesson.document_url.is_some(),
        lesson.is_free,
    );
    let for_publish = lesson.clone();
    let for_delete = lesson.clone();

    rsx! {
        tr {
            td {
                input {
                    r#type: "checkbox",
                    checked,
                    onchange: move |e| on_select.call((id.clone(), e.checked())),
                }
            }
            td { "{order}" }
            td {
                "{title}"
                if free {
                    " "
                    span { class: "badge badge-ok", "Free" }
                }
            }
            td { small { "{place}" } }
            td {
                if has_video { span { class: "badge badge-muted", "Video" } }
                if has_document { span { class: "badge badge-muted", "Document" } }
            }
            td { "{duration}" }
            td { StatusBadge { on: published, on_label: "Published", off_label: "Draft" } }
            td { class: "row-actions",
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_edit.call(lesson.clone()), "Edit" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_publish.call(for_publish.clone()), "{publish_label}" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_delete.call(for_delete.clone()), "Delete" }
            }
        }
    }
}

#[component]
fn LessonDialog(
    dialog: Signal<FormDialog<LessonDraft>>,
    staged: Signal<StagedUpload>,
    courses: Vec<Course>,
    sections: Vec<CourseSection>,
    limits: GeneralSettings,
    on_save: EventHandler<()>,
) -> Element {
    let mut dialog = dialog;
    let mut staged = staged;
    let form = dialog.read();
    let Some(draft) = form.draft().cloned() else {
        return rsx! {};
    };
    let title = if form.is_edit() { "Edit lesson" } else { "New lesson" };
    let title_invalid = form.is_invalid("title");
    let section_invalid = form.is_invalid("sectionId");
    let saving = form.is_saving();
    drop(form);

    let course_choices: Vec<(String, String)> =
        courses.iter().map(|c| (c.id.clone(), c.title.clone())).collect();
    let course_filter = Some(draft.course_id.as_str()).filter(|id| !id.is_empty());
    let section_choices: Vec<(String, String)> = sections_for(&sections, course_filter)
        .into_iter()
        .map(|s| (s.id.clone(), s.title.clone()))
        .collect();
    let title_hint = length_hint(&draft.title, limits.max_lesson_name_length).unwrap_or_default();
    let description_hint =
        length_hint(&draft.description, limits.max_description_length).unwrap_or_default();
    let staged_name = staged.read().staged().map(|f| format!("{} ({} bytes)", f.name, f.size()));
    let current_document = Some(draft.document_name.clone()).filter(|n| !n.is_empty());

    rsx! {
        FormModal {
            title,
            saving,
            wide: true,
            on_submit: move |_| on_save.call(()),
            on_close: move |_| {
                staged.write().clear();
                dialog.write().cancel();
            },

            div { class: "form-grid",
                SelectField {
                    label: "Course",
                    value: draft.course_id.clone(),
                    options: course_choices,
                    placeholder: "Select a course",
                    on_change: move |v| dialog.write().edit(|d| d.select_course(v)),
                }
                SelectField {
                    label: "Section",
                    value: draft.section_id.clone(),
                    options: section_choices,
                    required: true,
                    invalid: section_invalid,
                    placeholder: "Select a section",
                    on_change: move |v| dialog.write().edit(|d| d.section_id = v),
                }
            }
            TextField {
                label: "Title",
                value: draft.title.clone(),
                required: true,
                invalid: title_invalid,
                hint: title_hint,
                on_input: move |v| dialog.write().edit(|d| d.title = v),
            }
            TextArea {
                label: "Description",
                value: draft.description.clone(),
                hint: description_hint,
                on_input: move |v| dialog.write().edit(|d| d.description = v),
            }
            div { class: "form-grid",
                TextField {
                    label: "Video URL",
                    value: draft.video_url.clone(),
                    on_input: move |v| dialog.write().edit(|d| d.video_url = v),
                }
                NumberField {
                    label: "Duration (seconds)",
                    value: draft.duration_seconds.map(f64::from),
                    step: "1",
                    on_input: move |v: Option<f64>| {
                        dialog.write().edit(|d| d.duration_seconds = v.map(|s| s.max(0.0) as u32))
                    },
                }
                NumberField {
                    label: "Display order",
                    value: Some(draft.display_order as f64),
                    step: "1",
                    on_input: move |v: Option<f64>| dialog.write().edit(|d| d.display_order = v.unwrap_or(0.0) as i32),
                }
            }

            label { class: "field",
                span { "Document" }
                input {
                    r#type: "file",
                    accept: ".pdf,.doc,.docx,.ppt,.pptx,.xls,.xlsx,.txt,.zip",
                    onchange: move |e| async move {
                        let Some(file) = e.files().into_iter().next() else {
                            staged.write().clear();
                            return;
                        };
                        if let Ok(bytes) = file.read_bytes().await {
                            staged.write().stage(StagedFile::new(file.name(), file.content_type(), bytes.to_vec()));
                        }
                    },
                }
                if let Some(name) = staged_name {
                    small { class: "field-hint", "Will upload after saving: {name}" }
                } else if let Some(current) = current_document {
                    small { class: "field-hint", "Current document: {current}" }
                }
            }

            div { class: "form-grid",
                CheckboxField {
                    label: "Free preview",
                    checked: draft.is_free,
                    on_change: move |v| dialog.write().edit(|d| d.is_free = v),
                }
                CheckboxField {
                    label: "Published",
                    checked: draft.is_published,
                    on_change: move |v| dialog.write().edit(|d| d.is_published = v),
                }
            }
        }
    }
}
