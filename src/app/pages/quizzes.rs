//! Quizzes page and the per-quiz questions editor.

use dioxus::prelude::*;

use admin_wire::{Course, QuestionType, Quiz, QuizQuestion};

use crate::app::components::{
    CheckboxField, ConfirmDialog, FormModal, NumberField, Paginator, SelectField, StatusBadge,
    TableCard, TableNotice, TextArea, TextField,
};
use crate::app::state::{
    nested_op, open_nested, reload, use_action, use_admin, use_list, use_options, use_paging,
    use_save, Nested,
};
use crate::backend::ApiRequest;
use crate::controller::{
    ConfirmGate, FormDialog, ListController, NestedEditor, PendingConfirm, SubmitOutcome,
};
use crate::resources::courses::course_options;
use crate::resources::quizzes::{
    ordered_questions, question_dialog, questions_editor, save_question, QuestionDraft, QuizDraft,
    QuizzesResource, QUESTIONS_PATH, QUIZ_PUBLISH,
};
use crate::resources::Resource;

type Editor = Nested<Quiz>;

#[component]
pub fn Quizzes() -> Element {
    let ctx = use_admin();
    let list = use_list::<QuizzesResource>();
    let paging = use_paging(list);
    let mut dialog = use_signal(|| FormDialog::<QuizDraft>::new(QuizzesResource::PATH));
    let mut confirm = use_signal(ConfirmGate::default);
    let save = use_save(dialog, list);
    let run = use_action(list, "Quiz updated.");
    let editor: Editor = use_signal(|| None);

    let backend = ctx.backend.clone();
    let courses = use_options(move || {
        let backend = backend.clone();
        async move { course_options(backend.as_ref()).await }
    });
    let courses = courses.read().clone().unwrap_or_default();

    let open_ctx = ctx.clone();
    let open_questions = use_callback(move |quiz_id: String| {
        open_nested(editor, questions_editor(&quiz_id), open_ctx.clone())
    });

    let view = list.read();
    let quizzes = view.items().to_vec();

    rsx! {
        div { class: "toolbar",
            span { class: "spacer" }
            button { class: "btn btn-primary", onclick: move |_| dialog.write().open_create(), "New quiz" }
        }

        TableCard { loading: view.is_loading(),
            table {
                thead {
                    tr {
                        th { "Title" }
                        th { "Course" }
                        th { "Questions" }
                        th { "Passing score" }
                        th { "Attempts" }
                        th { "Status" }
                        th {}
                    }
                }
                tbody {
                    if quizzes.is_empty() {
                        TableNotice { columns: 7, loading: view.is_loading(), empty_text: "No quizzes yet." }
                    }
                    for quiz in quizzes {
                        QuizRow {
                            key: "{quiz.id}",
                            quiz: quiz.clone(),
                            on_edit: move |q: Quiz| dialog.write().open_edit(q.id.clone(), QuizDraft::from(&q)),
                            on_questions: move |q: Quiz| open_questions.call(q.id),
                            on_publish: move |q: Quiz| run.call(QUIZ_PUBLISH.request(&q.id, !q.is_published)),
                            on_delete: move |q: Quiz| {
                                confirm.write().request(PendingConfirm::delete(QuizzesResource::PATH, &q.id, &q.title))
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
            QuizDialog { dialog, courses, on_save: save }
        }
        if editor.read().is_some() {
            QuestionsEditor { editor, list }
        }
        ConfirmDialog { gate: confirm, on_accept: run }
    }
}

#[component]
fn QuizRow(
    quiz: Quiz,
    on_edit: EventHandler<Quiz>,
    on_questions: EventHandler<Quiz>,
    on_publish: EventHandler<Quiz>,
    on_delete: EventHandler<Quiz>,
) -> Element {
    let title = quiz.title.clone();
    let course = quiz.course_name.clone();
    let questions = quiz.question_count;
    let passing = quiz.passing_score;
    let attempts = quiz.max_attempts;
    let published = quiz.is_published;
    let publish_label = QUIZ_PUBLISH.label(published);
    let for_questions = quiz.clone();
    let for_publish = quiz.clone();
    let for_delete = quiz.clone();

    rsx! {
        tr {
            td { "{title}" }
            td { "{course}" }
            td { "{questions}" }
            td { "{passing}%" }
            td { "{attempts}" }
            td { StatusBadge { on: published, on_label: "Published", off_label: "Draft" } }
            td { class: "row-actions",
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_edit.call(quiz.clone()), "Edit" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_questions.call(for_questions.clone()), "Questions" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_publish.call(for_publish.clone()), "{publish_label}" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_delete.call(for_delete.clone()), "Delete" }
            }
        }
    }
}

#[component]
fn QuizDialog(dialog: Signal<FormDialog<QuizDraft>>, courses: Vec<Course>, on_save: EventHandler<()>) -> Element {
    let mut dialog = dialog;
    let form = dialog.read();
    let Some(draft) = form.draft().cloned() else {
        return rsx! {};
    };
    let editing = form.is_edit();
    let title = if editing { "Edit quiz" } else { "New quiz" };
    let title_invalid = form.is_invalid("title");
    let course_invalid = form.is_invalid("courseId");
    let saving = form.is_saving();
    drop(form);

    let course_choices: Vec<(String, String)> =
        courses.iter().map(|c| (c.id.clone(), c.title.clone())).collect();
    let fixed_course = course_label(&courses, &draft.course_id);

    rsx! {
        FormModal {
            title,
            saving,
            on_submit: move |_| on_save.call(()),
            on_close: move |_| dialog.write().cancel(),

            TextField {
                label: "Title",
                value: draft.title.clone(),
                required: true,
                invalid: title_invalid,
                on_input: move |v| dialog.write().edit(|d| d.title = v),
            }
            if editing {
                // The course is fixed once the quiz exists.
                label { class: "field",
                    span { "Course" }
                    input {
                        disabled: true,
                        value: "{fixed_course}",
                    }
                }
            } else {
                SelectField {
                    label: "Course",
                    value: draft.course_id.clone(),
                    options: course_choices,
                    required: true,
                    invalid: course_invalid,
                    placeholder: "Select a course",
                    on_change: move |v| dialog.write().edit(|d| d.course_id = v),
                }
            }
            TextArea {
                label: "Description",
                value: draft.description.clone(),
                on_input: move |v| dialog.write().edit(|d| d.description = v),
            }
            div { class: "form-grid",
                NumberField {
                    label: "Passing score (%)",
                    value: Some(draft.passing_score as f64),
                    step: "1",
                    on_input: move |v: Option<f64>| {
                        dialog.write().edit(|d| d.passing_score = v.unwrap_or(0.0).clamp(0.0, 100.0) as u32)
                    },
                }
                NumberField {
                    label: "Time limit (minutes)",
                    value: draft.time_limit.map(f64::from),
                    step: "1",
                    on_input: move |v: Option<f64>| {
                        dialog.write().edit(|d| d.time_limit = v.filter(|m| *m > 0.0).map(|m| m as u32))
                    },
                }
                NumberField {
                    label: "Max attempts",
                    value: Some(draft.max_attempts as f64),
                    step: "1",
                    on_input: move |v: Option<f64>| {
                        dialog.write().edit(|d| d.max_attempts = v.unwrap_or(0.0).max(0.0) as u32)
                    },
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

fn course_label(courses: &[Course], course_id: &str) -> String {
    courses
        .iter()
        .find(|c| c.id == course_id)
        .map(|c| c.title.clone())
        .unwrap_or_else(|| course_id.to_string())
}

#[component]
fn QuestionsEditor(editor: Editor, list: Signal<ListController<QuizzesResource>>) -> Element {
    let ctx = use_admin();
    let mut editor = editor;
    let mut question = use_signal(question_dialog);
    let mut confirm = use_signal(ConfirmGate::default);

    let save_ctx = ctx.clone();
    let save = use_callback(move |_: ()| {
        let ctx = save_ctx.clone();
        spawn(async move {
            match save_question(question, editor, ctx.backend.as_ref()).await {
                Ok(SubmitOutcome::Saved(saved)) => {
                    ctx.success(if saved.mode.is_edit() { "Question saved." } else { "Question added." });
                    reload(list, ctx);
                }
                Ok(SubmitOutcome::Invalid(_)) => ctx.warn("Please fill in the required fields."),
                Ok(SubmitOutcome::Skipped) => {}
                Err(e) => ctx.fail(&e),
            }
        });
    });
    let delete_ctx = ctx.clone();
    let delete = use_callback(move |request: ApiRequest| {
        nested_op(request, editor, list, delete_ctx.clone(), "Question deleted.")
    });

    let state = editor.read();
    let loading = state.as_ref().is_some_and(NestedEditor::is_loading);
    let quiz = state.as_ref().and_then(NestedEditor::parent).cloned();
    drop(state);

    let heading = quiz
        .as_ref()
        .map(|q| format!("Questions: {}", q.title))
        .unwrap_or_else(|| "Questions".to_string());
    let questions: Vec<QuizQuestion> = quiz.as_ref().map(ordered_questions).unwrap_or_default();

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

                if quiz.is_none() {
                    div { aria_busy: "true", "Loading questions..." }
                } else {
                    div { class: "toolbar",
                        if loading {
                            small { aria_busy: "true", "Refreshing..." }
                        }
                        span { class: "spacer" }
                        button {
                            class: "btn btn-primary btn-sm",
                            onclick: move |_| {
                                let seed = editor.read().as_ref().and_then(NestedEditor::parent).map(QuestionDraft::new_for);
                                if let Some(draft) = seed {
                                    question.write().open_create_with(draft);
                                }
                            },
                            "Add question"
                        }
                    }
                    if questions.is_empty() {
                        p { class: "table-notice", "This quiz has no questions yet." }
                    }
                    ol {
                        for q in questions {
                            QuestionItem {
                                key: "{q.id}",
                                question: q.clone(),
                                on_edit: move |q: QuizQuestion| question.write().open_edit(q.id.clone(), QuestionDraft::from(&q)),
                                on_delete: move |q: QuizQuestion| {
                                    confirm.write().request(PendingConfirm::delete(QUESTIONS_PATH, &q.id, &q.question_text))
                                },
                            }
                        }
                    }
                }
            }
        }

        if question.read().is_open() {
            QuestionDialog { dialog: question, on_save: save }
        }
        ConfirmDialog { gate: confirm, on_accept: delete }
    }
}

#[component]
fn QuestionItem(
    question: QuizQuestion,
    on_edit: EventHandler<QuizQuestion>,
    on_delete: EventHandler<QuizQuestion>,
) -> Element {
    let text = question.question_text.clone();
    let kind = question.question_type.label();
    let points = question.points;
    let answers: Vec<(String, bool)> = question
        .options
        .iter()
        .map(|o| (o.option_text.clone(), o.is_correct))
        .collect();
    let answer = question.correct_answer.clone().unwrap_or_default();
    let for_delete = question.clone();

    rsx! {
        li {
            div { class: "toolbar",
                strong { "{text}" }
                span { class: "spacer" }
                small { "{kind} · {points} pt" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_edit.call(question.clone()), "Edit" }
                button { class: "btn btn-outline btn-sm", onclick: move |_| on_delete.call(for_delete.clone()), "Delete" }
            }
            if answers.is_empty() {
                small { "Answer: {answer}" }
            } else {
                ul {
                    for (i, (text, correct)) in answers.into_iter().enumerate() {
                        li { key: "{i}",
                            if correct { strong { "{text} ✓" } } else { "{text}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionDialog(dialog: Signal<FormDialog<QuestionDraft>>, on_save: EventHandler<()>) -> Element {
    let mut dialog = dialog;
    let form = dialog.read();
    let Some(draft) = form.draft().cloned() else {
        return rsx! {};
    };
    let title = if form.is_edit() { "Edit question" } else { "New question" };
    let text_invalid = form.is_invalid("questionText");
    let answer_invalid = form.is_invalid("correctAnswer");
    let options_error = form
        .errors()
        .and_then(|e| e.fields().iter().find(|f| f.field == "options"))
        .map(|f| f.message.clone())
        .unwrap_or_default();
    let saving = form.is_saving();
    drop(form);

    let type_choices: Vec<(String, String)> = QuestionType::ALL
        .iter()
        .map(|t| (t.as_str().to_string(), t.label().to_string()))
        .collect();
    let has_options = draft.question_type.has_options();
    let options_class = if options_error.is_empty() { "field" } else { "field invalid" };
    let options: Vec<(usize, String, bool)> = draft
        .options
        .iter()
        .enumerate()
        .map(|(i, o)| (i, o.option_text.clone(), o.is_correct))
        .collect();

    rsx! {
        FormModal {
            title,
            saving,
            wide: true,
            on_submit: move |_| on_save.call(()),
            on_close: move |_| dialog.write().cancel(),

            TextArea {
                label: "Question",
                value: draft.question_text.clone(),
                required: true,
                invalid: text_invalid,
                on_input: move |v| dialog.write().edit(|d| d.question_text = v),
            }
            div { class: "form-grid",
                SelectField {
                    label: "Type",
                    value: draft.question_type.as_str().to_string(),
                    options: type_choices,
                    on_change: move |v: String| {
                        if let Some(kind) = QuestionType::parse(&v) {
                            dialog.write().edit(|d| d.question_type = kind);
                        }
                    },
                }
                NumberField {
                    label: "Points",
                    value: Some(draft.points as f64),
                    step: "1",
                    on_input: move |v: Option<f64>| dialog.write().edit(|d| d.points = v.unwrap_or(0.0).max(0.0) as u32),
                }
                NumberField {
                    label: "Display order",
                    value: Some(draft.display_order as f64),
                    step: "1",
                    on_input: move |v: Option<f64>| dialog.write().edit(|d| d.display_order = v.unwrap_or(0.0) as i32),
                }
            }

            if has_options {
                fieldset { class: options_class,
                    legend { "Options" }
                    for (index, text, correct) in options {
                        div { key: "{index}", class: "toolbar",
                            input {
                                r#type: "checkbox",
                                aria_label: "Correct",
                                checked: correct,
                                onchange: move |e| dialog.write().edit(|d| d.set_correct(index, e.checked())),
                            }
                            input {
                                value: "{text}",
                                placeholder: "Option text",
                                oninput: move |e| {
                                    dialog.write().edit(|d| {
                                        if let Some(option) = d.options.get_mut(index) {
                                            option.option_text = e.value();
                                        }
                                    })
                                },
                            }
                            button {
                                r#type: "button",
                                class: "btn btn-outline btn-sm",
                                onclick: move |_| dialog.write().edit(|d| d.remove_option(index)),
                                "Remove"
                            }
                        }
                    }
                    if !options_error.is_empty() {
                        small { class: "field-hint", "{options_error}" }
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-outline btn-sm",
                        onclick: move |_| dialog.write().edit(|d| d.add_option()),
                        "Add option"
                    }
                }
            } else {
                TextField {
                    label: "Correct answer",
                    value: draft.correct_answer.clone(),
                    required: true,
                    invalid: answer_invalid,
                    on_input: move |v| dialog.write().edit(|d| d.correct_answer = v),
                }
            }

            TextArea {
                label: "Explanation",
                value: draft.explanation.clone(),
                rows: 2,
                on_input: move |v| dialog.write().edit(|d| d.explanation = v),
            }
            TextField {
                label: "Image URL",
                value: draft.image_url.clone(),
                on_input: move |v| dialog.write().edit(|d| d.image_url = v),
            }
        }
    }
}
