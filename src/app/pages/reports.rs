//! Reports page: five analytics reports over a date range.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use dioxus::prelude::*;

use crate::app::state::{use_admin, use_options, AdminContext};
use crate::resources::courses::course_options;
use crate::resources::reports::{growth_label, load_reports, ReportQuery, Reports as LoadedReports};

fn date_input(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DD` from a date input; the end date covers the whole day.
fn parse_date(value: &str, end_of_day: bool) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()?;
    let time = if end_of_day {
        NaiveTime::from_hms_opt(23, 59, 59)?
    } else {
        NaiveTime::MIN
    };
    Some(date.and_time(time).and_utc())
}

/// Fetch every report; on failure the previous reports stay on screen.
fn refresh(
    query: ReportQuery,
    mut reports: Signal<Option<LoadedReports>>,
    mut loading: Signal<bool>,
    ctx: AdminContext,
) {
    loading.set(true);
    spawn(async move {
        let result = load_reports(ctx.backend.as_ref(), &query).await;
        loading.set(false);
        match result {
            Ok(loaded) => reports.set(Some(loaded)),
            Err(e) => ctx.fail(&e),
        }
    });
}

#[component]
pub fn Reports() -> Element {
    let ctx = use_admin();
    let mut query = use_signal(ReportQuery::default);
    let reports = use_signal(|| None::<LoadedReports>);
    let loading = use_signal(|| false);

    let mount_ctx = ctx.clone();
    use_hook(move || refresh(query.peek().clone(), reports, loading, mount_ctx));

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

    let current = query.read().clone();
    let start = date_input(&current.start);
    let end = date_input(&current.end);
    let course_value = current.course_id.clone().unwrap_or_default();
    let busy = *loading.read();
    let loaded = reports.read().clone();

    let apply_ctx = ctx.clone();
    let apply = move |_: MouseEvent| refresh(query.read().clone(), reports, loading, apply_ctx.clone());

    rsx! {
        div { class: "toolbar",
            label {
                small { "From" }
                input {
                    r#type: "date",
                    value: "{start}",
                    oninput: move |e| {
                        if let Some(start) = parse_date(&e.value(), false) {
                            query.write().start = start;
                        }
                    },
                }
            }
            label {
                small { "To" }
                input {
                    r#type: "date",
                    value: "{end}",
                    oninput: move |e| {
                        if let Some(end) = parse_date(&e.value(), true) {
                            query.write().end = end;
                        }
                    },
                }
            }
            select {
                aria_label: "Course",
                value: "{course_value}",
                onchange: move |e| query.write().course_id = Some(e.value()).filter(|c| !c.is_empty()),
                option { value: "", selected: course_value.is_empty(), "All courses" }
                for (id, title) in course_choices {
                    option { key: "{id}", value: "{id}", selected: id == course_value, "{title}" }
                }
            }
            button {
                class: "btn btn-primary",
                disabled: busy,
                aria_busy: if busy { "true" } else { "false" },
                onclick: apply,
                "Apply"
            }
        }

        if let Some(reports) = loaded {
            ReportsView { reports }
        } else if busy {
            div { class: "card p-6", aria_busy: "true", "Loading reports..." }
        } else {
            div { class: "card p-6", "No report data." }
        }
    }
}

#[component]
fn ReportsView(reports: LoadedReports) -> Element {
    let summary = &reports.summary;
    let enrollment_growth = growth_label(summary.enrollment_growth());
    let revenue_growth = growth_label(summary.revenue_growth());
    let revenue = format!("{:.2}", summary.total_revenue);
    let completion = format!("{:.1}%", summary.average_completion_rate);
    let watch_hours = summary.total_watch_time_minutes / 60;
    let (users, courses, enrollments, completions, attempts, certificates, period_enrollments) = (
        summary.total_users,
        summary.total_courses,
        summary.total_enrollments,
        summary.total_completions,
        summary.total_quiz_attempts,
        summary.total_certificates,
        summary.enrollments_this_period,
    );

    let by_course: Vec<(String, u64, u64, String)> = reports
        .enrollments
        .by_course
        .iter()
        .map(|c| {
            (
                c.course_title.clone(),
                c.enrollment_count,
                c.completion_count,
                format!("{:.0}%", c.average_progress),
            )
        })
        .collect();
    let by_status: Vec<(String, u64, String)> = reports
        .enrollments
        .by_status
        .iter()
        .map(|s| (s.status.clone(), s.count, format!("{:.1}%", s.percentage)))
        .collect();
    let performance: Vec<(String, u64, String, String, String)> = reports
        .course_performance
        .items
        .iter()
        .map(|c| {
            (
                c.title.clone(),
                c.enrollment_count,
                format!("{:.1}%", c.completion_rate),
                format!("{:.1}", c.average_rating),
                format!("{:.2}", c.revenue),
            )
        })
        .collect();
    let active_users = reports.user_activity.total_active_users;
    let activity: Vec<(String, u64, u64, u64)> = reports
        .user_activity
        .items
        .iter()
        .map(|u| (u.user_name.clone(), u.enrollment_count, u.completed_courses, u.total_watch_time_minutes))
        .collect();
    let quiz_overall = format!("{:.1}%", reports.quiz_performance.overall_pass_rate);
    let quizzes: Vec<(String, String, u64, String, String)> = reports
        .quiz_performance
        .items
        .iter()
        .map(|q| {
            (
                q.quiz_title.clone(),
                q.course_title.clone(),
                q.total_attempts,
                format!("{:.1}%", q.pass_rate),
                format!("{:.1}", q.average_score),
            )
        })
        .collect();

    rsx! {
        section { class: "mb-8",
            div { class: "stat-grid",
                Stat { label: "Users", value: "{users}" }
                Stat { label: "Courses", value: "{courses}" }
                Stat { label: "Enrollments", value: "{enrollments}" }
                Stat { label: "Completions", value: "{completions}" }
                Stat { label: "Enrollments this period", value: "{period_enrollments}", note: "{enrollment_growth}" }
                Stat { label: "Revenue", value: "{revenue}", note: "{revenue_growth}" }
                Stat { label: "Avg. completion", value: "{completion}" }
                Stat { label: "Quiz attempts", value: "{attempts}" }
                Stat { label: "Certificates", value: "{certificates}" }
                Stat { label: "Watch time (h)", value: "{watch_hours}" }
            }
        }

        section { class: "card p-6 table-wrap mb-8",
            h3 { "Enrollments by course" }
            table {
                thead { tr { th { "Course" } th { "Enrollments" } th { "Completed" } th { "Avg. progress" } } }
                tbody {
                    for (i, (title, count, completed, progress)) in by_course.into_iter().enumerate() {
                        tr { key: "{i}", td { "{title}" } td { "{count}" } td { "{completed}" } td { "{progress}" } }
                    }
                }
            }
            if !by_status.is_empty() {
                p {
                    for (i, (status, count, share)) in by_status.into_iter().enumerate() {
                        span { key: "{i}", class: "badge badge-muted", "{status}: {count} ({share})" }
                        " "
                    }
                }
            }
        }

        section { class: "card p-6 table-wrap mb-8",
            h3 { "Course performance" }
            table {
                thead { tr { th { "Course" } th { "Enrollments" } th { "Completion" } th { "Rating" } th { "Revenue" } } }
                tbody {
                    for (i, (title, count, rate, rating, revenue)) in performance.into_iter().enumerate() {
                        tr { key: "{i}", td { "{title}" } td { "{count}" } td { "{rate}" } td { "{rating}" } td { "{revenue}" } }
                    }
                }
            }
        }

        section { class: "card p-6 table-wrap mb-8",
            h3 { "User activity ({active_users} active)" }
            table {
                thead { tr { th { "User" } th { "Enrollments" } th { "Completed" } th { "Watch time (min)" } } }
                tbody {
                    for (i, (name, count, completed, minutes)) in activity.into_iter().enumerate() {
                        tr { key: "{i}", td { "{name}" } td { "{count}" } td { "{completed}" } td { "{minutes}" } }
                    }
                }
            }
        }

        section { class: "card p-6 table-wrap",
            h3 { "Quiz performance (overall pass rate {quiz_overall})" }
            table {
                thead { tr { th { "Quiz" } th { "Course" } th { "Attempts" } th { "Pass rate" } th { "Avg. score" } } }
                tbody {
                    for (i, (quiz, course, attempts, pass_rate, score)) in quizzes.into_iter().enumerate() {
                        tr { key: "{i}", td { "{quiz}" } td { "{course}" } td { "{attempts}" } td { "{pass_rate}" } td { "{score}" } }
                    }
                }
            }
        }
    }
}

#[component]
fn Stat(#[props(into)] label: String, #[props(into)] value: String, #[props(default, into)] note: String) -> Element {
    rsx! {
        div { class: "card",
            small { "{label}" }
            div { class: "stat-value", "{value}" }
            if !note.is_empty() {
                small { "{note}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_inputs() {
        let start = parse_date("2025-03-01", false).unwrap();
        let end = parse_date("2025-03-31", true).unwrap();
        assert_eq!(start.to_rfc3339(), "2025-03-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-03-31T23:59:59+00:00");
        assert_eq!(date_input(&end), "2025-03-31");
        assert!(parse_date("31/03/2025", false).is_none());
    }
}
