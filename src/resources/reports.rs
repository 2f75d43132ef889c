//! Analytics reports for a date range.

use chrono::{DateTime, Months, SecondsFormat, Utc};
use serde::de::DeserializeOwned;

use admin_wire::report::{
    CoursePerformance, EnrollmentReport, QuizPerformance, ReportSummary, UserActivity,
};

use crate::backend::{fetch_json, ApiRequest, Backend};
use crate::error::ApiError;

const REPORTS_PATH: &str = "/web/analytics/reports";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub course_id: Option<String>,
}

impl ReportQuery {
    /// The month leading up to `now`.
    pub fn last_month(now: DateTime<Utc>) -> Self {
        Self {
            start: now.checked_sub_months(Months::new(1)).unwrap_or(now),
            end: now,
            course_id: None,
        }
    }

    fn request(&self, report: &str, with_course: bool) -> ApiRequest {
        let request = ApiRequest::get(format!("{}/{}", REPORTS_PATH, report))
            .query("startDate", self.start.to_rfc3339_opts(SecondsFormat::Millis, true))
            .query("endDate", self.end.to_rfc3339_opts(SecondsFormat::Millis, true));
        if with_course {
            request.query_opt("courseId", self.course_id.as_deref())
        } else {
            request
        }
    }
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self::last_month(Utc::now())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reports {
    pub summary: ReportSummary,
    pub enrollments: EnrollmentReport,
    pub course_performance: CoursePerformance,
    pub user_activity: UserActivity,
    pub quiz_performance: QuizPerformance,
}

async fn report<T: DeserializeOwned>(
    backend: &dyn Backend,
    request: ApiRequest,
) -> Result<T, ApiError> {
    fetch_json(backend, request).await
}

/// Fetch all five reports concurrently. Any failure fails the whole load.
pub async fn load_reports(backend: &dyn Backend, query: &ReportQuery) -> Result<Reports, ApiError> {
    let (summary, enrollments, course_performance, user_activity, quiz_performance) = futures::try_join!(
        report::<ReportSummary>(backend, query.request("summary", false)),
        report::<EnrollmentReport>(backend, query.request("enrollments", true)),
        report::<CoursePerformance>(backend, query.request("course-performance", false)),
        report::<UserActivity>(backend, query.request("user-activity", false)),
        report::<QuizPerformance>(backend, query.request("quiz-performance", true)),
    )?;
    Ok(Reports {
        summary,
        enrollments,
        course_performance,
        user_activity,
        quiz_performance,
    })
}

/// `+12.5%` / `-3.0%`, or `n/a` without a baseline.
pub fn growth_label(growth: Option<f64>) -> String {
    match growth {
        Some(g) => format!("{:+.1}%", g),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use chrono::TimeZone;
    use serde_json::json;

    fn query() -> ReportQuery {
        let now = Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap();
        ReportQuery {
            course_id: Some("c1".into()),
            ..ReportQuery::last_month(now)
        }
    }

    #[test]
    fn test_last_month_range() {
        let q = query();
        assert_eq!(q.start, Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_course_filter_only_on_two_reports() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"totalUsers": 10}));
        for _ in 0..4 {
            backend.push_ok(json!({}));
        }

        let reports = load_reports(&backend, &query()).await.unwrap();

        let range = "startDate=2025-02-28T12%3A00%3A00.000Z&endDate=2025-03-31T12%3A00%3A00.000Z";
        assert_eq!(
            backend.calls(),
            vec![
                format!("GET /web/analytics/reports/summary?{}", range),
                format!("GET /web/analytics/reports/enrollments?{}&courseId=c1", range),
                format!("GET /web/analytics/reports/course-performance?{}", range),
                format!("GET /web/analytics/reports/user-activity?{}", range),
                format!("GET /web/analytics/reports/quiz-performance?{}&courseId=c1", range),
            ]
        );
        assert_eq!(reports.summary.total_users, 10);
    }

    #[tokio::test]
    async fn test_any_failure_fails_the_load() {
        let backend = MockBackend::new();
        backend.push_ok(json!({}));
        backend.push_err(ApiError::Network("reset".into()));

        let result = load_reports(&backend, &query()).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[test]
    fn test_growth_label() {
        assert_eq!(growth_label(Some(12.54)), "+12.5%");
        assert_eq!(growth_label(Some(-3.0)), "-3.0%");
        assert_eq!(growth_label(None), "n/a");
    }
}
