//! Analytics report payloads. All aggregation happens on the backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSummary {
    pub total_users: u64,
    pub total_courses: u64,
    pub total_enrollments: u64,
    pub total_completions: u64,
    pub total_revenue: f64,
    pub total_quiz_attempts: u64,
    pub total_certificates: u64,
    pub enrollments_this_period: u64,
    pub enrollments_previous_period: u64,
    pub revenue_this_period: f64,
    pub revenue_previous_period: f64,
    pub total_watch_time_minutes: u64,
    pub average_completion_rate: f64,
}

impl ReportSummary {
    /// Period-over-period enrollment change in percent, if there is a baseline.
    pub fn enrollment_growth(&self) -> Option<f64> {
        growth(
            self.enrollments_this_period as f64,
            self.enrollments_previous_period as f64,
        )
    }

    pub fn revenue_growth(&self) -> Option<f64> {
        growth(self.revenue_this_period, self.revenue_previous_period)
    }
}

fn growth(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous * 100.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrollmentReportItem {
    pub id: String,
    pub user_name: String,
    pub user_email: String,
    pub course_title: String,
    pub enrolled_at: String,
    pub progress_percentage: f64,
    pub completed_at: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyEnrollments {
    pub date: String,
    pub count: u64,
    pub completed_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseEnrollments {
    pub course_id: String,
    pub course_title: String,
    pub enrollment_count: u64,
    pub completion_count: u64,
    pub average_progress: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusShare {
    pub status: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrollmentReport {
    pub items: Vec<EnrollmentReportItem>,
    pub total_count: u64,
    pub by_date: Vec<DailyEnrollments>,
    pub by_course: Vec<CourseEnrollments>,
    pub by_status: Vec<StatusShare>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CoursePerformanceItem {
    pub course_id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub enrollment_count: u64,
    pub completion_count: u64,
    pub completion_rate: f64,
    pub total_views: u64,
    pub total_watch_time_minutes: u64,
    pub average_progress: f64,
    pub average_rating: f64,
    pub review_count: u64,
    pub revenue: f64,
    pub quiz_attempts: u64,
    pub quiz_pass_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CoursePerformance {
    pub items: Vec<CoursePerformanceItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserActivityItem {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub enrollment_count: u64,
    pub completed_courses: u64,
    pub total_watch_time_minutes: u64,
    pub quiz_attempts: u64,
    pub last_activity_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyActivity {
    pub date: String,
    pub active_users: u64,
    pub lesson_views: u64,
    pub quiz_attempts: u64,
    pub watch_time_minutes: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserActivity {
    pub items: Vec<UserActivityItem>,
    pub total_active_users: u64,
    pub by_date: Vec<DailyActivity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizPerformanceItem {
    pub quiz_id: String,
    pub quiz_title: String,
    pub course_title: String,
    pub total_attempts: u64,
    pub passed_count: u64,
    pub failed_count: u64,
    pub pass_rate: f64,
    pub average_score: f64,
    pub average_time_seconds: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizPerformance {
    pub items: Vec<QuizPerformanceItem>,
    pub total_attempts: u64,
    pub total_passed: u64,
    pub total_failed: u64,
    pub overall_pass_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth() {
        let summary = ReportSummary {
            enrollments_this_period: 30,
            enrollments_previous_period: 20,
            ..Default::default()
        };
        assert_eq!(summary.enrollment_growth(), Some(50.0));
        assert_eq!(summary.revenue_growth(), None, "no baseline means no growth figure");
    }
}
