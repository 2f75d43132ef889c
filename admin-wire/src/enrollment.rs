//! Enrollments (user to course joins).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Enrollment {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_profile_image: Option<String>,
    pub course_id: String,
    pub course_title: String,
    pub course_thumbnail: Option<String>,
    pub progress_percentage: f64,
    pub enrolled_at: String,
    pub last_accessed_at: Option<String>,
    pub completed_at: Option<String>,
    pub expires_at: Option<String>,
    pub is_active: bool,
    pub has_certificate: bool,
}

impl Enrollment {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
