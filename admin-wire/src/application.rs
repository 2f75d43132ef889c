//! Tenant applications (branded mobile apps) and their course assignments.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationCourse {
    pub id: String,
    pub course_id: String,
    pub course_title: String,
    pub course_thumbnail_url: Option<String>,
    pub display_order: i32,
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub id: String,
    pub app_id: String,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub splash_image_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub android_package_name: Option<String>,
    pub ios_bundle_id: Option<String>,
    pub is_active: bool,
    pub allow_registration: bool,
    pub require_enrollment: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub course_count: Option<u64>,
    pub courses: Option<Vec<ApplicationCourse>>,
}
