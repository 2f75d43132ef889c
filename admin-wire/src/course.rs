//! Courses, categories, sections and lessons.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub const ALL: [CourseLevel; 3] = [
        CourseLevel::Beginner,
        CourseLevel::Intermediate,
        CourseLevel::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CourseLevel::Beginner => "Beginner",
            CourseLevel::Intermediate => "Intermediate",
            CourseLevel::Advanced => "Advanced",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }
}

/// Application a course is published to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseApplication {
    pub id: String,
    pub app_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    pub id: String,
    pub category_id: String,
    pub category_name: Option<String>,
    pub title: String,
    pub slug: String,
    pub short_description: String,
    pub full_description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub preview_video_url: Option<String>,
    pub instructor_name: String,
    pub instructor_bio: Option<String>,
    pub instructor_image_url: Option<String>,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub currency: String,
    pub duration_minutes: u32,
    pub level: CourseLevel,
    pub language: String,
    pub is_featured: bool,
    pub is_published: bool,
    pub published_at: Option<String>,
    pub view_count: u64,
    pub enrollment_count: u64,
    pub average_rating: f64,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub applications: Option<Vec<CourseApplication>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub courses_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseSection {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub lesson_count: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LessonContentType {
    #[default]
    Video,
    Document,
    VideoAndDocument,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_seconds: Option<u32>,
    pub is_free: bool,
    pub display_order: i32,
    pub is_published: bool,
    pub video_url: Option<String>,
    pub video_id: Option<String>,
    pub document_url: Option<String>,
    pub document_name: Option<String>,
    pub document_type: Option<String>,
    pub document_size: Option<u64>,
    pub is_document_uploaded: bool,
    pub content_type: LessonContentType,
    pub has_video: bool,
    pub has_document: bool,
    pub section_id: String,
    pub section_title: String,
    pub course_id: String,
    pub course_title: String,
    pub created_at: String,
    pub updated_at: String,
    pub completion_count: Option<u64>,
    pub average_watch_percentage: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_course_deserializes_with_defaults() {
        let course: Course = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "title": "Rust",
            "level": "Advanced",
            "isPublished": true
        }))
        .unwrap();
        assert_eq!(course.level, CourseLevel::Advanced);
        assert!(course.is_published);
        assert_eq!(course.price, 0.0);
        assert!(course.applications.is_none());
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(CourseLevel::parse("Intermediate"), Some(CourseLevel::Intermediate));
        assert_eq!(CourseLevel::parse("Expert"), None);
    }

    #[test]
    fn test_lesson_content_type() {
        let lesson: Lesson = serde_json::from_value(serde_json::json!({
            "id": "l1",
            "contentType": "VideoAndDocument",
            "documentSize": 2048
        }))
        .unwrap();
        assert_eq!(lesson.content_type, LessonContentType::VideoAndDocument);
        assert_eq!(lesson.document_size, Some(2048));
    }
}
