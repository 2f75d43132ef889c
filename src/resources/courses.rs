//! Courses, plus the course and category lookups other screens use.

use serde_json::{json, Value};

use admin_wire::{Category, Course, CourseLevel, Page, TotalShape};

use crate::backend::{fetch_json, fetch_page, ApiRequest, Backend};
use crate::controller::{Draft, PageParam, ToggleAction};
use crate::error::{ApiError, ValidationErrors};

use super::{non_blank, Resource};

pub struct CoursesResource;

impl Resource for CoursesResource {
    type Item = Course;
    type Filter = ();
    const PATH: &'static str = "/web/courses";
    const PAGE_PARAM: PageParam = PageParam::PageNumber;
    const TOTAL: TotalShape = TotalShape::TotalCount;
}

pub const COURSE_PUBLISH: ToggleAction = ToggleAction::put("/web/courses", "publish", "unpublish");

/// Page size used when courses populate a dropdown.
pub const COURSE_OPTIONS_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    pub title: String,
    pub category_id: String,
    pub short_description: String,
    pub full_description: String,
    pub thumbnail_url: String,
    pub instructor_name: String,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub currency: String,
    pub duration_minutes: u32,
    pub level: CourseLevel,
    pub language: String,
    pub is_featured: bool,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            category_id: String::new(),
            short_description: String::new(),
            full_description: String::new(),
            thumbnail_url: String::new(),
            instructor_name: String::new(),
            price: 0.0,
            discount_price: None,
            currency: "TRY".to_string(),
            duration_minutes: 0,
            level: CourseLevel::Beginner,
            language: "tr".to_string(),
            is_featured: false,
        }
    }
}

impl From<&Course> for CourseDraft {
    fn from(course: &Course) -> Self {
        let defaults = Self::default();
        Self {
            title: course.title.clone(),
            category_id: course.category_id.clone(),
            short_description: course.short_description.clone(),
            full_description: course.full_description.clone().unwrap_or_default(),
            thumbnail_url: course.thumbnail_url.clone().unwrap_or_default(),
            instructor_name: course.instructor_name.clone(),
            price: course.price,
            discount_price: course.discount_price,
            currency: non_blank(&course.currency).unwrap_or(defaults.currency),
            duration_minutes: course.duration_minutes,
            level: course.level,
            language: non_blank(&course.language).unwrap_or(defaults.language),
            is_featured: course.is_featured,
        }
    }
}

impl Draft for CourseDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("title", &self.title, "Title");
        errors.require("categoryId", &self.category_id, "Category");
        errors.into_result()
    }

    fn create_body(&self) -> Value {
        json!({
            "title": self.title.trim(),
            "categoryId": self.category_id,
            "shortDescription": self.short_description,
            "fullDescription": non_blank(&self.full_description),
            "thumbnailUrl": non_blank(&self.thumbnail_url),
            "instructorName": self.instructor_name,
            "price": self.price,
            "discountPrice": self.discount_price,
            "currency": self.currency,
            "durationMinutes": self.duration_minutes,
            "level": self.level.as_str(),
            "language": self.language,
            "isFeatured": self.is_featured,
        })
    }
}

pub fn course_options_request() -> ApiRequest {
    ApiRequest::get(CoursesResource::PATH).query("pageSize", COURSE_OPTIONS_PAGE_SIZE)
}

/// Courses for dropdowns.
pub async fn course_options(backend: &dyn Backend) -> Result<Vec<Course>, ApiError> {
    let page: Page<Course> =
        fetch_page(backend, course_options_request(), CoursesResource::TOTAL).await?;
    Ok(page.items)
}

/// All categories, for the course dialog.
pub async fn category_options(backend: &dyn Backend) -> Result<Vec<Category>, ApiError> {
    fetch_json(backend, ApiRequest::get(super::categories::CategoriesResource::PATH)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;

    #[test]
    fn test_defaults() {
        let draft = CourseDraft::default();
        assert_eq!(draft.level, CourseLevel::Beginner);
        assert_eq!(draft.language, "tr");
        assert_eq!(draft.currency, "TRY");
        assert_eq!(draft.price, 0.0);
    }

    #[test]
    fn test_body_uses_wire_names() {
        let draft = CourseDraft {
            title: " Async Rust ".into(),
            category_id: "cat-1".into(),
            level: CourseLevel::Advanced,
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
        let body = draft.create_body();
        assert_eq!(body["title"], "Async Rust");
        assert_eq!(body["categoryId"], "cat-1");
        assert_eq!(body["level"], "Advanced");
        assert!(body["fullDescription"].is_null());
    }

    #[test]
    fn test_edit_seed_keeps_currency_default_for_blank() {
        let course = Course {
            title: "Rust".into(),
            category_id: "cat-1".into(),
            price: 49.0,
            ..Default::default()
        };
        let draft = CourseDraft::from(&course);
        assert_eq!(draft.currency, "TRY");
        assert_eq!(draft.price, 49.0);
    }

    #[tokio::test]
    async fn test_course_options() {
        let backend = MockBackend::new();
        backend.push_ok(serde_json::json!({"items": [{"id": "c1", "title": "Rust"}], "totalCount": 1}));
        let courses = course_options(&backend).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(backend.calls(), vec!["GET /web/courses?pageSize=100"]);
    }
}
