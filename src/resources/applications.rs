//! Tenant applications and their course assignments.

use serde_json::{json, Value};

use admin_wire::{Application, ApplicationCourse, TotalShape};

use crate::backend::ApiRequest;
use crate::controller::{next_display_order, Draft, NestedEditor, PageParam};
use crate::error::ValidationErrors;

use super::{non_blank, Resource};

pub struct ApplicationsResource;

impl Resource for ApplicationsResource {
    type Item = Application;
    type Filter = ();
    const PATH: &'static str = "/web/applications";
    const PAGE_PARAM: PageParam = PageParam::PageNumber;
    const TOTAL: TotalShape = TotalShape::PaginationTotalItems;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDraft {
    pub app_id: String,
    pub name: String,
    pub description: String,
    pub logo_url: String,
    pub splash_image_url: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub android_package_name: String,
    pub ios_bundle_id: String,
    pub is_active: bool,
    pub allow_registration: bool,
    pub require_enrollment: bool,
}

impl Default for ApplicationDraft {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            name: String::new(),
            description: String::new(),
            logo_url: String::new(),
            splash_image_url: String::new(),
            primary_color: "#6C5CE7".to_string(),
            secondary_color: "#A29BFE".to_string(),
            accent_color: "#FD79A8".to_string(),
            android_package_name: String::new(),
            ios_bundle_id: String::new(),
            is_active: true,
            allow_registration: true,
            require_enrollment: false,
        }
    }
}

impl From<Application> for ApplicationDraft {
    fn from(app: Application) -> Self {
        let defaults = Self::default();
        Self {
            app_id: app.app_id,
            name: app.name,
            description: app.description.unwrap_or_default(),
            logo_url: app.logo_url.unwrap_or_default(),
            splash_image_url: app.splash_image_url.unwrap_or_default(),
            primary_color: app.primary_color.unwrap_or(defaults.primary_color),
            secondary_color: app.secondary_color.unwrap_or(defaults.secondary_color),
            accent_color: app.accent_color.unwrap_or(defaults.accent_color),
            android_package_name: app.android_package_name.unwrap_or_default(),
            ios_bundle_id: app.ios_bundle_id.unwrap_or_default(),
            is_active: app.is_active,
            allow_registration: app.allow_registration,
            require_enrollment: app.require_enrollment,
        }
    }
}

impl Draft for ApplicationDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("appId", &self.app_id, "App ID");
        errors.require("name", &self.name, "Name");
        errors.into_result()
    }

    fn create_body(&self) -> Value {
        let mut body = self.update_body();
        body["appId"] = json!(self.app_id.trim());
        body
    }

    // The app id is fixed once created.
    fn update_body(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "description": non_blank(&self.description),
            "logoUrl": non_blank(&self.logo_url),
            "splashImageUrl": non_blank(&self.splash_image_url),
            "primaryColor": self.primary_color,
            "secondaryColor": self.secondary_color,
            "accentColor": self.accent_color,
            "androidPackageName": non_blank(&self.android_package_name),
            "iosBundleId": non_blank(&self.ios_bundle_id),
            "isActive": self.is_active,
            "allowRegistration": self.allow_registration,
            "requireEnrollment": self.require_enrollment,
        })
    }
}

pub fn assignments_editor(app_id: &str) -> NestedEditor<Application> {
    NestedEditor::new(format!("{}/{}", ApplicationsResource::PATH, app_id))
}

/// Assigned courses by `displayOrder`.
pub fn ordered_courses(app: &Application) -> Vec<ApplicationCourse> {
    let mut courses = app.courses.clone().unwrap_or_default();
    courses.sort_by_key(|c| c.display_order);
    courses
}

fn assignments_path(app_id: &str) -> String {
    format!("{}/{}/courses", ApplicationsResource::PATH, app_id)
}

/// Assign `course_id` after the existing courses; the first assignment becomes the default.
pub fn assign_course(app_id: &str, assigned: &[ApplicationCourse], course_id: &str) -> ApiRequest {
    ApiRequest::post(
        assignments_path(app_id),
        json!({
            "courseId": course_id,
            "displayOrder": next_display_order(assigned.iter().map(|c| c.display_order)),
            "isDefault": assigned.is_empty(),
        }),
    )
}

pub fn unassign_course(app_id: &str, course_id: &str) -> ApiRequest {
    ApiRequest::delete(format!("{}/{}", assignments_path(app_id), course_id))
}

pub fn make_default_course(app_id: &str, course_id: &str) -> ApiRequest {
    ApiRequest::put(
        format!("{}/{}", assignments_path(app_id), course_id),
        json!({ "isDefault": true }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::controller::nested;

    #[test]
    fn test_update_omits_app_id() {
        let draft = ApplicationDraft {
            app_id: "academy".into(),
            name: "Academy".into(),
            ..Default::default()
        };
        assert_eq!(draft.create_body()["appId"], "academy");
        assert!(draft.update_body().get("appId").is_none());
        assert_eq!(draft.create_body()["primaryColor"], "#6C5CE7");
    }

    #[test]
    fn test_first_assignment_is_default() {
        let first = assign_course("a1", &[], "c1");
        assert_eq!(first.target(), "/web/applications/a1/courses");
        assert_eq!(
            first.body,
            Some(json!({"courseId": "c1", "displayOrder": 0, "isDefault": true}))
        );

        let assigned = vec![ApplicationCourse {
            course_id: "c1".into(),
            display_order: 0,
            is_default: true,
            ..Default::default()
        }];
        let second = assign_course("a1", &assigned, "c2");
        assert_eq!(second.body.as_ref().unwrap()["displayOrder"], 1);
        assert_eq!(second.body.as_ref().unwrap()["isDefault"], false);
    }

    #[test]
    fn test_assigned_courses_follow_display_order() {
        let app: Application = serde_json::from_value(json!({
            "id": "a1",
            "courses": [
                {"courseId": "c3", "displayOrder": 2},
                {"courseId": "c1", "displayOrder": 0},
                {"courseId": "c2", "displayOrder": 1}
            ]
        }))
        .unwrap();
        let order: Vec<String> = ordered_courses(&app).into_iter().map(|c| c.course_id).collect();
        assert_eq!(order, vec!["c1", "c2", "c3"]);
    }

    #[tokio::test]
    async fn test_assignment_ops_refetch_application() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"id": "a1", "name": "Academy", "courses": [{"courseId": "c1", "isDefault": true}]}));
        backend.push_ok(Value::Null);
        backend.push_ok(json!({"id": "a1", "name": "Academy", "courses": [
            {"courseId": "c1", "isDefault": false},
            {"courseId": "c2", "isDefault": true}
        ]}));

        let mut editor = Some(assignments_editor("a1"));
        nested::load(&mut editor, &backend).await.unwrap();
        nested::apply(&mut editor, make_default_course("a1", "c2"), &backend)
            .await
            .unwrap();

        assert_eq!(
            backend.calls(),
            vec![
                "GET /web/applications/a1",
                "PUT /web/applications/a1/courses/c2",
                "GET /web/applications/a1",
            ]
        );
        let courses = ordered_courses(editor.as_ref().and_then(NestedEditor::parent).unwrap());
        assert!(courses[1].is_default, "default comes from the re-fetch");
        assert_eq!(unassign_course("a1", "c1").target(), "/web/applications/a1/courses/c1");
    }
}
