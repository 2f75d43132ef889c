//! Lessons: filtered list, bulk publish, and document upload after save.

use serde_json::{json, Value};

use admin_wire::{CourseSection, Lesson, TotalShape};

use crate::backend::{fetch_json, ApiRequest, Backend, ProgressSender, StagedFile};
use crate::controller::form::submit;
use crate::controller::{
    upload_after_save, Draft, FormDialog, ListFilter, PageParam, Saved, StagedUpload, StateCell,
    SubmitOutcome, ToggleAction, UploadOutcome,
};
use crate::error::{ApiError, ValidationErrors};

use super::{non_blank, Resource};

pub struct LessonsResource;

impl Resource for LessonsResource {
    type Item = Lesson;
    type Filter = LessonFilter;
    const PATH: &'static str = "/web/lessons";
    const PAGE_PARAM: PageParam = PageParam::Page;
    const TOTAL: TotalShape = TotalShape::PaginationTotalItems;
}

pub const LESSON_PUBLISH: ToggleAction = ToggleAction::post("/web/lessons", "publish", "unpublish");

pub const SECTIONS_PATH: &str = "/web/courses/sections";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LessonFilter {
    pub course_id: Option<String>,
    pub section_id: Option<String>,
    pub search: String,
}

impl LessonFilter {
    /// Select a course; the section filter no longer applies.
    pub fn set_course(&mut self, course_id: Option<String>) {
        self.course_id = course_id.filter(|id| !id.is_empty());
        self.section_id = None;
    }
}

impl ListFilter for LessonFilter {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("courseId", self.course_id.as_deref())
            .query_opt("sectionId", self.section_id.as_deref())
            .query_opt("search", non_blank(&self.search))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LessonDraft {
    /// Only narrows the section choices; not sent.
    pub course_id: String,
    pub section_id: String,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub duration_seconds: Option<u32>,
    pub document_url: String,
    pub document_name: String,
    pub document_type: String,
    pub document_size: Option<u64>,
    pub is_free: bool,
    pub display_order: i32,
    pub is_published: bool,
}

impl Default for LessonDraft {
    fn default() -> Self {
        Self {
            course_id: String::new(),
            section_id: String::new(),
            title: String::new(),
            description: String::new(),
            video_url: String::new(),
            duration_seconds: None,
            document_url: String::new(),
            document_name: String::new(),
            document_type: String::new(),
            document_size: None,
            is_free: false,
            display_order: 0,
            is_published: true,
        }
    }
}

impl LessonDraft {
    pub fn select_course(&mut self, course_id: String) {
        if course_id != self.course_id {
            self.course_id = course_id;
            self.section_id.clear();
        }
    }
}

impl From<&Lesson> for LessonDraft {
    fn from(lesson: &Lesson) -> Self {
        Self {
            course_id: lesson.course_id.clone(),
            section_id: lesson.section_id.clone(),
            title: lesson.title.clone(),
            description: lesson.description.clone().unwrap_or_default(),
            video_url: lesson.video_url.clone().unwrap_or_default(),
            duration_seconds: lesson.duration_seconds,
            document_url: lesson.document_url.clone().unwrap_or_default(),
            document_name: lesson.document_name.clone().unwrap_or_default(),
            document_type: lesson.document_type.clone().unwrap_or_default(),
            document_size: lesson.document_size,
            is_free: lesson.is_free,
            display_order: lesson.display_order,
            is_published: lesson.is_published,
        }
    }
}

impl Draft for LessonDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("title", &self.title, "Title");
        errors.require("sectionId", &self.section_id, "Section");
        errors.into_result()
    }

    fn create_body(&self) -> Value {
        json!({
            "sectionId": self.section_id,
            "title": self.title.trim(),
            "description": non_blank(&self.description),
            "videoUrl": non_blank(&self.video_url),
            "durationSeconds": self.duration_seconds,
            "documentUrl": non_blank(&self.document_url),
            "documentName": non_blank(&self.document_name),
            "documentType": non_blank(&self.document_type),
            "documentSize": self.document_size,
            "isFree": self.is_free,
            "displayOrder": self.display_order,
            "isPublished": self.is_published,
        })
    }
}

/// All sections of all courses.
pub async fn section_options(backend: &dyn Backend) -> Result<Vec<CourseSection>, ApiError> {
    fetch_json(backend, ApiRequest::get(SECTIONS_PATH)).await
}

/// Sections belonging to `course_id`, or every section when no course is chosen.
pub fn sections_for<'a>(sections: &'a [CourseSection], course_id: Option<&str>) -> Vec<&'a CourseSection> {
    sections
        .iter()
        .filter(|s| course_id.map_or(true, |id| s.course_id == id))
        .collect()
}

/// Publish or unpublish every selected lesson in one call. `None` with nothing selected.
pub fn bulk_publish_request(lesson_ids: &[String], publish: bool) -> Option<ApiRequest> {
    if lesson_ids.is_empty() {
        return None;
    }
    Some(ApiRequest::post(
        "/web/lessons/bulk-update",
        json!({ "lessonIds": lesson_ids, "isPublished": publish }),
    ))
}

pub fn upload_path(lesson_id: &str) -> String {
    format!("/web/courses/lessons/{}/upload-document", lesson_id)
}

/// Send the staged document for a lesson that was just saved.
pub async fn upload_for_saved(
    backend: &dyn Backend,
    saved: &Saved,
    file: Option<StagedFile>,
    progress: Option<ProgressSender>,
) -> UploadOutcome {
    match (saved.id(), file) {
        (_, None) => UploadOutcome::NotRequested,
        (Some(id), file) => upload_after_save(backend, &upload_path(&id), file, progress).await,
        (None, Some(_)) => UploadOutcome::Failed(ApiError::Decode(
            "the saved lesson id was missing from the response".to_string(),
        )),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LessonSave {
    Invalid(ValidationErrors),
    Skipped,
    Saved { saved: Saved, document: UploadOutcome },
}

/// Save the lesson, then upload its staged document against the saved id.
pub async fn save_lesson<DC, SC>(
    dialog: DC,
    mut staged: SC,
    backend: &dyn Backend,
    progress: Option<ProgressSender>,
) -> Result<LessonSave, ApiError>
where
    DC: StateCell<FormDialog<LessonDraft>>,
    SC: StateCell<StagedUpload>,
{
    let saved = match submit(dialog, backend).await? {
        SubmitOutcome::Saved(saved) => saved,
        SubmitOutcome::Invalid(errors) => return Ok(LessonSave::Invalid(errors)),
        SubmitOutcome::Skipped => return Ok(LessonSave::Skipped),
    };
    let file = staged.modify(StagedUpload::take);
    let document = upload_for_saved(backend, &saved, file, progress).await;
    staged.modify(StagedUpload::finish);
    Ok(LessonSave::Saved { saved, document })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::controller::ListController;

    fn valid_draft() -> LessonDraft {
        LessonDraft {
            course_id: "c1".into(),
            section_id: "s1".into(),
            title: "Borrowing".into(),
            ..Default::default()
        }
    }

    fn pdf() -> StagedFile {
        StagedFile::new("notes.pdf", None, b"%PDF-1.7".to_vec())
    }

    #[test]
    fn test_filter_query_order() {
        let mut list = ListController::<LessonsResource>::new(25);
        list.update_filter(|f| {
            f.set_course(Some("c1".into()));
            f.section_id = Some("s2".into());
            f.search = "loop".into();
        });
        assert_eq!(
            list.request().target(),
            "/web/lessons?page=1&pageSize=25&courseId=c1&sectionId=s2&search=loop"
        );
    }

    #[test]
    fn test_course_change_clears_section() {
        let mut filter = LessonFilter {
            course_id: Some("c1".into()),
            section_id: Some("s1".into()),
            search: String::new(),
        };
        filter.set_course(Some("c2".into()));
        assert_eq!(filter.section_id, None);
        filter.set_course(Some(String::new()));
        assert_eq!(filter.course_id, None);
    }

    #[test]
    fn test_draft_course_change_clears_section() {
        let mut draft = valid_draft();
        draft.select_course("c1".into());
        assert_eq!(draft.section_id, "s1", "same course keeps the section");
        draft.select_course("c2".into());
        assert!(draft.section_id.is_empty());
    }

    #[test]
    fn test_body_omits_course_and_blank_text() {
        let body = valid_draft().create_body();
        assert!(body.get("courseId").is_none());
        assert_eq!(body["sectionId"], "s1");
        assert!(body["videoUrl"].is_null());
        assert_eq!(body["isPublished"], true);
    }

    #[test]
    fn test_sections_for_course() {
        let sections = vec![
            CourseSection {
                id: "s1".into(),
                course_id: "c1".into(),
                ..Default::default()
            },
            CourseSection {
                id: "s2".into(),
                course_id: "c2".into(),
                ..Default::default()
            },
        ];
        let picked: Vec<&str> = sections_for(&sections, Some("c2")).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(picked, vec!["s2"]);
        assert_eq!(sections_for(&sections, None).len(), 2);
    }

    #[test]
    fn test_bulk_request() {
        assert!(bulk_publish_request(&[], true).is_none());
        let request = bulk_publish_request(&["l1".into(), "l2".into()], false).unwrap();
        assert_eq!(request.target(), "/web/lessons/bulk-update");
        assert_eq!(
            request.body,
            Some(json!({"lessonIds": ["l1", "l2"], "isPublished": false}))
        );
    }

    #[tokio::test]
    async fn test_create_then_upload_to_new_id() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"id": "l42"}));
        backend.push_ok(json!({"documentUrl": "https://cdn.test/notes.pdf"}));

        let mut dialog = FormDialog::new(LessonsResource::PATH);
        dialog.open_create_with(valid_draft());
        let mut staged = StagedUpload::default();
        staged.stage(pdf());

        let result = save_lesson(&mut dialog, &mut staged, &backend, None).await.unwrap();

        let LessonSave::Saved { saved, document } = result else {
            panic!("expected a saved lesson");
        };
        assert_eq!(saved.id().as_deref(), Some("l42"));
        assert!(matches!(document, UploadOutcome::Uploaded(_)));
        assert_eq!(
            backend.calls(),
            vec!["POST /web/lessons", "POST /web/courses/lessons/l42/upload-document"]
        );
        assert!(staged.staged().is_none());
        assert!(staged.progress().is_none());
    }

    #[tokio::test]
    async fn test_upload_failure_does_not_undo_save() {
        let backend = MockBackend::new();
        backend.push_ok(Value::Null);
        backend.push_err(ApiError::Backend {
            status: 500,
            message: "Storage unavailable".into(),
        });

        let mut dialog = FormDialog::new(LessonsResource::PATH);
        dialog.open_edit("l7", valid_draft());
        let mut staged = StagedUpload::default();
        staged.stage(pdf());

        let result = save_lesson(&mut dialog, &mut staged, &backend, None).await.unwrap();

        let LessonSave::Saved { document, .. } = result else {
            panic!("expected a saved lesson");
        };
        assert_eq!(
            document.warning("Lesson").as_deref(),
            Some("Lesson saved but the document upload failed: Storage unavailable")
        );
        assert!(!dialog.is_open(), "the lesson itself was saved");
        assert_eq!(
            backend.calls(),
            vec!["PUT /web/lessons/l7", "POST /web/courses/lessons/l7/upload-document"]
        );
    }

    #[tokio::test]
    async fn test_invalid_lesson_uploads_nothing() {
        let backend = MockBackend::new();
        let mut dialog = FormDialog::<LessonDraft>::new(LessonsResource::PATH);
        dialog.open_create();
        let mut staged = StagedUpload::default();
        staged.stage(pdf());

        let result = save_lesson(&mut dialog, &mut staged, &backend, None).await.unwrap();

        assert!(matches!(result, LessonSave::Invalid(_)));
        assert!(backend.calls().is_empty());
        assert!(staged.staged().is_some(), "file stays staged for the next attempt");
    }
}
