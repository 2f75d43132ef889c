//! Quizzes and their question/option sub-tree.

use serde_json::{json, Value};

use admin_wire::{QuestionType, Quiz, QuizQuestion, TotalShape};

use crate::backend::Backend;
use crate::controller::{
    form, nested, next_display_order, Draft, FormDialog, NestedEditor, PageParam, StateCell,
    SubmitOutcome, ToggleAction,
};
use crate::error::{ApiError, ValidationErrors};

use super::{non_blank, Resource};

pub struct QuizzesResource;

impl Resource for QuizzesResource {
    type Item = Quiz;
    type Filter = ();
    const PATH: &'static str = "/web/quizzes";
    const PAGE_PARAM: PageParam = PageParam::PageNumber;
    const TOTAL: TotalShape = TotalShape::PaginationTotalItems;
}

pub const QUIZ_PUBLISH: ToggleAction = ToggleAction::put("/web/quizzes", "publish", "unpublish");

pub const QUESTIONS_PATH: &str = "/web/quizzes/questions";

/// Options a new choice question starts with.
const NEW_QUESTION_OPTIONS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    pub course_id: String,
    pub passing_score: u32,
    pub time_limit: Option<u32>,
    pub max_attempts: u32,
    pub is_active: bool,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            course_id: String::new(),
            passing_score: 70,
            time_limit: None,
            max_attempts: 3,
            is_active: true,
        }
    }
}

impl From<&Quiz> for QuizDraft {
    fn from(quiz: &Quiz) -> Self {
        Self {
            title: quiz.title.clone(),
            description: quiz.description.clone().unwrap_or_default(),
            course_id: quiz.course_id.clone(),
            passing_score: quiz.passing_score,
            time_limit: quiz.time_limit,
            max_attempts: quiz.max_attempts,
            is_active: quiz.is_active,
        }
    }
}

impl Draft for QuizDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("title", &self.title, "Title");
        errors.require("courseId", &self.course_id, "Course");
        errors.into_result()
    }

    fn create_body(&self) -> Value {
        let mut body = self.update_body();
        body["courseId"] = json!(self.course_id);
        body
    }

    // A quiz cannot move to another course.
    fn update_body(&self) -> Value {
        json!({
            "title": self.title.trim(),
            "description": self.description,
            "passingScore": self.passing_score,
            "timeLimit": self.time_limit,
            "maxAttempts": self.max_attempts,
            "isActive": self.is_active,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionDraft {
    pub option_text: String,
    pub is_correct: bool,
    pub display_order: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionDraft {
    pub quiz_id: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub points: u32,
    pub display_order: i32,
    pub correct_answer: String,
    pub explanation: String,
    pub image_url: String,
    pub options: Vec<OptionDraft>,
}

impl QuestionDraft {
    /// A blank question for `quiz`, ordered after its existing questions.
    pub fn new_for(quiz: &Quiz) -> Self {
        let order = next_display_order(
            quiz.questions
                .iter()
                .flatten()
                .map(|q| q.display_order),
        );
        Self {
            quiz_id: quiz.id.clone(),
            points: 1,
            display_order: order,
            options: (0..NEW_QUESTION_OPTIONS as i32)
                .map(|i| OptionDraft {
                    display_order: i,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn add_option(&mut self) {
        let order = next_display_order(self.options.iter().map(|o| o.display_order));
        self.options.push(OptionDraft {
            display_order: order,
            ..Default::default()
        });
    }

    pub fn remove_option(&mut self, index: usize) {
        if index < self.options.len() {
            self.options.remove(index);
        }
    }

    /// Mark option `index`. Single-choice questions keep exactly one correct option.
    pub fn set_correct(&mut self, index: usize, correct: bool) {
        if self.question_type == QuestionType::SingleChoice && correct {
            for option in &mut self.options {
                option.is_correct = false;
            }
        }
        if let Some(option) = self.options.get_mut(index) {
            option.is_correct = correct;
        }
    }

    fn filled_options(&self) -> impl Iterator<Item = &OptionDraft> {
        self.options
            .iter()
            .filter(|o| !o.option_text.trim().is_empty())
    }
}

impl From<&QuizQuestion> for QuestionDraft {
    fn from(question: &QuizQuestion) -> Self {
        Self {
            quiz_id: question.quiz_id.clone(),
            question_text: question.question_text.clone(),
            question_type: question.question_type,
            points: question.points,
            display_order: question.display_order,
            correct_answer: question.correct_answer.clone().unwrap_or_default(),
            explanation: question.explanation.clone().unwrap_or_default(),
            image_url: question.image_url.clone().unwrap_or_default(),
            options: question
                .options
                .iter()
                .map(|o| OptionDraft {
                    option_text: o.option_text.clone(),
                    is_correct: o.is_correct,
                    display_order: o.display_order,
                })
                .collect(),
        }
    }
}

impl Draft for QuestionDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("questionText", &self.question_text, "Question text");

        if self.question_type.has_options() {
            let filled: Vec<&OptionDraft> = self.filled_options().collect();
            if filled.len() < 2 {
                errors.add("options", "At least two options are required");
            } else if !filled.iter().any(|o| o.is_correct) {
                errors.add("options", "Mark at least one option as correct");
            }
        } else {
            errors.require("correctAnswer", &self.correct_answer, "Correct answer");
        }
        errors.into_result()
    }

    fn create_body(&self) -> Value {
        let options: Vec<Value> = if self.question_type.has_options() {
            self.filled_options()
                .map(|o| {
                    json!({
                        "optionText": o.option_text.trim(),
                        "isCorrect": o.is_correct,
                        "displayOrder": o.display_order,
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        json!({
            "quizId": self.quiz_id,
            "questionText": self.question_text.trim(),
            "questionType": self.question_type.as_str(),
            "points": self.points,
            "displayOrder": self.display_order,
            "correctAnswer": non_blank(&self.correct_answer),
            "explanation": non_blank(&self.explanation),
            "imageUrl": non_blank(&self.image_url),
            "options": options,
        })
    }
}

pub fn question_dialog() -> FormDialog<QuestionDraft> {
    FormDialog::new(QUESTIONS_PATH)
}

pub fn questions_editor(quiz_id: &str) -> NestedEditor<Quiz> {
    NestedEditor::new(format!("{}/{}", QuizzesResource::PATH, quiz_id))
}

/// The quiz's questions by `displayOrder`, each with its options in order too.
pub fn ordered_questions(quiz: &Quiz) -> Vec<QuizQuestion> {
    let mut questions = quiz.questions.clone().unwrap_or_default();
    questions.sort_by_key(|q| q.display_order);
    for question in &mut questions {
        question.options.sort_by_key(|o| o.display_order);
    }
    questions
}

/// Save the open question, then re-fetch the quiz.
pub async fn save_question<DC, EC>(
    dialog: DC,
    editor: EC,
    backend: &dyn Backend,
) -> Result<SubmitOutcome, ApiError>
where
    DC: StateCell<FormDialog<QuestionDraft>>,
    EC: StateCell<Option<NestedEditor<Quiz>>>,
{
    let outcome = form::submit(dialog, backend).await?;
    if let SubmitOutcome::Saved(_) = &outcome {
        nested::load(editor, backend).await?;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;

    fn quiz_with_orders(orders: &[i32]) -> Quiz {
        Quiz {
            id: "q1".into(),
            questions: Some(
                orders
                    .iter()
                    .map(|o| QuizQuestion {
                        display_order: *o,
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_quiz_update_omits_course() {
        let draft = QuizDraft {
            title: "Ownership".into(),
            course_id: "c1".into(),
            ..Default::default()
        };
        assert_eq!(draft.create_body()["courseId"], "c1");
        assert!(draft.update_body().get("courseId").is_none());
        assert_eq!(draft.create_body()["passingScore"], 70);
    }

    #[test]
    fn test_new_question_seeds_four_options_and_next_order() {
        let draft = QuestionDraft::new_for(&quiz_with_orders(&[0, 3]));
        assert_eq!(draft.options.len(), 4);
        assert_eq!(draft.display_order, 4);
        assert_eq!(draft.quiz_id, "q1");
        assert_eq!(QuestionDraft::new_for(&quiz_with_orders(&[])).display_order, 0);
    }

    #[test]
    fn test_choice_rules() {
        let mut draft = QuestionDraft::new_for(&quiz_with_orders(&[]));
        draft.question_text = "Which moves?".into();
        draft.options[0].option_text = "String".into();
        let errors = draft.validate().unwrap_err();
        assert!(errors.to_string().contains("two options"));

        draft.options[1].option_text = "i32".into();
        assert!(draft.validate().unwrap_err().to_string().contains("correct"));

        draft.set_correct(0, true);
        assert!(draft.validate().is_ok());

        let body = draft.create_body();
        assert_eq!(body["options"].as_array().map(Vec::len), Some(2), "empty options dropped");
    }

    #[test]
    fn test_single_choice_keeps_one_correct() {
        let mut draft = QuestionDraft::new_for(&quiz_with_orders(&[]));
        draft.set_correct(0, true);
        draft.set_correct(2, true);
        let correct: Vec<bool> = draft.options.iter().map(|o| o.is_correct).collect();
        assert_eq!(correct, vec![false, false, true, false]);

        draft.question_type = QuestionType::MultipleChoice;
        draft.set_correct(1, true);
        assert_eq!(draft.options.iter().filter(|o| o.is_correct).count(), 2);
    }

    #[test]
    fn test_fill_in_blank_needs_answer_and_sends_no_options() {
        let mut draft = QuestionDraft::new_for(&quiz_with_orders(&[]));
        draft.question_type = QuestionType::FillInBlank;
        draft.question_text = "The ___ checker".into();
        draft.options[0].option_text = "ignored".into();
        assert!(draft.validate().unwrap_err().contains("correctAnswer"));

        draft.correct_answer = "borrow".into();
        assert!(draft.validate().is_ok());
        assert_eq!(draft.create_body()["options"], json!([]));
    }

    #[test]
    fn test_questions_and_options_follow_display_order() {
        let quiz: Quiz = serde_json::from_value(json!({
            "id": "q1",
            "questions": [
                {"id": "third", "displayOrder": 2},
                {"id": "first", "displayOrder": 0, "options": [
                    {"optionText": "B", "displayOrder": 1},
                    {"optionText": "A", "displayOrder": 0}
                ]},
                {"id": "second", "displayOrder": 1}
            ]
        }))
        .unwrap();

        let questions = ordered_questions(&quiz);
        let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
        let options: Vec<&str> = questions[0].options.iter().map(|o| o.option_text.as_str()).collect();
        assert_eq!(options, vec!["A", "B"]);
        assert!(ordered_questions(&Quiz::default()).is_empty());
    }

    #[test]
    fn test_add_and_remove_options() {
        let mut draft = QuestionDraft::new_for(&quiz_with_orders(&[]));
        draft.add_option();
        assert_eq!(draft.options.last().map(|o| o.display_order), Some(4));
        draft.remove_option(0);
        draft.remove_option(99);
        assert_eq!(draft.options.len(), 4);
    }

    #[tokio::test]
    async fn test_save_question_refetches_quiz() {
        let backend = MockBackend::new();
        backend.push_ok(json!({"id": "q1", "title": "Ownership", "questions": []}));
        backend.push_ok(json!({"id": "qq1"}));
        backend.push_ok(json!({"id": "q1", "questions": [{"id": "qq1", "questionText": "Who owns it?"}]}));

        let mut editor = Some(questions_editor("q1"));
        nested::load(&mut editor, &backend).await.unwrap();

        let mut dialog = question_dialog();
        let mut draft = QuestionDraft::new_for(editor.as_ref().unwrap().parent().unwrap());
        draft.question_text = "Who owns it?".into();
        draft.options[0].option_text = "The caller".into();
        draft.options[1].option_text = "The callee".into();
        draft.set_correct(1, true);
        dialog.open_create_with(draft);

        let outcome = save_question(&mut dialog, &mut editor, &backend).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Saved(_)));
        assert_eq!(
            backend.calls(),
            vec!["GET /web/quizzes/q1", "POST /web/quizzes/questions", "GET /web/quizzes/q1"]
        );
        assert!(!dialog.is_open());
        let quiz = editor.as_ref().and_then(NestedEditor::parent).unwrap();
        assert_eq!(quiz.questions.as_ref().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_invalid_question_sends_nothing() {
        let backend = MockBackend::new();
        let mut editor = Some(questions_editor("q1"));
        let mut dialog = question_dialog();
        dialog.open_create_with(QuestionDraft::new_for(&quiz_with_orders(&[])));

        let outcome = save_question(&mut dialog, &mut editor, &backend).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert!(backend.calls().is_empty());
        assert!(dialog.is_invalid("questionText"));
    }
}
