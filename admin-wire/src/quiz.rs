//! Quizzes with their nested questions and options.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuestionType {
    #[default]
    SingleChoice,
    MultipleChoice,
    FillInBlank,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::SingleChoice,
        QuestionType::MultipleChoice,
        QuestionType::FillInBlank,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "SingleChoice",
            QuestionType::MultipleChoice => "MultipleChoice",
            QuestionType::FillInBlank => "FillInBlank",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "Single choice",
            QuestionType::MultipleChoice => "Multiple choice",
            QuestionType::FillInBlank => "Fill in the blank",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    pub fn has_options(self) -> bool {
        !matches!(self, QuestionType::FillInBlank)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizOption {
    pub id: String,
    pub question_id: String,
    pub option_text: String,
    pub is_correct: bool,
    pub display_order: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizQuestion {
    pub id: String,
    pub quiz_id: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub points: u32,
    pub display_order: i32,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub options: Vec<QuizOption>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Quiz {
    pub id: String,
    pub course_id: String,
    pub course_name: String,
    pub title: String,
    pub description: Option<String>,
    pub passing_score: u32,
    pub time_limit: Option<u32>,
    pub max_attempts: u32,
    pub is_active: bool,
    pub is_published: bool,
    pub question_count: u32,
    pub attempt_count: u32,
    pub created_at: String,
    pub updated_at: String,
    pub questions: Option<Vec<QuizQuestion>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_detail_with_questions() {
        let quiz: Quiz = serde_json::from_value(serde_json::json!({
            "id": "q1",
            "title": "Ownership",
            "passingScore": 70,
            "questions": [{
                "id": "qq1",
                "questionText": "Who owns it?",
                "questionType": "MultipleChoice",
                "displayOrder": 2,
                "options": [
                    {"optionText": "the caller", "isCorrect": true, "displayOrder": 0}
                ]
            }]
        }))
        .unwrap();
        let questions = quiz.questions.unwrap();
        assert_eq!(questions[0].question_type, QuestionType::MultipleChoice);
        assert_eq!(questions[0].options.len(), 1);
        assert!(questions[0].question_type.has_options());
        assert!(!QuestionType::FillInBlank.has_options());
    }
}
