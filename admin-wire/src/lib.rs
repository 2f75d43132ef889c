//! Wire types for the education platform admin REST API.
//!
//! This crate defines every payload that crosses the boundary between the
//! admin dashboard and the platform backend:
//! - [`envelope`] - Response envelope and paginated list decoding
//! - [`user`] - Accounts, roles and login payloads
//! - [`course`] - Courses, categories, sections and lessons
//! - [`quiz`] - Quizzes, questions and options
//! - [`enrollment`] - User/course enrollments
//! - [`promo`] - Promo codes and usage records
//! - [`application`] - Tenant applications and course assignments
//! - [`notification`] - Broadcast batches and delivery stats
//! - [`settings`] - General limits and storage configuration
//! - [`report`] - Analytics reports
//!
//! All types use the backend's camelCase field names and tolerate missing
//! fields, so a sparse response never fails a whole page.

pub mod application;
pub mod course;
pub mod enrollment;
pub mod envelope;
pub mod notification;
pub mod promo;
pub mod quiz;
pub mod report;
pub mod settings;
pub mod user;

// Re-export commonly used types at crate root
pub use application::{Application, ApplicationCourse};
pub use course::{Category, Course, CourseLevel, CourseSection, Lesson, LessonContentType};
pub use enrollment::Enrollment;
pub use envelope::{ApiResponse, CreatedId, Page, TotalShape};
pub use notification::{BatchStatus, NotificationBatch, NotificationStats, RecipientType};
pub use promo::{DiscountType, PromoCode, PromoCodeDetail, PromoCodeUsage};
pub use quiz::{QuestionType, Quiz, QuizOption, QuizQuestion};
pub use settings::{
    AwsRegion, GeneralSettings, StorageConnectionTestResult, StorageProvider, StorageSettings,
};
pub use user::{LoginRequest, LoginResponse, Role, User};
