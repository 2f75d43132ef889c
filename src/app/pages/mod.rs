//! Routed page components. Each page owns its list, dialogs and confirm gate.

mod applications;
mod categories;
mod courses;
mod dashboard;
mod enrollments;
mod lessons;
mod login;
mod notifications;
mod promo_codes;
mod quizzes;
mod reports;
mod settings;
mod users;

pub use applications::Applications;
pub use categories::Categories;
pub use courses::Courses;
pub use dashboard::Dashboard;
pub use enrollments::Enrollments;
pub use lessons::Lessons;
pub use login::{Login, NotFound};
pub use notifications::Notifications;
pub use promo_codes::PromoCodes;
pub use quizzes::Quizzes;
pub use reports::Reports;
pub use settings::Settings;
pub use users::Users;
