//! Shared UI components for the admin web UI.

pub mod fields;
pub mod layout;
pub mod modal;
pub mod nav;
pub mod table;
pub mod theme;
pub mod toasts;

pub use fields::{BoolFilter, CheckboxField, NumberField, SelectField, TextArea, TextField};
pub use layout::AdminShell;
pub use modal::{ConfirmDialog, FormModal};
pub use table::{Paginator, StatusBadge, TableCard, TableNotice};
pub use toasts::Toasts;
