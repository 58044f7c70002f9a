//! UI layer for the admin console: app shell, editor forms and the project list.

pub mod app;
pub mod forms;
pub mod project_list;

pub use app::AdminConsoleApp;
