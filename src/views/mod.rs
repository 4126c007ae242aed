pub mod course_list;
pub mod dashboard;
pub mod lecturer_list;
pub mod list_view;
pub mod progress_updates;

pub use course_list::{CourseList, CourseRow};
pub use dashboard::{Dashboard, DashboardData, DashboardState, RecentUpdate};
pub use lecturer_list::LecturerList;
pub use list_view::ListView;
pub use progress_updates::{ProgressRow, ProgressUpdatesView};

/// What a list view's form area is doing.
///
/// A single variant holds the form, so at most one draft or edit slot exists.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewMode<F> {
    Browsing,
    Creating(F),
    Editing { id: String, form: F },
}

impl<F> ViewMode<F> {
    pub fn is_browsing(&self) -> bool {
        matches!(self, ViewMode::Browsing)
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            ViewMode::Editing { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// The single message slot of a view. A new notice replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Error(message) | Notice::Success(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}
