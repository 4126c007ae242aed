use std::sync::Arc;

use super::{ListView, Notice, ViewMode};
use crate::client::ApiClient;
use crate::dates;
use crate::error::AppError;
use crate::models::reference::display_name;
use crate::models::{
    Course, FieldValue, Lecturer, ProgressField, ProgressUpdate, ProgressUpdateForm,
};
use crate::repository::{Courses, Lecturers, ProgressUpdates, Repository};

/// Progress-update CRUD: relational selectors, date controls and a checkbox.
///
/// Unlike the other lists, every mutation clears the previous notice and
/// reports success as well as failure.
pub struct ProgressUpdatesView {
    list: ListView<ProgressUpdates>,
    course_repo: Repository<Courses>,
    lecturer_repo: Repository<Lecturers>,
    courses: Vec<Course>,
    lecturers: Vec<Lecturer>,
}

/// One table row, with references resolved and dates formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRow {
    pub id: String,
    pub course: String,
    pub lecturer: String,
    pub grading_status: String,
    pub grading_completion_date: String,
    pub marksheet_status: String,
    pub marksheet_completion_date: String,
    pub marksheet_submitted: String,
    pub marksheet_submission_date: String,
}

impl ProgressUpdatesView {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            list: ListView::new(client.clone()),
            course_repo: Repository::new(client.clone()),
            lecturer_repo: Repository::new(client),
            courses: Vec::new(),
            lecturers: Vec::new(),
        }
    }

    pub async fn mount(&mut self) {
        let (updates, courses, lecturers) = tokio::join!(
            self.list.repository().list(),
            self.course_repo.list(),
            self.lecturer_repo.list(),
        );

        self.list.apply_load(updates);
        match courses {
            Ok(collection) => self.courses = collection.records,
            Err(e) => self.list.set_error(format!("Error fetching courses: {}", e)),
        }
        match lecturers {
            Ok(collection) => self.lecturers = collection.records,
            Err(e) => self.list.set_error(format!("Error fetching lecturers: {}", e)),
        }
    }

    pub async fn load(&mut self) -> bool {
        self.list.load().await
    }

    pub fn updates(&self) -> &[ProgressUpdate] {
        self.list.items()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn lecturers(&self) -> &[Lecturer] {
        &self.lecturers
    }

    pub fn mode(&self) -> &ViewMode<ProgressUpdateForm> {
        self.list.mode()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.list.notice()
    }

    pub fn error(&self) -> Option<&str> {
        self.list.error()
    }

    pub fn success(&self) -> Option<&str> {
        match self.list.notice() {
            Some(Notice::Success(message)) => Some(message),
            _ => None,
        }
    }

    pub fn begin_create(&mut self) {
        self.list.begin_create();
    }

    pub fn draft(&self) -> Option<&ProgressUpdateForm> {
        self.list.draft()
    }

    /// Change handler for the add form.
    pub fn change_draft(&mut self, field: ProgressField, value: FieldValue) -> bool {
        let result = match self.list.draft_mut() {
            Some(draft) => draft.apply(field, value),
            None => return false,
        };
        self.report_change(result)
    }

    pub async fn submit_create(&mut self) -> bool {
        self.list.clear_notice();
        let created = self.list.submit_create().await;
        self.report_saved(created, "Update added successfully!");
        created
    }

    pub fn cancel_create(&mut self) {
        self.list.cancel_create();
    }

    /// Fetches the record by id and opens it in the edit slot.
    pub async fn begin_edit(&mut self, id: &str) -> bool {
        self.list.begin_edit_by_id(id).await
    }

    pub fn edit_form(&self) -> Option<&ProgressUpdateForm> {
        self.list.edit_form()
    }

    /// Change handler for the edit form.
    pub fn change_edit(&mut self, field: ProgressField, value: FieldValue) -> bool {
        let result = match self.list.edit_form_mut() {
            Some(form) => form.apply(field, value),
            None => return false,
        };
        self.report_change(result)
    }

    pub fn cancel_edit(&mut self) {
        self.list.cancel_edit();
    }

    pub async fn submit_update(&mut self) -> bool {
        self.list.clear_notice();
        let updated = self.list.submit_update().await;
        self.report_saved(updated, "Update modified successfully!");
        updated
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        self.list.clear_notice();
        let deleted = self.list.delete(id).await;
        if deleted {
            self.list.set_success("Update deleted successfully!");
        }
        deleted
    }

    pub fn rows(&self) -> Vec<ProgressRow> {
        self.list
            .items()
            .iter()
            .map(|update| self.row(update))
            .collect()
    }

    fn row(&self, update: &ProgressUpdate) -> ProgressRow {
        ProgressRow {
            id: update.id.clone(),
            course: display_name(update.course.as_ref(), &self.courses),
            lecturer: display_name(update.lecturer.as_ref(), &self.lecturers),
            grading_status: update.grading_status.clone(),
            grading_completion_date: dates::display(update.grading_completion_date.as_deref()),
            marksheet_status: update.marksheet_status.clone(),
            marksheet_completion_date: dates::display(update.marksheet_completion_date.as_deref()),
            marksheet_submitted: if update.marksheet_submitted { "Yes" } else { "No" }.to_string(),
            marksheet_submission_date: dates::display(update.marksheet_submission_date.as_deref()),
        }
    }

    /// A save that went through but whose reload failed keeps the reload error.
    fn report_saved(&mut self, saved: bool, message: &str) {
        if saved && self.list.error().is_none() {
            self.list.set_success(message);
        }
    }

    fn report_change(&mut self, result: Result<(), AppError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                self.list.set_error(e.to_string());
                false
            }
        }
    }
}
