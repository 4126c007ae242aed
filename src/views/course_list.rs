use std::sync::Arc;

use super::ListView;
use crate::client::ApiClient;
use crate::models::reference::display_name;
use crate::models::{Course, Lecturer, Semester};
use crate::repository::{Courses, Lecturers, Repository, Semesters};

/// Course CRUD plus the lecturer and semester options its selectors need.
pub struct CourseList {
    list: ListView<Courses>,
    lecturer_repo: Repository<Lecturers>,
    semester_repo: Repository<Semesters>,
    lecturers: Vec<Lecturer>,
    semesters: Vec<Semester>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    pub id: String,
    pub name: String,
    pub code: String,
    pub lecturer: String,
    pub semester: String,
}

impl CourseList {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            list: ListView::new(client.clone()),
            lecturer_repo: Repository::new(client.clone()),
            semester_repo: Repository::new(client),
            lecturers: Vec::new(),
            semesters: Vec::new(),
        }
    }

    /// Fetches courses, lecturers and semesters concurrently. Each fetch
    /// succeeds or fails on its own.
    pub async fn mount(&mut self) {
        let (courses, lecturers, semesters) = tokio::join!(
            self.list.repository().list(),
            self.lecturer_repo.list(),
            self.semester_repo.list(),
        );

        self.list.apply_load(courses);
        match lecturers {
            Ok(collection) => self.lecturers = collection.records,
            Err(e) => self.list.set_error(format!("Error fetching lecturers: {}", e)),
        }
        match semesters {
            Ok(collection) => self.semesters = collection.records,
            Err(e) => self.list.set_error(format!("Error fetching semesters: {}", e)),
        }
    }

    pub fn list(&self) -> &ListView<Courses> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView<Courses> {
        &mut self.list
    }

    pub fn lecturers(&self) -> &[Lecturer] {
        &self.lecturers
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn rows(&self) -> Vec<CourseRow> {
        self.list
            .items()
            .iter()
            .map(|course| self.row(course))
            .collect()
    }

    fn row(&self, course: &Course) -> CourseRow {
        CourseRow {
            id: course.id.clone(),
            name: course.name.clone(),
            code: course.code.clone(),
            lecturer: display_name(course.lecturer.as_ref(), &self.lecturers),
            semester: display_name(course.semester.as_ref(), &self.semesters),
        }
    }
}
