use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::client::ApiClient;
use crate::client::dto::Collection;
use crate::error::AppError;
use crate::models::{
    Course, CourseForm, Form, Lecturer, LecturerForm, ProgressUpdate, ProgressUpdateForm, Semester,
};

/// A REST collection exposed by the backend.
pub trait Resource: Send + Sync + 'static {
    const PATH: &'static str;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    type Record: DeserializeOwned + Clone + Send + Sync;

    fn record_id(record: &Self::Record) -> &str;
}

/// A collection the admin surface can create, update and delete in.
pub trait Editable: Resource {
    type Form: Form + Serialize + Default + Clone + Send + Sync;

    /// Copies a record read from the backend into the shape it is written back in.
    fn edit_form(record: &Self::Record) -> Self::Form;
}

pub struct Repository<R> {
    client: Arc<dyn ApiClient>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Repository<R> {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", R::PATH, id)
    }

    pub async fn list(&self) -> Result<Collection<R::Record>, AppError> {
        let body = self.client.get(R::PATH).await?;
        Ok(Collection::from_body(body)?)
    }

    pub async fn get(&self, id: &str) -> Result<R::Record, AppError> {
        let body = self.client.get(&Self::item_path(id)).await?;
        if body.is_null() {
            return Err(AppError::NotFound(format!("{} {}", R::SINGULAR, id)));
        }
        Ok(serde_json::from_value(body)?)
    }
}

impl<R: Editable> Repository<R> {
    pub async fn create(&self, form: &R::Form) -> Result<Value, AppError> {
        let body = serde_json::to_value(form)?;
        let created = self.client.post(R::PATH, &body).await?;
        info!("created {}", R::SINGULAR);
        Ok(created)
    }

    /// Sends the whole form, not just the changed fields.
    pub async fn update(&self, id: &str, form: &R::Form) -> Result<Value, AppError> {
        let body = serde_json::to_value(form)?;
        let updated = self.client.patch(&Self::item_path(id), &body).await?;
        info!("updated {} {}", R::SINGULAR, id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.client.delete(&Self::item_path(id)).await?;
        info!("deleted {} {}", R::SINGULAR, id);
        Ok(())
    }
}

pub struct Lecturers;
pub struct Courses;
pub struct Semesters;
pub struct ProgressUpdates;

impl Resource for Lecturers {
    const PATH: &'static str = "lecturers";
    const SINGULAR: &'static str = "lecturer";
    const PLURAL: &'static str = "lecturers";
    type Record = Lecturer;

    fn record_id(record: &Lecturer) -> &str {
        &record.id
    }
}

impl Editable for Lecturers {
    type Form = LecturerForm;

    fn edit_form(record: &Lecturer) -> LecturerForm {
        LecturerForm::from(record)
    }
}

impl Resource for Courses {
    const PATH: &'static str = "courses";
    const SINGULAR: &'static str = "course";
    const PLURAL: &'static str = "courses";
    type Record = Course;

    fn record_id(record: &Course) -> &str {
        &record.id
    }
}

impl Editable for Courses {
    type Form = CourseForm;

    fn edit_form(record: &Course) -> CourseForm {
        CourseForm::from(record)
    }
}

impl Resource for Semesters {
    const PATH: &'static str = "semesters";
    const SINGULAR: &'static str = "semester";
    const PLURAL: &'static str = "semesters";
    type Record = Semester;

    fn record_id(record: &Semester) -> &str {
        &record.id
    }
}

impl Resource for ProgressUpdates {
    const PATH: &'static str = "progress-updates";
    const SINGULAR: &'static str = "progress update";
    const PLURAL: &'static str = "progress updates";
    type Record = ProgressUpdate;

    fn record_id(record: &ProgressUpdate) -> &str {
        &record.id
    }
}

impl Editable for ProgressUpdates {
    type Form = ProgressUpdateForm;

    fn edit_form(record: &ProgressUpdate) -> ProgressUpdateForm {
        ProgressUpdateForm::from(record)
    }
}
