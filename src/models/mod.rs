pub mod course;
pub mod lecturer;
pub mod progress_update;
pub mod reference;
pub mod semester;

pub use course::{Course, CourseForm};
pub use lecturer::{Lecturer, LecturerForm};
pub use progress_update::{FieldValue, InputKind, ProgressField, ProgressUpdate, ProgressUpdateForm};
pub use reference::{Named, RecordSummary, Reference};
pub use semester::Semester;

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Draft or edit-slot state submitted to the backend.
pub trait Form {
    /// First required field left blank, if any.
    fn missing_required(&self) -> Option<&'static str>;
}
