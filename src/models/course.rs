use serde::{Deserialize, Serialize};

use super::reference::{self, Reference};
use super::{Form, Named, null_as_default};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default)]
    pub lecturer: Option<Reference>,
    #[serde(default)]
    pub semester: Option<Reference>,
}

/// Course as written back to the backend: references are bare identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseForm {
    pub name: String,
    pub code: String,
    pub lecturer: String,
    pub semester: String,
}

impl From<&Course> for CourseForm {
    fn from(course: &Course) -> Self {
        Self {
            name: course.name.clone(),
            code: course.code.clone(),
            lecturer: reference::flatten(course.lecturer.as_ref()),
            semester: reference::flatten(course.semester.as_ref()),
        }
    }
}

impl Form for CourseForm {
    fn missing_required(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("code", &self.code),
            ("lecturer", &self.lecturer),
            ("semester", &self.semester),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

impl Named for Course {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
