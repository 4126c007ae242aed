use serde::{Deserialize, Serialize};

use super::{Form, Named, null_as_default};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecturer {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub department: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LecturerForm {
    pub name: String,
    pub email: String,
    pub department: String,
}

impl From<&Lecturer> for LecturerForm {
    fn from(lecturer: &Lecturer) -> Self {
        Self {
            name: lecturer.name.clone(),
            email: lecturer.email.clone(),
            department: lecturer.department.clone(),
        }
    }
}

impl Form for LecturerForm {
    fn missing_required(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("department", &self.department),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

impl Named for Lecturer {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
