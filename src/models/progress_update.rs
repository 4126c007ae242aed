use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Form, null_as_default};
use super::reference::{self, Reference};
use crate::dates;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub course: Option<Reference>,
    #[serde(default)]
    pub lecturer: Option<Reference>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grading_status: String,
    #[serde(default)]
    pub grading_completion_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub marksheet_status: String,
    #[serde(default)]
    pub marksheet_completion_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub marksheet_submitted: bool,
    #[serde(default)]
    pub marksheet_submission_date: Option<String>,
    /// Server-maintained timestamp of the last change.
    #[serde(default)]
    pub date: Option<String>,
}

/// Form state for adding or editing a progress update.
///
/// Date fields hold what a date control holds: `YYYY-MM-DD` or empty. Empty
/// dates are written as `null`. A stored date that cannot be read is carried
/// through verbatim until the user changes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdateForm {
    pub course: String,
    pub lecturer: String,
    pub grading_status: String,
    #[serde(serialize_with = "dates::serialize_input")]
    pub grading_completion_date: String,
    pub marksheet_status: String,
    #[serde(serialize_with = "dates::serialize_input")]
    pub marksheet_completion_date: String,
    pub marksheet_submitted: bool,
    #[serde(serialize_with = "dates::serialize_input")]
    pub marksheet_submission_date: String,
}

impl From<&ProgressUpdate> for ProgressUpdateForm {
    fn from(update: &ProgressUpdate) -> Self {
        Self {
            course: reference::flatten(update.course.as_ref()),
            lecturer: reference::flatten(update.lecturer.as_ref()),
            grading_status: update.grading_status.clone(),
            grading_completion_date: input_date(
                ProgressField::GradingCompletionDate,
                update.grading_completion_date.as_deref(),
            ),
            marksheet_status: update.marksheet_status.clone(),
            marksheet_completion_date: input_date(
                ProgressField::MarksheetCompletionDate,
                update.marksheet_completion_date.as_deref(),
            ),
            marksheet_submitted: update.marksheet_submitted,
            marksheet_submission_date: input_date(
                ProgressField::MarksheetSubmissionDate,
                update.marksheet_submission_date.as_deref(),
            ),
        }
    }
}

/// Control value for a stored date. A value that does not parse is kept as
/// stored so an untouched save writes it back unchanged.
fn input_date(field: ProgressField, raw: Option<&str>) -> String {
    let value = dates::to_input_value(raw);
    match raw {
        Some(raw) if value.is_empty() && !raw.trim().is_empty() => {
            warn!("unreadable {} {:?}, keeping stored value", field, raw);
            raw.to_string()
        }
        _ => value,
    }
}

impl Form for ProgressUpdateForm {
    fn missing_required(&self) -> Option<&'static str> {
        [
            (ProgressField::Course, &self.course),
            (ProgressField::Lecturer, &self.lecturer),
            (ProgressField::GradingStatus, &self.grading_status),
            (ProgressField::MarksheetStatus, &self.marksheet_status),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Select,
    Text,
    Date,
    Checkbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressField {
    Course,
    Lecturer,
    GradingStatus,
    GradingCompletionDate,
    MarksheetStatus,
    MarksheetCompletionDate,
    MarksheetSubmitted,
    MarksheetSubmissionDate,
}

impl ProgressField {
    pub const ALL: [ProgressField; 8] = [
        ProgressField::Course,
        ProgressField::Lecturer,
        ProgressField::GradingStatus,
        ProgressField::GradingCompletionDate,
        ProgressField::MarksheetStatus,
        ProgressField::MarksheetCompletionDate,
        ProgressField::MarksheetSubmitted,
        ProgressField::MarksheetSubmissionDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProgressField::Course => "course",
            ProgressField::Lecturer => "lecturer",
            ProgressField::GradingStatus => "gradingStatus",
            ProgressField::GradingCompletionDate => "gradingCompletionDate",
            ProgressField::MarksheetStatus => "marksheetStatus",
            ProgressField::MarksheetCompletionDate => "marksheetCompletionDate",
            ProgressField::MarksheetSubmitted => "marksheetSubmitted",
            ProgressField::MarksheetSubmissionDate => "marksheetSubmissionDate",
        }
    }

    pub fn kind(self) -> InputKind {
        match self {
            ProgressField::Course | ProgressField::Lecturer => InputKind::Select,
            ProgressField::GradingStatus | ProgressField::MarksheetStatus => InputKind::Text,
            ProgressField::GradingCompletionDate
            | ProgressField::MarksheetCompletionDate
            | ProgressField::MarksheetSubmissionDate => InputKind::Date,
            ProgressField::MarksheetSubmitted => InputKind::Checkbox,
        }
    }
}

impl fmt::Display for ProgressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProgressField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown progress update field: {}", s)))
    }
}

/// What a form control reports on change.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl ProgressUpdateForm {
    /// Stores a control's new value, branching on the field's input kind.
    pub fn apply(&mut self, field: ProgressField, value: FieldValue) -> Result<(), AppError> {
        match (field.kind(), value) {
            (InputKind::Checkbox, FieldValue::Checked(checked)) => {
                self.marksheet_submitted = checked;
                Ok(())
            }
            (InputKind::Date, FieldValue::Text(text)) => {
                let date = dates::parse_input(&text)?;
                self.set_text(
                    field,
                    date.map(|d| d.format(dates::INPUT_FORMAT).to_string())
                        .unwrap_or_default(),
                )
            }
            (InputKind::Select | InputKind::Text, FieldValue::Text(text)) => {
                self.set_text(field, text)
            }
            (InputKind::Checkbox, FieldValue::Text(_)) => Err(AppError::BadRequest(format!(
                "{} is a checkbox and takes a checked state",
                field
            ))),
            (_, FieldValue::Checked(_)) => Err(AppError::BadRequest(format!(
                "{} is not a checkbox",
                field
            ))),
        }
    }

    fn set_text(&mut self, field: ProgressField, text: String) -> Result<(), AppError> {
        let slot = match field {
            ProgressField::Course => &mut self.course,
            ProgressField::Lecturer => &mut self.lecturer,
            ProgressField::GradingStatus => &mut self.grading_status,
            ProgressField::GradingCompletionDate => &mut self.grading_completion_date,
            ProgressField::MarksheetStatus => &mut self.marksheet_status,
            ProgressField::MarksheetCompletionDate => &mut self.marksheet_completion_date,
            ProgressField::MarksheetSubmissionDate => &mut self.marksheet_submission_date,
            ProgressField::MarksheetSubmitted => {
                return Err(AppError::BadRequest(format!("{} has no text value", field)));
            }
        };
        *slot = text;
        Ok(())
    }
}
