use serde::{Deserialize, Serialize};

/// Minimal view of a referenced record as the backend expands it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,
}

/// A field holding another record's identifier.
///
/// Reads may deliver the expanded object or the bare identifier; writes always
/// send the identifier (see [`flatten`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Expanded(RecordSummary),
    Id(String),
}

impl Reference {
    pub fn id(&self) -> &str {
        match self {
            Reference::Expanded(summary) => &summary.id,
            Reference::Id(id) => id,
        }
    }

    /// Display name, looking bare identifiers up in `options`.
    pub fn resolve_name<'a, T: Named>(&'a self, options: &'a [T]) -> Option<&'a str> {
        match self {
            Reference::Expanded(summary) if !summary.name.is_empty() => Some(&summary.name),
            _ => options
                .iter()
                .find(|option| option.id() == self.id())
                .map(Named::name),
        }
    }
}

/// Selector value for an optional reference; empty when nothing is selected.
pub fn flatten(reference: Option<&Reference>) -> String {
    reference
        .map(|r| r.id().to_string())
        .unwrap_or_default()
}

/// Cell text for an optional reference.
pub fn display_name<T: Named>(reference: Option<&Reference>, options: &[T]) -> String {
    reference
        .and_then(|r| r.resolve_name(options))
        .unwrap_or("N/A")
        .to_string()
}

/// Records that can populate a selector.
pub trait Named {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

impl Named for RecordSummary {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
