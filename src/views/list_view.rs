use std::sync::Arc;

use tracing::{debug, warn};

use super::{Notice, ViewMode};
use crate::client::ApiClient;
use crate::client::dto::Collection;
use crate::error::AppError;
use crate::models::Form;
use crate::repository::{Editable, Repository};

/// List-and-form state shared by the CRUD views.
///
/// Operations never return errors: failures are written to the notice slot.
/// Mutating operations return whether the request went through.
pub struct ListView<R: Editable> {
    repo: Repository<R>,
    items: Vec<R::Record>,
    mode: ViewMode<R::Form>,
    notice: Option<Notice>,
}

impl<R: Editable> ListView<R> {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            repo: Repository::new(client),
            items: Vec::new(),
            mode: ViewMode::Browsing,
            notice: None,
        }
    }

    pub fn repository(&self) -> &Repository<R> {
        &self.repo
    }

    pub fn items(&self) -> &[R::Record] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&R::Record> {
        self.items.iter().find(|item| R::record_id(item) == id)
    }

    pub fn mode(&self) -> &ViewMode<R::Form> {
        &self.mode
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.notice {
            Some(Notice::Error(message)) => Some(message),
            _ => None,
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.notice = Some(Notice::Error(message));
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Success(message.into()));
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub async fn load(&mut self) -> bool {
        let result = self.repo.list().await;
        self.apply_load(result)
    }

    /// Applies a collection fetched elsewhere, e.g. as part of a concurrent mount.
    /// On failure the previous items stay visible.
    pub fn apply_load(&mut self, result: Result<Collection<R::Record>, AppError>) -> bool {
        match result {
            Ok(collection) => {
                debug!("loaded {} {}", collection.records.len(), R::PLURAL);
                self.items = collection.records;
                true
            }
            Err(e) => {
                self.set_error(format!("Error fetching {}: {}", R::PLURAL, e));
                false
            }
        }
    }

    pub fn begin_create(&mut self) {
        if !matches!(self.mode, ViewMode::Creating(_)) {
            self.log_discarded_form();
            self.mode = ViewMode::Creating(R::Form::default());
        }
    }

    pub fn draft(&self) -> Option<&R::Form> {
        match &self.mode {
            ViewMode::Creating(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Form> {
        match &mut self.mode {
            ViewMode::Creating(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn cancel_create(&mut self) {
        if matches!(self.mode, ViewMode::Creating(_)) {
            self.mode = ViewMode::Browsing;
        }
    }

    pub async fn submit_create(&mut self) -> bool {
        let Some(draft) = self.draft().cloned() else {
            self.set_error(format!("Error adding {}: no draft to submit", R::SINGULAR));
            return false;
        };
        if let Some(field) = draft.missing_required() {
            self.set_error(format!("Error adding {}: {} is required", R::SINGULAR, field));
            return false;
        }

        match self.repo.create(&draft).await {
            Ok(_) => {
                self.mode = ViewMode::Browsing;
                self.load().await;
                true
            }
            Err(e) => {
                self.set_error(format!("Error adding {}: {}", R::SINGULAR, e));
                false
            }
        }
    }

    /// Starts editing `record`, discarding any other unsaved edit.
    pub fn begin_edit(&mut self, record: &R::Record) {
        self.log_discarded_form();
        self.mode = ViewMode::Editing {
            id: R::record_id(record).to_string(),
            form: R::edit_form(record),
        };
    }

    /// Starts editing from a fresh fetch of the record rather than the list snapshot.
    pub async fn begin_edit_by_id(&mut self, id: &str) -> bool {
        match self.repo.get(id).await {
            Ok(record) => {
                self.begin_edit(&record);
                true
            }
            Err(e) => {
                self.set_error(format!("Error fetching {} details: {}", R::SINGULAR, e));
                false
            }
        }
    }

    pub fn edit_form(&self) -> Option<&R::Form> {
        match &self.mode {
            ViewMode::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut R::Form> {
        match &mut self.mode {
            ViewMode::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, ViewMode::Editing { .. }) {
            self.mode = ViewMode::Browsing;
        }
    }

    pub async fn submit_update(&mut self) -> bool {
        let (id, form) = match &self.mode {
            ViewMode::Editing { id, form } => (id.clone(), form.clone()),
            _ => {
                self.set_error(format!("Error updating {}: nothing is being edited", R::SINGULAR));
                return false;
            }
        };
        if let Some(field) = form.missing_required() {
            self.set_error(format!("Error updating {}: {} is required", R::SINGULAR, field));
            return false;
        }

        match self.repo.update(&id, &form).await {
            Ok(_) => {
                self.mode = ViewMode::Browsing;
                self.load().await;
                true
            }
            Err(e) => {
                self.set_error(format!("Error updating {}: {}", R::SINGULAR, e));
                false
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        match self.repo.delete(id).await {
            Ok(()) => {
                self.items.retain(|item| R::record_id(item) != id);
                if self.mode.editing_id() == Some(id) {
                    self.mode = ViewMode::Browsing;
                }
                true
            }
            Err(e) => {
                self.set_error(format!("Error deleting {}: {}", R::SINGULAR, e));
                false
            }
        }
    }

    fn log_discarded_form(&self) {
        match &self.mode {
            ViewMode::Editing { id, .. } => {
                debug!("discarding unsaved edits to {} {}", R::SINGULAR, id)
            }
            ViewMode::Creating(_) => debug!("discarding {} draft", R::SINGULAR),
            ViewMode::Browsing => {}
        }
    }
}
