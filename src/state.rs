use std::sync::Arc;

use crate::client::{ApiClient, HttpApiClient};
use crate::config::ApiConfig;
use crate::error::AppError;
use crate::repository::{Repository, Semesters};
use crate::views::{CourseList, Dashboard, LecturerList, ProgressUpdatesView};

/// Shared handles every view is built from.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ApiClient>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        let client = HttpApiClient::new(&config)?;
        Ok(Self::with_client(Arc::new(client), config))
    }

    pub fn with_client(client: Arc<dyn ApiClient>, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.client.clone()).with_recent_limit(self.config.recent_updates_limit)
    }

    pub fn lecturer_list(&self) -> LecturerList {
        LecturerList::new(self.client.clone())
    }

    pub fn course_list(&self) -> CourseList {
        CourseList::new(self.client.clone())
    }

    pub fn progress_updates(&self) -> ProgressUpdatesView {
        ProgressUpdatesView::new(self.client.clone())
    }

    pub fn semesters(&self) -> Repository<Semesters> {
        Repository::new(self.client.clone())
    }
}
