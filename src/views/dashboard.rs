use std::cmp::Reverse;
use std::sync::Arc;

use tracing::error;

use crate::client::ApiClient;
use crate::config::DEFAULT_RECENT_UPDATES_LIMIT;
use crate::dates;
use crate::models::ProgressUpdate;
use crate::models::reference::{RecordSummary, display_name};
use crate::repository::{Courses, Lecturers, ProgressUpdates, Repository};

pub const LOAD_ERROR: &str = "Failed to fetch dashboard data";

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Ready(DashboardData),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub courses_count: usize,
    pub lecturers_count: usize,
    pub recent_updates: Vec<RecentUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentUpdate {
    pub id: String,
    pub course: String,
    pub grading_status: String,
    pub updated_on: String,
    pub submitted: bool,
}

impl RecentUpdate {
    pub fn badge(&self) -> &'static str {
        if self.submitted { "Submitted" } else { "Pending" }
    }
}

/// Read-only summary: two counts and the most recent progress updates.
pub struct Dashboard {
    courses: Repository<Courses>,
    lecturers: Repository<Lecturers>,
    updates: Repository<ProgressUpdates>,
    recent_limit: usize,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            courses: Repository::new(client.clone()),
            lecturers: Repository::new(client.clone()),
            updates: Repository::new(client),
            recent_limit: DEFAULT_RECENT_UPDATES_LIMIT,
            state: DashboardState::Loading,
        }
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Fetches all three collections at once; any failure fails the whole load.
    pub async fn load(&mut self) {
        self.state = DashboardState::Loading;
        let fetched = tokio::try_join!(
            self.courses.list(),
            self.lecturers.list(),
            self.updates.list(),
        );

        self.state = match fetched {
            Ok((courses, lecturers, updates)) => DashboardState::Ready(DashboardData {
                courses_count: courses.count,
                lecturers_count: lecturers.count,
                recent_updates: recent(updates.records, self.recent_limit),
            }),
            Err(e) => {
                error!("dashboard load failed: {}", e);
                DashboardState::Failed(LOAD_ERROR.to_string())
            }
        };
    }
}

/// Newest first by `date`; undated updates keep server order after the dated ones.
fn recent(mut updates: Vec<ProgressUpdate>, limit: usize) -> Vec<RecentUpdate> {
    updates.sort_by_key(|update| Reverse(update.date.as_deref().and_then(dates::parse_timestamp)));

    let no_options: &[RecordSummary] = &[];
    updates
        .into_iter()
        .take(limit)
        .map(|update| RecentUpdate {
            course: display_name(update.course.as_ref(), no_options),
            updated_on: dates::display(update.date.as_deref()),
            grading_status: update.grading_status,
            submitted: update.marksheet_submitted,
            id: update.id,
        })
        .collect()
}
