use std::sync::Arc;

use super::ListView;
use crate::client::ApiClient;
use crate::repository::Lecturers;

pub struct LecturerList {
    list: ListView<Lecturers>,
}

impl LecturerList {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            list: ListView::new(client),
        }
    }

    pub async fn mount(&mut self) {
        self.list.load().await;
    }

    pub fn list(&self) -> &ListView<Lecturers> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView<Lecturers> {
        &mut self.list
    }
}
