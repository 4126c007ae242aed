//! In-process stand-in for the course-tracking REST backend.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value, json};
use tokio::task::JoinHandle;
use uuid::Uuid;

use course_admin::client::{ApiClient, HttpApiClient};
use course_admin::config::ApiConfig;

const DATE_FIELDS: [&str; 3] = [
    "gradingCompletionDate",
    "marksheetCompletionDate",
    "marksheetSubmissionDate",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Store {
    records: HashMap<String, Vec<Value>>,
    requests: Vec<Recorded>,
    failures: HashMap<(&'static str, String), (u16, Option<String>)>,
    counted: bool,
    flat_references: bool,
    clock: u32,
}

type Shared = Arc<Mutex<Store>>;

pub struct FakeBackend {
    pub base_url: String,
    store: Shared,
    handle: JoinHandle<()>,
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl FakeBackend {
    pub async fn start() -> Self {
        let store: Shared = Arc::new(Mutex::new(Store::default()));
        let app = Router::new()
            .route("/api/{resource}", get(list).post(create))
            .route("/api/{resource}/{id}", get(fetch).patch(update).delete(remove))
            .with_state(store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Failed to read local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake backend stopped");
        });

        Self {
            base_url: format!("http://{}/api", addr),
            store,
            handle,
        }
    }

    pub fn client(&self) -> Arc<dyn ApiClient> {
        let client = HttpApiClient::new(&ApiConfig::new(&self.base_url))
            .expect("Failed to build client");
        Arc::new(client)
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().expect("store poisoned")
    }

    /// Inserts a record directly, bypassing the request log. Returns its id.
    pub fn seed(&self, resource: &str, record: Value) -> String {
        let mut store = self.lock();
        let mut record = record;
        let id = match record.get("_id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };
        record["_id"] = json!(id);
        store.records.entry(resource.to_string()).or_default().push(record);
        id
    }

    pub fn seed_lecturer(&self, name: &str, email: &str, department: &str) -> String {
        self.seed(
            "lecturers",
            json!({ "name": name, "email": email, "department": department }),
        )
    }

    pub fn seed_semester(&self, name: &str) -> String {
        self.seed("semesters", json!({ "name": name }))
    }

    pub fn seed_course(&self, name: &str, code: &str, lecturer: &str, semester: &str) -> String {
        self.seed(
            "courses",
            json!({ "name": name, "code": code, "lecturer": lecturer, "semester": semester }),
        )
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<Recorded> {
        self.lock().requests.clone()
    }

    /// Requests other than GET.
    pub fn mutations(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != "GET")
            .collect()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    /// Raw stored records of a resource, references unexpanded.
    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.lock()
            .records
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    /// Makes every `method` request on `resource` fail until cleared.
    pub fn fail(&self, method: &'static str, resource: &str, status: u16, message: Option<&str>) {
        self.lock().failures.insert(
            (method, resource.to_string()),
            (status, message.map(str::to_string)),
        );
    }

    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    /// Wraps list responses as `{ "count": n, "data": [...] }`.
    pub fn use_counted_lists(&self, counted: bool) {
        self.lock().counted = counted;
    }

    /// Serves references as bare ids instead of expanded objects.
    pub fn use_flat_references(&self, flat: bool) {
        self.lock().flat_references = flat;
    }
}

fn required_fields(resource: &str) -> Option<&'static [&'static str]> {
    match resource {
        "lecturers" => Some(&["name", "email", "department"]),
        "courses" => Some(&["name", "code", "lecturer", "semester"]),
        "semesters" => Some(&["name"]),
        "progress-updates" => Some(&["course", "lecturer", "gradingStatus", "marksheetStatus"]),
        _ => None,
    }
}

fn reference_fields(resource: &str) -> &'static [(&'static str, &'static str)] {
    match resource {
        "courses" => &[("lecturer", "lecturers"), ("semester", "semesters")],
        "progress-updates" => &[("course", "courses"), ("lecturer", "lecturers")],
        _ => &[],
    }
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

impl Store {
    fn record(&mut self, method: &'static str, path: String, body: Option<Value>) {
        self.requests.push(Recorded { method, path, body });
    }

    fn injected(&self, method: &'static str, resource: &str) -> Option<Response> {
        self.failures
            .get(&(method, resource.to_string()))
            .map(|(status, text)| {
                let status =
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                match text {
                    Some(text) => message(status, text),
                    None => status.into_response(),
                }
            })
    }

    fn tick(&mut self) -> String {
        self.clock += 1;
        format!(
            "2024-03-01T10:{:02}:{:02}.000Z",
            self.clock / 60,
            self.clock % 60
        )
    }

    fn expand(&self, resource: &str, record: &Value) -> Value {
        let mut record = record.clone();
        if self.flat_references {
            return record;
        }
        for (field, target) in reference_fields(resource) {
            let Some(id) = record.get(*field).and_then(Value::as_str).map(str::to_string) else {
                continue;
            };
            let found = self
                .records
                .get(*target)
                .and_then(|rows| rows.iter().find(|row| row["_id"] == json!(id)));
            if let Some(row) = found {
                record[*field] = json!({ "_id": id, "name": row["name"] });
            }
        }
        record
    }

    /// Checks a write body the way the real backend's schema does.
    fn validate(&self, resource: &str, body: &Map<String, Value>, partial: bool) -> Result<(), Response> {
        for (field, _) in reference_fields(resource) {
            if body.get(*field).is_some_and(Value::is_object) {
                return Err(message(
                    StatusCode::BAD_REQUEST,
                    &format!("Cast to ObjectId failed for path \"{}\"", field),
                ));
            }
        }
        if partial {
            return Ok(());
        }
        for field in required_fields(resource).unwrap_or(&[]) {
            let blank = match body.get(*field) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            };
            if blank {
                return Err(message(
                    StatusCode::BAD_REQUEST,
                    &format!("Path `{}` is required.", field),
                ));
            }
        }
        Ok(())
    }

    fn normalize(&mut self, resource: &str, record: &mut Map<String, Value>) {
        if resource != "progress-updates" {
            return;
        }
        for field in DATE_FIELDS {
            let stamped = match record.get(field) {
                Some(Value::String(day)) if day.len() == 10 => format!("{}T00:00:00.000Z", day),
                _ => continue,
            };
            record.insert(field.to_string(), json!(stamped));
        }
        let stamp = self.tick();
        record.insert("date".to_string(), json!(stamp));
    }
}

async fn list(State(store): State<Shared>, Path(resource): Path<String>) -> Response {
    let mut store = store.lock().expect("store poisoned");
    store.record("GET", resource.clone(), None);
    if let Some(failure) = store.injected("GET", &resource) {
        return failure;
    }
    if required_fields(&resource).is_none() {
        return message(StatusCode::NOT_FOUND, "Unknown resource");
    }

    let rows: Vec<Value> = store
        .records
        .get(&resource)
        .map(|rows| rows.iter().map(|row| store.expand(&resource, row)).collect())
        .unwrap_or_default();

    if store.counted {
        Json(json!({ "count": rows.len(), "data": rows })).into_response()
    } else {
        Json(Value::Array(rows)).into_response()
    }
}

async fn create(
    State(store): State<Shared>,
    Path(resource): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = store.lock().expect("store poisoned");
    store.record("POST", resource.clone(), Some(body.clone()));
    if let Some(failure) = store.injected("POST", &resource) {
        return failure;
    }
    let Value::Object(mut fields) = body else {
        return message(StatusCode::BAD_REQUEST, "Expected an object");
    };
    if let Err(rejection) = store.validate(&resource, &fields, false) {
        return rejection;
    }

    fields.insert("_id".to_string(), json!(Uuid::new_v4().to_string()));
    store.normalize(&resource, &mut fields);
    let record = Value::Object(fields);
    store
        .records
        .entry(resource.clone())
        .or_default()
        .push(record.clone());

    (StatusCode::CREATED, Json(store.expand(&resource, &record))).into_response()
}

async fn fetch(
    State(store): State<Shared>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    let mut store = store.lock().expect("store poisoned");
    store.record("GET", format!("{}/{}", resource, id), None);
    if let Some(failure) = store.injected("GET", &resource) {
        return failure;
    }

    let found = store
        .records
        .get(&resource)
        .and_then(|rows| rows.iter().find(|row| row["_id"] == json!(id)))
        .cloned();
    match found {
        Some(record) => Json(store.expand(&resource, &record)).into_response(),
        None => message(StatusCode::NOT_FOUND, "Record not found"),
    }
}

async fn update(
    State(store): State<Shared>,
    Path((resource, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = store.lock().expect("store poisoned");
    store.record("PATCH", format!("{}/{}", resource, id), Some(body.clone()));
    if let Some(failure) = store.injected("PATCH", &resource) {
        return failure;
    }
    let Value::Object(changes) = body else {
        return message(StatusCode::BAD_REQUEST, "Expected an object");
    };
    if let Err(rejection) = store.validate(&resource, &changes, true) {
        return rejection;
    }

    let position = store
        .records
        .get(&resource)
        .and_then(|rows| rows.iter().position(|row| row["_id"] == json!(id)));
    let Some(position) = position else {
        return message(StatusCode::NOT_FOUND, "Record not found");
    };

    let mut merged = match store.records[&resource][position].clone() {
        Value::Object(existing) => existing,
        _ => Map::new(),
    };
    merged.extend(changes);
    store.normalize(&resource, &mut merged);
    let record = Value::Object(merged);
    if let Some(rows) = store.records.get_mut(&resource) {
        rows[position] = record.clone();
    }

    Json(store.expand(&resource, &record)).into_response()
}

async fn remove(
    State(store): State<Shared>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    let mut store = store.lock().expect("store poisoned");
    store.record("DELETE", format!("{}/{}", resource, id), None);
    if let Some(failure) = store.injected("DELETE", &resource) {
        return failure;
    }

    let Some(rows) = store.records.get_mut(&resource) else {
        return message(StatusCode::NOT_FOUND, "Record not found");
    };
    let before = rows.len();
    rows.retain(|row| row["_id"] != json!(id));
    if rows.len() == before {
        return message(StatusCode::NOT_FOUND, "Record not found");
    }
    message(StatusCode::OK, "Deleted")
}
