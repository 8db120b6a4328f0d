use crate::approvals::SqliteLedger;
use crate::config::AppConfig;
use crate::db::{init_db, Database};
use crate::router::handle;
use crate::service::ReviewService;
use astra::Body;
use http::{Method, Request};
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Unique SQLite file path under the system temp dir.
pub fn temp_db_path(name: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!("{name}_{nanos}_{seq}.sqlite"))
        .to_string_lossy()
        .into_owned()
}

/// Offline service (both sources on fallback data) over a fresh ledger database.
pub fn init_test_app(name: &str) -> ReviewService {
    let path = temp_db_path(name);
    let db = Database::new(path.clone());
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    let config = AppConfig::offline(path);
    ReviewService::new(&config, Box::new(SqliteLedger::new(db)))
        .unwrap_or_else(|e| panic!("Service construction failed: {e}"))
}

/// Runs one request through the router and decodes the JSON body.
/// Handler errors are rendered the way the server loop renders them.
pub fn send(app: &ReviewService, method: Method, uri: &str, body: Option<&str>) -> (u16, serde_json::Value) {
    let body = match body {
        Some(b) => Body::from(b.as_bytes().to_vec()),
        None => Body::empty(),
    };
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(body)
        .unwrap();

    let resp = match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => crate::responses::json_error_response(&err),
    };
    let status = resp.status().as_u16();

    let mut text = String::new();
    resp.into_body().reader().read_to_string(&mut text).unwrap();
    let value = serde_json::from_str(&text).unwrap_or_else(|e| panic!("non-JSON body {text:?}: {e}"));
    (status, value)
}
