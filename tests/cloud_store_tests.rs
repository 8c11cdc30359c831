//! Cloud store tests against an in-process mock of the CouchDB HTTP API
//!
//! The mock keeps documents in memory and answers `_find` by evaluating the
//! subset of Mango the store emits (`$and`, `$or`, `$all`, `$exists`, `$gt`).
//! Like CouchDB, `_find` skips design documents while `doc_count` includes
//! them. Selectors are recorded so the tests can check what the store asked for.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use workout_planner::catalog::cloud::{CloudConfig, CloudStore, MAX_FIND_DOCS};
use workout_planner::catalog::store::{open_store, CatalogStore, SeedOutcome, StoreConfig, StoreError};
use workout_planner::{Exercise, Facet, PlanGenerator, Predicate, Selection};

#[derive(Default)]
struct MockCouch {
    database_exists: bool,
    docs: Vec<Value>,
    selectors: Vec<Value>,
    find_limits: Vec<Value>,
    auth_headers: Vec<Option<String>>,
    fail_find: bool,
    reject_docs: bool,
}

type Shared = Arc<Mutex<MockCouch>>;

async fn create_db(
    State(state): State<Shared>,
    Path(_db): Path<String>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    let mut mock = state.lock().unwrap();
    mock.auth_headers.push(
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    );
    if mock.database_exists {
        (
            StatusCode::PRECONDITION_FAILED,
            Json(json!({"error": "file_exists"})),
        )
    } else {
        mock.database_exists = true;
        (StatusCode::CREATED, Json(json!({"ok": true})))
    }
}

async fn db_info(State(state): State<Shared>, Path(db): Path<String>) -> impl IntoResponse {
    let mock = state.lock().unwrap();
    Json(json!({"db_name": db, "doc_count": mock.docs.len()}))
}

async fn bulk_docs(
    State(state): State<Shared>,
    Path(_db): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut mock = state.lock().unwrap();
    let docs = body["docs"].as_array().cloned().unwrap_or_default();
    let mut results = Vec::new();
    for mut doc in docs {
        let id = format!("doc-{}", mock.docs.len());
        if mock.reject_docs {
            results.push(json!({"id": id, "error": "forbidden", "reason": "Database is read only"}));
            continue;
        }
        doc["_id"] = json!(id);
        doc["_rev"] = json!("1-abc");
        results.push(json!({"ok": true, "id": id, "rev": "1-abc"}));
        mock.docs.push(doc);
    }
    (StatusCode::CREATED, Json(Value::Array(results)))
}

fn condition_matches(value: Option<&Value>, condition: &Value) -> bool {
    condition
        .as_object()
        .unwrap()
        .iter()
        .all(|(op, arg)| match op.as_str() {
            "$all" => {
                let tags = value.and_then(Value::as_array).cloned().unwrap_or_default();
                arg.as_array().unwrap().iter().all(|wanted| tags.contains(wanted))
            }
            "$exists" => value.is_some() == arg.as_bool().unwrap(),
            "$gt" if arg.is_null() => value.is_some_and(|v| !v.is_null()),
            other => panic!("mock does not support operator {other}"),
        })
}

fn selector_matches(selector: &Value, doc: &Value) -> bool {
    selector
        .as_object()
        .unwrap()
        .iter()
        .all(|(key, arg)| match key.as_str() {
            "$and" => arg.as_array().unwrap().iter().all(|s| selector_matches(s, doc)),
            "$or" => arg.as_array().unwrap().iter().any(|s| selector_matches(s, doc)),
            field => condition_matches(doc.get(field), arg),
        })
}

fn is_design_doc(doc: &Value) -> bool {
    doc["_id"]
        .as_str()
        .is_some_and(|id| id.starts_with("_design/"))
}

async fn find(
    State(state): State<Shared>,
    Path(_db): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut mock = state.lock().unwrap();
    mock.selectors.push(body["selector"].clone());
    mock.find_limits.push(body["limit"].clone());
    if mock.fail_find {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "internal_server_error"})),
        );
    }

    let fields: Option<Vec<String>> = body["fields"].as_array().map(|fields| {
        fields
            .iter()
            .map(|f| f.as_str().unwrap().to_string())
            .collect()
    });
    let docs: Vec<Value> = mock
        .docs
        .iter()
        .filter(|doc| !is_design_doc(doc) && selector_matches(&body["selector"], doc))
        .map(|doc| match &fields {
            Some(fields) => Value::Object(
                fields
                    .iter()
                    .filter_map(|f| doc.get(f).map(|v| (f.clone(), v.clone())))
                    .collect(),
            ),
            None => doc.clone(),
        })
        .collect();
    (
        StatusCode::OK,
        Json(json!({"docs": docs, "warning": "No matching index found"})),
    )
}

async fn start_mock(mock: MockCouch) -> (String, Shared) {
    let state: Shared = Arc::new(Mutex::new(mock));
    let app = Router::new()
        .route("/{db}", put(create_db).get(db_info))
        .route("/{db}/_bulk_docs", post(bulk_docs))
        .route("/{db}/_find", post(find))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), state)
}

fn sit_ups() -> Exercise {
    Exercise::new("Sit-ups", "https://www.youtube.com/watch?v=J9f2pPjK4cQ")
        .with_types(&["strength", "core"])
        .with_muscle_targets(&["core"])
        .with_equipment(&["none"])
}

fn stored(exercise: Exercise, id: &str) -> Value {
    let mut doc = serde_json::to_value(exercise).unwrap();
    doc["_id"] = json!(id);
    doc["_rev"] = json!("1-abc");
    doc
}

#[tokio::test]
async fn test_open_creates_database_and_seeds() {
    let (url, state) = start_mock(MockCouch::default()).await;
    let config = StoreConfig::Cloud(CloudConfig::new(url, "exercises"));

    let store = open_store(&config).await.unwrap();
    assert_eq!(store.backend(), "cloud");
    assert_eq!(store.len().await.unwrap(), 17);

    let mock = state.lock().unwrap();
    assert!(mock.database_exists);
    assert_eq!(mock.docs.len(), 17);
    assert_eq!(mock.docs[0]["name"], "Dumbbell Shoulder Press");
}

#[tokio::test]
async fn test_existing_database_is_not_reseeded() {
    let (url, state) = start_mock(MockCouch {
        database_exists: true,
        docs: vec![stored(sit_ups(), "sit-ups")],
        ..MockCouch::default()
    })
    .await;

    let store = CloudStore::connect(CloudConfig::new(url, "exercises"))
        .await
        .unwrap();
    let outcome = store.seed_if_empty(&[sit_ups(), sit_ups()]).await.unwrap();

    assert_eq!(outcome, SeedOutcome::AlreadyPopulated(1));
    assert_eq!(state.lock().unwrap().docs.len(), 1);
}

#[tokio::test]
async fn test_query_sends_mango_selector_and_strips_ids() {
    let (url, state) = start_mock(MockCouch::default()).await;
    let store = CloudStore::connect(CloudConfig::new(url, "exercises"))
        .await
        .unwrap();
    store.seed_if_empty(&[sit_ups()]).await.unwrap();

    let predicate = Predicate::All(vec![Predicate::any_of(Facet::MuscleTarget, &["core"])]);
    let found = store.query(&predicate).await.unwrap();

    assert_eq!(found, vec![sit_ups()]);
    let value = serde_json::to_value(&found[0]).unwrap();
    assert!(value.get("_id").is_none());
    assert!(value.get("_rev").is_none());

    let mock = state.lock().unwrap();
    assert_eq!(
        mock.selectors.last().unwrap(),
        &json!({"$and": [{"$or": [{"muscle_targets": {"$all": ["core"]}}]}]})
    );
    assert_eq!(mock.find_limits.last().unwrap(), &json!(MAX_FIND_DOCS));
}

#[tokio::test]
async fn test_credentials_use_basic_auth() {
    let (url, state) = start_mock(MockCouch::default()).await;
    let config =
        CloudConfig::new(url, "exercises").with_credentials("app", Some("secret".to_string()));

    CloudStore::connect(config).await.unwrap();

    let mock = state.lock().unwrap();
    // base64("app:secret")
    assert_eq!(
        mock.auth_headers[0].as_deref(),
        Some("Basic YXBwOnNlY3JldA==")
    );
}

#[tokio::test]
async fn test_query_failure_is_reported() {
    let (url, _state) = start_mock(MockCouch {
        fail_find: true,
        ..MockCouch::default()
    })
    .await;
    let store = CloudStore::connect(CloudConfig::new(url, "exercises"))
        .await
        .unwrap();

    let result = store.query(&Predicate::always()).await;
    assert!(matches!(
        result,
        Err(StoreError::Remote { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_rejected_seed_documents_fail_open() {
    let (url, state) = start_mock(MockCouch {
        reject_docs: true,
        ..MockCouch::default()
    })
    .await;
    let config = StoreConfig::Cloud(CloudConfig::new(url, "exercises"));

    let result = open_store(&config).await;
    match result {
        Err(StoreError::Seed {
            rejected, total, ..
        }) => {
            assert_eq!(rejected, 17);
            assert_eq!(total, 17);
        }
        Err(other) => panic!("expected seed error, got {other}"),
        Ok(_) => panic!("expected seed error, got a store"),
    }
    assert!(state.lock().unwrap().docs.is_empty());
}

#[tokio::test]
async fn test_design_documents_do_not_count_as_records() {
    let (url, state) = start_mock(MockCouch {
        database_exists: true,
        docs: vec![json!({"_id": "_design/by_type", "language": "query", "views": {}})],
        ..MockCouch::default()
    })
    .await;

    let store = CloudStore::connect(CloudConfig::new(url, "exercises"))
        .await
        .unwrap();
    assert_eq!(store.len().await.unwrap(), 0);

    let outcome = store.seed_if_empty(&[sit_ups()]).await.unwrap();
    assert_eq!(outcome, SeedOutcome::Seeded(1));
    assert_eq!(store.query(&Predicate::always()).await.unwrap(), vec![sit_ups()]);
    assert_eq!(state.lock().unwrap().docs.len(), 2);
}

#[tokio::test]
async fn test_query_filters_by_selector() {
    let (url, _state) = start_mock(MockCouch::default()).await;
    let store = open_store(&StoreConfig::Cloud(CloudConfig::new(url, "exercises")))
        .await
        .unwrap();

    let selection = Selection::new(
        vec!["strength".to_string(), "stability".to_string()],
        Vec::new(),
        vec!["shoulder".to_string()],
    );
    let plan = PlanGenerator::new(store.as_ref())
        .generate(&selection)
        .await
        .unwrap();

    let names: HashSet<&str> = plan.exercises.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        HashSet::from([
            "Dumbbell Shoulder Press",
            "Face Pulls",
            "Lateral Raises (Shoulder Abduction)",
            "Push-ups",
        ])
    );
    assert!(plan.message.is_none());

    let swimming = store
        .query(&Predicate::All(vec![Predicate::any_of(Facet::Sport, &["swimming"])]))
        .await
        .unwrap();
    assert_eq!(swimming.len(), 3);

    let nothing = store
        .query(&Predicate::any_of(Facet::Type, &["nonexistent_type"]))
        .await
        .unwrap();
    assert!(nothing.is_empty());
}
