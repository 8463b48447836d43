//! HttpTaskApi Integration Tests
//!
//! Runs the client against an axum stand-in for the REST backend that also
//! checks the request body casing.

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::Value;

use listapro_client::{
    ApiConfig, ApiError, HttpTaskApi, Task, TaskApi, TaskList, TaskListController, TaskPatch,
};

#[derive(Default)]
struct Backend {
    lists: Vec<(u64, String)>,
    tasks: Vec<Task>,
    fail_reads: bool,
    garbage_reads: bool,
}

impl Backend {
    fn list(&self, id: u64) -> Option<TaskList> {
        self.lists.iter().find(|(i, _)| *i == id).map(|(id, name)| TaskList {
            id: *id,
            name: name.clone(),
            tasks: self.tasks.iter().filter(|t| t.list_id == *id).cloned().collect(),
        })
    }
}

type Db = Arc<Mutex<Backend>>;
type Reply<T> = Result<T, (StatusCode, String)>;

fn reject(status: StatusCode, msg: &str) -> (StatusCode, String) {
    (status, msg.to_string())
}

fn read_guard(db: &Backend) -> Reply<()> {
    if db.fail_reads {
        return Err(reject(StatusCode::INTERNAL_SERVER_ERROR, "boom"));
    }
    Ok(())
}

fn lowercase_field(body: &Value, key: &str) -> Reply<String> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "expected lowercase key"))
}

async fn fetch_lists(State(db): State<Db>) -> Reply<Response> {
    let db = db.lock().unwrap();
    read_guard(&db)?;
    if db.garbage_reads {
        return Ok((StatusCode::OK, "<html>not json</html>").into_response());
    }
    let lists: Vec<TaskList> = db.lists.iter().filter_map(|(id, _)| db.list(*id)).collect();
    Ok(Json(lists).into_response())
}

async fn create_list(
    State(db): State<Db>,
    Json(body): Json<Value>,
) -> Reply<(StatusCode, Json<TaskList>)> {
    let name = lowercase_field(&body, "name")?;
    let mut db = db.lock().unwrap();
    let id = db.lists.iter().map(|(id, _)| *id).max().unwrap_or(0) + 1;
    db.lists.push((id, name));
    Ok((StatusCode::CREATED, Json(db.list(id).unwrap())))
}

async fn update_list(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Reply<Json<TaskList>> {
    let name = lowercase_field(&body, "name")?;
    let mut db = db.lock().unwrap();
    let entry = db
        .lists
        .iter_mut()
        .find(|(i, _)| *i == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "list"))?;
    entry.1 = name;
    Ok(Json(db.list(id).unwrap()))
}

async fn delete_list(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    let mut db = db.lock().unwrap();
    db.lists.retain(|(i, _)| *i != id);
    db.tasks.retain(|t| t.list_id != id);
    StatusCode::NO_CONTENT
}

async fn fetch_tasks(State(db): State<Db>, Path(id): Path<u64>) -> Reply<Json<Vec<Task>>> {
    let db = db.lock().unwrap();
    read_guard(&db)?;
    Ok(Json(db.tasks.iter().filter(|t| t.list_id == id).cloned().collect()))
}

async fn create_task(
    State(db): State<Db>,
    Path(list_id): Path<u64>,
    Json(body): Json<Value>,
) -> Reply<(StatusCode, Json<Task>)> {
    let text = lowercase_field(&body, "text")?;
    let mut db = db.lock().unwrap();
    let id = db.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    let task = Task {
        id,
        text,
        is_completed: false,
        list_id,
    };
    db.tasks.push(task.clone());
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Reply<Json<Task>> {
    let object = body
        .as_object()
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "object"))?;
    if object.keys().any(|k| k != "Text" && k != "IsCompleted") {
        return Err(reject(StatusCode::BAD_REQUEST, "unexpected key"));
    }
    let patch: TaskPatch =
        serde_json::from_value(body).map_err(|e| reject(StatusCode::BAD_REQUEST, &e.to_string()))?;
    let mut db = db.lock().unwrap();
    let task = db
        .tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "task"))?;
    task.apply(&patch);
    Ok(Json(task.clone()))
}

async fn delete_task(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    db.lock().unwrap().tasks.retain(|t| t.id != id);
    StatusCode::NO_CONTENT
}

fn router(db: Db) -> Router {
    Router::new()
        .route("/lists", get(fetch_lists).post(create_list))
        .route("/lists/{id}", put(update_list).delete(delete_list))
        .route("/lists/{id}/tasks", get(fetch_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .with_state(db)
}

async fn spawn_backend(backend: Backend) -> (Db, HttpTaskApi) {
    let db = Arc::new(Mutex::new(backend));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(db.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (db, HttpTaskApi::new(ApiConfig::new(format!("http://{}", addr))))
}

fn seeded() -> Backend {
    Backend {
        lists: vec![(1, "Lista 1".to_string())],
        tasks: vec![Task {
            id: 1,
            text: "Tarefa 1".to_string(),
            is_completed: false,
            list_id: 1,
        }],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_fetch_lists_embeds_tasks() {
    let (_db, api) = spawn_backend(seeded()).await;
    let lists = api.fetch_lists().await.unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].name, "Lista 1");
    assert_eq!(lists[0].task_count(), 1);
}

#[tokio::test]
async fn test_create_list_scenario() {
    let (_db, api) = spawn_backend(seeded()).await;

    let created = api.create_list("Nova Lista").await.unwrap();
    assert_eq!(
        created,
        TaskList {
            id: 2,
            name: "Nova Lista".to_string(),
            tasks: vec![],
        }
    );

    let lists = api.fetch_lists().await.unwrap();
    assert!(lists.iter().any(|l| l.id == 2 && l.name == "Nova Lista"));
}

#[tokio::test]
async fn test_rename_and_delete_list() {
    let (_db, api) = spawn_backend(seeded()).await;

    let renamed = api.update_list(1, "Lista Atualizada").await.unwrap();
    assert_eq!(renamed.name, "Lista Atualizada");

    api.delete_list(1).await.unwrap();
    let lists = api.fetch_lists().await.unwrap();
    assert!(lists.iter().all(|l| l.id != 1));
}

#[tokio::test]
async fn test_toggle_is_partial_and_idempotent() {
    let (_db, api) = spawn_backend(seeded()).await;

    let updated = api.update_task(1, &TaskPatch::completed(true)).await.unwrap();
    assert!(updated.is_completed);
    assert_eq!(updated.text, "Tarefa 1");
    assert_eq!(updated.list_id, 1);

    api.update_task(1, &TaskPatch::completed(true)).await.unwrap();
    let tasks = api.fetch_tasks_by_list(1).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].is_completed);
    assert_eq!(tasks[0].text, "Tarefa 1");
}

#[tokio::test]
async fn test_update_text_and_flag_together() {
    let (_db, api) = spawn_backend(seeded()).await;
    let patch = TaskPatch {
        text: Some("Tarefa Atualizada".to_string()),
        is_completed: Some(true),
    };
    let updated = api.update_task(1, &patch).await.unwrap();
    assert_eq!(updated.text, "Tarefa Atualizada");
    assert!(updated.is_completed);
}

#[tokio::test]
async fn test_create_and_delete_task() {
    let (_db, api) = spawn_backend(seeded()).await;

    let created = api.create_task(1, "Nova Tarefa").await.unwrap();
    assert_eq!(created.id, 2);
    assert_eq!(created.text, "Nova Tarefa");
    assert!(!created.is_completed);

    api.delete_task(1).await.unwrap();
    let ids: Vec<u64> = api
        .fetch_tasks_by_list(1)
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn test_server_error_rejects_fetches() {
    let (db, api) = spawn_backend(seeded()).await;
    db.lock().unwrap().fail_reads = true;

    assert_eq!(api.fetch_lists().await.unwrap_err().status(), Some(500));
    assert_eq!(api.fetch_tasks_by_list(1).await.unwrap_err().status(), Some(500));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let (db, api) = spawn_backend(seeded()).await;
    db.lock().unwrap().garbage_reads = true;

    assert!(matches!(api.fetch_lists().await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpTaskApi::new(ApiConfig::new(format!("http://{}", addr)));
    assert!(matches!(api.fetch_lists().await, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn test_missing_task_is_status_error() {
    let (_db, api) = spawn_backend(seeded()).await;
    let err = api.update_task(42, &TaskPatch::completed(true)).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_controller_over_http() {
    let (db, api) = spawn_backend(seeded()).await;
    let list = api.fetch_lists().await.unwrap().remove(0);
    let controller = TaskListController::new(Rc::new(api), &list);

    controller.toggle_task(1).await.unwrap();
    assert!(controller.tasks()[0].is_completed);

    controller.delete_task(1).await.unwrap();
    assert!(controller.tasks().is_empty());
    assert!(db.lock().unwrap().tasks.is_empty());

    db.lock().unwrap().fail_reads = true;
    assert!(controller.load().await.is_err());
    assert!(controller.tasks().is_empty());
}
