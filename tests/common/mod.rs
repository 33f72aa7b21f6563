#![allow(dead_code)]

use std::{
    io::Write,
    net::SocketAddr,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use db_fill::Cli;
use clap::Parser;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// How the stand-in service answers user creation requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserMode {
    #[default]
    Accept,
    /// 400 with `data: null`, like a duplicate email.
    Reject,
    /// Accept the 1st, 3rd, 5th... request and reject the rest.
    AcceptOdd,
    /// Non-JSON body.
    Garbage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskMode {
    #[default]
    Accept,
    Reject,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub user_mode: UserMode,
    pub task_mode: TaskMode,
    pub user_requests: Mutex<Vec<Value>>,
    pub task_requests: Mutex<Vec<Value>>,
    /// Users answered with "Created", as the service returned them.
    pub created_users: Mutex<Vec<Value>>,
}

impl MockState {
    pub fn user_requests(&self) -> Vec<Value> {
        self.user_requests.lock().unwrap().clone()
    }

    pub fn task_requests(&self) -> Vec<Value> {
        self.task_requests.lock().unwrap().clone()
    }

    pub fn created_users(&self) -> Vec<Value> {
        self.created_users.lock().unwrap().clone()
    }
}

pub struct MockApi {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

impl MockApi {
    pub async fn spawn(user_mode: UserMode, task_mode: TaskMode) -> Self {
        let state = Arc::new(MockState {
            user_mode,
            task_mode,
            ..Default::default()
        });
        let app = Router::new()
            .route("/api/users", post(create_user))
            .route("/api/tasks", post(create_task))
            .with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        Self { addr, state }
    }
}

async fn create_user(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let index = {
        let mut requests = state.user_requests.lock().unwrap();
        requests.push(body.clone());
        requests.len()
    };
    let accept = match state.user_mode {
        UserMode::Accept => true,
        UserMode::Reject => false,
        UserMode::AcceptOdd => index % 2 == 1,
        UserMode::Garbage => {
            return (StatusCode::BAD_GATEWAY, "<html>502 Bad Gateway</html>").into_response();
        }
    };
    if !accept {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "A user with this email already exists", "data": null})),
        )
            .into_response();
    }
    let user = json!({
        "_id": format!("{index:024x}"),
        "name": body["name"],
        "email": body["email"],
        "pendingTasks": [],
    });
    state.created_users.lock().unwrap().push(user.clone());
    (
        StatusCode::CREATED,
        Json(json!({"message": "Created", "data": user})),
    )
        .into_response()
}

async fn create_task(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let index = {
        let mut requests = state.task_requests.lock().unwrap();
        requests.push(body.clone());
        requests.len()
    };
    match state.task_mode {
        TaskMode::Accept => {
            let mut task = body;
            task["_id"] = json!(format!("t{index:023x}"));
            (
                StatusCode::CREATED,
                Json(json!({"message": "Created", "data": task})),
            )
                .into_response()
        }
        TaskMode::Reject => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Could not create task", "data": null})),
        )
            .into_response(),
    }
}

pub const TASK_NAMES: [&str; 4] = ["Buy groceries", "Write report", "Fix login bug", "Call dentist"];

/// A scratch directory holding a `tasks.txt` with [`TASK_NAMES`].
pub fn task_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    for name in TASK_NAMES {
        writeln!(file, "{name}").unwrap();
    }
    (dir, path)
}

pub fn cli(addr: SocketAddr, users: usize, tasks: usize, tasks_file: &std::path::Path) -> Cli {
    Cli::try_parse_from([
        "db-fill".to_owned(),
        "-u".to_owned(),
        addr.ip().to_string(),
        "-p".to_owned(),
        addr.port().to_string(),
        "-n".to_owned(),
        users.to_string(),
        "-t".to_owned(),
        tasks.to_string(),
        "--tasks-file".to_owned(),
        tasks_file.display().to_string(),
        "--seed".to_owned(),
        "42".to_owned(),
    ])
    .unwrap()
}
