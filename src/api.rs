use reqwest::{Url, header::ACCEPT};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{CreateError, FillError};

pub const USERS_PATH: &str = "/api/users";
pub const TASKS_PATH: &str = "/api/tasks";
/// `message` the service sends back for a newly created resource.
pub const CREATED_MESSAGE: &str = "Created";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub name: String,
    /// Epoch milliseconds.
    pub deadline: i64,
    pub description: &'static str,
    pub completed: bool,
    pub assigned_user: String,
    pub assigned_user_name: String,
}

/// A user as acknowledged by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedUser {
    #[serde(rename = "_id", deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    pub email: String,
}

fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        other => other.to_string(),
    })
}

/// Envelope every endpoint of the service answers with.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ApiResponse {
    pub fn parse(body: &str) -> Result<Self, CreateError> {
        serde_json::from_str(body).map_err(CreateError::BadJson)
    }

    pub fn has_data(&self) -> bool {
        self.data.as_ref().is_some_and(has_payload)
    }

    pub fn into_created_user(self) -> Result<CreatedUser, CreateError> {
        if !self.has_data() || self.message.as_deref() != Some(CREATED_MESSAGE) {
            return Err(CreateError::Rejected {
                message: self.message,
            });
        }
        let data = self.data.unwrap_or_default();
        serde_json::from_value(data).map_err(CreateError::MalformedData)
    }

    pub fn into_task_data(self) -> Result<Value, CreateError> {
        match self.data {
            Some(data) if has_payload(&data) => Ok(data),
            _ => Err(CreateError::Rejected {
                message: self.message,
            }),
        }
    }
}

/// Null, `false`, zero and empty containers count as "no data".
fn has_payload(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: Url,
    users: Url,
    tasks: Url,
}

impl ApiClient {
    pub fn new(host: &str, port: u16) -> Result<Self, FillError> {
        let target = format!("{host}:{port}");
        let invalid = |reason: String| FillError::InvalidTarget {
            target: target.clone(),
            reason,
        };
        let mut base = if host.contains("://") {
            Url::parse(host)
        } else {
            Url::parse(&format!("http://{host}"))
        }
        .map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() || base.host_str().is_none() {
            return Err(invalid("missing host".to_owned()));
        }
        base.set_port(Some(port))
            .map_err(|()| invalid("scheme does not take a port".to_owned()))?;
        let users = base.join(USERS_PATH).map_err(|e| invalid(e.to_string()))?;
        let tasks = base.join(TASKS_PATH).map_err(|e| invalid(e.to_string()))?;
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(1)
            .build()
            .map_err(FillError::Client)?;
        Ok(Self {
            client,
            base,
            users,
            tasks,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<CreatedUser, CreateError> {
        self.post(self.users.clone(), user)
            .await?
            .into_created_user()
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<Value, CreateError> {
        self.post(self.tasks.clone(), task).await?.into_task_data()
    }

    async fn post<T: Serialize>(&self, url: Url, body: &T) -> Result<ApiResponse, CreateError> {
        log::debug!("POST {url}");
        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        log::debug!("{status}: {text}");
        ApiResponse::parse(&text)
    }
}
