use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{ProjectId, TaskId},
    protocol::{Project, ProjectPayload, Task, TaskPayload, User},
};
use url::Url;

use crate::error::ServiceError;

/// CRUD surface of the project/task backend.
#[async_trait]
pub trait AdminService: Send + Sync {
    async fn get_projects(&self) -> Result<Vec<Project>>;
    async fn create_project(&self, payload: &ProjectPayload) -> Result<Project>;
    async fn update_project(&self, id: ProjectId, payload: &ProjectPayload) -> Result<Project>;
    async fn delete_project(&self, id: ProjectId) -> Result<()>;

    async fn get_tasks(&self) -> Result<Vec<Task>>;
    async fn create_task(&self, payload: &TaskPayload) -> Result<Task>;
    async fn update_task(&self, id: TaskId, payload: &TaskPayload) -> Result<Task>;
    async fn delete_task(&self, id: TaskId) -> Result<()>;
    async fn search_tasks(&self, term: &str) -> Result<Vec<Task>>;

    async fn get_users(&self) -> Result<Vec<User>>;
}

pub struct HttpAdminService {
    http: Client,
    base_url: String,
}

impl HttpAdminService {
    pub fn new(base_url: &str) -> std::result::Result<Self, ServiceError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(base_url).map_err(|source| ServiceError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ServiceError::UnsupportedScheme(base_url.to_string()));
        }

        Ok(Self {
            http: Client::new(),
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<reqwest::Response> {
        let res = request
            .send()
            .await
            .with_context(|| format!("{operation} request failed"))?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ServiceError::UnexpectedStatus {
                operation,
                status,
                body,
            }
            .into());
        }
        Ok(res)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T> {
        self.send(operation, request)
            .await?
            .json()
            .await
            .with_context(|| format!("{operation} returned an unreadable body"))
    }
}

#[async_trait]
impl AdminService for HttpAdminService {
    async fn get_projects(&self) -> Result<Vec<Project>> {
        self.send_json("get_projects", self.http.get(self.url("/projects")))
            .await
    }

    async fn create_project(&self, payload: &ProjectPayload) -> Result<Project> {
        self.send_json(
            "create_project",
            self.http.post(self.url("/projects")).json(payload),
        )
        .await
    }

    async fn update_project(&self, id: ProjectId, payload: &ProjectPayload) -> Result<Project> {
        self.send_json(
            "update_project",
            self.http
                .put(self.url(&format!("/projects/{}", id.0)))
                .json(payload),
        )
        .await
    }

    async fn delete_project(&self, id: ProjectId) -> Result<()> {
        self.send(
            "delete_project",
            self.http.delete(self.url(&format!("/projects/{}", id.0))),
        )
        .await?;
        Ok(())
    }

    async fn get_tasks(&self) -> Result<Vec<Task>> {
        self.send_json("get_tasks", self.http.get(self.url("/tasks")))
            .await
    }

    async fn create_task(&self, payload: &TaskPayload) -> Result<Task> {
        self.send_json("create_task", self.http.post(self.url("/tasks")).json(payload))
            .await
    }

    async fn update_task(&self, id: TaskId, payload: &TaskPayload) -> Result<Task> {
        self.send_json(
            "update_task",
            self.http
                .put(self.url(&format!("/tasks/{}", id.0)))
                .json(payload),
        )
        .await
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        self.send(
            "delete_task",
            self.http.delete(self.url(&format!("/tasks/{}", id.0))),
        )
        .await?;
        Ok(())
    }

    async fn search_tasks(&self, term: &str) -> Result<Vec<Task>> {
        self.send_json(
            "search_tasks",
            self.http
                .get(self.url("/tasks/search"))
                .query(&[("keyword", term)]),
        )
        .await
    }

    async fn get_users(&self) -> Result<Vec<User>> {
        self.send_json("get_users", self.http.get(self.url("/users")))
            .await
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
