//! Client for communication with the Taskboard backend

use std::sync::Arc;
use std::time::Duration;

use api_protocol::{
    auth_paths, error_message, project_path, projects_path, task_path, task_toggle_path,
    tasks_path, LoginRequest, LoginResponse, ProjectRequest, ProjectResponse, RegisterRequest,
    TaskRequest, TaskResponse,
};
use reqwest::{header::CONTENT_TYPE, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use session::SessionStorage;
use tracing::{debug, warn};

use crate::{
    default_status_message, fallback_status_message, unreachable_message, ApiError, ApiResult,
};

/// Client for the Taskboard REST backend
///
/// The bearer token is read from session storage on every request, so a
/// login or logout performed through the same storage takes effect
/// immediately.
#[derive(Clone)]
pub struct ApiClient {
    /// API base URL, without trailing slash
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
    /// Where the bearer token lives
    storage: Arc<dyn SessionStorage>,
}

impl ApiClient {
    /// Create a new client without a request timeout
    pub fn new(base_url: &str, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
            storage,
        }
    }

    /// Create a new client whose requests give up after `timeout`
    pub fn with_timeout(
        base_url: &str,
        storage: Arc<dyn SessionStorage>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            storage,
        })
    }

    /// API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn token(&self) -> Option<String> {
        match session::stored_token(self.storage.as_ref()) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read token from session storage");
                None
            }
        }
    }

    /// Perform a request and decode the JSON body, if any
    ///
    /// Returns `Ok(None)` for 204 No Content and other empty bodies.
    async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> ApiResult<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut builder = self
            .http_client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!(method = %method, endpoint = %endpoint, "Sending request");

        let response = builder.send().await.map_err(|e| {
            debug!(error = %e, timeout = e.is_timeout(), "Request failed before a response");
            ApiError::Network(unreachable_message(&self.base_url))
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = extract_error(status, &text);
            debug!(status = status.as_u16(), message = %message, "Request rejected");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Perform a request whose success must carry a body
    async fn call<T, B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(method, endpoint, body)
            .await?
            .ok_or_else(|| ApiError::Decode(format!("empty response from {}", endpoint)))
    }

    /// Perform a request whose success body is ignored
    async fn call_empty<B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.request::<serde_json::Value, B>(method, endpoint, body)
            .await
            .map(|_| ())
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange credentials for a token
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.call(Method::POST, auth_paths::LOGIN, Some(request)).await
    }

    /// Create an account and get a token for it
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<LoginResponse> {
        self.call(Method::POST, auth_paths::REGISTER, Some(request))
            .await
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// List all projects of the signed-in user
    pub async fn list_projects(&self) -> ApiResult<Vec<ProjectResponse>> {
        self.call(Method::GET, &projects_path(), None::<&()>).await
    }

    /// Get a single project
    pub async fn get_project(&self, project_id: i64) -> ApiResult<ProjectResponse> {
        self.call(Method::GET, &project_path(project_id), None::<&()>)
            .await
    }

    /// Create a project
    pub async fn create_project(&self, request: &ProjectRequest) -> ApiResult<ProjectResponse> {
        self.call(Method::POST, &projects_path(), Some(request)).await
    }

    /// Replace title and description of a project
    pub async fn update_project(
        &self,
        project_id: i64,
        request: &ProjectRequest,
    ) -> ApiResult<ProjectResponse> {
        self.call(Method::PUT, &project_path(project_id), Some(request))
            .await
    }

    /// Delete a project together with its tasks
    pub async fn delete_project(&self, project_id: i64) -> ApiResult<()> {
        self.call_empty(Method::DELETE, &project_path(project_id), None::<&()>)
            .await
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    /// List the tasks of a project
    pub async fn list_tasks(&self, project_id: i64) -> ApiResult<Vec<TaskResponse>> {
        self.call(Method::GET, &tasks_path(project_id), None::<&()>)
            .await
    }

    /// Create a task in a project
    pub async fn create_task(
        &self,
        project_id: i64,
        request: &TaskRequest,
    ) -> ApiResult<TaskResponse> {
        self.call(Method::POST, &tasks_path(project_id), Some(request))
            .await
    }

    /// Replace title, description and due date of a task
    pub async fn update_task(
        &self,
        project_id: i64,
        task_id: i64,
        request: &TaskRequest,
    ) -> ApiResult<TaskResponse> {
        self.call(Method::PUT, &task_path(project_id, task_id), Some(request))
            .await
    }

    /// Flip the completion flag of a task on the server
    pub async fn toggle_task(&self, project_id: i64, task_id: i64) -> ApiResult<TaskResponse> {
        self.call(
            Method::PATCH,
            &task_toggle_path(project_id, task_id),
            None::<&()>,
        )
        .await
    }

    /// Delete a task
    pub async fn delete_task(&self, project_id: i64, task_id: i64) -> ApiResult<()> {
        self.call_empty(Method::DELETE, &task_path(project_id, task_id), None::<&()>)
            .await
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Check that the backend answers at all
    ///
    /// Any HTTP response counts, including errors: the API root usually has
    /// no handler and authentication may be required.
    pub async fn health_check(&self) -> ApiResult<StatusCode> {
        let response = self
            .http_client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|_| ApiError::Network(unreachable_message(&self.base_url)))?;
        Ok(response.status())
    }
}

/// Turns an error response into the message shown to the user
fn extract_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Null) | Err(_) => fallback_status_message(status),
        Ok(value) => error_message(&value).unwrap_or_else(|| default_status_message(status)),
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Mutex;

    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode as AxumStatus},
        response::IntoResponse,
        routing::{get, patch, post},
        Json, Router,
    };
    use chrono::NaiveDate;
    use session::{keys, MemorySessionStorage};

    use super::*;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr, storage: Arc<MemorySessionStorage>) -> ApiClient {
        ApiClient::new(&format!("http://{}/api/", addr), storage)
    }

    fn task_json(project_id: i64, task_id: i64, completed: bool) -> serde_json::Value {
        serde_json::json!({
            "id": task_id,
            "title": "Testing",
            "description": null,
            "dueDate": "2024-03-15",
            "completed": completed,
            "createdAt": "2024-01-10T08:00:00",
            "projectId": project_id
        })
    }

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(
            "http://localhost:8080/api/",
            Arc::new(MemorySessionStorage::new()),
        );
        assert_eq!(client.base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn test_extract_error_shapes() {
        assert_eq!(
            extract_error(StatusCode::BAD_REQUEST, r#"{"message":"Title is required"}"#),
            "Title is required"
        );
        assert_eq!(
            extract_error(StatusCode::BAD_REQUEST, r#""Bad credentials""#),
            "Bad credentials"
        );
        assert_eq!(
            extract_error(StatusCode::FORBIDDEN, r#"{"error":"Forbidden"}"#),
            "Forbidden"
        );
        assert_eq!(
            extract_error(StatusCode::BAD_REQUEST, r#"{"title":"Title is required"}"#),
            "Title is required"
        );
        assert_eq!(
            extract_error(StatusCode::CONFLICT, "{}"),
            "Error 409: Conflict"
        );
    }

    #[test]
    fn test_extract_error_unparsable_body() {
        assert_eq!(
            extract_error(StatusCode::UNAUTHORIZED, ""),
            "Invalid email or password"
        );
        assert_eq!(
            extract_error(StatusCode::NOT_FOUND, "<html>nope</html>"),
            "Endpoint not found"
        );
        assert_eq!(
            extract_error(StatusCode::INTERNAL_SERVER_ERROR, "null"),
            "Server error. Check that the backend is running."
        );
        assert_eq!(
            extract_error(StatusCode::SERVICE_UNAVAILABLE, "down"),
            "Error 503: Service Unavailable"
        );
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached_when_stored() {
        let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::default();
        let recorder = seen.clone();
        let app = Router::new().route(
            "/api/projects",
            get(move |headers: HeaderMap| {
                let recorder = recorder.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    recorder.lock().unwrap().push(auth);
                    Json(serde_json::json!([]))
                }
            }),
        );
        let addr = serve(app).await;
        let storage = Arc::new(MemorySessionStorage::new());
        let client = client_for(addr, storage.clone());

        assert!(client.list_projects().await.unwrap().is_empty());
        storage.set(keys::TOKEN, "jwt_abc").unwrap();
        client.list_projects().await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], None);
        assert_eq!(seen[1].as_deref(), Some("Bearer jwt_abc"));
    }

    #[tokio::test]
    async fn test_server_message_is_surfaced() {
        let app = Router::new().route(
            "/api/projects/:id",
            get(|Path(id): Path<i64>| async move {
                (
                    AxumStatus::NOT_FOUND,
                    Json(serde_json::json!({
                        "message": format!("Project not found with id: {}", id)
                    })),
                )
            }),
        );
        let addr = serve(app).await;
        let client = client_for(addr, Arc::new(MemorySessionStorage::new()));

        let err = client.get_project(9).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 404,
                message: "Project not found with id: 9".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_plain_text_401_uses_fallback() {
        let app = Router::new().route(
            "/api/auth/login",
            post(|| async { (AxumStatus::UNAUTHORIZED, "denied").into_response() }),
        );
        let addr = serve(app).await;
        let client = client_for(addr, Arc::new(MemorySessionStorage::new()));

        let err = client
            .login(&LoginRequest {
                email: "a@b.c".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_no_content_is_empty_result() {
        let app = Router::new().route(
            "/api/projects/:id",
            axum::routing::delete(|| async { AxumStatus::NO_CONTENT }),
        );
        let addr = serve(app).await;
        let client = client_for(addr, Arc::new(MemorySessionStorage::new()));

        client.delete_project(3).await.unwrap();
    }

    #[tokio::test]
    async fn test_task_body_and_toggle() {
        let app = Router::new()
            .route(
                "/api/projects/:id/tasks",
                post(
                    |Path(project_id): Path<i64>, Json(request): Json<TaskRequest>| async move {
                        let mut body = task_json(project_id, 1, false);
                        body["title"] = request.title.into();
                        body["dueDate"] = request.due_date.to_string().into();
                        (AxumStatus::CREATED, Json(body))
                    },
                ),
            )
            .route(
                "/api/projects/:id/tasks/:task_id/toggle",
                patch(|Path((project_id, task_id)): Path<(i64, i64)>| async move {
                    Json(task_json(project_id, task_id, true))
                }),
            );
        let addr = serve(app).await;
        let client = client_for(addr, Arc::new(MemorySessionStorage::new()));
        let due = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let created = client
            .create_task(4, &TaskRequest::new("Ship it", None, due))
            .await
            .unwrap();
        assert_eq!(created.title, "Ship it");
        assert_eq!(created.due_date, due);
        assert_eq!(created.project_id, 4);

        let toggled = client.toggle_task(4, 1).await.unwrap();
        assert!(toggled.completed);
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let app = Router::new().route(
            "/api/projects",
            get(|| async { Json(serde_json::json!({"unexpected": true})) }),
        );
        let addr = serve(app).await;
        let client = client_for(addr, Arc::new(MemorySessionStorage::new()));

        assert!(matches!(
            client.list_projects().await,
            Err(ApiError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(addr, Arc::new(MemorySessionStorage::new()));
        let err = client.list_projects().await.unwrap_err();

        match err {
            ApiError::Network(message) => {
                assert!(message.starts_with("Unable to reach the server"));
                assert!(message.contains(&addr.to_string()));
            }
            other => panic!("expected network error, got {other:?}"),
        }
        assert!(client.health_check().await.is_err());
    }

    #[tokio::test]
    async fn test_health_check_accepts_any_status() {
        let addr = serve(Router::new()).await;
        let client = client_for(addr, Arc::new(MemorySessionStorage::new()));

        assert_eq!(client.health_check().await.unwrap(), StatusCode::NOT_FOUND);
    }
}
