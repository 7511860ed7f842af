//! Stateless HTTP layer for the todo API.
//!
//! `ApiClient` holds only the base URL and a reqwest client; it carries no
//! mutable state between calls. Each operation is a single request/response
//! round trip returning a typed result. Nothing here retries, backs off, or
//! touches navigation or storage: callers decide what a failure means.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::session::SessionToken;
use crate::types::{Credentials, Data, ErrorBody, LoginData, Registration, Todo, TodoEdit};

/// Fallback text when the server sends no usable `message` field.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Failure taxonomy for API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No connectivity, timeout, or other transport failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Non-2xx response. `message` comes from the `{ message }` body,
    /// falling back to [`GENERIC_ERROR_MESSAGE`].
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// 2xx response whose body is missing the expected fields.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl ApiError {
    /// The text a user-facing surface (alert, inline error, stderr) renders.
    ///
    /// Server-provided messages pass through verbatim; everything else falls
    /// back to the generic message. Details stay in the `Display` impl for
    /// logging.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Network(_) | ApiError::UnexpectedShape(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// Client for the todo API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client from config (base URL and timeout).
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: config.api_base().to_string(),
            http,
        })
    }

    /// `POST /api/auth/login` with the credential pair.
    ///
    /// Returns the bearer token from `{ data: { token } }`. Persisting it is
    /// the caller's job.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionToken, ApiError> {
        let url = format!("{}/api/auth/login", self.base_url);
        let response = self.http.post(&url).json(credentials).send().await?;
        let body: Data<LoginData> = parse_success(response).await?;
        Ok(SessionToken::new(body.data.token))
    }

    /// `POST /api/auth/register`. The success body is opaque and ignored;
    /// no token is issued (the user logs in afterwards).
    pub async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let url = format!("{}/api/auth/register", self.base_url);
        let response = self.http.post(&url).json(registration).send().await?;
        expect_success(response).await?;
        Ok(())
    }

    /// `GET /api/todos` with the bearer header.
    pub async fn list_todos(&self, token: &SessionToken) -> Result<Vec<Todo>, ApiError> {
        let url = format!("{}/api/todos", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, token.bearer())
            .send()
            .await?;
        let body: Data<Vec<Todo>> = parse_success(response).await?;
        Ok(body.data)
    }

    /// `GET /api/todos/{id}` with the bearer header.
    pub async fn fetch_todo(&self, token: &SessionToken, id: &str) -> Result<Todo, ApiError> {
        let url = format!("{}/api/todos/{id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, token.bearer())
            .send()
            .await?;
        let body: Data<Todo> = parse_success(response).await?;
        Ok(body.data)
    }

    /// `PUT /api/todos/{id}` with the bearer header and the two editable
    /// fields. Last writer wins; there is no version check.
    pub async fn update_todo(
        &self,
        token: &SessionToken,
        id: &str,
        edit: &TodoEdit,
    ) -> Result<Todo, ApiError> {
        let url = format!("{}/api/todos/{id}", self.base_url);
        let response = self
            .http
            .put(&url)
            .header(reqwest::header::AUTHORIZATION, token.bearer())
            .json(edit)
            .send()
            .await?;
        let body: Data<Todo> = parse_success(response).await?;
        Ok(body.data)
    }
}

/// Maps a non-2xx response to `ApiError::Server`, extracting the server's
/// `{ message }` body when present.
async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| GENERIC_ERROR_MESSAGE.to_string()),
        Err(_) => GENERIC_ERROR_MESSAGE.to_string(),
    };

    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}

/// Checks the status, then decodes the success body. A 2xx body that fails
/// to decode is an `UnexpectedShape`, not a network error.
async fn parse_success<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let response = expect_success(response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::UnexpectedShape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ApiClient {
        let config = Config {
            api_url: server.uri(),
            request_timeout_secs: 5,
        };
        ApiClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn login_returns_token_from_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(
                serde_json::json!({"username": "alice", "password": "secret"}),
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": {"token": "tok123"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let token = client_for(&server)
            .login(&Credentials {
                username: "alice".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(token.secret(), "tok123");
    }

    #[tokio::test]
    async fn login_rejection_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"message": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .login(&Credentials {
                username: "alice".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 401, .. }));
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[tokio::test]
    async fn error_without_message_falls_back_to_generic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .login(&Credentials {
                username: "a".to_string(),
                password: "b".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn success_with_missing_fields_is_unexpected_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {}})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .login(&Credentials {
                username: "a".to_string(),
                password: "b".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedShape(_)));
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn register_ignores_opaque_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_json(serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "secret"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .register(&Registration {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn fetch_todo_sends_bearer_and_decodes_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/todos/42"))
            .and(header("authorization", "Bearer tok123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"_id": "42", "title": "Buy milk", "description": "2%"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let todo = client_for(&server)
            .fetch_todo(&SessionToken::new("tok123"), "42")
            .await
            .unwrap();
        assert_eq!(todo.id, "42");
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, "2%");
    }

    #[tokio::test]
    async fn update_todo_puts_both_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/todos/42"))
            .and(header("authorization", "Bearer tok123"))
            .and(body_json(serde_json::json!({
                "title": "Buy oat milk",
                "description": "2%"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"_id": "42", "title": "Buy oat milk", "description": "2%"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let todo = client_for(&server)
            .update_todo(
                &SessionToken::new("tok123"),
                "42",
                &TodoEdit {
                    title: "Buy oat milk".to_string(),
                    description: "2%".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(todo.title, "Buy oat milk");
    }

    /// Fetch-then-save without editing sends exactly the fetched fields.
    #[tokio::test]
    async fn fetch_then_save_round_trips_fields() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "data": {"_id": "42", "title": "Buy milk", "description": "2%"}
        });
        Mock::given(method("GET"))
            .and(path("/api/todos/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/todos/42"))
            .and(body_json(
                serde_json::json!({"title": "Buy milk", "description": "2%"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = SessionToken::new("tok123");
        let fetched = client.fetch_todo(&token, "42").await.unwrap();
        let saved = client
            .update_todo(&token, "42", &TodoEdit::from_todo(&fetched))
            .await
            .unwrap();
        assert_eq!(saved, fetched);
    }

    /// Two identical updates leave the server-observed state identical.
    #[tokio::test]
    async fn double_update_is_idempotent() {
        let server = MockServer::start().await;
        let edit = TodoEdit {
            title: "Buy oat milk".to_string(),
            description: "barista".to_string(),
        };
        Mock::given(method("PUT"))
            .and(path("/api/todos/42"))
            .and(body_json(serde_json::to_value(&edit).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"_id": "42", "title": "Buy oat milk", "description": "barista"}
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = SessionToken::new("tok123");
        let first = client.update_todo(&token, "42", &edit).await.unwrap();
        let second = client.update_todo(&token, "42", &edit).await.unwrap();
        assert_eq!(first, second);
    }
}
