//! myFlix HTTP client
//!
//! Talks JSON to the myFlix REST API. Owns transport details only: URL
//! building, the bearer header, status mapping and body decoding.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{Credentials, Director, LoginResponse, Movie, ProfileUpdate, Registration, User};
use crate::ports::{MovieApi, SessionStore};

/// Default production API URL
pub const DEFAULT_BASE_URL: &str = "https://moviflex-a914bff79426.herokuapp.com";

/// Environment variable to override the API base URL.
pub const MYFLIX_API_URL_ENV: &str = "MYFLIX_API_URL";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Get the API base URL, checking environment variable first
pub fn get_base_url() -> String {
    std::env::var(MYFLIX_API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// Whether a request carries the session's bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    None,
    Bearer,
}

/// myFlix API client
pub struct HttpMovieApi {
    client: Client,
    base_url: Url,
    timeout: Option<Duration>,
    session: Arc<dyn SessionStore>,
}

impl HttpMovieApi {
    /// Create a client for `base_url` with the default timeout.
    pub fn new(base_url: &str, session: Arc<dyn SessionStore>) -> Result<Self> {
        Self::with_timeout(base_url, Some(DEFAULT_TIMEOUT), session)
    }

    /// Create a client using the `MYFLIX_API_URL` environment variable if
    /// set, otherwise the production API.
    pub fn from_env(session: Arc<dyn SessionStore>) -> Result<Self> {
        Self::new(&get_base_url(), session)
    }

    /// Create a client with an explicit timeout (`None` waits forever).
    pub fn with_timeout(
        base_url: &str,
        timeout: Option<Duration>,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            timeout,
            session,
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Build an endpoint URL; each segment is percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // parse_base_url rejects URLs that cannot carry a path
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.endpoint(segments))
    }

    /// Send a request and return the body as JSON
    ///
    /// Bearer requests read the token from the session store now, not at
    /// construction time. A missing token is sent as an empty bearer so
    /// the server decides.
    async fn execute(&self, request: RequestBuilder, auth: Auth) -> Result<JsonValue> {
        let request = match auth {
            Auth::Bearer => request.bearer_auth(self.session.token().unwrap_or_default()),
            Auth::None => request,
        };
        let request = request
            .build()
            .map_err(|e| Error::Transport(format!("Invalid request: {}", e)))?;

        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!(%method, %path, "movie API request");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !status.is_success() {
            warn!(%method, %path, status = status.as_u16(), body = %body, "movie API request failed");
            let error = Error::from_status(status.as_u16(), body);
            if auth == Auth::Bearer && error.is_unauthorized() {
                self.expire_session();
            }
            return Err(error);
        }

        Ok(parse_body(&body))
    }

    /// Send a request and decode the body into `T`
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        auth: Auth,
        what: &str,
    ) -> Result<T> {
        let value = self.execute(request, auth).await?;
        serde_json::from_value(value).map_err(|e| {
            warn!(error = %e, "failed to decode {}", what);
            Error::Decode(format!("{}: {}", what, e))
        })
    }

    /// The server rejected our token: drop the session so the next command
    /// asks for a fresh login.
    fn expire_session(&self) {
        if self.session.token().is_none() && self.session.user().is_none() {
            return;
        }
        info!("movie API rejected the session token, clearing session");
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "failed to clear expired session");
        }
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            let secs = self.timeout.map(|t| t.as_secs()).unwrap_or_default();
            Error::Transport(format!("Connection timed out after {} seconds", secs))
        } else if error.is_connect() {
            Error::Transport(format!("Unable to connect to {}", self.base_url()))
        } else {
            Error::Transport(format!("Request failed: {}", error))
        }
    }
}

/// Validate the configured base URL
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::Config("API base URL cannot be empty".to_string()));
    }
    let url = Url::parse(trimmed)
        .map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", trimmed, e)))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "API base URL must be an http(s) URL: {}",
            trimmed
        )));
    }
    Ok(url)
}

/// Interpret a 2xx body
///
/// Empty and `null` bodies become `{}`; a body that is not JSON is kept as
/// a JSON string (the delete endpoint answers in plain text).
fn parse_body(body: &str) -> JsonValue {
    if body.trim().is_empty() {
        return JsonValue::Object(Default::default());
    }
    match serde_json::from_str::<JsonValue>(body) {
        Ok(JsonValue::Null) => JsonValue::Object(Default::default()),
        Ok(value) => value,
        Err(_) => JsonValue::String(body.to_string()),
    }
}

#[async_trait]
impl MovieApi for HttpMovieApi {
    async fn register(&self, registration: &Registration) -> Result<User> {
        let request = self.request(Method::POST, &["users"]).json(registration);
        self.fetch(request, Auth::None, "registered user").await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let request = self.request(Method::POST, &["login"]).json(credentials);
        self.fetch(request, Auth::None, "login response").await
    }

    async fn list_movies(&self) -> Result<Vec<Movie>> {
        let request = self.request(Method::GET, &["movies"]);
        self.fetch(request, Auth::Bearer, "movie list").await
    }

    async fn get_movie_by_id(&self, id: &str) -> Result<Movie> {
        let request = self.request(Method::GET, &["movieid", id]);
        self.fetch(request, Auth::Bearer, "movie").await
    }

    async fn get_movie_by_title(&self, title: &str) -> Result<Movie> {
        let request = self.request(Method::GET, &["movie", title]);
        self.fetch(request, Auth::Bearer, "movie").await
    }

    async fn get_director(&self, name: &str) -> Result<Director> {
        let request = self.request(Method::GET, &["director", name]);
        self.fetch(request, Auth::Bearer, "director").await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let request = self.request(Method::GET, &["users"]);
        self.fetch(request, Auth::Bearer, "user list").await
    }

    async fn get_user(&self, id: &str) -> Result<User> {
        let request = self.request(Method::GET, &["user", id]);
        self.fetch(request, Auth::Bearer, "user").await
    }

    async fn add_favorite(&self, user_id: &str, movie_id: &str) -> Result<User> {
        let request = self
            .request(Method::POST, &["user", user_id, movie_id])
            .json(&serde_json::json!({}));
        self.fetch(request, Auth::Bearer, "updated user").await
    }

    async fn remove_favorite(&self, user_id: &str, movie_id: &str) -> Result<User> {
        let request = self.request(Method::DELETE, &["user", user_id, movie_id]);
        self.fetch(request, Auth::Bearer, "updated user").await
    }

    async fn edit_user(&self, id: &str, update: &ProfileUpdate) -> Result<User> {
        let request = self.request(Method::PUT, &["user", id]).json(update);
        self.fetch(request, Auth::Bearer, "updated user").await
    }

    async fn delete_user(&self, id: &str) -> Result<String> {
        let request = self
            .request(Method::DELETE, &["user"])
            .json(&serde_json::json!({ "id": id }));
        let value = self.execute(request, Auth::Bearer).await?;
        Ok(match value {
            JsonValue::String(text) => text,
            other => other.to_string(),
        })
    }
}
