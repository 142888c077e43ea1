//! Project Server API client.
//!
//! Low-level HTTP client that handles headers, credentials and raw requests.
//! The typed entity graph is built on top of it through
//! [`Queryable`](crate::Queryable) handles.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use url::Url;

use crate::config::ProjectConfig;
use crate::error::{ProjectError, Result};

const USER_AGENT: &str = concat!("projectserver/", env!("CARGO_PKG_VERSION"));

/// Media type for OData verbose JSON, used for both requests and responses.
pub const ODATA_VERBOSE: &str = "application/json;odata=verbose";

/// Low-level Project Server API client.
///
/// Handles credentials and HTTP requests. Entity operations are reached
/// through the root accessors (`projects()`, `calendars()`, ...) which return
/// lazily evaluated handles.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use projectserver::{ProjectClient, ProjectConfig};
///
/// # fn example() -> projectserver::Result<()> {
/// // Create from environment variables
/// let client = ProjectClient::from_env()?;
///
/// // Or configure manually
/// let client = ProjectClient::with_config(
///     ProjectConfig::new("https://contoso.sharepoint.com/sites/pwa").with_token("token"),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ProjectClient {
    http: Client,
    base_url: Arc<Url>,
    token: Option<Arc<str>>,
    headers: Arc<HeaderMap>,
}

impl std::fmt::Debug for ProjectClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ProjectClient {
    /// Create a client from environment variables.
    ///
    /// Uses `PROJECT_SERVER_URL` for the site URL and optionally
    /// `PROJECT_SERVER_TOKEN` and `PROJECT_SERVER_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if `PROJECT_SERVER_URL` is not set or invalid.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ProjectConfig::from_env()?)
    }

    /// Create an unauthenticated client for the given site URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ProjectConfig::new(base_url))
    }

    /// Create a client from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or a configured header is invalid.
    pub fn with_config(config: ProjectConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(ProjectError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(normalize_base_url(&config.base_url)?),
            token: config.token.map(Arc::from),
            headers: Arc::new(header_map(&config.headers)?),
        })
    }

    /// Derive a client with additional headers and optionally another base URL.
    ///
    /// The derived client shares the connection pool and credentials with
    /// `self`; headers given here are added to (and override) the existing ones.
    ///
    /// # Errors
    ///
    /// Returns an error if a header or the base URL is invalid.
    pub fn configure(&self, headers: &[(String, String)], base_url: Option<&str>) -> Result<Self> {
        let mut merged = (*self.headers).clone();
        for (name, value) in header_map(headers)? {
            if let Some(name) = name {
                merged.insert(name, value);
            }
        }

        let base_url = match base_url {
            Some(url) => Arc::new(normalize_base_url(url)?),
            None => self.base_url.clone(),
        };

        Ok(Self {
            http: self.http.clone(),
            base_url,
            token: self.token.clone(),
            headers: Arc::new(merged),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a relative API path against the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<Response> {
        let url = self.url_for(path)?;
        let request = self.request(reqwest::Method::GET, url.clone()).query(query);
        self.send(request, &url).await
    }

    /// Make a GET request against an absolute URL (e.g. a next-page link).
    #[tracing::instrument(skip(self))]
    pub async fn get_absolute(&self, url: &str) -> Result<Response> {
        let url = Url::parse(url)?;
        let request = self.request(reqwest::Method::GET, url.clone());
        self.send(request, &url).await
    }

    /// Make a POST request, with a JSON body if one is given.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> Result<Response> {
        self.post_with_method(path, body, None).await
    }

    /// Update an entity in place (POST tunnelled as MERGE).
    #[tracing::instrument(skip(self, body))]
    pub async fn merge<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        self.post_with_method(path, Some(body), Some("MERGE")).await
    }

    /// Delete an entity (POST tunnelled as DELETE).
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.post_with_method::<()>(path, None, Some("DELETE")).await
    }

    async fn post_with_method<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        method_override: Option<&'static str>,
    ) -> Result<Response> {
        let url = self.url_for(path)?;

        let mut request = self
            .request(reqwest::Method::POST, url.clone())
            .header(CONTENT_TYPE, ODATA_VERBOSE);

        if let Some(method) = method_override {
            request = request
                .header("X-HTTP-Method", method)
                .header("IF-Match", "*");
        }

        request = match body {
            Some(body) => request.body(serde_json::to_vec(body)?),
            None => request.header(reqwest::header::CONTENT_LENGTH, 0),
        };

        self.send(request, &url).await
    }

    fn request(&self, method: reqwest::Method, url: Url) -> RequestBuilder {
        let mut request = self
            .http
            .request(method, url)
            .headers((*self.headers).clone())
            .header(ACCEPT, ODATA_VERBOSE);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        request
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response> {
        let response = request.send().await.map_err(ProjectError::HttpError)?;
        Self::check_response(response, url).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response, url: &Url) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(ProjectError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;

        if status.as_u16() == 404 {
            return Err(ProjectError::NotFound {
                url: url.to_string(),
                message,
            });
        }

        Err(ProjectError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if body.trim().is_empty() {
            return format!("HTTP {status}");
        }

        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(json) => odata_error_message(&json).unwrap_or(body),
            Err(_) => body,
        }
    }
}

/// Pull the human-readable message out of an OData error envelope.
fn odata_error_message(json: &serde_json::Value) -> Option<String> {
    let error = json.get("error").or_else(|| json.get("odata.error"));

    if let Some(error) = error {
        if let Some(msg) = error.pointer("/message/value").and_then(|m| m.as_str()) {
            return Some(msg.to_string());
        }
        if let Some(msg) = error.get("message").and_then(|m| m.as_str()) {
            return Some(msg.to_string());
        }
        if let Some(msg) = error.as_str() {
            return Some(msg.to_string());
        }
    }

    json.get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    // Ensure base URL ends with / so joins keep the site path
    let base_url = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    };
    Ok(Url::parse(&base_url)?)
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ProjectError::ConfigInvalid(format!("invalid header name '{name}'")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| ProjectError::ConfigInvalid(format!("invalid value for header '{name}'")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
