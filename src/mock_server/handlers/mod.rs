//! HTTP request handlers for the mock server.
//!
//! Every API request lands on one of two axum handlers, [`api_get`] and
//! [`api_post`]. They parse the OData path into segments and dispatch on
//! its shape, where a segment with arguments (`Projects('id')`,
//! `publish(true)`) reads as `Name(*)`.

pub mod calendars;
pub mod projects;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// Prefix of every API route.
pub const API_PREFIX: &str = "/_api/ProjectServer";

/// A parsed OData resource path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// One entry per segment: the name, or `Name(*)` when it has arguments.
    pub shape: Vec<String>,
    /// Arguments of each segment that had parentheses, in order.
    pub args: Vec<String>,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let mut shape = Vec::new();
        let mut args = Vec::new();

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            match segment.split_once('(') {
                Some((name, rest)) => {
                    let arg = rest.strip_suffix(')').unwrap_or(rest);
                    shape.push(format!("{name}(*)"));
                    args.push(unquote(arg));
                }
                None => shape.push(segment.to_string()),
            }
        }

        Self { shape, args }
    }

    /// The argument of the `index`-th parenthesised segment.
    pub fn arg(&self, index: usize) -> &str {
        self.args.get(index).map(String::as_str).unwrap_or_default()
    }
}

fn unquote(arg: &str) -> String {
    match arg.strip_prefix('\'').and_then(|a| a.strip_suffix('\'')) {
        Some(inner) => inner.replace("''", "'"),
        None => arg.to_string(),
    }
}

/// Wrap a single entity in the verbose `{"d": ...}` envelope.
pub fn entity<T: Serialize>(item: &T) -> Response {
    (StatusCode::OK, Json(json!({ "d": item }))).into_response()
}

/// Wrap a page of entities, with a next link when more remain.
pub fn collection<T: Serialize>(items: &[T], next: Option<String>) -> Response {
    let mut d = json!({ "results": items });
    if let Some(next) = next {
        d["__next"] = Value::String(next);
    }
    (StatusCode::OK, Json(json!({ "d": d }))).into_response()
}

/// An OData error envelope.
pub fn odata_error(status: StatusCode, message: &str) -> Response {
    let code = match status {
        StatusCode::NOT_FOUND => "-2147024894, System.IO.FileNotFoundException",
        StatusCode::UNAUTHORIZED => "-2147024891, System.UnauthorizedAccessException",
        StatusCode::BAD_REQUEST => "-1, Microsoft.SharePoint.Client.InvalidClientQueryException",
        _ => "-1, Microsoft.SharePoint.SPException",
    };
    (
        status,
        Json(json!({
            "error": {
                "code": code,
                "message": { "lang": "en-US", "value": message }
            }
        })),
    )
        .into_response()
}

pub fn not_found(what: &str) -> Response {
    odata_error(StatusCode::NOT_FOUND, &format!("{what} not found"))
}

/// Select one page of `items` according to `$skip` and `$top`.
pub fn paged<T: Serialize>(
    state: &MockState,
    path: &str,
    items: &[T],
    params: &HashMap<String, String>,
) -> Response {
    let number = |key: &str| params.get(key).and_then(|v| v.parse::<usize>().ok());
    let skip = number("$skip").unwrap_or(0);
    let top = number("$top");

    let wanted = top.unwrap_or(usize::MAX).min(items.len().saturating_sub(skip));
    let count = wanted.min(state.page_size);
    let start = skip.min(items.len());
    let page = &items[start..start + count];

    let next = (wanted > count).then(|| {
        let mut link = format!(
            "{}{}/{}?$skip={}",
            state.base_url,
            API_PREFIX,
            path,
            skip + count
        );
        if let Some(top) = top {
            link.push_str(&format!("&$top={}", top - count));
        }
        link
    });

    collection(page, next)
}

/// The value of an `Name eq 'x'` filter, the only form the server supports.
pub fn name_filter(params: &HashMap<String, String>) -> Result<Option<String>, Response> {
    let Some(filter) = params.get("$filter") else {
        return Ok(None);
    };
    filter
        .trim()
        .strip_prefix("Name eq ")
        .map(|value| Some(unquote(value.trim())))
        .ok_or_else(|| {
            odata_error(
                StatusCode::BAD_REQUEST,
                &format!("unsupported filter expression: {filter}"),
            )
        })
}

fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(ref token) = state.required_token else {
        return Ok(());
    };
    let expected = format!("Bearer {token}");
    let provided = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if provided == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(odata_error(StatusCode::UNAUTHORIZED, "Access denied"))
    }
}

/// GET /_api/ProjectServer/{path}
pub async fn api_get(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(path): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    // Reading a queue job advances it, so even GET takes the write lock
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }

    let route = Route::parse(&path);
    let shape: Vec<&str> = route.shape.iter().map(String::as_str).collect();

    match shape.as_slice() {
        ["Projects"] => projects::list_projects(&state, &path, &params),
        ["Projects(*)"] => projects::get_project(&state, route.arg(0)),
        ["Projects(*)", "Draft"] => projects::get_draft(&state, route.arg(0)),
        ["Projects(*)", "Tasks"] => projects::list_tasks(&state, &path, route.arg(0), false, &params),
        ["Projects(*)", "Draft", "Tasks"] => {
            projects::list_tasks(&state, &path, route.arg(0), true, &params)
        }
        ["Projects(*)", "Tasks(*)"] => projects::get_task(&state, route.arg(0), route.arg(1), false),
        ["Projects(*)", "Draft", "Tasks(*)"] => {
            projects::get_task(&state, route.arg(0), route.arg(1), true)
        }
        ["Projects(*)", "QueueJobs(*)"] => {
            projects::poll_job(&mut state, route.arg(0), route.arg(1))
        }
        ["Calendars"] => calendars::list_calendars(&state, &path, &params),
        ["Calendars(*)"] => calendars::get_calendar(&state, route.arg(0)),
        _ => not_found(&format!("Resource '{path}'")),
    }
}

/// POST /_api/ProjectServer/{path}, honouring `X-HTTP-Method` tunnelling.
pub async fn api_post(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(path): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }

    let method = headers
        .get("X-HTTP-Method")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("POST")
        .to_ascii_uppercase();

    let body: Value = if body.is_empty() {
        Value::Null
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(e) => {
                return odata_error(StatusCode::BAD_REQUEST, &format!("invalid JSON body: {e}"))
            }
        }
    };

    let route = Route::parse(&path);
    let shape: Vec<&str> = route.shape.iter().map(String::as_str).collect();

    match (method.as_str(), shape.as_slice()) {
        ("POST", ["Projects"]) => projects::add_project(&mut state, &body),
        ("DELETE", ["Projects(*)"]) => projects::delete_project(&mut state, route.arg(0)),
        ("POST", ["Projects(*)", "checkOut(*)"]) => projects::check_out(&mut state, route.arg(0)),
        ("MERGE", ["Projects(*)", "Draft"]) => {
            projects::update_draft(&mut state, route.arg(0), &body)
        }
        ("POST", ["Projects(*)", "Draft", "Tasks"]) => {
            projects::add_draft_task(&mut state, route.arg(0), &body)
        }
        ("DELETE", ["Projects(*)", "Draft", "Tasks(*)"]) => {
            projects::delete_draft_task(&mut state, route.arg(0), route.arg(1))
        }
        ("POST", ["Projects(*)", "Draft", "publish(*)"]) => {
            projects::publish(&mut state, route.arg(0), route.arg(1) == "true")
        }
        ("POST", ["Projects(*)", "Draft", "checkIn(*)"]) => {
            projects::check_in(&mut state, route.arg(0))
        }
        ("POST", ["Projects(*)", "QueueJobs(*)", "Cancel"]) => {
            projects::cancel_job(&mut state, route.arg(0), route.arg(1))
        }
        ("POST", ["Calendars"]) => calendars::add_calendar(&mut state, &body),
        ("DELETE", ["Calendars(*)"]) => calendars::delete_calendar(&mut state, route.arg(0)),
        ("POST", ["Calendars(*)", "CopyTo"]) => {
            calendars::copy_calendar(&mut state, route.arg(0), &body)
        }
        _ => not_found(&format!("Resource '{path}' for {method}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parse_shapes_and_args() {
        let route = Route::parse("Projects('abc')/Draft/publish(true)");
        assert_eq!(route.shape, vec!["Projects(*)", "Draft", "publish(*)"]);
        assert_eq!(route.arg(0), "abc");
        assert_eq!(route.arg(1), "true");
        assert_eq!(route.arg(2), "");
    }

    #[test]
    fn test_route_unescapes_quotes() {
        let route = Route::parse("Calendars('O''Brien')");
        assert_eq!(route.arg(0), "O'Brien");
    }

    #[test]
    fn test_name_filter() {
        let mut params = HashMap::new();
        assert_eq!(name_filter(&params).ok(), Some(None));

        params.insert("$filter".to_string(), "Name eq 'Plan'".to_string());
        assert_eq!(name_filter(&params).ok(), Some(Some("Plan".to_string())));

        params.insert("$filter".to_string(), "PercentComplete gt 5".to_string());
        assert!(name_filter(&params).is_err());
    }
}
