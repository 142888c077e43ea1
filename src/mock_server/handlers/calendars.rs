//! Enterprise calendar handlers.

use std::collections::HashMap;

use axum::{http::StatusCode, response::Response};
use serde_json::Value;

use super::{entity, name_filter, not_found, odata_error, paged};
use crate::mock_server::state::MockState;
use crate::Calendar;

/// GET Calendars
pub fn list_calendars(state: &MockState, path: &str, params: &HashMap<String, String>) -> Response {
    let name = match name_filter(params) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let calendars: Vec<&Calendar> = state
        .calendars
        .values()
        .filter(|c| name.as_deref().map_or(true, |n| c.name.as_deref() == Some(n)))
        .collect();
    paged(state, path, &calendars, params)
}

/// GET Calendars('id')
pub fn get_calendar(state: &MockState, id: &str) -> Response {
    match state.calendars.get(id) {
        Some(calendar) => entity(calendar),
        None => not_found(&format!("Calendar '{id}'")),
    }
}

/// POST Calendars
pub fn add_calendar(state: &mut MockState, body: &Value) -> Response {
    let Some(name) = body.get("name").and_then(Value::as_str) else {
        return odata_error(StatusCode::BAD_REQUEST, "The calendar name is required");
    };
    if state
        .calendars
        .values()
        .any(|c| c.name.as_deref() == Some(name))
    {
        return odata_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("A calendar named '{name}' already exists"),
        );
    }
    let id = body.get("id").and_then(Value::as_str).map(str::to_string);
    let calendar = state.add_calendar(id, name);
    entity(&calendar)
}

/// DELETE Calendars('id')
pub fn delete_calendar(state: &mut MockState, id: &str) -> Response {
    match state.calendars.remove(id) {
        Some(_) => entity(&Value::Null),
        None => not_found(&format!("Calendar '{id}'")),
    }
}

/// POST Calendars('id')/CopyTo
pub fn copy_calendar(state: &mut MockState, id: &str, body: &Value) -> Response {
    if !state.calendars.contains_key(id) {
        return not_found(&format!("Calendar '{id}'"));
    }
    let Some(name) = body.get("name").and_then(Value::as_str) else {
        return odata_error(StatusCode::BAD_REQUEST, "The calendar name is required");
    };
    let copy = state.add_calendar(None, name);
    entity(&copy)
}
