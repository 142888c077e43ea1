//! Project, draft, task and queue job handlers.

use std::collections::HashMap;

use axum::{http::StatusCode, response::Response};
use serde_json::Value;
use uuid::Uuid;

use super::{entity, name_filter, not_found, odata_error, paged};
use crate::mock_server::fixtures::Fixtures;
use crate::mock_server::state::MockState;
use crate::Project;

fn text(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

/// GET Projects
pub fn list_projects(state: &MockState, path: &str, params: &HashMap<String, String>) -> Response {
    let name = match name_filter(params) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let projects: Vec<&Project> = state
        .projects
        .values()
        .map(|entry| &entry.project)
        .filter(|p| name.as_deref().map_or(true, |n| p.name.as_deref() == Some(n)))
        .collect();
    paged(state, path, &projects, params)
}

/// GET Projects('id')
pub fn get_project(state: &MockState, id: &str) -> Response {
    match state.get_project(id) {
        Some(entry) => entity(&entry.project),
        None => not_found(&format!("Project '{id}'")),
    }
}

/// GET Projects('id')/Draft
pub fn get_draft(state: &MockState, id: &str) -> Response {
    match state.get_project(id) {
        Some(entry) if entry.draft_tasks.is_some() => entity(&entry.project),
        Some(_) => odata_error(
            StatusCode::BAD_REQUEST,
            &format!("Project '{id}' is not checked out"),
        ),
        None => not_found(&format!("Project '{id}'")),
    }
}

/// GET Projects('id')/Tasks and Projects('id')/Draft/Tasks
pub fn list_tasks(
    state: &MockState,
    path: &str,
    id: &str,
    draft: bool,
    params: &HashMap<String, String>,
) -> Response {
    let Some(entry) = state.get_project(id) else {
        return not_found(&format!("Project '{id}'"));
    };
    let tasks = if draft {
        match entry.draft_tasks {
            Some(ref tasks) => tasks,
            None => {
                return odata_error(
                    StatusCode::BAD_REQUEST,
                    &format!("Project '{id}' is not checked out"),
                )
            }
        }
    } else {
        &entry.tasks
    };
    paged(state, path, tasks, params)
}

/// GET a single published or draft task.
pub fn get_task(state: &MockState, id: &str, task_id: &str, draft: bool) -> Response {
    let tasks = state.get_project(id).and_then(|entry| {
        if draft {
            entry.draft_tasks.as_ref()
        } else {
            Some(&entry.tasks)
        }
    });
    match tasks.and_then(|tasks| tasks.iter().find(|t| t.id == task_id)) {
        Some(task) => entity(task),
        None => not_found(&format!("Task '{task_id}'")),
    }
}

/// POST Projects
pub fn add_project(state: &mut MockState, body: &Value) -> Response {
    let Some(name) = text(body, "name") else {
        return odata_error(StatusCode::BAD_REQUEST, "The project name is required");
    };
    if state
        .projects
        .values()
        .any(|entry| entry.project.name.as_deref() == Some(name.as_str()))
    {
        return odata_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("A project named '{name}' already exists"),
        );
    }
    let project = state.add_project(text(body, "id"), &name, text(body, "description"));
    entity(&project)
}

/// DELETE Projects('id')
pub fn delete_project(state: &mut MockState, id: &str) -> Response {
    match state.delete_project(id) {
        Some(job) => entity(&job),
        None => not_found(&format!("Project '{id}'")),
    }
}

/// POST Projects('id')/checkOut()
pub fn check_out(state: &mut MockState, id: &str) -> Response {
    match state.check_out(id) {
        Some(project) => entity(&project),
        None => not_found(&format!("Project '{id}'")),
    }
}

/// MERGE Projects('id')/Draft
pub fn update_draft(state: &mut MockState, id: &str, body: &Value) -> Response {
    let Some(entry) = state.get_project_mut(id) else {
        return not_found(&format!("Project '{id}'"));
    };
    if entry.draft_tasks.is_none() {
        return odata_error(
            StatusCode::BAD_REQUEST,
            &format!("Project '{id}' is not checked out"),
        );
    }
    if let Some(name) = text(body, "Name") {
        entry.project.name = Some(name);
    }
    if let Some(description) = text(body, "Description") {
        entry.project.description = Some(description);
    }
    let job = state.enqueue(id);
    entity(&job)
}

/// POST Projects('id')/Draft/Tasks
pub fn add_draft_task(state: &mut MockState, id: &str, body: &Value) -> Response {
    let Some(entry) = state.get_project_mut(id) else {
        return not_found(&format!("Project '{id}'"));
    };
    let Some(ref mut tasks) = entry.draft_tasks else {
        return odata_error(
            StatusCode::BAD_REQUEST,
            &format!("Project '{id}' is not checked out"),
        );
    };
    let Some(name) = text(body, "name") else {
        return odata_error(StatusCode::BAD_REQUEST, "The task name is required");
    };

    let task_id = text(body, "id").unwrap_or_else(|| Uuid::new_v4().to_string());
    let duration = text(body, "duration").unwrap_or_else(|| "1d".to_string());
    let mut task = Fixtures::task(&task_id, &name, &duration);
    task.notes = text(body, "notes");
    task.is_manual = body.get("isManual").and_then(Value::as_bool).or(task.is_manual);
    tasks.push(task.clone());
    entity(&task)
}

/// DELETE Projects('id')/Draft/Tasks('task')
pub fn delete_draft_task(state: &mut MockState, id: &str, task_id: &str) -> Response {
    let tasks = state
        .get_project_mut(id)
        .and_then(|entry| entry.draft_tasks.as_mut());
    let Some(tasks) = tasks else {
        return not_found(&format!("Draft of project '{id}'"));
    };
    let before = tasks.len();
    tasks.retain(|t| t.id != task_id);
    if tasks.len() == before {
        return not_found(&format!("Task '{task_id}'"));
    }
    entity(&Value::Null)
}

/// POST Projects('id')/Draft/publish(bool)
pub fn publish(state: &mut MockState, id: &str, check_in: bool) -> Response {
    match state.publish(id, check_in) {
        Some(job) => entity(&job),
        None => not_checked_out(state, id),
    }
}

/// POST Projects('id')/Draft/checkIn(bool)
pub fn check_in(state: &mut MockState, id: &str) -> Response {
    match state.check_in(id) {
        Some(job) => entity(&job),
        None => not_checked_out(state, id),
    }
}

fn not_checked_out(state: &MockState, id: &str) -> Response {
    if state.get_project(id).is_some() {
        odata_error(
            StatusCode::BAD_REQUEST,
            &format!("Project '{id}' is not checked out"),
        )
    } else {
        not_found(&format!("Project '{id}'"))
    }
}

/// GET Projects('id')/QueueJobs('job')
pub fn poll_job(state: &mut MockState, id: &str, job_id: &str) -> Response {
    match state.poll_job(id, job_id) {
        Some(job) => entity(&job),
        None => not_found(&format!("Queue job '{job_id}'")),
    }
}

/// POST Projects('id')/QueueJobs('job')/Cancel
pub fn cancel_job(state: &mut MockState, id: &str, job_id: &str) -> Response {
    match state.cancel_job(id, job_id) {
        Some(_) => entity(&Value::Null),
        None => not_found(&format!("Queue job '{job_id}'")),
    }
}
