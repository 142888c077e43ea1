//! E2E tests using the mock Project Server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use std::time::Duration;

use projectserver::mock_server::{DefaultScenario, Fixtures, MockServer, MockState};
use projectserver::{
    Add, Delete, Get, JobState, List, ProjectClient, ProjectCreationInformation, ProjectError,
    TaskCreationInformation, Update, WaitOptions,
};

fn fast() -> WaitOptions {
    WaitOptions::default()
        .with_interval(Duration::from_millis(10))
        .with_timeout(Duration::from_secs(5))
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Project Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_list_and_get_project_workflow() {
    let server = MockServer::start().await;
    let client = ProjectClient::new(server.url()).unwrap();

    // Step 1: List all projects
    let projects = client
        .projects()
        .get()
        .await
        .expect("Failed to list projects");
    assert_eq!(projects.len(), 2);

    // Step 2: Get one of them by id
    let project = client
        .projects()
        .get_by_id(DefaultScenario::PROJECT_ID)
        .get()
        .await
        .expect("Failed to get project");
    assert_eq!(project.display_name(), "Website relaunch");

    // Step 3: Its published tasks
    let tasks = client
        .projects()
        .get_by_id(DefaultScenario::PROJECT_ID)
        .tasks()
        .get()
        .await
        .expect("Failed to list tasks");
    let names: Vec<_> = tasks.iter().filter_map(|t| t.name.as_deref()).collect();
    assert_eq!(names, vec!["Kick-off", "Design", "Launch"]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_filter_by_name() {
    let server = MockServer::start().await;
    let client = ProjectClient::new(server.url()).unwrap();

    let projects = client
        .projects()
        .filter("Name eq 'Office move'")
        .get()
        .await
        .unwrap();

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, DefaultScenario::EMPTY_PROJECT_ID);

    server.shutdown().await;
}

#[tokio::test]
async fn test_paging_follows_next_links() {
    let state = MockState::new()
        .with_page_size(1)
        .with_calendar(Fixtures::standard_calendar("c1"))
        .with_calendar(Fixtures::calendar("c2", "Night shift"))
        .with_calendar(Fixtures::calendar("c3", "Weekend"));
    let server = MockServer::with_state(state).await;
    let client = ProjectClient::new(server.url()).unwrap();

    let first = client.calendars().get_page().await.unwrap();
    assert_eq!(first.len(), 1);
    assert!(first.has_more());

    let all = client.calendars().get_all().await.unwrap();
    let ids: Vec<&str> = all.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2", "c3"]);

    // $top caps the total even across pages
    let capped = client.calendars().top(2).get_all().await.unwrap();
    assert_eq!(capped.len(), 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_create_edit_and_publish_workflow() {
    let server = MockServer::start_empty().await;
    let client = ProjectClient::new(server.url()).unwrap();

    // Create
    let created = client
        .projects()
        .add(&ProjectCreationInformation::new("TestProject"))
        .await
        .expect("Failed to add project");
    assert!(!created.data.is_checked_out);

    // Check out and edit the draft
    let draft = created.instance.check_out().await.unwrap();
    assert!(draft.data.is_checked_out);

    let mut task = TaskCreationInformation::new("Kick-off");
    task.duration = Some("2d".to_string());
    let task = draft.instance.tasks().add(&task).await.unwrap();
    assert_eq!(task.data.duration.as_deref(), Some("2d"));

    let rename = draft
        .instance
        .update(&serde_json::json!({"Description": "Created by the e2e suite"}))
        .await
        .unwrap();
    let rename = rename.wait(fast()).await.unwrap();
    assert_eq!(rename.state(), JobState::Success);

    // Publish and check in, then wait for the queue
    let job = draft.instance.publish(true).await.unwrap();
    assert_eq!(job.data.job_state, JobState::ReadyForProcessing);

    let result = job.wait(fast()).await.unwrap();
    assert!(!result.timed_out);
    assert!(result.state().is_success());

    // The published plan now carries the task
    let project = created.instance.get().await.unwrap();
    assert!(!project.is_checked_out);
    assert_eq!(project.description.as_deref(), Some("Created by the e2e suite"));

    let tasks = created.instance.tasks().get_all().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name.as_deref(), Some("Kick-off"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_check_in_discards_draft() {
    let server = MockServer::start().await;
    let client = ProjectClient::new(server.url()).unwrap();
    let project = client.projects().get_by_id(DefaultScenario::PROJECT_ID);

    let draft = project.check_out().await.unwrap().instance;
    draft
        .tasks()
        .add(&TaskCreationInformation::new("Unpublished"))
        .await
        .unwrap();

    let job = draft.check_in(false).await.unwrap();
    job.wait(fast()).await.unwrap();

    let tasks = project.tasks().get().await.unwrap();
    assert_eq!(tasks.len(), 3);
    assert!(!project.get().await.unwrap().is_checked_out);

    // Without a checkout the draft is gone
    let result = draft.get().await;
    assert!(matches!(
        result,
        Err(ProjectError::ApiError {
            status_code: Some(400),
            ..
        })
    ));

    server.shutdown().await;
}

#[tokio::test]
async fn test_delete_project_returns_job() {
    let server = MockServer::start().await;
    let client = ProjectClient::new(server.url()).unwrap();

    let job = client
        .projects()
        .get_by_id(DefaultScenario::EMPTY_PROJECT_ID)
        .delete()
        .await
        .unwrap();
    let result = job.wait(fast()).await.unwrap();
    assert_eq!(result.state(), JobState::Success);

    let remaining = client.projects().get_all().await.unwrap();
    assert_eq!(remaining.len(), 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_cancel_queued_job() {
    let server = MockServer::start().await;
    let client = ProjectClient::new(server.url()).unwrap();

    let job = client
        .projects()
        .get_by_id(DefaultScenario::PROJECT_ID)
        .delete()
        .await
        .unwrap();
    job.instance.cancel().await.unwrap();

    let status = job.instance.get().await.unwrap();
    assert_eq!(status.job_state, JobState::Canceled);

    server.shutdown().await;
}

#[tokio::test]
async fn test_job_is_only_found_under_its_project() {
    let server = MockServer::start().await;
    let client = ProjectClient::new(server.url()).unwrap();

    let draft = client
        .projects()
        .get_by_id(DefaultScenario::PROJECT_ID)
        .check_out()
        .await
        .unwrap()
        .instance;
    let job = draft.publish(false).await.unwrap();

    let elsewhere = client
        .projects()
        .get_by_id(DefaultScenario::EMPTY_PROJECT_ID)
        .queue_jobs()
        .get_by_id(job.data.id.clone());
    let err = elsewhere.get().await.unwrap_err();
    assert!(err.is_not_found());
    assert!(elsewhere.cancel().await.unwrap_err().is_not_found());

    // Under the owning project the job is untouched and still runs to success
    let result = job.wait(fast()).await.unwrap();
    assert_eq!(result.state(), JobState::Success);

    server.shutdown().await;
}

// =============================================================================
// Calendar Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_calendar_add_copy_delete() {
    let server = MockServer::start().await;
    let client = ProjectClient::new(server.url()).unwrap();

    let created = client
        .calendars()
        .add(&projectserver::CalendarCreationInformation::named("Holidays"))
        .await
        .unwrap();

    let copy = created.instance.copy_to("Holidays 2019").await.unwrap();
    assert_eq!(copy.data.name.as_deref(), Some("Holidays 2019"));
    assert_ne!(copy.data.id, created.data.id);

    created.instance.delete().await.unwrap();

    let names: Vec<String> = client
        .calendars()
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .filter_map(|c| c.name)
        .collect();
    assert!(names.contains(&"Holidays 2019".to_string()));
    assert!(!names.contains(&"Holidays".to_string()));

    server.shutdown().await;
}

// =============================================================================
// Error Tests
// =============================================================================

#[tokio::test]
async fn test_unknown_project_is_not_found() {
    let server = MockServer::start().await;
    let client = ProjectClient::new(server.url()).unwrap();

    let err = client
        .projects()
        .get_by_id("00000000-0000-0000-0000-000000000000")
        .get()
        .await
        .unwrap_err();

    assert!(err.is_not_found());

    server.shutdown().await;
}

#[tokio::test]
async fn test_publish_without_checkout_is_rejected() {
    let server = MockServer::start().await;
    let client = ProjectClient::new(server.url()).unwrap();

    let result = client
        .projects()
        .get_by_id(DefaultScenario::PROJECT_ID)
        .draft()
        .publish(false)
        .await;

    match result {
        Err(ProjectError::ApiError {
            message,
            status_code,
        }) => {
            assert_eq!(status_code, Some(400));
            assert!(message.contains("not checked out"));
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_duplicate_project_name_is_rejected() {
    let server = MockServer::start().await;
    let client = ProjectClient::new(server.url()).unwrap();

    let result = client
        .projects()
        .add(&ProjectCreationInformation::new("Website relaunch"))
        .await;

    assert!(matches!(
        result,
        Err(ProjectError::ApiError {
            status_code: Some(500),
            ..
        })
    ));

    server.shutdown().await;
}
