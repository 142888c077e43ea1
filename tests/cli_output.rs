//! Tests for CLI output formatting: JSON with `--json`, pretty-print otherwise.

use projectserver::{Calendar, JobState, PrettyPrint, Project, QueueJob, Task};
use serde_json::json;

fn make_test_project() -> Project {
    serde_json::from_value(json!({
        "__metadata": {"type": "PS.PublishedProject"},
        "Id": "263fc8d7-427c-e111-92fc-00155d3ba208",
        "Name": "Website relaunch",
        "Description": "Relaunch of the public website",
        "StartDate": "2018-01-01T08:00:00",
        "FinishDate": "2018-03-30T17:00:00",
        "IsCheckedOut": true,
        "PercentComplete": 40,
        "ProjectType": 0
    }))
    .unwrap()
}

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_uses_server_property_names() {
    let project = make_test_project();
    let parsed: serde_json::Value =
        serde_json::from_str(&serde_json::to_string_pretty(&project).unwrap()).unwrap();

    assert_eq!(parsed["Id"], "263fc8d7-427c-e111-92fc-00155d3ba208");
    assert_eq!(parsed["Name"], "Website relaunch");
    assert_eq!(parsed["IsCheckedOut"], true);
}

#[test]
fn test_json_output_keeps_unmodeled_properties() {
    let project = make_test_project();
    let parsed = serde_json::to_value(&project).unwrap();

    // Properties without a field survive through the flattened map
    assert_eq!(parsed["ProjectType"], 0);
}

#[test]
fn test_json_output_reparses() {
    let project = make_test_project();
    let json_output = serde_json::to_string(&project).unwrap();
    let reparsed: Project = serde_json::from_str(&json_output).unwrap();

    assert_eq!(reparsed.start_date, project.start_date);
    assert_eq!(reparsed.finish_date, project.finish_date);
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_project_pretty_print_shows_key_fields() {
    let output = make_test_project().pretty_print();

    assert!(output.starts_with("Project: Website relaunch"));
    assert!(output.contains("263fc8d7-427c-e111-92fc-00155d3ba208"));
    assert!(output.contains("Relaunch of the public website"));
    assert!(output.contains("2018-01-01 08:00:00 UTC"));
    assert!(output.contains("Checked out:    yes"));
}

#[test]
fn test_pretty_print_is_not_json() {
    let output = make_test_project().pretty_print();
    assert!(serde_json::from_str::<serde_json::Value>(&output).is_err());
}

#[test]
fn test_queue_job_pretty_print_running() {
    let job: QueueJob = serde_json::from_value(json!({
        "Id": "a1b2",
        "JobState": JobState::Processing.value(),
        "PercentComplete": 50
    }))
    .unwrap();

    let output = job.pretty_print();
    assert!(output.contains("State:          Processing"));
    assert!(output.contains("Finished:       no"));
    assert!(output.contains("Complete:       50%"));
}

#[test]
fn test_calendar_and_task_pretty_print() {
    let calendar: Calendar = serde_json::from_value(json!({
        "Id": "c1",
        "Name": "Standard",
        "IsStandardCalendar": true
    }))
    .unwrap();
    let output = calendar.pretty_print();
    assert!(output.starts_with("Calendar: Standard"));
    assert!(output.contains("Standard:       yes"));

    let task: Task = serde_json::from_value(json!({
        "Id": "t1",
        "Name": "Design",
        "Duration": "10d"
    }))
    .unwrap();
    let output = task.pretty_print();
    assert!(output.starts_with("Task: Design"));
    assert!(output.contains("Duration:       10d"));
}
