//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};
use serde_json::Map;

use crate::{Calendar, JobState, Project, QueueJob, Task};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// Create a minimal project with required fields only.
    pub fn minimal_project(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            name: Some(name.to_string()),
            description: None,
            start_date: None,
            finish_date: None,
            created_date: None,
            last_published_date: None,
            last_saved_date: None,
            is_checked_out: false,
            check_out_description: None,
            percent_complete: None,
            extra: Map::new(),
        }
    }

    /// Create a project that has been scheduled and published once.
    pub fn published_project(id: &str, name: &str) -> Project {
        let mut project = Self::minimal_project(id, name);
        project.start_date = Utc.with_ymd_and_hms(2018, 1, 1, 8, 0, 0).single();
        project.finish_date = Utc.with_ymd_and_hms(2018, 3, 30, 17, 0, 0).single();
        project.created_date = Utc.with_ymd_and_hms(2017, 12, 15, 9, 30, 0).single();
        project.last_published_date = Utc.with_ymd_and_hms(2017, 12, 20, 14, 0, 0).single();
        project.percent_complete = Some(0);
        project
    }

    // =========================================================================
    // Task Fixtures
    // =========================================================================

    /// Create a task with a duration.
    pub fn task(id: &str, name: &str, duration: &str) -> Task {
        Task {
            id: id.to_string(),
            name: Some(name.to_string()),
            start: None,
            finish: None,
            duration: Some(duration.to_string()),
            percent_complete: Some(0),
            is_manual: Some(false),
            outline_level: Some(1),
            notes: None,
            extra: Map::new(),
        }
    }

    // =========================================================================
    // Calendar Fixtures
    // =========================================================================

    /// Create an enterprise calendar.
    pub fn calendar(id: &str, name: &str) -> Calendar {
        Calendar {
            id: id.to_string(),
            name: Some(name.to_string()),
            is_standard_calendar: Some(false),
            created: None,
            modified: None,
            extra: Map::new(),
        }
    }

    /// Create the standard base calendar.
    pub fn standard_calendar(id: &str) -> Calendar {
        let mut calendar = Self::calendar(id, "Standard");
        calendar.is_standard_calendar = Some(true);
        calendar
    }

    // =========================================================================
    // Queue Job Fixtures
    // =========================================================================

    /// Create a job that has just been queued.
    pub fn queued_job(id: &str) -> QueueJob {
        QueueJob {
            id: id.to_string(),
            job_state: JobState::ReadyForProcessing,
            message_type: None,
            percent_complete: Some(0),
            extra: Map::new(),
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
#[derive(Debug)]
pub struct DefaultScenario {
    /// Projects with their published tasks.
    pub projects: Vec<(Project, Vec<Task>)>,
    pub calendars: Vec<Calendar>,
}

impl DefaultScenario {
    /// Id of the project with tasks.
    pub const PROJECT_ID: &'static str = "263fc8d7-427c-e111-92fc-00155d3ba208";
    /// Id of the project without tasks.
    pub const EMPTY_PROJECT_ID: &'static str = "4c5b4a68-9b8e-e811-9bf2-00155d3ba208";
    /// Id of the standard calendar.
    pub const CALENDAR_ID: &'static str = "b6635b2e-e747-4771-a78b-24f7509629d0";

    fn new() -> Self {
        let project = Fixtures::published_project(Self::PROJECT_ID, "Website relaunch");
        let tasks = vec![
            Fixtures::task("9a4f3c1e-0a7d-4a27-8c3b-7bd3a0b0f001", "Kick-off", "1d"),
            Fixtures::task("9a4f3c1e-0a7d-4a27-8c3b-7bd3a0b0f002", "Design", "10d"),
            Fixtures::task("9a4f3c1e-0a7d-4a27-8c3b-7bd3a0b0f003", "Launch", "0d"),
        ];
        let empty = Fixtures::minimal_project(Self::EMPTY_PROJECT_ID, "Office move");

        Self {
            projects: vec![(project, tasks), (empty, Vec::new())],
            calendars: vec![
                Fixtures::standard_calendar(Self::CALENDAR_ID),
                Fixtures::calendar("c6e3a7a4-5a1d-4d3e-9f1e-2f3f4b5c6d7e", "Night shift"),
            ],
        }
    }
}
