//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Project Server API.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::fixtures::Fixtures;
use crate::{Calendar, JobState, Project, QueueJob, Task};

/// Default number of entities per collection page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// A project as stored by the mock server.
#[derive(Debug, Clone)]
pub struct MockProject {
    pub project: Project,

    /// Published tasks.
    pub tasks: Vec<Task>,

    /// Draft tasks; `Some` while the project is checked out.
    pub draft_tasks: Option<Vec<Task>>,
}

/// A queue job together with the project it was queued for.
#[derive(Debug, Clone)]
pub struct MockJob {
    pub project_id: String,
    pub job: QueueJob,
}

impl MockProject {
    pub fn new(project: Project, tasks: Vec<Task>) -> Self {
        Self {
            project,
            tasks,
            draft_tasks: None,
        }
    }
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Base URL the server is reachable at; used to build next links.
    pub base_url: String,

    /// Projects indexed by id. Ordered so that paging is stable.
    pub projects: BTreeMap<String, MockProject>,

    /// Enterprise calendars indexed by id.
    pub calendars: BTreeMap<String, Calendar>,

    /// Queue jobs indexed by id.
    pub queue_jobs: HashMap<String, MockJob>,

    /// Maximum entities per collection response.
    pub page_size: usize,

    /// Optional bearer token. If set, requests must include this token.
    pub required_token: Option<String>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            projects: BTreeMap::new(),
            calendars: BTreeMap::new(),
            queue_jobs: HashMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
            required_token: None,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a project without tasks.
    pub fn with_project(self, project: Project) -> Self {
        self.with_project_tasks(project, Vec::new())
    }

    /// Add a project together with its published tasks.
    pub fn with_project_tasks(mut self, project: Project, tasks: Vec<Task>) -> Self {
        self.projects
            .insert(project.id.clone(), MockProject::new(project, tasks));
        self
    }

    /// Add a calendar.
    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendars.insert(calendar.id.clone(), calendar);
        self
    }

    /// Add a queue job for `project_id` in whatever state it carries.
    pub fn with_queue_job(mut self, project_id: &str, job: QueueJob) -> Self {
        self.queue_jobs.insert(
            job.id.clone(),
            MockJob {
                project_id: project_id.to_string(),
                job,
            },
        );
        self
    }

    /// Limit collection responses to `size` entities per page.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    pub fn get_project(&self, id: &str) -> Option<&MockProject> {
        self.projects.get(id)
    }

    pub fn get_project_mut(&mut self, id: &str) -> Option<&mut MockProject> {
        self.projects.get_mut(id)
    }

    /// Create a project and return it.
    pub fn add_project(&mut self, id: Option<String>, name: &str, description: Option<String>) -> Project {
        let id = id.unwrap_or_else(new_id);
        let mut project = Fixtures::minimal_project(&id, name);
        project.description = description;
        project.created_date = Some(Utc::now());
        self.projects
            .insert(id, MockProject::new(project.clone(), Vec::new()));
        project
    }

    /// Check a project out, creating its draft from the published tasks.
    ///
    /// Returns `None` if the project does not exist.
    pub fn check_out(&mut self, id: &str) -> Option<Project> {
        let entry = self.projects.get_mut(id)?;
        if entry.draft_tasks.is_none() {
            entry.draft_tasks = Some(entry.tasks.clone());
        }
        entry.project.is_checked_out = true;
        Some(entry.project.clone())
    }

    /// Copy the draft over the published project, optionally checking it in.
    ///
    /// Returns `None` if the project does not exist or is not checked out.
    pub fn publish(&mut self, id: &str, check_in: bool) -> Option<QueueJob> {
        let entry = self.projects.get_mut(id)?;
        let draft = entry.draft_tasks.as_ref()?;
        entry.tasks = draft.clone();
        entry.project.last_published_date = Some(Utc::now());
        if check_in {
            entry.draft_tasks = None;
            entry.project.is_checked_out = false;
        }
        Some(self.enqueue(id))
    }

    /// Check a project in, discarding unpublished draft changes.
    ///
    /// Returns `None` if the project does not exist or is not checked out.
    pub fn check_in(&mut self, id: &str) -> Option<QueueJob> {
        let entry = self.projects.get_mut(id)?;
        entry.draft_tasks.take()?;
        entry.project.is_checked_out = false;
        Some(self.enqueue(id))
    }

    /// Delete a project; the deletion is reported as a queue job.
    pub fn delete_project(&mut self, id: &str) -> Option<QueueJob> {
        self.projects.remove(id)?;
        Some(self.enqueue(id))
    }

    /// Queue a new job for a project and return it.
    pub fn enqueue(&mut self, project_id: &str) -> QueueJob {
        let job = Fixtures::queued_job(&new_id());
        self.queue_jobs.insert(
            job.id.clone(),
            MockJob {
                project_id: project_id.to_string(),
                job: job.clone(),
            },
        );
        job
    }

    /// A job, if it was queued for `project_id`.
    fn job_mut(&mut self, project_id: &str, id: &str) -> Option<&mut QueueJob> {
        self.queue_jobs
            .get_mut(id)
            .filter(|entry| entry.project_id == project_id)
            .map(|entry| &mut entry.job)
    }

    /// Report a job and advance it one step towards success.
    ///
    /// The returned snapshot is the state before advancing, so a fresh job
    /// reads `ReadyForProcessing`, then `Processing`, then `Success`.
    pub fn poll_job(&mut self, project_id: &str, id: &str) -> Option<QueueJob> {
        let job = self.job_mut(project_id, id)?;
        let snapshot = job.clone();
        let (next, percent) = match job.job_state {
            JobState::ReadyForProcessing => (JobState::Processing, 50),
            JobState::Processing => (JobState::Success, 100),
            other => (other, job.percent_complete.unwrap_or(0)),
        };
        job.job_state = next;
        job.percent_complete = Some(percent);
        Some(snapshot)
    }

    /// Cancel a job that has not finished yet.
    pub fn cancel_job(&mut self, project_id: &str, id: &str) -> Option<QueueJob> {
        let job = self.job_mut(project_id, id)?;
        if !job.job_state.is_terminal() {
            job.job_state = JobState::Canceled;
        }
        Some(job.clone())
    }

    /// Create a calendar and return it.
    pub fn add_calendar(&mut self, id: Option<String>, name: &str) -> Calendar {
        let id = id.unwrap_or_else(new_id);
        let mut calendar = Fixtures::calendar(&id, name);
        calendar.created = Some(Utc::now());
        self.calendars.insert(id, calendar.clone());
        calendar
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
