//! Queue jobs and job polling.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tokio::time::{sleep, Instant};

use crate::error::Result;
use crate::kind;
use crate::queryable::{Created, Instance};
use crate::traits::Get;

/// Default delay between two status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Processing state of a queue job.
///
/// Values outside the known range read as [`JobState::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JobState {
    #[default]
    Unknown = 0,
    ReadyForProcessing = 1,
    /// The message sent to the queue is incomplete.
    SendIncomplete = 2,
    Processing = 3,
    Success = 4,
    /// Failed; unfinished jobs with the same correlation are blocked.
    Failed = 5,
    /// Failed; unfinished jobs with the same correlation are not blocked.
    FailedNotBlocking = 6,
    ProcessingDeferred = 7,
    CorrelationBlocked = 8,
    Canceled = 9,
    OnHold = 10,
    Sleeping = 11,
    ReadyForLaunch = 12,
    LastState = 13,
}

impl JobState {
    const ALL: [JobState; 14] = [
        JobState::Unknown,
        JobState::ReadyForProcessing,
        JobState::SendIncomplete,
        JobState::Processing,
        JobState::Success,
        JobState::Failed,
        JobState::FailedNotBlocking,
        JobState::ProcessingDeferred,
        JobState::CorrelationBlocked,
        JobState::Canceled,
        JobState::OnHold,
        JobState::Sleeping,
        JobState::ReadyForLaunch,
        JobState::LastState,
    ];

    /// The integer the server uses for this state.
    pub fn value(self) -> i32 {
        self as i32
    }

    /// Map a wire value to a state.
    pub fn from_value(value: i32) -> Self {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(JobState::Unknown)
    }

    /// Whether the job will not change state any more.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobState::SendIncomplete
                | JobState::Success
                | JobState::Failed
                | JobState::FailedNotBlocking
                | JobState::CorrelationBlocked
                | JobState::Canceled
                | JobState::LastState
        )
    }

    pub fn is_success(self) -> bool {
        self == JobState::Success
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Serialize for JobState {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.value())
    }
}

impl<'de> Deserialize<'de> for JobState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let raw = Option::<i64>::deserialize(deserializer)?;
        Ok(raw
            .and_then(|raw| i32::try_from(raw).ok())
            .map_or(JobState::Unknown, JobState::from_value))
    }
}

/// A queue job as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueueJob {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub job_state: JobState,

    /// Kind of queue message, e.g. project publish.
    #[serde(rename = "MsgType", default)]
    pub message_type: Option<i32>,

    #[serde(default)]
    pub percent_complete: Option<i32>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How long and how often [`wait_for_job`](Instance::wait_for_job) polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Give up after this long; `None` waits until the job finishes.
    pub timeout: Option<Duration>,
    /// Delay between two polls.
    pub interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitOptions {
    /// Wait at most `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Poll every `interval`.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Outcome of waiting on a queue job.
#[derive(Debug, Clone)]
pub struct QueueJobResult {
    /// The last status fetched.
    pub data: QueueJob,
    /// The job that was polled.
    pub job: Instance<kind::QueueJob>,
    /// True when the wait stopped before the job reached a terminal state.
    pub timed_out: bool,
}

impl QueueJobResult {
    pub fn state(&self) -> JobState {
        self.data.job_state
    }
}

impl Instance<kind::QueueJob> {
    /// Cancel the job.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn cancel(&self) -> Result<()> {
        self.invoke("Cancel", None).await?;
        Ok(())
    }

    /// Poll the job until it reaches a terminal state or the timeout elapses.
    ///
    /// A status is always fetched at least once. On timeout the last status
    /// is returned with `timed_out` set rather than as an error.
    ///
    /// # Errors
    ///
    /// A failed status request ends the wait with that error.
    #[tracing::instrument(skip(self, options), fields(path = %self.query().path()))]
    pub async fn wait_for_job(&self, options: WaitOptions) -> Result<QueueJobResult> {
        let started = Instant::now();
        let mut polls = 0u32;

        loop {
            let data = self.get().await?;
            polls += 1;
            tracing::debug!(state = %data.job_state, polls, "polled queue job");

            if data.job_state.is_terminal() {
                return Ok(QueueJobResult {
                    data,
                    job: self.clone(),
                    timed_out: false,
                });
            }

            if let Some(timeout) = options.timeout {
                if started.elapsed() >= timeout {
                    tracing::warn!(state = %data.job_state, ?timeout, "gave up waiting for queue job");
                    return Ok(QueueJobResult {
                        data,
                        job: self.clone(),
                        timed_out: true,
                    });
                }
            }

            sleep(options.interval).await;
        }
    }
}

impl Created<kind::QueueJob> {
    /// Wait on the job this operation queued.
    pub async fn wait(&self, options: WaitOptions) -> Result<QueueJobResult> {
        self.instance.wait_for_job(options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_state_values() {
        assert_eq!(JobState::from_value(0), JobState::Unknown);
        assert_eq!(JobState::from_value(4), JobState::Success);
        assert_eq!(JobState::from_value(13), JobState::LastState);
        assert_eq!(JobState::from_value(14), JobState::Unknown);
        assert_eq!(JobState::from_value(-1), JobState::Unknown);
        assert_eq!(JobState::CorrelationBlocked.value(), 8);
    }

    #[test]
    fn test_terminal_states() {
        let terminal: Vec<i32> = (0..14)
            .map(JobState::from_value)
            .filter(|s| s.is_terminal())
            .map(JobState::value)
            .collect();
        assert_eq!(terminal, vec![2, 4, 5, 6, 8, 9, 13]);
    }

    #[test]
    fn test_queue_job_deserialize() {
        let job: QueueJob = serde_json::from_value(json!({
            "__metadata": {"type": "PS.QueueJob"},
            "Id": "5f1e0c2a-0000-0000-0000-000000000001",
            "JobState": 3,
            "MsgType": 24,
            "PercentComplete": 50
        }))
        .unwrap();
        assert_eq!(job.job_state, JobState::Processing);
        assert_eq!(job.message_type, Some(24));
        assert!(job.extra.contains_key("__metadata"));

        let unknown: QueueJob = serde_json::from_value(json!({"Id": "x", "JobState": 99})).unwrap();
        assert_eq!(unknown.job_state, JobState::Unknown);
    }

    #[test]
    fn test_null_job_state_reads_as_unknown() {
        let job: QueueJob =
            serde_json::from_value(json!({"Id": "x", "JobState": null, "PercentComplete": null}))
                .unwrap();
        assert_eq!(job.job_state, JobState::Unknown);
        assert_eq!(job.percent_complete, None);

        let huge: QueueJob =
            serde_json::from_value(json!({"Id": "x", "JobState": 5_000_000_000i64})).unwrap();
        assert_eq!(huge.job_state, JobState::Unknown);
    }

    #[test]
    fn test_wait_options_default() {
        let options = WaitOptions::default();
        assert_eq!(options.interval, Duration::from_millis(250));
        assert!(options.timeout.is_none());

        let options = options.with_timeout(Duration::from_secs(2));
        assert_eq!(options.timeout, Some(Duration::from_secs(2)));
    }
}
