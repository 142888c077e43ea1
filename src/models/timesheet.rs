//! Timesheet periods, timesheets, lines and recorded work.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::client::ProjectClient;
use crate::error::Result;
use crate::kind;
use crate::odata::{self, date_literal};
use crate::queryable::{Collection, Created, Instance};
use crate::traits::{Kind, Update};

/// A timesheet period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSheetPeriod {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub end: Option<DateTime<Utc>>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A timesheet of the current user for one period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSheet {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub comments: Option<String>,

    #[serde(default)]
    pub is_process_mode_status: Option<bool>,

    #[serde(default)]
    pub total_work: Option<String>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A line of a timesheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSheetLine {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default, deserialize_with = "crate::odata::lenient")]
    pub line_class: Option<TimeSheetLineClass>,

    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default)]
    pub task_name: Option<String>,

    #[serde(default)]
    pub total_work: Option<String>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for adding a line to a timesheet.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSheetLineCreationInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_class: Option<TimeSheetLineClass>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
}

int_enum! {
    /// Category of a timesheet line.
    pub enum TimeSheetLineClass {
        StandardLine = 0,
        SickTimeLine = 1,
        VacationLine = 2,
        AdministrativeLine = 3,
    }
}

/// Work recorded on a timesheet line for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSheetWork {
    #[serde(default)]
    pub id: String,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "odata::opt_datetime")]
    pub end: Option<DateTime<Utc>>,

    #[serde(default)]
    pub actual_work: Option<String>,

    #[serde(default)]
    pub planned_work: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,

    /// Properties not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for recording work on a timesheet line. Work is a duration
/// string such as `"8h"`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSheetWorkCreationInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_work: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_billable_overtime_work: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_billable_work: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overtime_work: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_work: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
}

impl ProjectClient {
    /// Timesheet periods (`TimeSheetPeriods`).
    pub fn timesheet_periods(&self) -> Collection<kind::TimeSheetPeriod> {
        Collection::root(self, "TimeSheetPeriods")
    }
}

impl Instance<kind::TimeSheetPeriod> {
    /// The current user's timesheet for this period.
    pub fn time_sheet(&self) -> Instance<kind::TimeSheet> {
        self.navigate("TimeSheet")
    }

    /// Create the current user's timesheet for this period.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn create_time_sheet(&self) -> Result<Created<kind::TimeSheet>> {
        let data = self.invoke_as("CreateTimeSheet", None).await?;
        Ok(Created {
            data,
            instance: self.time_sheet(),
        })
    }
}

impl Instance<kind::TimeSheet> {
    pub fn lines(&self) -> Collection<kind::TimeSheetLine> {
        self.collection("Lines")
    }

    /// Pull a submitted timesheet back for editing.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn recall(&self) -> Result<()> {
        self.invoke("Recall", None).await?;
        Ok(())
    }

    /// Submit the timesheet for approval.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn submit(&self, comment: Option<&str>) -> Result<()> {
        let body = match comment {
            Some(comment) => json!({ "comment": comment }),
            None => json!({}),
        };
        self.invoke("Submit", Some(body)).await?;
        Ok(())
    }
}

#[async_trait]
impl Update for Instance<kind::TimeSheet> {
    type Output = ();

    #[tracing::instrument(skip(self, properties), fields(path = %self.query().path()))]
    async fn update<P>(&self, properties: &P) -> Result<()>
    where
        P: Serialize + Sync + ?Sized,
    {
        self.query()
            .merge_json(kind::TimeSheet::ENTITY_TYPE, properties)
            .await?;
        Ok(())
    }
}

impl Instance<kind::TimeSheetLine> {
    /// The assignment the line reports on.
    pub fn assignment(&self) -> Instance<kind::PublishedAssignment> {
        self.navigate("Assignment")
    }

    pub fn time_sheet(&self) -> Instance<kind::TimeSheet> {
        self.navigate("TimeSheet")
    }

    pub fn work(&self) -> Collection<kind::TimeSheetWork> {
        self.collection("Work")
    }

    /// Submit this line for approval.
    #[tracing::instrument(skip(self), fields(path = %self.query().path()))]
    pub async fn submit(&self, comment: &str) -> Result<()> {
        self.invoke("Submit", Some(json!({ "comment": comment })))
            .await?;
        Ok(())
    }
}

impl Collection<kind::TimeSheetWork> {
    /// The work entry starting at `start`.
    pub fn get_by_start_date(&self, start: &DateTime<Utc>) -> Instance<kind::TimeSheetWork> {
        Instance::from_query(
            self.query()
                .concat(&format!("/GetByStartDate({})", date_literal(start))),
        )
    }
}
