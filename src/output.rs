//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use chrono::{DateTime, Utc};

use crate::{
    Calendar, CustomField, EnterpriseProjectType, EnterpriseResource, LookupTable, Phase, Project,
    QueueJob, Stage, Task, TimeSheetPeriod,
};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(kind: &str, title: &str) -> Vec<String> {
    let header = format!("{kind}: {title}");
    let divider = "─".repeat(header.chars().count().max(30));
    vec![header, divider]
}

fn date(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

impl PrettyPrint for Project {
    fn pretty_print(&self) -> String {
        let mut lines = header("Project", self.display_name());
        lines.push(format!("Id:             {}", self.id));

        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }

        if let Some(ref start) = self.start_date {
            lines.push(format!("Start:          {}", date(start)));
        }

        if let Some(ref finish) = self.finish_date {
            lines.push(format!("Finish:         {}", date(finish)));
        }

        if let Some(percent) = self.percent_complete {
            lines.push(format!("Complete:       {}%", percent));
        }

        if let Some(ref published) = self.last_published_date {
            lines.push(format!("Published:      {}", date(published)));
        }

        lines.push(format!(
            "Checked out:    {}",
            if self.is_checked_out { "yes" } else { "no" }
        ));

        lines.join("\n")
    }
}

impl PrettyPrint for QueueJob {
    fn pretty_print(&self) -> String {
        let mut lines = header("Queue job", &self.id);
        lines.push(format!("State:          {}", self.job_state));
        lines.push(format!(
            "Finished:       {}",
            if self.job_state.is_terminal() { "yes" } else { "no" }
        ));
        if let Some(percent) = self.percent_complete {
            lines.push(format!("Complete:       {}%", percent));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Calendar {
    fn pretty_print(&self) -> String {
        let mut lines = header("Calendar", self.name.as_deref().unwrap_or(&self.id));
        lines.push(format!("Id:             {}", self.id));
        if self.is_standard_calendar == Some(true) {
            lines.push("Standard:       yes".to_string());
        }
        if let Some(ref modified) = self.modified {
            lines.push(format!("Modified:       {}", date(modified)));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Task {
    fn pretty_print(&self) -> String {
        let mut lines = header("Task", self.name.as_deref().unwrap_or(&self.id));
        lines.push(format!("Id:             {}", self.id));
        if let (Some(start), Some(finish)) = (&self.start, &self.finish) {
            lines.push(format!("Dates:          {} - {}", date(start), date(finish)));
        }
        if let Some(ref duration) = self.duration {
            lines.push(format!("Duration:       {}", duration));
        }
        if let Some(percent) = self.percent_complete {
            lines.push(format!("Complete:       {}%", percent));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for CustomField {
    fn pretty_print(&self) -> String {
        let mut lines = header("Custom field", self.name.as_deref().unwrap_or(&self.id));
        lines.push(format!("Id:             {}", self.id));
        if let Some(field_type) = self.field_type {
            lines.push(format!("Type:           {:?}", field_type));
        }
        if let Some(ref internal) = self.internal_name {
            lines.push(format!("Internal name:  {}", internal));
        }
        if let Some(ref formula) = self.formula {
            lines.push(format!("Formula:        {}", formula));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for EnterpriseResource {
    fn pretty_print(&self) -> String {
        let mut lines = header("Resource", self.name.as_deref().unwrap_or(&self.id));
        lines.push(format!("Id:             {}", self.id));
        if let Some(resource_type) = self.resource_type {
            lines.push(format!("Type:           {:?}", resource_type));
        }
        if let Some(ref email) = self.email {
            lines.push(format!("Email:          {}", email));
        }
        if self.is_generic == Some(true) {
            lines.push("Generic:        yes".to_string());
        }
        lines.join("\n")
    }
}

// The remaining kinds only carry an id, a name and maybe a description.
macro_rules! pretty_print_named {
    ($($ty:ty => $label:literal),+ $(,)?) => {
        $(
            impl PrettyPrint for $ty {
                fn pretty_print(&self) -> String {
                    let mut lines = header($label, self.name.as_deref().unwrap_or(&self.id));
                    lines.push(format!("Id:             {}", self.id));
                    lines.join("\n")
                }
            }
        )+
    };
}

pretty_print_named! {
    EnterpriseProjectType => "Project type",
    LookupTable => "Lookup table",
    Phase => "Phase",
    Stage => "Stage",
    TimeSheetPeriod => "Timesheet period",
}
