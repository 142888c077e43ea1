//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! projectserver binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Project Server command-line interface.
#[derive(Parser, Debug)]
#[command(name = "projectserver", about = "Project Server REST API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List entities of a top-level collection.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Maximum number of items ($top).
        #[arg(long)]
        top: Option<u32>,

        /// Number of items to skip ($skip).
        #[arg(long)]
        skip: Option<u32>,

        /// OData filter expression, e.g. "Name eq 'Plan'".
        #[arg(long)]
        filter: Option<String>,

        /// Follow next links and print every page.
        #[arg(long)]
        all: bool,
    },

    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The entity GUID.
        id: String,
    },

    /// List the tasks of a project.
    Tasks {
        /// The project GUID.
        project_id: String,

        /// Read the tasks of the checked-out draft.
        #[arg(long)]
        draft: bool,
    },

    /// Check a project out for editing.
    CheckOut {
        /// The project GUID.
        project_id: String,
    },

    /// Publish the draft of a project.
    Publish {
        /// The project GUID.
        project_id: String,

        /// Check the project in after publishing.
        #[arg(long)]
        check_in: bool,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Check a project in without publishing.
    CheckIn {
        /// The project GUID.
        project_id: String,

        /// Release a checkout held by another user.
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Show, wait on or cancel a queue job.
    Job {
        /// The project GUID the job belongs to.
        project_id: String,

        /// The queue job GUID.
        job_id: String,

        /// Cancel the job.
        #[arg(long, conflicts_with = "wait")]
        cancel: bool,

        #[command(flatten)]
        wait: WaitArgs,
    },
}

/// Options for commands that produce a queue job.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitArgs {
    /// Poll the queue job until it finishes.
    #[arg(long)]
    pub wait: bool,

    /// Stop waiting after this many seconds.
    #[arg(long, requires = "wait")]
    pub timeout: Option<u64>,
}

/// Entity collections reachable from the API root.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A published project.
    #[value(alias = "projects")]
    Project,
    /// An enterprise calendar.
    #[value(alias = "calendars")]
    Calendar,
    /// An enterprise custom field.
    #[value(alias = "custom-fields")]
    CustomField,
    /// An enterprise resource.
    #[value(alias = "enterprise-resources", alias = "resources")]
    EnterpriseResource,
    /// An enterprise project type.
    #[value(alias = "enterprise-project-types", alias = "epts")]
    EnterpriseProjectType,
    /// A lookup table.
    #[value(alias = "lookup-tables")]
    LookupTable,
    /// A workflow phase.
    #[value(alias = "phases")]
    Phase,
    /// A workflow stage.
    #[value(alias = "stages")]
    Stage,
    /// A timesheet period.
    #[value(alias = "timesheet-periods")]
    TimesheetPeriod,
}
