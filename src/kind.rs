//! Entity kinds of the Project Server object graph.
//!
//! Each kind is a zero-sized marker used as the type parameter of
//! [`Instance`](crate::Instance) and [`Collection`](crate::Collection). A
//! kind names the data fetched for it, its key type and its OData entity
//! type; `Creatable` and `Deletable` mark what its handles allow.

use crate::models;
use crate::traits::{Creatable, Deletable, Kind};

macro_rules! kind {
    ($(#[$meta:meta])* $name:ident => $data:ty, $id:ty, $entity_type:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Kind for $name {
            type Data = $data;
            type Id = $id;
            const ENTITY_TYPE: &'static str = $entity_type;
        }
    };
}

// Projects

kind!(
    /// A published project (`Projects('id')`).
    PublishedProject => models::Project, String, "PS.PublishedProject"
);
kind!(
    /// The checked-out, editable copy of a project (`Projects('id')/Draft`).
    DraftProject => models::Project, String, "PS.DraftProject"
);

impl Creatable for PublishedProject {
    type Creation = models::ProjectCreationInformation;
}

// Tasks and task links

kind!(
    /// A task in a published project.
    PublishedTask => models::Task, String, "PS.PublishedTask"
);
kind!(
    /// A task in a checked-out project.
    DraftTask => models::Task, String, "PS.DraftTask"
);
kind!(
    /// The summary task of a project.
    ProjectSummaryTask => models::Task, String, "PS.ProjectSummaryTask"
);
kind!(
    /// A dependency link between published tasks.
    PublishedTaskLink => models::TaskLink, String, "PS.PublishedTaskLink"
);
kind!(
    /// A dependency link between draft tasks.
    DraftTaskLink => models::TaskLink, String, "PS.DraftTaskLink"
);

impl Creatable for DraftTask {
    type Creation = models::TaskCreationInformation;
}
impl Deletable for DraftTask {}

impl Creatable for DraftTaskLink {
    type Creation = models::TaskLinkCreationInformation;
}
impl Deletable for DraftTaskLink {}

// Assignments and project resources

kind!(
    /// An assignment in a published project.
    PublishedAssignment => models::Assignment, String, "PS.PublishedAssignment"
);
kind!(
    /// An assignment in a checked-out project.
    DraftAssignment => models::Assignment, String, "PS.DraftAssignment"
);
kind!(
    /// A resource on the team of a published project.
    PublishedProjectResource => models::ProjectResource, String, "PS.PublishedProjectResource"
);
kind!(
    /// A resource on the team of a checked-out project.
    DraftProjectResource => models::ProjectResource, String, "PS.DraftProjectResource"
);

impl Creatable for DraftAssignment {
    type Creation = models::AssignmentCreationInformation;
}
impl Deletable for DraftAssignment {}

impl Creatable for DraftProjectResource {
    type Creation = models::ProjectResourceCreationInformation;
}
impl Deletable for DraftProjectResource {}

// Calendars

kind!(
    /// An enterprise calendar.
    Calendar => models::Calendar, String, "PS.Calendar"
);
kind!(
    /// An exception to a base calendar; addressed by integer id.
    CalendarException => models::CalendarException, i32, "PS.CalendarException"
);

impl Creatable for Calendar {
    type Creation = models::CalendarCreationInformation;
}
impl Deletable for Calendar {}

impl Creatable for CalendarException {
    type Creation = models::CalendarExceptionCreationInformation;
}
impl Deletable for CalendarException {}

// Custom fields and lookup tables

kind!(
    /// An enterprise custom field.
    CustomField => models::CustomField, String, "PS.CustomField"
);
kind!(
    /// A lookup table backing text custom fields.
    LookupTable => models::LookupTable, String, "PS.LookupTable"
);
kind!(
    /// An entry of a lookup table.
    LookupEntry => models::LookupEntry, String, "PS.LookupEntry"
);
kind!(
    /// The set of entity types custom fields can apply to.
    EntityTypes => models::EntityTypes, String, "PS.EntityTypes"
);
kind!(
    /// One entity type (project, task or resource).
    EntityType => models::EntityType, String, "PS.EntityType"
);

impl Creatable for CustomField {
    type Creation = models::CustomFieldCreationInformation;
}
impl Deletable for CustomField {}

impl Creatable for LookupTable {
    type Creation = models::LookupTableCreationInformation;
}
impl Deletable for LookupTable {}

impl Creatable for LookupEntry {
    type Creation = models::LookupEntryCreationInformation;
}
impl Deletable for LookupEntry {}

// Enterprise resources and resource plans

kind!(
    /// A resource managed by Project Server.
    EnterpriseResource => models::EnterpriseResource, String, "PS.EnterpriseResource"
);
kind!(
    /// An enterprise project type (EPT).
    EnterpriseProjectType => models::EnterpriseProjectType, String, "PS.EnterpriseProjectType"
);
kind!(
    /// The resource plan of a project.
    ResourcePlan => models::ResourcePlan, String, "PS.ResourcePlan"
);
kind!(
    /// A resource booking within a resource plan.
    PlanAssignment => models::PlanAssignment, String, "PS.PlanAssignment"
);
kind!(
    /// One time interval of a plan assignment.
    PlanAssignmentInterval => models::PlanAssignmentInterval, String, "PS.PlanAssignmentInterval"
);

impl Creatable for EnterpriseResource {
    type Creation = models::EnterpriseResourceCreationInformation;
}
impl Deletable for EnterpriseResource {}

impl Creatable for EnterpriseProjectType {
    type Creation = models::EnterpriseProjectTypeCreationInformation;
}
impl Deletable for EnterpriseProjectType {}

impl Creatable for PlanAssignment {
    type Creation = models::PlanAssignmentCreationInformation;
}
impl Deletable for PlanAssignment {}

// Workflow

kind!(
    /// A workflow phase.
    Phase => models::Phase, String, "PS.Phase"
);
kind!(
    /// A workflow stage.
    Stage => models::Stage, String, "PS.Stage"
);
kind!(
    /// A custom field attached to a workflow stage.
    StageCustomField => models::StageCustomField, String, "PS.StageCustomField"
);
kind!(
    /// A project detail page attached to a workflow stage.
    StageDetailPage => models::StageDetailPage, String, "PS.StageDetailPage"
);
kind!(
    /// A project detail page (PDP).
    ProjectDetailPage => models::ProjectDetailPage, String, "PS.ProjectDetailPage"
);

impl Creatable for Phase {
    type Creation = models::PhaseCreationInformation;
}
impl Deletable for Phase {}

impl Creatable for Stage {
    type Creation = models::StageCreationInformation;
}
impl Deletable for Stage {}

impl Creatable for StageCustomField {
    type Creation = models::StageCustomFieldCreationInformation;
}
impl Deletable for StageCustomField {}

impl Creatable for StageDetailPage {
    type Creation = models::StageDetailPageCreationInformation;
}
impl Deletable for StageDetailPage {}

// Status reporting

kind!(
    /// An assignment as seen by the resource reporting status on it.
    StatusAssignment => models::StatusAssignment, String, "PS.StatusAssignment"
);
kind!(
    /// The task behind a status assignment.
    StatusTask => models::StatusTask, String, "PS.StatusTask"
);
kind!(
    /// Status assignments over a date range.
    TimePhase => models::TimePhase, String, "PS.TimePhase"
);

impl Creatable for StatusAssignment {
    type Creation = models::StatusAssignmentCreationInformation;
}
impl Deletable for StatusAssignment {}

// Timesheets

kind!(
    /// A timesheet period.
    TimeSheetPeriod => models::TimeSheetPeriod, String, "PS.TimeSheetPeriod"
);
kind!(
    /// A timesheet.
    TimeSheet => models::TimeSheet, String, "PS.TimeSheet"
);
kind!(
    /// A line of a timesheet.
    TimeSheetLine => models::TimeSheetLine, String, "PS.TimeSheetLine"
);
kind!(
    /// Actual work recorded on a timesheet line.
    TimeSheetWork => models::TimeSheetWork, String, "PS.TimeSheetWork"
);

impl Deletable for TimeSheet {}

impl Creatable for TimeSheetLine {
    type Creation = models::TimeSheetLineCreationInformation;
}
impl Deletable for TimeSheetLine {}

impl Creatable for TimeSheetWork {
    type Creation = models::TimeSheetWorkCreationInformation;
}
impl Deletable for TimeSheetWork {}

// Queue and users

kind!(
    /// A server-side job tracked in the project queue.
    QueueJob => models::QueueJob, String, "PS.QueueJob"
);
kind!(
    /// A SharePoint user.
    User => models::User, i32, "SP.User"
);
