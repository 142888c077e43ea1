//! Project Server entity data and the operations of each entity handle.
//!
//! Each area module carries the data types for its kinds, the enums the
//! server uses for them, and `impl` blocks adding navigation and actions to
//! [`Instance`](crate::Instance) and [`Collection`](crate::Collection).

mod assignment;
mod calendar;
mod custom_field;
mod project;
mod queue_job;
mod resource;
mod status;
mod task;
mod timesheet;
mod user;
mod workflow;

pub use assignment::*;
pub use calendar::*;
pub use custom_field::*;
pub use project::*;
pub use queue_job::*;
pub use resource::*;
pub use status::*;
pub use task::*;
pub use timesheet::*;
pub use user::*;
pub use workflow::*;
