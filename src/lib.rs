//! Project Server REST API client library.
//!
//! A typed, fluent client for the `_api/ProjectServer` REST surface of
//! Project Server and Project Online. Every handle wraps a URL: navigating a
//! property appends a path segment without touching the network, and only
//! terminal operations (`get`, `add`, `delete`, `update` and actions such as
//! `publish`) issue requests.
//!
//! # Quick Start
//!
//! ```no_run
//! use projectserver::{
//!     Add, Get, List, ProjectClient, ProjectCreationInformation, TaskCreationInformation,
//!     WaitOptions,
//! };
//!
//! #[tokio::main]
//! async fn main() -> projectserver::Result<()> {
//!     // Create client from environment variables
//!     let client = ProjectClient::from_env()?;
//!
//!     // Query published projects
//!     let projects = client.projects().select(&["Id", "Name"]).top(10).get().await?;
//!     println!("Found {} projects", projects.len());
//!
//!     // Create a project, check it out and add a task
//!     let created = client
//!         .projects()
//!         .add(&ProjectCreationInformation::new("Website relaunch"))
//!         .await?;
//!     let draft = created.instance.check_out().await?.instance;
//!     draft.tasks().add(&TaskCreationInformation::new("Kick-off")).await?;
//!
//!     // Publish and check in, then wait for the queue job
//!     let job = draft.publish(true).await?;
//!     let result = job.wait(WaitOptions::default()).await?;
//!     println!("Publish finished as {}", result.state());
//!
//!     // Walk every page of a collection
//!     let calendars = client.calendars().get_all().await?;
//!     println!("{} calendars", calendars.len());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Queryable`] holds a client, the path segments and the pending OData
//!   query options.
//! - [`Instance<K>`] and [`Collection<K>`] are typed handles over a
//!   [`Queryable`]; `K` is a zero-sized marker from [`kind`] naming the entity
//!   kind, its data type and its key type.
//! - Operations are traits: [`Get`], [`List`], [`Add`], [`Delete`] and
//!   [`Update`]. Handles implement them for the kinds that support them, so
//!   adding to a read-only collection does not compile.
//! - Server-side work that runs asynchronously (publishing, check-in,
//!   deletion of projects) answers with a queue job that can be polled with
//!   [`Instance::wait_for_job`].
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `PROJECT_SERVER_URL` (required) - URL of the PWA site
//! - `PROJECT_SERVER_TOKEN` (optional) - bearer token sent with every request
//! - `PROJECT_SERVER_TIMEOUT_SECS` (optional) - request timeout, default 300

#[macro_use]
mod odata;

mod client;
mod config;
mod error;
pub mod kind;
mod models;
mod pagination;
mod queryable;
mod traits;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ProjectClient, ODATA_VERBOSE};
pub use config::ProjectConfig;
pub use error::{ProjectError, Result};
pub use odata::ODataKey;
pub use output::PrettyPrint;
pub use pagination::Page;
pub use queryable::{Collection, Created, Instance, QueryOptions, Queryable, API_ROOT};

// Re-export traits
pub use traits::{Add, Creatable, Delete, Deletable, Get, Kind, List, Update, DEFAULT_MAX_PAGES};

// Re-export models
pub use models::*;
