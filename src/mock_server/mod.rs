//! Mock Project Server for E2E testing.
//!
//! This module provides an in-memory mock server that emulates the
//! `_api/ProjectServer` REST API for integration and end-to-end testing.
//! Unlike wiremock which mocks at the HTTP level per-test, this server
//! maintains state across requests, enabling realistic workflow testing:
//! check a project out, add draft tasks, publish, then poll the queue job.
//!
//! # Example
//!
//! ```ignore
//! use projectserver::mock_server::MockServer;
//! use projectserver::{Get, ProjectClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = ProjectClient::new(server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let calendars = client.calendars().get().await.unwrap();
//!     assert_eq!(calendars.len(), 2);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockJob, MockProject, MockState, DEFAULT_PAGE_SIZE};
