//! examgrid-client — Remote scheduler integration.
//!
//! Implements the `SchedulerClient` trait over HTTP, loads the client
//! configuration, and provides the `Session` that installs scheduling
//! responses into the live result view.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod session;

pub use client::{SchedulerClient, UploadFile};
pub use config::{create_client, load_config_from, ExamgridConfig};
pub use error::ClientError;
pub use http::HttpSchedulerClient;
pub use session::{ScheduleOutcome, Session};
