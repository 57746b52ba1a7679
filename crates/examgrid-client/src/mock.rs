//! Mock scheduler for testing sessions without a server.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use examgrid_core::schedule::{ScheduleConfig, ScheduleResponse, UploadResponse};
use examgrid_core::ExamAssignment;

use crate::client::{SchedulerClient, UploadFile};
use crate::error::ClientError;

/// A scheduler that answers from canned data.
///
/// `fail_with_status` makes every call fail with that HTTP status, which is
/// how tests check that errors leave the result view untouched.
pub struct MockScheduler {
    results: Vec<ExamAssignment>,
    warnings: Vec<String>,
    fail_with_status: Option<u16>,
    call_count: AtomicU32,
    last_config: Mutex<Option<ScheduleConfig>>,
}

impl MockScheduler {
    /// A scheduler that always returns `results`.
    pub fn with_results(results: Vec<ExamAssignment>) -> Self {
        Self {
            results,
            warnings: Vec::new(),
            fail_with_status: None,
            call_count: AtomicU32::new(0),
            last_config: Mutex::new(None),
        }
    }

    /// A scheduler whose every call fails.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::with_results(Vec::new())
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Number of calls made to this scheduler.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The last schedule request received.
    pub fn last_config(&self) -> Option<ScheduleConfig> {
        self.last_config
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn check(&self) -> Result<(), ClientError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match self.fail_with_status {
            Some(status) => Err(ClientError::ApiError {
                status,
                message: "mock failure".into(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SchedulerClient for MockScheduler {
    fn name(&self) -> &str {
        "mock"
    }

    async fn upload(&self, file: &UploadFile) -> anyhow::Result<UploadResponse> {
        self.check()?;
        let mut subjects: Vec<String> = self.results.iter().map(|r| r.subject.clone()).collect();
        subjects.sort();
        subjects.dedup();
        Ok(UploadResponse {
            filename: file.filename.clone(),
            total_students: examgrid_core::stats::summarize(&self.results).total_students,
            subjects,
        })
    }

    async fn schedule(&self, config: &ScheduleConfig) -> anyhow::Result<ScheduleResponse> {
        *self
            .last_config
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(config.clone());
        self.check()?;
        Ok(ScheduleResponse {
            results: self.results.clone(),
            warnings: self.warnings.clone(),
        })
    }
}
