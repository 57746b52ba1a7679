//! A browsing session: one scheduler client and the live result view.

use anyhow::Result;
use tracing::{info, warn};

use examgrid_core::schedule::{ScheduleForm, UploadResponse};
use examgrid_core::{ResultSet, ResultView};

use crate::client::{SchedulerClient, UploadFile};

/// What a successful scheduling call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    /// Rows now installed in the view.
    pub rows: usize,
    /// Scheduler warnings to show the user.
    pub warnings: Vec<String>,
}

/// Drives requests against a scheduler and installs their results.
///
/// Requests take `&mut self`, so a session never has two requests in
/// flight. A failed request leaves the current view as it was.
pub struct Session<C: SchedulerClient> {
    client: C,
    view: ResultView,
    last_upload: Option<UploadResponse>,
}

impl<C: SchedulerClient> Session<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            view: ResultView::new(),
            last_upload: None,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ResultView {
        &mut self.view
    }

    pub fn last_upload(&self) -> Option<&UploadResponse> {
        self.last_upload.as_ref()
    }

    /// Upload a roster. Does not touch the result view.
    pub async fn upload(&mut self, file: &UploadFile) -> Result<UploadResponse> {
        let upload = self.client.upload(file).await?;
        self.last_upload = Some(upload.clone());
        Ok(upload)
    }

    /// Validate the form, request a timetable and install it.
    ///
    /// Range and weekday errors are returned before any request is sent.
    pub async fn schedule(&mut self, form: &ScheduleForm) -> Result<ScheduleOutcome> {
        let config = form.to_config()?;
        let response = match self.client.schedule(&config).await {
            Ok(r) => r,
            Err(e) => {
                warn!(client = self.client.name(), error = %e, "scheduling failed, keeping current view");
                return Err(e);
            }
        };

        let outcome = ScheduleOutcome {
            rows: response.results.len(),
            warnings: response.warnings,
        };
        self.view.install(ResultSet::new(response.results));
        info!(rows = outcome.rows, "installed new schedule");
        Ok(outcome)
    }
}
