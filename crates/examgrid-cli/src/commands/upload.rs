//! The `examgrid upload` command.

use std::path::PathBuf;

use anyhow::Result;

use examgrid_client::config::load_config_from;
use examgrid_client::{create_client, Session, UploadFile};
use examgrid_core::schedule::UploadResponse;

pub async fn execute(file: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    // Reject the file before anything goes over the wire.
    let upload = UploadFile::from_path(&file)?;

    let config = load_config_from(config_path.as_deref())?;
    let mut session = Session::new(create_client(&config)?);
    let response = session.upload(&upload).await?;
    print_upload(&response);
    Ok(())
}

pub(crate) fn print_upload(response: &UploadResponse) {
    println!(
        "Uploaded {}: {} students, {} subjects",
        response.filename,
        response.total_students,
        response.subjects.len()
    );
    if !response.subjects.is_empty() {
        println!("Subjects: {}", response.subjects.join(", "));
    }
}
