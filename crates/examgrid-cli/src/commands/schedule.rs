//! The `examgrid schedule` command.

use std::path::PathBuf;

use anyhow::Result;

use examgrid_client::config::load_config_from;
use examgrid_client::{create_client, ExamgridConfig, Session, UploadFile};
use examgrid_core::calendar::parse_iso_date;
use examgrid_core::schedule::{room_names, ScheduleForm, SessionMode};

use super::upload::print_upload;
use super::view::print_page;

pub struct ScheduleArgs {
    pub start: String,
    pub end: String,
    pub rest_days: Option<Vec<u8>>,
    pub session: Option<SessionMode>,
    pub rooms: Option<usize>,
    pub break_minutes: Option<u32>,
    pub min_students: Option<u32>,
    pub max_students: Option<u32>,
    pub file: Option<PathBuf>,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
}

pub async fn execute(args: ScheduleArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let form = build_form(&args, &config)?;
    // Catch reversed ranges and bad rest days before any request.
    form.to_config()?;

    let upload = args.file.as_deref().map(UploadFile::from_path).transpose()?;

    let mut session = Session::new(create_client(&config)?);
    if let Some(upload) = &upload {
        let response = session.upload(upload).await?;
        print_upload(&response);
    }

    let outcome = session.schedule(&form).await?;
    for warning in &outcome.warnings {
        eprintln!("Warning: {warning}");
    }

    let view = session.view_mut();
    view.results().save_json(&args.output)?;
    println!("Scheduled {} exams", outcome.rows);
    println!("{}", super::summary_table(&view.summary()));
    print_page(view);
    println!("\nResults written to {}", args.output.display());

    Ok(())
}

fn build_form(args: &ScheduleArgs, config: &ExamgridConfig) -> Result<ScheduleForm> {
    let start = parse_iso_date(&args.start)?;
    let end = parse_iso_date(&args.end)?;
    let mut form = config.schedule.form(start, end);

    if let Some(days) = &args.rest_days {
        form.rest_days = Some(days.clone());
    }
    if let Some(mode) = args.session {
        form.session_mode = mode;
    }
    if let Some(count) = args.rooms {
        anyhow::ensure!(count >= 1, "at least one room is required");
        form.rooms = room_names(count, &config.schedule.rooms);
    }
    if let Some(minutes) = args.break_minutes {
        form.break_minutes = minutes;
    }
    if let Some(min) = args.min_students {
        form.min_students_per_room = min;
    }
    if let Some(max) = args.max_students {
        form.max_students_per_room = max;
    }
    if form.min_students_per_room > 0 && form.max_students_per_room > 0 {
        anyhow::ensure!(
            form.min_students_per_room <= form.max_students_per_room,
            "min students per room ({}) exceeds max ({})",
            form.min_students_per_room,
            form.max_students_per_room
        );
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ScheduleArgs {
        ScheduleArgs {
            start: "2024-06-03".into(),
            end: "2024-06-09".into(),
            rest_days: None,
            session: None,
            rooms: None,
            break_minutes: None,
            min_students: None,
            max_students: None,
            file: None,
            output: PathBuf::from("out.json"),
            config: None,
        }
    }

    #[test]
    fn flags_override_config() {
        let mut config = ExamgridConfig::default();
        config.schedule.rooms = vec!["A101".into()];
        config.schedule.break_minutes = 45;

        let mut a = args();
        a.rooms = Some(3);
        a.session = Some(SessionMode::Morning);
        a.rest_days = Some(vec![0]);
        let form = build_form(&a, &config).unwrap();

        assert_eq!(form.rooms, vec!["A101", "Room 2", "Room 3"]);
        assert_eq!(form.session_mode, SessionMode::Morning);
        assert_eq!(form.break_minutes, 45);
        assert_eq!(form.rest_days, Some(vec![0]));
    }

    #[test]
    fn min_above_max_rejected() {
        let mut a = args();
        a.min_students = Some(40);
        a.max_students = Some(20);
        let err = build_form(&a, &ExamgridConfig::default()).unwrap_err();
        assert!(err.to_string().contains("exceeds max"));
    }

    #[test]
    fn bad_date_rejected() {
        let mut a = args();
        a.start = "03/06/2024".into();
        assert!(build_form(&a, &ExamgridConfig::default()).is_err());
    }
}
