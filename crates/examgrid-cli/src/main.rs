//! examgrid CLI — plan, browse and export exam timetables.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use examgrid_client::ClientError;
use examgrid_core::schedule::SessionMode;
use examgrid_core::{Shift, SortField};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "examgrid", version, about = "Exam timetable scheduling client")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter examgrid.toml
    Init,

    /// Show the days of a date range with their weekday indices
    Calendar {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a sample roster in the JSON shape the scheduler accepts
    Template {
        /// Output file
        #[arg(long, default_value = "roster.json")]
        output: PathBuf,

        /// Number of sample students
        #[arg(long, default_value = "5")]
        students: usize,
    },

    /// Upload a student roster (.xlsx, .xls or .json)
    Upload {
        /// Roster file
        #[arg(long)]
        file: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Request a timetable and save the results
    Schedule {
        /// First exam day (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Last exam day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Rest days, 0 = Sunday (comma-separated, default: weekends in range)
        #[arg(long, value_delimiter = ',')]
        rest_days: Option<Vec<u8>>,

        /// Sessions per day: morning, afternoon, both
        #[arg(long)]
        session: Option<SessionMode>,

        /// Number of rooms; configured names are used first
        #[arg(long)]
        rooms: Option<usize>,

        /// Minutes between exams
        #[arg(long)]
        break_minutes: Option<u32>,

        /// Minimum students per room (0 = scheduler default)
        #[arg(long)]
        min_students: Option<u32>,

        /// Maximum students per room (0 = scheduler default)
        #[arg(long)]
        max_students: Option<u32>,

        /// Upload this roster before scheduling
        #[arg(long)]
        file: Option<PathBuf>,

        /// Where to save the results
        #[arg(long, default_value = "examgrid-results.json")]
        output: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Filter, sort and page through saved results
    View {
        /// Results JSON file
        #[arg(long)]
        results: PathBuf,

        /// Case-insensitive match on student name or ID
        #[arg(long)]
        search: Option<String>,

        /// Exact subject
        #[arg(long)]
        subject: Option<String>,

        /// Exact room
        #[arg(long)]
        room: Option<String>,

        /// Exact exam date
        #[arg(long)]
        date: Option<String>,

        /// Morning or Afternoon
        #[arg(long)]
        shift: Option<Shift>,

        /// Column header clicks, applied in order (repeatable)
        #[arg(long)]
        sort: Vec<SortField>,

        /// Page to show
        #[arg(long, default_value = "1")]
        page: usize,

        /// List the values available for each filter
        #[arg(long)]
        options: bool,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export saved results as HTML or JSON
    Export {
        /// Results JSON file
        #[arg(long)]
        results: PathBuf,

        /// Output format: html, json
        #[arg(long, default_value = "html")]
        format: String,

        /// Output file
        #[arg(long)]
        output: PathBuf,

        /// Title of the HTML timetable
        #[arg(long, default_value = "Exam timetable")]
        title: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Calendar { start, end, json } => commands::calendar::execute(start, end, json),
        Commands::Template { output, students } => commands::template::execute(output, students),
        Commands::Upload { file, config } => commands::upload::execute(file, config).await,
        Commands::Schedule {
            start,
            end,
            rest_days,
            session,
            rooms,
            break_minutes,
            min_students,
            max_students,
            file,
            output,
            config,
        } => {
            commands::schedule::execute(commands::schedule::ScheduleArgs {
                start,
                end,
                rest_days,
                session,
                rooms,
                break_minutes,
                min_students,
                max_students,
                file,
                output,
                config,
            })
            .await
        }
        Commands::View {
            results,
            search,
            subject,
            room,
            date,
            shift,
            sort,
            page,
            options,
            json,
        } => commands::view::execute(commands::view::ViewArgs {
            results,
            search,
            subject,
            room,
            date,
            shift,
            sort,
            page,
            options,
            json,
        }),
        Commands::Export {
            results,
            format,
            output,
            title,
        } => commands::export::execute(results, format, output, title),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        if e
            .downcast_ref::<ClientError>()
            .is_some_and(|err| !err.is_permanent())
        {
            eprintln!("The scheduler may be busy or unreachable; retry later.");
        }
        process::exit(1);
    }
}
