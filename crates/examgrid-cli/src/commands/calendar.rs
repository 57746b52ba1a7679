//! The `examgrid calendar` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use examgrid_core::calendar::{default_rest_days, enumerate_days, parse_iso_date};

pub fn execute(start: String, end: String, json: bool) -> Result<()> {
    let days = enumerate_days(parse_iso_date(&start)?, parse_iso_date(&end)?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Weekday", "Client", "Remote", "Rest"]);
    for day in &days {
        table.add_row(vec![
            Cell::new(day.iso_date()),
            Cell::new(day.weekday_name()),
            Cell::new(day.client_weekday_index),
            Cell::new(day.remote_weekday_index),
            Cell::new(if day.is_default_rest_day { "yes" } else { "" }),
        ]);
    }
    println!("{table}");

    let rest = default_rest_days(&days)
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",");
    println!(
        "Days: {} | default rest days: {}",
        days.len(),
        if rest.is_empty() { "none" } else { rest.as_str() }
    );

    Ok(())
}
