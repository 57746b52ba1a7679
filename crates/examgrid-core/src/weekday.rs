//! Day-of-week numbering conventions.
//!
//! The client numbers weekdays from Sunday (`0 = Sunday .. 6 = Saturday`),
//! the remote scheduler from Monday (`0 = Monday .. 6 = Sunday`). Every
//! conversion between the two goes through this module.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::CalendarError;

const DAYS_PER_WEEK: u8 = 7;

fn check(index: u8) -> Result<u8, CalendarError> {
    if index < DAYS_PER_WEEK {
        Ok(index)
    } else {
        Err(CalendarError::InvalidWeekday { index })
    }
}

// Callers guarantee `i < DAYS_PER_WEEK`.
fn shift_to_remote(i: u8) -> u8 {
    (i + 6) % DAYS_PER_WEEK
}

/// Translate a client weekday index (Sunday-based) to the remote convention.
pub fn to_remote(client_index: u8) -> Result<u8, CalendarError> {
    check(client_index).map(shift_to_remote)
}

/// Translate a remote weekday index (Monday-based) to the client convention.
pub fn to_client(remote_index: u8) -> Result<u8, CalendarError> {
    let i = check(remote_index)?;
    Ok((i + 1) % DAYS_PER_WEEK)
}

/// Client-convention index of a chrono weekday.
pub fn client_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Remote-convention index of a chrono weekday.
pub fn remote_index(weekday: Weekday) -> u8 {
    shift_to_remote(client_index(weekday))
}

/// Client-convention index of a date's weekday.
pub fn client_index_of(date: NaiveDate) -> u8 {
    client_index(date.weekday())
}

/// Translate the rest days a user checked (client convention) into the
/// de-duplicated `off_days` set sent to the remote scheduler.
pub fn remote_off_days<I>(client_days: I) -> Result<BTreeSet<u8>, CalendarError>
where
    I: IntoIterator<Item = u8>,
{
    client_days.into_iter().map(to_remote).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunday_and_monday() {
        assert_eq!(to_remote(0).unwrap(), 6);
        assert_eq!(to_remote(1).unwrap(), 0);
        assert_eq!(to_remote(6).unwrap(), 5);
        assert_eq!(to_client(6).unwrap(), 0);
        assert_eq!(to_client(0).unwrap(), 1);
    }

    #[test]
    fn round_trip_all_days() {
        for i in 0..7u8 {
            assert_eq!(to_client(to_remote(i).unwrap()).unwrap(), i);
            assert_eq!(to_remote(to_client(i).unwrap()).unwrap(), i);
        }
    }

    #[test]
    fn to_remote_is_bijective() {
        let images: BTreeSet<u8> = (0..7u8).map(|i| to_remote(i).unwrap()).collect();
        assert_eq!(images, (0..7u8).collect());
    }

    #[test]
    fn out_of_range_rejected() {
        assert_eq!(
            to_remote(7).unwrap_err(),
            CalendarError::InvalidWeekday { index: 7 }
        );
        assert!(to_client(255).is_err());
    }

    #[test]
    fn chrono_weekday_matches_convention() {
        assert_eq!(client_index(Weekday::Sun), 0);
        assert_eq!(client_index(Weekday::Sat), 6);
        for wd in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            let remote = to_remote(client_index(wd)).unwrap();
            assert_eq!(u32::from(remote), wd.num_days_from_monday());
            assert_eq!(remote_index(wd), remote);
        }
    }

    #[test]
    fn off_days_deduplicated() {
        let off = remote_off_days([6, 0, 6, 0]).unwrap();
        assert_eq!(off.into_iter().collect::<Vec<_>>(), vec![5, 6]);
    }

    #[test]
    fn off_days_rejects_bad_index() {
        assert!(remote_off_days([0, 9]).is_err());
    }
}
