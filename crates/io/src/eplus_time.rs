//! Time-cell parsing for tabular simulator output.
//!
//! Building simulators write their time column either as plain seconds or
//! as an EnergyPlus stamp of the form `MM/DD  HH:MM:SS`, with `24:00:00`
//! meaning the end of that day. Stamps are converted to seconds since
//! January 1, 00:00:00 of a non-leap year.

use chrono::{Datelike, NaiveDate};

use crate::error::IoError;

/// Year used to resolve day-of-year. Any non-leap year works.
const REFERENCE_YEAR: i32 = 2001;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Parses one time cell into seconds.
///
/// Accepts a finite decimal number or an EnergyPlus stamp. `row` only
/// labels the error.
///
/// # Errors
///
/// Returns [`IoError::InvalidTime`] if the cell is neither.
pub(crate) fn parse_time_cell(cell: &str, row: usize) -> Result<f64, IoError> {
    let trimmed = cell.trim();
    if let Ok(v) = trimmed.parse::<f64>() {
        if v.is_finite() {
            return Ok(v);
        }
        return Err(invalid(cell, row, "time is not finite"));
    }
    parse_stamp(trimmed).map_err(|reason| invalid(cell, row, reason))
}

fn invalid(cell: &str, row: usize, reason: impl Into<String>) -> IoError {
    IoError::InvalidTime {
        value: cell.to_string(),
        row,
        reason: reason.into(),
    }
}

/// Converts `MM/DD  HH:MM:SS` to seconds since the start of the year.
fn parse_stamp(stamp: &str) -> Result<f64, String> {
    let mut parts = stamp.split_whitespace();
    let (Some(date), Some(clock), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("expected a number or 'MM/DD  HH:MM:SS'".to_string());
    };

    let (month, day) = date
        .split_once('/')
        .ok_or_else(|| format!("date '{date}' is not MM/DD"))?;
    let month: u32 = month
        .parse()
        .map_err(|_| format!("month '{month}' is not a number"))?;
    let day: u32 = day
        .parse()
        .map_err(|_| format!("day '{day}' is not a number"))?;
    let date = NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)
        .ok_or_else(|| format!("no such date {month:02}/{day:02}"))?;

    let fields: Vec<&str> = clock.split(':').collect();
    let [h, m, s] = fields.as_slice() else {
        return Err(format!("clock '{clock}' is not HH:MM:SS"));
    };
    let h: u32 = h.parse().map_err(|_| format!("hour '{h}' is not a number"))?;
    let m: u32 = m.parse().map_err(|_| format!("minute '{m}' is not a number"))?;
    let s: u32 = s.parse().map_err(|_| format!("second '{s}' is not a number"))?;
    if m > 59 || s > 59 || h > 24 || (h == 24 && (m, s) != (0, 0)) {
        return Err(format!("clock '{clock}' is out of range"));
    }

    let day_start = f64::from(date.ordinal0()) * SECONDS_PER_DAY;
    Ok(day_start + f64::from(h * 3600 + m * 60 + s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers_pass_through() {
        assert_eq!(parse_time_cell("3600", 0).unwrap(), 3600.0);
        assert_eq!(parse_time_cell(" 0.5 ", 0).unwrap(), 0.5);
        assert_eq!(parse_time_cell("-60", 0).unwrap(), -60.0);
    }

    #[test]
    fn first_stamp_of_year() {
        assert_eq!(parse_time_cell(" 01/01  00:10:00", 0).unwrap(), 600.0);
        assert_eq!(parse_time_cell("01/01 01:00:00", 0).unwrap(), 3600.0);
    }

    #[test]
    fn end_of_day_is_midnight_of_next() {
        assert_eq!(parse_time_cell("01/01  24:00:00", 0).unwrap(), 86_400.0);
        assert_eq!(
            parse_time_cell("01/01  24:00:00", 0).unwrap(),
            parse_time_cell("01/02  00:00:00", 0).unwrap()
        );
    }

    #[test]
    fn later_months_use_non_leap_calendar() {
        // March 1 is day 59 (zero-based) in a non-leap year.
        assert_eq!(parse_time_cell("03/01  00:00:00", 0).unwrap(), 59.0 * 86_400.0);
        assert_eq!(
            parse_time_cell("12/31  24:00:00", 0).unwrap(),
            365.0 * 86_400.0
        );
    }

    #[test]
    fn rejects_garbage() {
        for cell in ["", "abc", "02/29  00:00:00", "13/01  00:00:00", "01/01  24:00:01", "01/01", "NaN"] {
            let err = parse_time_cell(cell, 4).unwrap_err();
            assert!(
                matches!(err, IoError::InvalidTime { row: 4, .. }),
                "cell {cell:?} gave {err:?}"
            );
        }
    }
}
