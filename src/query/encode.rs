//! Wire encodings for dates, water classes, record types and timesteps.

use crate::query::error::QueryError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
const WIRE_DATE_FORMAT: &str = "%m-%d-%Y";

const DIVREC_TYPES: [&str; 6] = [
    "DivComment",
    "DivTotal",
    "RelComment",
    "RelTolal",
    "StageVolume",
    "WaterClass",
];

/// Parses a `YYYY-MM-DD` date given for `parameter`.
///
/// # Errors
///
/// Returns [`QueryError::InvalidDate`] if the value does not parse.
pub fn parse_date(parameter: &str, value: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT).map_err(|source| {
        QueryError::InvalidDate {
            parameter: parameter.to_string(),
            value: value.to_string(),
            source,
        }
    })
}

/// Formats a date the way the API expects it: `MM-DD-YYYY`.
pub fn encode_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

/// Normalizes a water class identifier.
///
/// Diversion and release aliases become `diversion`/`release`; anything else is
/// kept as given. The result is wrapped in `*` so the server matches it as a substring.
pub fn water_class(value: &str) -> String {
    let trimmed = value.trim();
    let normalized = match trimmed.to_lowercase().as_str() {
        "diversion" | "diversions" | "div" | "divs" | "d" => "diversion".to_string(),
        "release" | "releases" | "rel" | "rels" | "r" => "release".to_string(),
        _ => trimmed.to_string(),
    };
    format!("*{normalized}*")
}

/// Matches a diversion record type case-insensitively and returns its canonical spelling.
pub fn divrec_type(value: &str) -> Result<&'static str, QueryError> {
    let trimmed = value.trim();
    DIVREC_TYPES
        .iter()
        .find(|known| known.eq_ignore_ascii_case(trimmed))
        .copied()
        .ok_or_else(|| {
            QueryError::validation(format!(
                "'{value}' is not a diversion record type, expected one of {}",
                DIVREC_TYPES.join(", ")
            ))
        })
}

/// Aggregation step of a time series.
///
/// For surface water records `Year` means the water year (October through September).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timescale {
    Raw,
    Hour,
    Day,
    Month,
    Year,
}

impl fmt::Display for Timescale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Timescale::Raw => "raw",
            Timescale::Hour => "hour",
            Timescale::Day => "day",
            Timescale::Month => "month",
            Timescale::Year => "year",
        };
        f.write_str(name)
    }
}

impl FromStr for Timescale {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(Timescale::Raw),
            "hour" | "hours" | "hourly" | "hr" | "h" => Ok(Timescale::Hour),
            "day" | "days" | "daily" | "d" => Ok(Timescale::Day),
            "month" | "months" | "monthly" | "mon" | "mons" | "m" => Ok(Timescale::Month),
            "year" | "years" | "yearly" | "annual" | "annually" | "yr" | "y" | "wyear"
            | "wyears" | "water_year" | "water_years" | "wateryear" | "wateryears" | "wy" => {
                Ok(Timescale::Year)
            }
            _ => Err(QueryError::validation(format!(
                "'{s}' is not a recognized timescale"
            ))),
        }
    }
}

/// Water year a date falls in. Water year N runs from October N-1 through September N.
pub fn water_year(date: NaiveDate) -> i32 {
    if date.month() >= 10 {
        date.year() + 1
    } else {
        date.year()
    }
}

/// Splits `[start, end]` into calendar-year intervals.
///
/// The first and last intervals may be partial years. Returns an empty vector
/// when `start` is after `end`.
pub fn yearly_batches(start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    let mut batches = Vec::new();
    let mut batch_start = start;
    while batch_start <= end {
        let year_end = NaiveDate::from_ymd_opt(batch_start.year(), 12, 31).unwrap_or(end);
        let batch_end = year_end.min(end);
        batches.push((batch_start, batch_end));
        match batch_end.succ_opt() {
            Some(next) => batch_start = next,
            None => break,
        }
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn timescale_serde_names() {
        assert_eq!(serde_json::to_string(&Timescale::Month).unwrap(), "\"month\"");
        let parsed: Timescale = serde_json::from_str("\"hour\"").unwrap();
        assert_eq!(parsed, Timescale::Hour);
    }

    #[test]
    fn dates_go_out_as_month_day_year() {
        let parsed = parse_date("start_date", "2015-01-01").unwrap();
        assert_eq!(encode_date(parsed), "01-01-2015");
        assert_eq!(encode_date(date(1999, 12, 31)), "12-31-1999");
    }

    #[test]
    fn rejects_unparsable_dates() {
        let err = parse_date("start_date", "not-a-date").unwrap_err();
        match err {
            QueryError::InvalidDate {
                parameter, value, ..
            } => {
                assert_eq!(parameter, "start_date");
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(parse_date("end_date", "2015-02-30").is_err());
        assert!(parse_date("end_date", "01-01-2015").is_err());
    }

    #[test]
    fn water_class_aliases() {
        assert_eq!(water_class("DIVS"), "*diversion*");
        assert_eq!(water_class("r"), "*release*");
        assert_eq!(water_class("0100503 S:1"), "*0100503 S:1*");
    }

    #[test]
    fn divrec_types_are_canonicalized() {
        assert_eq!(divrec_type("divtotal").unwrap(), "DivTotal");
        assert_eq!(divrec_type(" STAGEVOLUME ").unwrap(), "StageVolume");
        assert!(matches!(
            divrec_type("flow"),
            Err(QueryError::Validation { .. })
        ));
    }

    #[test]
    fn timescale_aliases() {
        assert_eq!("Daily".parse::<Timescale>().unwrap(), Timescale::Day);
        assert_eq!("mons".parse::<Timescale>().unwrap(), Timescale::Month);
        assert_eq!("annually".parse::<Timescale>().unwrap(), Timescale::Year);
        assert_eq!("wy".parse::<Timescale>().unwrap(), Timescale::Year);
        assert_eq!("hourly".parse::<Timescale>().unwrap(), Timescale::Hour);
        assert_eq!("raw".parse::<Timescale>().unwrap(), Timescale::Raw);
        assert!("fortnight".parse::<Timescale>().is_err());
    }

    #[test]
    fn water_year_starts_in_october() {
        assert_eq!(water_year(date(2020, 9, 30)), 2020);
        assert_eq!(water_year(date(2020, 10, 1)), 2021);
    }

    #[test]
    fn batches_by_calendar_year() {
        let batches = yearly_batches(date(2018, 6, 15), date(2020, 3, 1));
        assert_eq!(
            batches,
            vec![
                (date(2018, 6, 15), date(2018, 12, 31)),
                (date(2019, 1, 1), date(2019, 12, 31)),
                (date(2020, 1, 1), date(2020, 3, 1)),
            ]
        );

        let single = yearly_batches(date(2020, 2, 1), date(2020, 2, 1));
        assert_eq!(single, vec![(date(2020, 2, 1), date(2020, 2, 1))]);
        assert!(yearly_batches(date(2021, 1, 1), date(2020, 1, 1)).is_empty());
    }
}
