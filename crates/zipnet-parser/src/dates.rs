use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// How day/month/year components outside the calendar are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateConstruction {
    /// Overflowing components roll forward (month 13 is January of the next year,
    /// day 0 is the last day of the previous month).
    #[default]
    Normalize,
    /// Components outside the calendar yield no date.
    Strict,
}

impl DateConstruction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateConstruction::Normalize => "normalize",
            DateConstruction::Strict => "strict",
        }
    }

    /// Builds a date from components. Years 0 through 99 are read as 1900 through 1999
    /// under either policy.
    pub fn build(&self, year: i64, month: i64, day: i64) -> Option<NaiveDate> {
        let year = expand_two_digit_year(year);
        match self {
            DateConstruction::Normalize => normalized_date(year, month, day),
            DateConstruction::Strict => NaiveDate::from_ymd_opt(
                i32::try_from(year).ok()?,
                u32::try_from(month).ok()?,
                u32::try_from(day).ok()?,
            ),
        }
    }
}

impl fmt::Display for DateConstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateConstruction {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normalize" | "normalise" => Ok(DateConstruction::Normalize),
            "strict" => Ok(DateConstruction::Strict),
            other => Err(format!("unknown date construction '{other}'")),
        }
    }
}

fn expand_two_digit_year(year: i64) -> i64 {
    if (0..=99).contains(&year) {
        1900 + year
    } else {
        year
    }
}

fn normalized_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let total_months = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    let first_of_month = NaiveDate::from_ymd_opt(
        i32::try_from(total_months.div_euclid(12)).ok()?,
        u32::try_from(total_months.rem_euclid(12) + 1).ok()?,
        1,
    )?;
    first_of_month.checked_add_signed(Duration::try_days(day.checked_sub(1)?)?)
}

/// Reads the integer prefix of `value`: leading whitespace, an optional sign, then at
/// least one ASCII digit. Anything after the digits is ignored.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digit_count = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }
    let magnitude: i64 = unsigned[..digit_count].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses `dd/mm/yyyy` text. Missing, blank and malformed input all map to `None`.
pub fn parse_day_month_year(
    value: Option<&str>,
    construction: DateConstruction,
) -> Option<NaiveDate> {
    let value = value?;
    if value.trim().is_empty() {
        return None;
    }

    let parts: Vec<&str> = value.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let day = parse_leading_int(day)?;
    let month = parse_leading_int(month)?;
    let year = parse_leading_int(year)?;
    construction.build(year, month, day)
}
