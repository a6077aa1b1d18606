use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enricher::EnrichedRecord;

/// How records without a reporting date are placed by [`sort_by_reporting_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingPolicy {
    /// Missing dates first, then ascending. Stable.
    #[default]
    AbsentFirst,
    AbsentLast,
    /// Merge sort driven by [`compare_reporting_dates`] exactly as written. Not a total
    /// order: dated records separated by a missing one may stay out of order.
    Literal,
}

impl OrderingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderingPolicy::Literal => "literal",
            OrderingPolicy::AbsentFirst => "absent-first",
            OrderingPolicy::AbsentLast => "absent-last",
        }
    }
}

impl fmt::Display for OrderingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderingPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "literal" => Ok(OrderingPolicy::Literal),
            "absent-first" | "nulls-first" => Ok(OrderingPolicy::AbsentFirst),
            "absent-last" | "nulls-last" => Ok(OrderingPolicy::AbsentLast),
            other => Err(format!("unknown ordering policy '{other}'")),
        }
    }
}

/// Three-way comparison on reporting dates.
///
/// A missing date on either side compares as less than the other side, so the result is
/// `-1` for both `(None, Some)` and `(Some, None)`. Two missing dates are equal.
pub fn compare_reporting_dates(left: Option<NaiveDate>, right: Option<NaiveDate>) -> i32 {
    match (left, right) {
        (None, None) => 0,
        (None, Some(_)) => -1,
        (Some(_), None) => -1,
        (Some(l), Some(r)) => match l.cmp(&r) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        },
    }
}

/// Stable top-down merge sort. The right-hand element is emitted first only when
/// `compare(left, right)` is positive, so an inconsistent comparator still produces a
/// deterministic permutation.
fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> i32,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(l, r) > 0,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged
}

fn absent_last(left: Option<NaiveDate>, right: Option<NaiveDate>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(l), Some(r)) => l.cmp(&r),
    }
}

pub fn sort_by_reporting_date(
    mut records: Vec<EnrichedRecord>,
    policy: OrderingPolicy,
) -> Vec<EnrichedRecord> {
    match policy {
        OrderingPolicy::Literal => {
            let compare = |a: &EnrichedRecord, b: &EnrichedRecord| {
                compare_reporting_dates(a.reporting_date, b.reporting_date)
            };
            merge_sort_by(records, &compare)
        }
        OrderingPolicy::AbsentFirst => {
            records.sort_by(|a, b| a.reporting_date.cmp(&b.reporting_date));
            records
        }
        OrderingPolicy::AbsentLast => {
            records.sort_by(|a, b| absent_last(a.reporting_date, b.reporting_date));
            records
        }
    }
}
