use std::collections::BTreeMap;

use serde::Serialize;

use crate::age::AGE_BRACKETS;
use crate::enricher::EnrichedRecord;

pub const UNKNOWN_LABEL: &str = "unknown";

/// Case counts for the `summary` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseSummary {
    pub total: usize,
    /// Every bracket in table order, then [`UNKNOWN_LABEL`].
    pub by_age_group: Vec<(String, usize)>,
    /// Ascending by year; records without a reporting date come last as `None`.
    pub by_reporting_year: Vec<(Option<i32>, usize)>,
    /// Sorted by label; blank or missing statuses count as [`UNKNOWN_LABEL`].
    pub by_tracing_status: Vec<(String, usize)>,
}

pub fn summarize(records: &[EnrichedRecord]) -> CaseSummary {
    let mut age_counts = vec![0usize; AGE_BRACKETS.len() + 1];
    let mut year_counts: BTreeMap<i32, usize> = BTreeMap::new();
    let mut missing_year = 0usize;
    let mut status_counts: BTreeMap<String, usize> = BTreeMap::new();

    for record in records {
        let slot = record
            .age_group
            .and_then(|label| AGE_BRACKETS.iter().position(|b| b.label == label))
            .unwrap_or(AGE_BRACKETS.len());
        age_counts[slot] += 1;

        match record.reporting_year {
            Some(year) => *year_counts.entry(year).or_insert(0) += 1,
            None => missing_year += 1,
        }

        let status = record
            .tracing_status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_LABEL);
        *status_counts.entry(status.to_string()).or_insert(0) += 1;
    }

    let by_age_group = AGE_BRACKETS
        .iter()
        .map(|bracket| bracket.label)
        .chain(std::iter::once(UNKNOWN_LABEL))
        .zip(age_counts)
        .map(|(label, count)| (label.to_string(), count))
        .collect();

    let mut by_reporting_year: Vec<(Option<i32>, usize)> = year_counts
        .into_iter()
        .map(|(year, count)| (Some(year), count))
        .collect();
    if missing_year > 0 {
        by_reporting_year.push((None, missing_year));
    }

    CaseSummary {
        total: records.len(),
        by_age_group,
        by_reporting_year,
        by_tracing_status: status_counts.into_iter().collect(),
    }
}
