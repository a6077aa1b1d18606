use std::fmt::Display;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use zipnet_parser::{
    parse_day_month_year, parse_leading_int, DateConstruction, RawColumn, RawRecord,
};

use crate::age::age_group_label;

/// Text written in place of a missing component inside `reportingDateMonth`.
pub const ABSENT_COMPONENT: &str = "null";

/// Inputs every record shares during one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentContext {
    /// "Today" for age computation. Read once per run by the caller.
    pub reference_date: NaiveDate,
    pub date_construction: DateConstruction,
}

impl EnrichmentContext {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            date_construction: DateConstruction::default(),
        }
    }

    pub fn with_date_construction(mut self, date_construction: DateConstruction) -> Self {
        self.date_construction = date_construction;
        self
    }

    fn parse_date(&self, raw: &RawRecord, column: RawColumn) -> Option<NaiveDate> {
        parse_day_month_year(raw.column(column), self.date_construction)
    }
}

/// One output row. Field order here is the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub age_group: Option<&'static str>,
    pub birth_year: Option<i64>,
    pub sex: Option<String>,
    pub district: Option<String>,
    pub police_station: Option<String>,
    pub police_post: Option<String>,
    pub missing_from: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub reporting_date: Option<NaiveDate>,
    pub reporting_year: Option<i32>,
    pub reporting_month: Option<u32>,
    pub reporting_day: Option<u32>,
    pub reporting_date_month: String,
    pub tracing_date: Option<NaiveDate>,
    pub tracing_status: Option<String>,
    pub description: Option<String>,
    pub created_on: Option<NaiveDate>,
    #[serde(rename = "dd_date")]
    pub dd_date: Option<NaiveDate>,
}

fn copy_through(raw: &RawRecord, column: RawColumn) -> Option<String> {
    raw.column(column).map(str::to_string)
}

fn render_component<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| ABSENT_COMPONENT.to_string(), |v| v.to_string())
}

/// Builds the `"{day}-{month}"` label, rendering missing parts as [`ABSENT_COMPONENT`].
pub fn day_month_label(date: Option<NaiveDate>) -> String {
    format!(
        "{}-{}",
        render_component(date.map(|d| d.day())),
        render_component(date.map(|d| d.month()))
    )
}

pub fn enrich_record(raw: &RawRecord, context: &EnrichmentContext) -> EnrichedRecord {
    let birth_year = raw
        .column(RawColumn::BirthYear)
        .and_then(parse_leading_int);
    let age = birth_year
        .and_then(|year| i64::from(context.reference_date.year()).checked_sub(year));
    let age_group = age.and_then(age_group_label);

    let reporting_date = context.parse_date(raw, RawColumn::ReportingDate);

    EnrichedRecord {
        name: copy_through(raw, RawColumn::Name),
        age,
        age_group,
        birth_year,
        sex: copy_through(raw, RawColumn::Sex),
        district: copy_through(raw, RawColumn::District),
        police_station: copy_through(raw, RawColumn::PoliceStation),
        police_post: copy_through(raw, RawColumn::PolicePost),
        missing_from: copy_through(raw, RawColumn::MissingFrom),
        date_from: context.parse_date(raw, RawColumn::DateFrom),
        reporting_date,
        reporting_year: reporting_date.map(|d| d.year()),
        reporting_month: reporting_date.map(|d| d.month()),
        reporting_day: reporting_date.map(|d| d.day()),
        reporting_date_month: day_month_label(reporting_date),
        tracing_date: context.parse_date(raw, RawColumn::TracingDate),
        tracing_status: copy_through(raw, RawColumn::TracingStatus),
        description: copy_through(raw, RawColumn::Description),
        created_on: context.parse_date(raw, RawColumn::CreatedOn),
        dd_date: context.parse_date(raw, RawColumn::DdDate),
    }
}

pub fn enrich_records(raw: &[RawRecord], context: &EnrichmentContext) -> Vec<EnrichedRecord> {
    raw.iter().map(|record| enrich_record(record, context)).collect()
}
