use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use zipnet_core::enricher::{enrich_record, enrich_records, EnrichedRecord, EnrichmentContext};
use zipnet_core::outputs::{to_csv_string, write_records, OutputFormat};
use zipnet_parser::{read_raw_records, RawRecord};

const OUTPUT_COLUMNS: [&str; 20] = [
    "name",
    "age",
    "ageGroup",
    "birthYear",
    "sex",
    "district",
    "policeStation",
    "policePost",
    "missingFrom",
    "dateFrom",
    "reportingDate",
    "reportingYear",
    "reportingMonth",
    "reportingDay",
    "reportingDateMonth",
    "tracingDate",
    "tracingStatus",
    "description",
    "createdOn",
    "dd_date",
];

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../zipnet-parser/tests/data")
        .join(name)
}

fn context() -> EnrichmentContext {
    EnrichmentContext::new(NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"))
}

fn sample_record() -> EnrichedRecord {
    let raw = RawRecord::new()
        .with("Name", "ASHA")
        .with("BirthYear", "1995")
        .with("Sex", "Female")
        .with("District", "NORTH")
        .with("PoliceStation", "TIMARPUR")
        .with("PolicePost", "")
        .with("MissingFrom", "HOME")
        .with("DateFrom", "01/02/2021")
        .with("ReportingDate", "05/03/2021")
        .with("TracingDate", "")
        .with("TracingStatus", "Untraced")
        .with("Description", "Red scarf, sandals")
        .with("CreatedOn", "05/03/2021")
        .with("DD_Date", "06/03/2021");
    enrich_record(&raw, &context())
}

fn text(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn non_date_fields(record: &EnrichedRecord) -> Vec<(&'static str, String)> {
    vec![
        ("name", text(record.name.as_deref())),
        ("age", text(record.age)),
        ("ageGroup", text(record.age_group)),
        ("birthYear", text(record.birth_year)),
        ("sex", text(record.sex.as_deref())),
        ("district", text(record.district.as_deref())),
        ("policeStation", text(record.police_station.as_deref())),
        ("policePost", text(record.police_post.as_deref())),
        ("missingFrom", text(record.missing_from.as_deref())),
        ("reportingYear", text(record.reporting_year)),
        ("reportingMonth", text(record.reporting_month)),
        ("reportingDay", text(record.reporting_day)),
        ("reportingDateMonth", record.reporting_date_month.clone()),
        ("tracingStatus", text(record.tracing_status.as_deref())),
        ("description", text(record.description.as_deref())),
    ]
}

#[test]
fn csv_header_lists_output_columns_in_order() {
    let csv = to_csv_string(&[sample_record()]).expect("serialize");
    let header = csv.lines().next().expect("header line");
    assert_eq!(header, OUTPUT_COLUMNS.join(","));
}

#[test]
fn csv_row_renders_dates_numbers_and_quotes() {
    let csv = to_csv_string(&[sample_record()]).expect("serialize");
    let row = csv.lines().nth(1).expect("data line");
    assert_eq!(
        row,
        "ASHA,30,18-35,1995,Female,NORTH,TIMARPUR,,HOME,2021-02-01,2021-03-05,2021,3,5,5-3,,Untraced,\"Red scarf, sandals\",2021-03-05,2021-03-06"
    );
}

#[test]
fn absent_values_serialize_as_empty_fields() {
    let record = enrich_record(&RawRecord::new(), &context());
    let csv = to_csv_string(&[record]).expect("serialize");
    let row = csv.lines().nth(1).expect("data line");
    assert_eq!(row, ",,,,,,,,,,,,,,null-null,,,,,");
}

#[test]
fn empty_input_serializes_to_nothing() {
    assert_eq!(to_csv_string(&[]).expect("serialize"), "");
}

#[test]
fn json_output_uses_null_for_absence() {
    let records = vec![
        sample_record(),
        enrich_record(&RawRecord::new().with("Name", "NO DATES"), &context()),
    ];
    let mut buffer = Vec::new();
    write_records(&mut buffer, &records, OutputFormat::Json, b',').expect("serialize");

    let value: serde_json::Value = serde_json::from_slice(&buffer).expect("valid json");
    let rows = value.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["reportingDate"], "2021-03-05");
    assert_eq!(rows[0]["dd_date"], "2021-03-06");
    assert_eq!(rows[0]["age"], 30);
    assert!(rows[1]["reportingDate"].is_null());
    assert!(rows[1]["ageGroup"].is_null());
    assert_eq!(rows[1]["reportingDateMonth"], "null-null");
}

#[test]
fn csv_respects_delimiter() {
    let mut buffer = Vec::new();
    write_records(&mut buffer, &[sample_record()], OutputFormat::Csv, b'\t').expect("serialize");
    let text = String::from_utf8(buffer).expect("utf8");
    let row = text.lines().nth(1).expect("data line");
    assert!(row.contains("\tRed scarf, sandals\t"));
}

#[test]
fn non_date_fields_survive_a_round_trip() {
    let content = fs::read_to_string(fixture_path("zipnet_sample.csv")).expect("fixture");
    let raw = read_raw_records(&content).expect("decode");
    let records = enrich_records(&raw, &context());

    let csv = to_csv_string(&records).expect("serialize");
    let reread = read_raw_records(&csv).expect("re-decode");

    assert_eq!(reread.len(), records.len());
    for (record, row) in records.iter().zip(&reread) {
        for (column, expected) in non_date_fields(record) {
            assert_eq!(row.get(column), Some(expected.as_str()), "column {column}");
        }
    }
}
