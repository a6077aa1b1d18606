use chrono::NaiveDate;
use zipnet_core::enricher::{enrich_record, EnrichedRecord, EnrichmentContext};
use zipnet_core::ordering::{compare_reporting_dates, sort_by_reporting_date, OrderingPolicy};
use zipnet_parser::RawRecord;

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn case(name: &str, reporting_date: &str) -> EnrichedRecord {
    let context = EnrichmentContext::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    let raw = RawRecord::new()
        .with("Name", name)
        .with("ReportingDate", reporting_date);
    enrich_record(&raw, &context)
}

fn names(records: &[EnrichedRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|record| record.name.as_deref().unwrap_or_default())
        .collect()
}

#[test]
fn comparator_branches_are_literal() {
    let early = date(2020, 1, 1);
    let late = date(2021, 1, 1);

    let table = [
        (None, None, 0),
        (None, early, -1),
        (early, None, -1),
        (early, late, -1),
        (late, early, 1),
        (early, early, 0),
    ];

    for (left, right, expected) in table {
        assert_eq!(
            compare_reporting_dates(left, right),
            expected,
            "compare({left:?}, {right:?})"
        );
    }
}

#[test]
fn literal_sort_keeps_absent_dated_absent_sequence() {
    let records = vec![
        case("a", ""),
        case("b", "01/01/2020"),
        case("c", ""),
    ];
    let sorted = sort_by_reporting_date(records, OrderingPolicy::Literal);
    assert_eq!(names(&sorted), ["a", "b", "c"]);
}

#[test]
fn literal_sort_orders_adjacent_dates() {
    let records = vec![
        case("x", "01/01/2021"),
        case("y", "01/01/2020"),
        case("z", ""),
    ];
    let sorted = sort_by_reporting_date(records, OrderingPolicy::Literal);
    assert_eq!(names(&sorted), ["y", "x", "z"]);
}

#[test]
fn literal_sort_does_not_reorder_dates_split_by_an_absent_one() {
    let records = vec![
        case("p", "01/01/2022"),
        case("q", ""),
        case("r", "01/01/2020"),
    ];
    let sorted = sort_by_reporting_date(records, OrderingPolicy::Literal);
    assert_eq!(names(&sorted), ["p", "q", "r"]);
}

#[test]
fn literal_sort_without_absent_dates_is_stable_ascending() {
    let records = vec![
        case("d2021", "01/01/2021"),
        case("d2019a", "01/01/2019"),
        case("d2020", "01/01/2020"),
        case("d2019b", "01/01/2019"),
    ];
    let sorted = sort_by_reporting_date(records, OrderingPolicy::Literal);
    assert_eq!(names(&sorted), ["d2019a", "d2019b", "d2020", "d2021"]);
}

#[test]
fn default_sort_moves_missing_dates_ahead_of_dated_ones() {
    let records = vec![case("dated2021", "01/01/2021"), case("absent", "")];
    let sorted = sort_by_reporting_date(records, OrderingPolicy::default());
    assert_eq!(names(&sorted), ["absent", "dated2021"]);

    let records = vec![
        case("d2022", "01/01/2022"),
        case("absent", ""),
        case("d2020", "01/01/2020"),
        case("d2019", "01/01/2019"),
    ];
    let sorted = sort_by_reporting_date(records, OrderingPolicy::default());
    assert_eq!(names(&sorted), ["absent", "d2019", "d2020", "d2022"]);
}

#[test]
fn default_sort_output_is_ascending_after_missing_dates() {
    let records: Vec<EnrichedRecord> = (0..25)
        .map(|idx| {
            let reporting = if idx % 4 == 1 {
                String::new()
            } else {
                format!("{:02}/{:02}/20{:02}", idx % 28 + 1, (idx * 5) % 12 + 1, 25 - idx)
            };
            case(&idx.to_string(), &reporting)
        })
        .collect();

    let sorted = sort_by_reporting_date(records, OrderingPolicy::default());
    let dates: Vec<Option<NaiveDate>> = sorted.iter().map(|r| r.reporting_date).collect();
    let first_dated = dates.iter().position(Option::is_some).expect("dated rows present");
    assert!(dates[..first_dated].iter().all(Option::is_none));
    assert!(dates[first_dated..].iter().all(Option::is_some));
    assert!(dates[first_dated..].windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn absent_first_policy_is_a_total_order() {
    let records = vec![
        case("a", ""),
        case("b", "01/01/2020"),
        case("c", ""),
        case("d", "01/01/2019"),
    ];
    let sorted = sort_by_reporting_date(records, OrderingPolicy::AbsentFirst);
    assert_eq!(names(&sorted), ["a", "c", "d", "b"]);
}

#[test]
fn absent_last_policy_is_a_total_order() {
    let records = vec![
        case("a", ""),
        case("b", "01/01/2020"),
        case("c", ""),
        case("d", "01/01/2019"),
    ];
    let sorted = sort_by_reporting_date(records, OrderingPolicy::AbsentLast);
    assert_eq!(names(&sorted), ["d", "b", "a", "c"]);
}

#[test]
fn sorting_never_drops_records() {
    let records: Vec<EnrichedRecord> = (0..37)
        .map(|idx| {
            let reporting = if idx % 3 == 0 {
                String::new()
            } else {
                format!("{:02}/{:02}/20{:02}", idx % 28 + 1, idx % 12 + 1, idx % 20)
            };
            case(&idx.to_string(), &reporting)
        })
        .collect();

    for policy in [
        OrderingPolicy::Literal,
        OrderingPolicy::AbsentFirst,
        OrderingPolicy::AbsentLast,
    ] {
        let sorted = sort_by_reporting_date(records.clone(), policy);
        assert_eq!(sorted.len(), records.len());
        let mut seen = names(&sorted);
        seen.sort_unstable();
        let mut expected = names(&records);
        expected.sort_unstable();
        assert_eq!(seen, expected, "{policy} changed the record set");
    }
}
