use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};
use zipnet_parser::{read_raw_records_with, DateConstruction, RawRecord, ReaderOptions};

use crate::enricher::{enrich_records, EnrichedRecord, EnrichmentContext};
use crate::error::Result;
use crate::ordering::{sort_by_reporting_date, OrderingPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub reference_date: NaiveDate,
    pub ordering: OrderingPolicy,
    pub date_construction: DateConstruction,
    pub delimiter: u8,
}

impl PipelineOptions {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            ordering: OrderingPolicy::default(),
            date_construction: DateConstruction::default(),
            delimiter: b',',
        }
    }

    fn context(&self) -> EnrichmentContext {
        EnrichmentContext::new(self.reference_date)
            .with_date_construction(self.date_construction)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub row_count: usize,
    pub missing_reporting_date: usize,
    pub missing_age: usize,
}

impl PipelineSummary {
    fn from_records(records: &[EnrichedRecord]) -> Self {
        Self {
            row_count: records.len(),
            missing_reporting_date: records
                .iter()
                .filter(|record| record.reporting_date.is_none())
                .count(),
            missing_age: records.iter().filter(|record| record.age.is_none()).count(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub records: Vec<EnrichedRecord>,
    pub summary: PipelineSummary,
}

/// Enriches and orders already-decoded rows. One output record per input row.
pub fn process_records(raw: &[RawRecord], options: &PipelineOptions) -> PipelineOutput {
    let enriched = enrich_records(raw, &options.context());
    debug!(rows = enriched.len(), "enriched records");

    let records = sort_by_reporting_date(enriched, options.ordering);
    let summary = PipelineSummary::from_records(&records);
    info!(
        rows = summary.row_count,
        missing_reporting_date = summary.missing_reporting_date,
        missing_age = summary.missing_age,
        ordering = %options.ordering,
        reference_date = %options.reference_date,
        "pipeline complete"
    );

    PipelineOutput { records, summary }
}

/// Decodes delimited text and runs it through enrichment and ordering.
pub fn run_pipeline(content: &str, options: &PipelineOptions) -> Result<PipelineOutput> {
    let raw = read_raw_records_with(
        content,
        ReaderOptions {
            delimiter: options.delimiter,
        },
    )?;
    Ok(process_records(&raw, options))
}
