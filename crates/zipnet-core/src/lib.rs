pub mod age;
pub mod config;
pub mod enricher;
pub mod error;
pub mod ordering;
pub mod outputs;
pub mod pipeline;
pub mod summary;

pub use enricher::{enrich_record, enrich_records, EnrichedRecord, EnrichmentContext};
pub use ordering::{compare_reporting_dates, sort_by_reporting_date, OrderingPolicy};
pub use pipeline::{run_pipeline, PipelineOptions, PipelineOutput, PipelineSummary};
