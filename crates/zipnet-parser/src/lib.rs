pub mod dates;
pub mod errors;
pub mod model;
mod reader;

pub use dates::{parse_day_month_year, parse_leading_int, DateConstruction};
pub use errors::ParserError;
pub use model::{RawColumn, RawRecord};
pub use reader::{read_raw_records, read_raw_records_with, ReaderOptions};
