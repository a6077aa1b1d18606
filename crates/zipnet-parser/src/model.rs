use std::collections::HashMap;
use std::fmt;

/// Input columns the enrichment stage reads. The header text is matched verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawColumn {
    Name,
    BirthYear,
    Sex,
    District,
    PoliceStation,
    PolicePost,
    MissingFrom,
    DateFrom,
    ReportingDate,
    TracingDate,
    TracingStatus,
    Description,
    CreatedOn,
    DdDate,
}

impl RawColumn {
    pub const ALL: [RawColumn; 14] = [
        RawColumn::Name,
        RawColumn::BirthYear,
        RawColumn::Sex,
        RawColumn::District,
        RawColumn::PoliceStation,
        RawColumn::PolicePost,
        RawColumn::MissingFrom,
        RawColumn::DateFrom,
        RawColumn::ReportingDate,
        RawColumn::TracingDate,
        RawColumn::TracingStatus,
        RawColumn::Description,
        RawColumn::CreatedOn,
        RawColumn::DdDate,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            RawColumn::Name => "Name",
            RawColumn::BirthYear => "BirthYear",
            RawColumn::Sex => "Sex",
            RawColumn::District => "District",
            RawColumn::PoliceStation => "PoliceStation",
            RawColumn::PolicePost => "PolicePost",
            RawColumn::MissingFrom => "MissingFrom",
            RawColumn::DateFrom => "DateFrom",
            RawColumn::ReportingDate => "ReportingDate",
            RawColumn::TracingDate => "TracingDate",
            RawColumn::TracingStatus => "TracingStatus",
            RawColumn::Description => "Description",
            RawColumn::CreatedOn => "CreatedOn",
            RawColumn::DdDate => "DD_Date",
        }
    }
}

impl fmt::Display for RawColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One decoded input row. Values are kept exactly as they appeared in the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn column(&self, column: RawColumn) -> Option<&str> {
        self.get(column.header())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
