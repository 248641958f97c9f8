use crate::DateInfo;

/// Errors surfaced at construction and configuration seams.
///
/// The interactive operations (conversion, formatting, selection) never
/// return these; they answer `None`/`false` and leave state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// A BS/AD conversion fell outside the table's epoch window.
    #[error("Date {date} cannot be converted from {from}: outside the supported range")]
    OutOfRangeConversion { date: DateInfo, from: crate::CalendarType },

    /// Text did not match the expected date shape.
    #[error("Malformed date input: {0}")]
    MalformedInput(String),

    /// Range end precedes its start.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvertedRange { start: DateInfo, end: DateInfo },

    /// Injected calendar data is unusable.
    #[error("Invalid calendar table: {0}")]
    InvalidTable(String),

    /// A calendar type, format or return format literal was not recognised.
    #[error("Unknown {kind} literal: {value:?}")]
    UnknownLiteral { kind: &'static str, value: String },

    /// Picker configuration could not be loaded.
    #[error("Invalid picker configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for DateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
