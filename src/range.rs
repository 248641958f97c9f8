use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{DateError, DateFormat, DateInfo, RANGE_SEPARATOR};

/// Selection state of a range picker.
/// When both ends are set, `start` is never after `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RangeFields")]
pub struct DateRange {
    start: Option<DateInfo>,
    end:   Option<DateInfo>,
}

/// Unchecked wire shape of a [`DateRange`].
#[derive(Deserialize)]
struct RangeFields {
    start: Option<DateInfo>,
    end:   Option<DateInfo>,
}

impl TryFrom<RangeFields> for DateRange {
    type Error = DateError;

    fn try_from(fields: RangeFields) -> Result<Self, Self::Error> {
        match (fields.start, fields.end) {
            (None, None) => Ok(Self::empty()),
            (Some(start), None) => Ok(Self::pending(start)),
            (Some(start), Some(end)) => Self::new(start, end),
            (None, Some(end)) => Err(DateError::MalformedInput(format!("range ends at {end} without a start"))),
        }
    }
}

/// Where a [`DateRange`] sits in the click sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePhase {
    Empty,
    PendingEnd,
    Complete,
}

impl DateRange {
    pub const fn empty() -> Self {
        Self {
            start: None,
            end:   None,
        }
    }

    /// A range with only its start chosen
    pub const fn pending(start: DateInfo) -> Self {
        Self {
            start: Some(start),
            end:   None,
        }
    }

    /// Creates a complete range.
    ///
    /// # Errors
    /// Returns `DateError::InvertedRange` if `end` precedes `start`.
    pub fn new(start: DateInfo, end: DateInfo) -> Result<Self, DateError> {
        if end.is_before(&start) {
            return Err(DateError::InvertedRange { start, end });
        }
        Ok(Self {
            start: Some(start),
            end:   Some(end),
        })
    }

    pub const fn start(&self) -> Option<DateInfo> {
        self.start
    }

    pub const fn end(&self) -> Option<DateInfo> {
        self.end
    }

    pub const fn phase(&self) -> RangePhase {
        match (self.start, self.end) {
            (Some(_), Some(_)) => RangePhase::Complete,
            (Some(_), None) => RangePhase::PendingEnd,
            (None, _) => RangePhase::Empty,
        }
    }

    pub const fn is_complete(&self) -> bool {
        matches!(self.phase(), RangePhase::Complete)
    }

    /// Inclusive containment. Only a complete range contains anything.
    pub fn contains(&self, date: &DateInfo) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= *date && *date <= end,
            _ => false,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, "{start}{RANGE_SEPARATOR}{end}"),
            (Some(start), None) => write!(f, "{start}{RANGE_SEPARATOR}"),
            (None, _) => Ok(()),
        }
    }
}

impl FromStr for DateRange {
    type Err = DateError;

    /// Reads `YYYY-MM-DD - YYYY-MM-DD`. Calendar bounds are not checked.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (start, end) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
            DateError::MalformedInput(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))
        })?;

        let parse = |text: &str| {
            DateFormat::YearMonthDay
                .parse(text.trim())
                .ok_or_else(|| DateError::MalformedInput(format!("Invalid range endpoint: {text}")))
        };
        Self::new(parse(start)?, parse(end)?)
    }
}

/// The value a click leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Single(DateInfo),
    Range(DateRange),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOutcome {
    pub selection: Selection,
    /// True when the selection is final and should be emitted
    pub committed: bool,
}

/// Applies one click to the current selection.
///
/// In single mode every click commits. In range mode the first click opens a
/// pending range, an earlier click while pending moves the start, a later or
/// equal click completes it, and a click on a complete range starts over.
pub fn select_date(current: Option<&DateRange>, clicked: DateInfo, range_mode: bool) -> SelectOutcome {
    if !range_mode {
        return SelectOutcome {
            selection: Selection::Single(clicked),
            committed: true,
        };
    }

    let current = current.copied().unwrap_or_default();
    let (range, committed) = match (current.start, current.end) {
        (Some(start), None) if !clicked.is_before(&start) => (
            DateRange {
                start: Some(start),
                end:   Some(clicked),
            },
            true,
        ),
        _ => (DateRange::pending(clicked), false),
    };

    SelectOutcome {
        selection: Selection::Range(range),
        committed,
    }
}
