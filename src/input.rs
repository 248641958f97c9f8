//! Incremental formatting of text as the user types it.

use crate::calendar::Calendar;
use crate::consts::{
    DATE_DIGITS, DATE_WIDTH, MAX_RANGE_INPUT, MAX_TYPED_DAY, MAX_YEAR, MIN_DAY, MIN_YEAR, MONTHS_IN_YEAR,
    RANGE_SEPARATOR,
};
use crate::DateFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
}

impl Field {
    const fn width(self) -> usize {
        match self {
            Self::Year => 4,
            Self::Month | Self::Day => 2,
        }
    }

    fn accepts(self, value: u32) -> bool {
        match self {
            Self::Year => u32::try_from(MIN_YEAR).is_ok_and(|min| value >= min)
                && u32::try_from(MAX_YEAR).is_ok_and(|max| value <= max),
            Self::Month => (1..=u32::from(MONTHS_IN_YEAR)).contains(&value),
            Self::Day => (u32::from(MIN_DAY)..=u32::from(MAX_TYPED_DAY)).contains(&value),
        }
    }
}

const fn field_order(format: DateFormat) -> [Field; 3] {
    match format {
        DateFormat::YearMonthDay => [Field::Year, Field::Month, Field::Day],
        DateFormat::MonthDayYear => [Field::Month, Field::Day, Field::Year],
    }
}

/// Formats raw keystrokes into a partial date.
///
/// Only digits count, at most eight of them. A separator goes in front of
/// each field's first digit. Once a completed field is out of range
/// (e.g. month `13`), its last digit and everything after it is dropped.
pub fn format_partial_input(raw: &str, format: DateFormat) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(DATE_DIGITS)
        .collect();

    let mut out = String::with_capacity(digits.len() + 2);
    let mut rest = digits.as_str();
    for (index, field) in field_order(format).into_iter().enumerate() {
        if rest.is_empty() {
            break;
        }
        let (chunk, tail) = rest.split_at(field.width().min(rest.len()));
        if index > 0 {
            out.push(format.separator());
        }
        let complete = chunk.len() == field.width();
        if complete && !chunk.parse::<u32>().is_ok_and(|value| field.accepts(value)) {
            out.push_str(&chunk[..chunk.len() - 1]);
            // a separator with nothing after it is dropped
            if out.ends_with(format.separator()) {
                out.pop();
            }
            break;
        }
        out.push_str(chunk);
        rest = tail;
    }
    out
}

/// Formats raw text holding a start and an end date joined by `" - "`.
///
/// Without a separator the digit stream is split after the first complete
/// date. Only two segments survive, and a complete end date earlier than a
/// complete start date is discarded. A segment is complete once every field
/// is fully typed.
pub fn format_range_input(raw: &str, format: DateFormat, calendar: &Calendar<'_>) -> String {
    let raw: String = raw.chars().take(MAX_RANGE_INPUT).collect();

    let (first_raw, second_raw) = if let Some((first, second)) = raw.split_once(RANGE_SEPARATOR) {
        let second = second
            .split_once(RANGE_SEPARATOR)
            .map_or(second, |(kept, _)| kept);
        (first.to_owned(), Some(second.to_owned()))
    } else {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() > DATE_DIGITS {
            let (first, second) = digits.split_at(DATE_DIGITS);
            (first.to_owned(), Some(second.to_owned()))
        } else {
            (raw.clone(), None)
        }
    };

    let first = format_partial_input(&first_raw, format);
    let Some(second_raw) = second_raw else {
        return first;
    };
    if first.is_empty() {
        return first;
    }
    let second = format_partial_input(&second_raw, format);

    let inverted = first.len() == DATE_WIDTH
        && second.len() == DATE_WIDTH
        && calendar
            .parse(format, &first)
            .zip(calendar.parse(format, &second))
            .is_some_and(|(start, end)| end.is_before(&start));
    if inverted {
        return first;
    }
    format!("{first}{RANGE_SEPARATOR}{second}")
}
