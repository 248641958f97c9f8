//! Keyboard handling for the day grid and the text field.

use std::str::FromStr;

use log::trace;

use crate::calendar::{shift_month, Calendar, CalendarSystem};
use crate::consts::{DAYS_IN_WEEK, MAX_MONTH, MIN_DAY};
use crate::{DateError, DateFormat, DateInfo};

/// Keys the picker reacts to, named after DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Space,
    Escape,
    /// `t` or `T`
    Today,
}

impl FromStr for Key {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowLeft" => Ok(Self::ArrowLeft),
            "ArrowRight" => Ok(Self::ArrowRight),
            "ArrowUp" => Ok(Self::ArrowUp),
            "ArrowDown" => Ok(Self::ArrowDown),
            "Enter" => Ok(Self::Enter),
            " " => Ok(Self::Space),
            "Escape" => Ok(Self::Escape),
            "t" | "T" => Ok(Self::Today),
            other => Err(DateError::UnknownLiteral {
                kind:  "key",
                value: other.to_owned(),
            }),
        }
    }
}

/// The month currently shown by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    pub year:  i32,
    pub month: u8,
}

impl MonthView {
    pub const fn new(year: i32, month: u8) -> Self {
        Self { year, month }
    }

    /// The view `step` months away
    pub fn shifted(self, step: i32) -> Self {
        let (year, month) = shift_month(self.year, self.month, step);
        Self { year, month }
    }
}

/// Side effects a grid key may ask the picker to perform.
pub trait GridDelegate {
    fn navigate_month(&mut self, step: i32);
    /// Returns whether the day was selected
    fn select_day(&mut self, day: u8) -> bool;
    /// Show the month holding `date` and focus it
    fn go_to(&mut self, date: DateInfo);
    fn close(&mut self);
}

/// Result of a grid key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Focus moved to this day of the (possibly new) month
    Focus(u8),
    Selected(u8),
    Closed,
    Unhandled,
}

/// Moves focus across the 7-column day grid.
#[derive(Debug, Clone, Copy)]
pub struct GridNavigator<'t> {
    calendar: Calendar<'t>,
}

impl<'t> GridNavigator<'t> {
    pub const fn new(calendar: Calendar<'t>) -> Self {
        Self { calendar }
    }

    /// Handles one key.
    ///
    /// Crossing a month boundary calls `navigate_month` once and re-anchors
    /// the focus in the new month. Without focus, Left lands on the last
    /// day, Right and Down on the first, Up on the seventh.
    pub fn handle_key<D: GridDelegate + ?Sized>(
        &self,
        key: Key,
        view: MonthView,
        focused: Option<u8>,
        delegate: &mut D,
    ) -> KeyOutcome {
        let days = self.calendar.days_in_month(view.year, view.month);
        let previous = view.shifted(-1);
        let previous_days = self.calendar.days_in_month(previous.year, previous.month);

        match (key, focused) {
            (Key::ArrowLeft, None) => KeyOutcome::Focus(days),
            (Key::ArrowRight | Key::ArrowDown, None) => KeyOutcome::Focus(MIN_DAY),
            (Key::ArrowUp, None) => KeyOutcome::Focus(DAYS_IN_WEEK.min(days)),

            (Key::ArrowLeft, Some(day)) if day > MIN_DAY => KeyOutcome::Focus(day - 1),
            (Key::ArrowLeft, Some(_)) => {
                delegate.navigate_month(-1);
                KeyOutcome::Focus(previous_days)
            }

            (Key::ArrowRight, Some(day)) if day < days => KeyOutcome::Focus(day + 1),
            (Key::ArrowRight, Some(_)) => {
                delegate.navigate_month(1);
                KeyOutcome::Focus(MIN_DAY)
            }

            (Key::ArrowUp, Some(day)) if day > DAYS_IN_WEEK => KeyOutcome::Focus(day - DAYS_IN_WEEK),
            (Key::ArrowUp, Some(day)) => {
                delegate.navigate_month(-1);
                let anchored = (i32::from(previous_days) + i32::from(day) - i32::from(DAYS_IN_WEEK))
                    .max(i32::from(MIN_DAY));
                KeyOutcome::Focus(u8::try_from(anchored).unwrap_or(MIN_DAY))
            }

            (Key::ArrowDown, Some(day)) if u16::from(day) + u16::from(DAYS_IN_WEEK) <= u16::from(days) => {
                KeyOutcome::Focus(day + DAYS_IN_WEEK)
            }
            (Key::ArrowDown, Some(day)) => {
                delegate.navigate_month(1);
                KeyOutcome::Focus((day + DAYS_IN_WEEK).saturating_sub(days).max(MIN_DAY))
            }

            (Key::Enter | Key::Space, Some(day)) => {
                if delegate.select_day(day) {
                    KeyOutcome::Selected(day)
                } else {
                    KeyOutcome::Unhandled
                }
            }
            (Key::Enter | Key::Space, None) => KeyOutcome::Unhandled,

            (Key::Today, _) => match self.calendar.today() {
                Some(today) => {
                    delegate.go_to(today);
                    KeyOutcome::Focus(today.day)
                }
                None => {
                    trace!("today is not representable in {}", self.calendar.kind());
                    KeyOutcome::Unhandled
                }
            },

            (Key::Escape, _) => {
                delegate.close();
                KeyOutcome::Closed
            }
        }
    }
}

/// Direction of a field step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

impl Step {
    /// `ArrowUp` and `ArrowDown`; other keys do not step
    pub const fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(Self::Up),
            Key::ArrowDown => Some(Self::Down),
            _ => None,
        }
    }

    const fn delta(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
}

/// Inclusive caret columns of (year, month, day)
const fn field_columns(format: DateFormat) -> [(usize, usize); 3] {
    match format {
        DateFormat::YearMonthDay => [(0, 4), (5, 7), (8, 10)],
        DateFormat::MonthDayYear => [(6, 10), (0, 2), (3, 5)],
    }
}

fn field_at(format: DateFormat, caret: usize) -> Option<Field> {
    let [year, month, day] = field_columns(format);
    let within = |(start, end): (usize, usize)| (start..=end).contains(&caret);
    if within(year) {
        Some(Field::Year)
    } else if within(month) {
        Some(Field::Month)
    } else if within(day) {
        Some(Field::Day)
    } else {
        None
    }
}

/// Increments or decrements the date field under the caret.
pub struct FieldStepper;

impl FieldStepper {
    /// Steps the field of `text` the caret sits in.
    ///
    /// Month overflow carries into the year, day overflow into the month
    /// (and on into the year). The result is not bounds-checked; the caller
    /// validates it. `None` when `text` does not parse or the caret is past
    /// the last field.
    pub fn step(
        format: DateFormat,
        calendar: &Calendar<'_>,
        text: &str,
        caret: usize,
        direction: Step,
    ) -> Option<DateInfo> {
        let date = calendar.parse(format, text)?;
        let field = field_at(format, caret)?;
        let delta = direction.delta();

        let stepped = match field {
            Field::Year => DateInfo::new(date.year + delta, date.month, date.day),
            Field::Month => {
                let (year, month) = shift_month(date.year, date.month, delta);
                DateInfo::new(year, month, date.day)
            }
            Field::Day => {
                let length = calendar.days_in_month(date.year, date.month);
                match direction {
                    Step::Up if date.day >= length => {
                        let (year, month) = shift_month(date.year, date.month, 1);
                        DateInfo::new(year, month, MIN_DAY)
                    }
                    Step::Down if date.day <= MIN_DAY => {
                        let (year, month) = shift_month(date.year, date.month, -1);
                        DateInfo::new(year, month, calendar.days_in_month(year, month))
                    }
                    Step::Up => DateInfo::new(date.year, date.month, date.day + 1),
                    Step::Down => DateInfo::new(date.year, date.month, date.day - 1),
                }
            }
        };
        debug_assert!(stepped.month <= MAX_MONTH);
        Some(stepped)
    }
}
