use crate::calendar::CalendarSystem;
use crate::consts::{MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR};
use crate::DateInfo;

/// Checks that (year, month, day) names a real date of `calendar`.
///
/// Cheap bound checks run before the month-length lookup and the first
/// failure short-circuits.
pub fn is_valid<C: CalendarSystem + ?Sized>(calendar: &C, year: i32, month: u8, day: u8) -> bool {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return false;
    }
    if month > MAX_MONTH {
        return false;
    }
    if day < MIN_DAY {
        return false;
    }
    day <= calendar.days_in_month(year, month)
}

pub fn is_valid_date<C: CalendarSystem + ?Sized>(calendar: &C, date: &DateInfo) -> bool {
    is_valid(calendar, date.year, date.month, date.day)
}
