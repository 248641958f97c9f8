/// Earliest year accepted by validation (inclusive, either calendar)
pub const MIN_YEAR: i32 = 1900;

/// Latest year accepted by validation (inclusive, either calendar)
pub const MAX_YEAR: i32 = 2200;

/// Month index of the last month (months are 0-indexed)
pub const MAX_MONTH: u8 = 11;

/// Number of months in a year for both calendars
pub const MONTHS_IN_YEAR: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Upper bound a typed day field may take before the month is known
pub const MAX_TYPED_DAY: u8 = 31;

/// Month index for January / Baisakh
pub const FIRST_MONTH: u8 = 0;
/// Month index for February
pub const FEBRUARY: u8 = 1;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Days in each Gregorian month (0-indexed).
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 12] = [
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Month length used for BS years the table does not cover
pub const FALLBACK_BS_MONTH_DAYS: u8 = 30;

/// Shortest and longest month a BS table may declare
pub const MIN_BS_MONTH_DAYS: u8 = 29;
pub const MAX_BS_MONTH_DAYS: u8 = 32;

/// BS year whose third month is off by one day in the conversion rules
pub const SHIFT_YEAR: i32 = 2084;
/// Month index (0-based) of the shifted BS month
pub const SHIFT_MONTH: u8 = 2;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Month-first format separator (US format)
pub const MONTH_FIRST_SEPARATOR: char = '/';
/// Separator between the two halves of a range value
pub const RANGE_SEPARATOR: &str = " - ";

/// Digits in a complete typed date (4 year + 2 month + 2 day)
pub const DATE_DIGITS: usize = 8;
/// Width of one fully formatted date
pub const DATE_WIDTH: usize = 10;
/// Maximum length of raw text accepted by the range input
pub const MAX_RANGE_INPUT: usize = 25;

/// Days in one row of the calendar grid
pub const DAYS_IN_WEEK: u8 = 7;

/// Number of years shown by the month/year picker
pub const YEAR_PICKER_SPAN: i32 = 12;
/// The year picker's page starts this many years before the current decade
pub const YEAR_PICKER_LEAD: i32 = 2;
/// Years per decade, used to align the year picker
pub const DECADE: i32 = 10;
