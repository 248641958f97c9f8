//! Dual-calendar date engine for date pickers.
//!
//! Converts between the Gregorian (AD) and Bikram Sambat (BS) calendars using
//! a month-length table, validates and formats dates in `YYYY-MM-DD` and
//! `MM/DD/YYYY`, and drives an interactive picker that reports AD values.
//!
//! ```
//! use sambat_date::{Calendar, CalendarSystem, CalendarTable, CalendarType, DateInfo};
//!
//! let table = CalendarTable::standard();
//! let bs = Calendar::new(CalendarType::Bs, &table);
//!
//! // Poush 15, 2081 (months are 0-based)
//! let ad = bs.to_ad(DateInfo::new(2081, 8, 15)).unwrap();
//! assert_eq!(ad.to_string(), "2024-12-30");
//! assert_eq!(bs.from_ad(ad), Some(DateInfo::new(2081, 8, 15)));
//! ```

mod calendar;
mod consts;
mod error;
mod format;
mod input;
mod keyboard;
mod period;
mod prelude;
mod range;
mod table;
mod types;
mod validate;
mod widget;

pub use calendar::{BikramSambat, Calendar, CalendarSystem, Gregorian, is_leap_year, is_shift_window, shift_month};
pub use consts::*;
pub use error::DateError;
pub use format::{AD_MONTHS, BS_MONTHS, BS_MONTHS_NEPALI, WEEKDAYS, WEEKDAYS_NEPALI, format_ad_short, format_dual};
pub use input::{format_partial_input, format_range_input};
pub use keyboard::{FieldStepper, GridDelegate, GridNavigator, Key, KeyOutcome, MonthView, Step};
pub use period::{Period, bs_period_range};
pub use range::{DateRange, RangePhase, SelectOutcome, Selection, select_date};
pub use table::{CalendarTable, STANDARD_BASE_YEAR};
pub use types::{CalendarType, DateFormat, DateInfo, ReturnFormat};
pub use validate::{is_valid, is_valid_date};
pub use widget::{
    CalendarWidget, Detailed, PickerConfig, PickerState, PickerValue, RangeText, decode_value,
};
