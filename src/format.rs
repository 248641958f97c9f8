//! Textual rendering and parsing of dates.

use crate::calendar::{Calendar, CalendarSystem};
use crate::validate::is_valid_date;
use crate::{CalendarType, DateFormat, DateInfo};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_MONTH_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid YYYY-MM-DD pattern"));
static MONTH_DAY_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid MM/DD/YYYY pattern"));

/// English names of the BS months, Baisakh first
pub const BS_MONTHS: [&str; 12] = [
    "Baisakh", "Jestha", "Asar", "Shrawan", "Bhadra", "Aswin", "Kartik", "Mangsir", "Poush", "Magh",
    "Falgun", "Chaitra",
];

/// Devanagari names of the BS months
pub const BS_MONTHS_NEPALI: [&str; 12] = [
    "बैशाख", "जेठ", "असार", "साउन", "भदौ", "असोज", "कार्तिक", "मंसिर", "पुष", "माघ", "फाल्गुन", "चैत",
];

pub const AD_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September", "October",
    "November", "December",
];

/// Short weekday headers, Sunday first
pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const WEEKDAYS_NEPALI: [&str; 7] = ["आइत", "सोम", "मंगल", "बुध", "बिहि", "शुक्र", "शनि"];

impl DateFormat {
    /// Renders a date; month is 0-based, month and day are zero-padded.
    pub fn format(self, year: i32, month: u8, day: u8) -> String {
        let month = u16::from(month) + 1;
        match self {
            Self::YearMonthDay => format!("{year}-{month:02}-{day:02}"),
            Self::MonthDayYear => format!("{month:02}/{day:02}/{year}"),
        }
    }

    pub fn format_date(self, date: &DateInfo) -> String {
        self.format(date.year, date.month, date.day)
    }

    /// Reads the shape of a date written in this format.
    ///
    /// Characters other than digits, `-` and `/` are dropped first. Calendar
    /// bounds are not checked here; see [`Calendar::parse`].
    pub fn parse(self, text: &str) -> Option<DateInfo> {
        let cleaned: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '/')
            .collect();

        let (year, month, day) = match self {
            Self::YearMonthDay => {
                let caps = YEAR_MONTH_DAY.captures(&cleaned)?;
                (caps.get(1)?, caps.get(2)?, caps.get(3)?)
            }
            Self::MonthDayYear => {
                let caps = MONTH_DAY_YEAR.captures(&cleaned)?;
                (caps.get(3)?, caps.get(1)?, caps.get(2)?)
            }
        };

        let year = year.as_str().parse::<i32>().ok()?;
        // month 0 has no 0-based index
        let month = month.as_str().parse::<u8>().ok()?.checked_sub(1)?;
        let day = day.as_str().parse::<u8>().ok()?;
        Some(DateInfo::new(year, month, day))
    }
}

impl Calendar<'_> {
    /// Parses and validates a date typed in this calendar.
    pub fn parse(&self, format: DateFormat, text: &str) -> Option<DateInfo> {
        format.parse(text).filter(|date| is_valid_date(self, date))
    }

    /// Long form, e.g. `Poush 15, 2081` or `December 30, 2024`.
    pub fn format_long(&self, date: &DateInfo) -> Option<String> {
        let names = match self.kind() {
            CalendarType::Bs => &BS_MONTHS,
            CalendarType::Ad => &AD_MONTHS,
        };
        let name = names.get(usize::from(date.month))?;
        Some(format!("{name} {}, {}", date.day, date.year))
    }

    pub fn month_name(&self, month: u8, nepali: bool) -> Option<&'static str> {
        let names = match (self.kind(), nepali) {
            (CalendarType::Bs, true) => &BS_MONTHS_NEPALI,
            (CalendarType::Bs, false) => &BS_MONTHS,
            (CalendarType::Ad, _) => &AD_MONTHS,
        };
        names.get(usize::from(month)).copied()
    }
}

/// Short AD form used in tooltips and exports, e.g. `Dec 30, 2024`
pub fn format_ad_short(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Both renderings of an AD date, e.g. `2081-09-15 BS (Dec 30, 2024)`.
pub fn format_dual(bs: &Calendar<'_>, date: NaiveDate) -> Option<String> {
    let converted = bs.from_ad(DateInfo::from_naive(date))?;
    Some(format!(
        "{} BS ({})",
        DateFormat::YearMonthDay.format_date(&converted),
        format_ad_short(date)
    ))
}
