//! Calendar systems and AD/BS conversion.
//!
//! Each system implements [`CalendarSystem`]; [`Calendar`] picks one at
//! construction so callers never branch on the calendar type themselves.

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MIN_DAY, MONTHS_IN_YEAR, SHIFT_MONTH, SHIFT_YEAR,
};
use crate::table::CalendarTable;
use crate::{CalendarType, DateInfo};
use chrono::{Datelike, Days, Local, NaiveDate};
use log::debug;

/// What the date engine needs from a calendar system.
pub trait CalendarSystem {
    fn kind(&self) -> CalendarType;

    /// Length of a month; always positive.
    fn days_in_month(&self, year: i32, month: u8) -> u8;

    /// Converts a date of this calendar to AD. `None` when it cannot be converted.
    fn to_ad(&self, date: DateInfo) -> Option<DateInfo>;

    /// Converts an AD date into this calendar. `None` when it cannot be converted.
    fn from_ad(&self, date: DateInfo) -> Option<DateInfo>;

    /// Weekday of the 1st of the month, 0 = Sunday.
    fn first_weekday(&self, year: i32, month: u8) -> Option<u8> {
        let first = self.to_ad(DateInfo::new(year, month, MIN_DAY))?;
        first.to_naive().map(weekday_from_sunday)
    }

    /// Today's local date expressed in this calendar
    fn today(&self) -> Option<DateInfo> {
        self.from_ad(DateInfo::from_naive(Local::now().date_naive()))
    }
}

/// The proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gregorian;

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

impl CalendarSystem for Gregorian {
    fn kind(&self) -> CalendarType {
        CalendarType::Ad
    }

    /// Month indexes past December read as December.
    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        if month == FEBRUARY && is_leap_year(year) {
            FEBRUARY_DAYS_LEAP
        } else {
            DAYS_IN_MONTH[usize::from(month.min(MAX_MONTH))]
        }
    }

    fn to_ad(&self, date: DateInfo) -> Option<DateInfo> {
        date.to_naive().map(|_| date)
    }

    fn from_ad(&self, date: DateInfo) -> Option<DateInfo> {
        date.to_naive().map(|_| date)
    }
}

/// Bikram Sambat, driven by a [`CalendarTable`].
#[derive(Debug, Clone, Copy)]
pub struct BikramSambat<'t> {
    table: &'t CalendarTable,
}

/// True for the single BS month whose conversion is corrected by one day
pub const fn is_shift_window(year: i32, month: u8) -> bool {
    year == SHIFT_YEAR && month == SHIFT_MONTH
}

impl<'t> BikramSambat<'t> {
    pub const fn new(table: &'t CalendarTable) -> Self {
        Self { table }
    }

    pub const fn table(&self) -> &'t CalendarTable {
        self.table
    }

    /// Converts a BS date to AD.
    ///
    /// Dates in BS 2084, month index 2 come out one day earlier than the raw
    /// table arithmetic gives. No other month is adjusted.
    pub fn bs_to_ad(&self, year: i32, month: u8, day: u8) -> Option<DateInfo> {
        let Some(raw) = self.raw_to_ad(year, month, day) else {
            debug!("BS {year}/{month}/{day} is outside the convertible range");
            return None;
        };
        let corrected = if is_shift_window(year, month) {
            raw.pred_opt()?
        } else {
            raw
        };
        Some(DateInfo::from_naive(corrected))
    }

    /// Converts an AD date (0-based month) to BS.
    ///
    /// The following day is probed first: when it lands in the corrected
    /// month, that probe is the answer, which keeps every day of the
    /// corrected month reachable from its own AD date.
    pub fn ad_to_bs(&self, year: i32, month: u8, day: u8) -> Option<DateInfo> {
        let Some(naive) = DateInfo::new(year, month, day).to_naive() else {
            debug!("AD {year}/{month}/{day} is not a real date");
            return None;
        };
        if let Some(probe) = naive.succ_opt().and_then(|next| self.raw_from_ad(next)) {
            if is_shift_window(probe.year, probe.month) {
                return Some(probe);
            }
        }
        let converted = self.raw_from_ad(naive);
        if converted.is_none() {
            debug!("AD {naive} is outside the convertible range");
        }
        converted
    }

    fn raw_to_ad(&self, year: i32, month: u8, day: u8) -> Option<NaiveDate> {
        let months = self.table.months(year)?;
        let length = *months.get(usize::from(month))?;
        if day < MIN_DAY || day > length {
            return None;
        }
        let before_month: u32 = months[..usize::from(month)]
            .iter()
            .map(|days| u32::from(*days))
            .sum();
        let offset = self.table.days_before_year(year)? + before_month + u32::from(day - 1);
        self.table
            .epoch()
            .checked_add_days(Days::new(u64::from(offset)))
    }

    fn raw_from_ad(&self, date: NaiveDate) -> Option<DateInfo> {
        let offset = u32::try_from((date - self.table.epoch()).num_days()).ok()?;
        self.table
            .locate(offset)
            .map(|(year, month, day)| DateInfo::new(year, month, day))
    }
}

impl CalendarSystem for BikramSambat<'_> {
    fn kind(&self) -> CalendarType {
        CalendarType::Bs
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        self.table.days_in_month(year, month)
    }

    fn to_ad(&self, date: DateInfo) -> Option<DateInfo> {
        self.bs_to_ad(date.year, date.month, date.day)
    }

    fn from_ad(&self, date: DateInfo) -> Option<DateInfo> {
        self.ad_to_bs(date.year, date.month, date.day)
    }
}

/// A calendar system chosen at construction time.
#[derive(Debug, Clone, Copy)]
pub enum Calendar<'t> {
    Ad(Gregorian),
    Bs(BikramSambat<'t>),
}

impl<'t> Calendar<'t> {
    pub const fn new(kind: CalendarType, table: &'t CalendarTable) -> Self {
        match kind {
            CalendarType::Ad => Self::Ad(Gregorian),
            CalendarType::Bs => Self::Bs(BikramSambat::new(table)),
        }
    }

    fn system(&self) -> &dyn CalendarSystem {
        match self {
            Self::Ad(gregorian) => gregorian,
            Self::Bs(sambat) => sambat,
        }
    }

    /// AD ISO string (`YYYY-MM-DD`) for a date of this calendar
    pub fn to_ad_iso(&self, date: DateInfo) -> Option<String> {
        self.to_ad(date).map(|ad| ad.to_string())
    }

    /// Converts a date of this calendar into `other`.
    pub fn convert(&self, date: DateInfo, other: &Calendar<'_>) -> Option<DateInfo> {
        other.from_ad(self.to_ad(date)?)
    }
}

impl CalendarSystem for Calendar<'_> {
    fn kind(&self) -> CalendarType {
        self.system().kind()
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        self.system().days_in_month(year, month)
    }

    fn to_ad(&self, date: DateInfo) -> Option<DateInfo> {
        self.system().to_ad(date)
    }

    fn from_ad(&self, date: DateInfo) -> Option<DateInfo> {
        self.system().from_ad(date)
    }

    fn first_weekday(&self, year: i32, month: u8) -> Option<u8> {
        self.system().first_weekday(year, month)
    }
}

/// Moves a (year, month index) pair by `step` months.
pub fn shift_month(year: i32, month: u8, step: i32) -> (i32, u8) {
    let months = i32::from(MONTHS_IN_YEAR);
    let total = year * months + i32::from(month) + step;
    let month = u8::try_from(total.rem_euclid(months)).unwrap_or_default();
    (total.div_euclid(months), month)
}

fn weekday_from_sunday(date: NaiveDate) -> u8 {
    u8::try_from(date.weekday().num_days_from_sunday()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> DateInfo {
        DateInfo::from_naive(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        i32,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2024,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2023,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2200,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_gregorian_days_in_month() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (month, days) in (0..12).zip(expected) {
            assert_eq!(Gregorian.days_in_month(2023, month), days, "month {month}");
        }
        assert_eq!(Gregorian.days_in_month(2024, FEBRUARY), 29);
        assert_eq!(Gregorian.days_in_month(2100, FEBRUARY), 28);

        // out-of-range month indexes still answer a positive length
        assert_eq!(Gregorian.days_in_month(2024, 12), 31);
        assert_eq!(Gregorian.days_in_month(2024, u8::MAX), 31);
        let table = CalendarTable::standard();
        assert_eq!(Calendar::new(CalendarType::Ad, &table).days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_known_conversions() {
        let table = CalendarTable::standard();
        let bs = BikramSambat::new(&table);

        struct TestCase {
            bs:          DateInfo,
            ad:          DateInfo,
            description: &'static str,
        }

        let cases = [
            TestCase {
                bs:          DateInfo::new(2000, 0, 1),
                ad:          ymd(1943, 4, 14),
                description: "table epoch",
            },
            TestCase {
                bs:          DateInfo::new(2077, 0, 1),
                ad:          ymd(2020, 4, 13),
                description: "new year 2077",
            },
            TestCase {
                bs:          DateInfo::new(2081, 0, 1),
                ad:          ymd(2024, 4, 13),
                description: "new year 2081",
            },
            TestCase {
                bs:          DateInfo::new(2081, 8, 15),
                ad:          ymd(2024, 12, 30),
                description: "Poush 15, 2081",
            },
            TestCase {
                bs:          DateInfo::new(2082, 0, 1),
                ad:          ymd(2025, 4, 14),
                description: "new year 2082",
            },
            TestCase {
                bs:          DateInfo::new(2090, 11, 30),
                ad:          ymd(2034, 4, 13),
                description: "last tabulated day",
            },
        ];

        for case in &cases {
            let TestCase { bs: date, ad, description } = case;
            assert_eq!(
                bs.bs_to_ad(date.year, date.month, date.day),
                Some(*ad),
                "{description}: BS to AD"
            );
            assert_eq!(
                bs.ad_to_bs(ad.year, ad.month, ad.day),
                Some(*date),
                "{description}: AD to BS"
            );
        }
    }

    #[test]
    fn test_recent_month_starts() {
        let table = CalendarTable::standard();
        let bs = BikramSambat::new(&table);

        // (BS year, month index, day, AD date) from the published calendar
        let anchors = [
            (2080, 3, 1, ymd(2023, 7, 17)),
            (2080, 9, 1, ymd(2024, 1, 15)),
            (2080, 11, 30, ymd(2024, 4, 12)),
            (2081, 3, 1, ymd(2024, 7, 16)),
            (2081, 4, 1, ymd(2024, 8, 17)),
            (2081, 6, 1, ymd(2024, 10, 17)),
            (2081, 9, 1, ymd(2025, 1, 14)),
            (2081, 11, 30, ymd(2025, 4, 13)),
            (2082, 1, 1, ymd(2025, 5, 15)),
            (2082, 1, 15, ymd(2025, 5, 29)),
            (2082, 3, 1, ymd(2025, 7, 17)),
            (2082, 5, 1, ymd(2025, 9, 17)),
            (2082, 8, 1, ymd(2025, 12, 16)),
            (2083, 0, 1, ymd(2026, 4, 14)),
            (2083, 1, 1, ymd(2026, 5, 15)),
            (2084, 0, 1, ymd(2027, 4, 14)),
        ];

        for (year, month, day, ad) in anchors {
            assert_eq!(bs.bs_to_ad(year, month, day), Some(ad), "BS {year}/{month}/{day}");
            assert_eq!(
                bs.ad_to_bs(ad.year, ad.month, ad.day),
                Some(DateInfo::new(year, month, day)),
                "AD {ad}"
            );
        }
    }

    #[test]
    fn test_conversion_out_of_range() {
        let table = CalendarTable::standard();
        let bs = BikramSambat::new(&table);

        assert_eq!(bs.bs_to_ad(1999, 11, 30), None);
        assert_eq!(bs.bs_to_ad(2091, 0, 1), None);
        assert_eq!(bs.bs_to_ad(2081, 8, 30), None, "Poush 2081 has 29 days");
        assert_eq!(bs.bs_to_ad(2081, 0, 0), None);
        assert_eq!(bs.bs_to_ad(2081, 12, 1), None);

        assert_eq!(bs.ad_to_bs(1943, 3, 13), None, "day before epoch");
        assert_eq!(bs.ad_to_bs(2034, 3, 14), None, "day after last tabulated day");
        assert_eq!(bs.ad_to_bs(2023, 1, 29), None, "not a real AD date");
    }

    #[test]
    fn test_shift_window_round_trip() {
        let table = CalendarTable::standard();
        let bs = BikramSambat::new(&table);
        let days = table.days_in_month(SHIFT_YEAR, SHIFT_MONTH);
        assert_eq!(days, 32);

        for day in 1..=days {
            let ad = bs.bs_to_ad(SHIFT_YEAR, SHIFT_MONTH, day).unwrap();
            assert_eq!(
                bs.ad_to_bs(ad.year, ad.month, ad.day),
                Some(DateInfo::new(SHIFT_YEAR, SHIFT_MONTH, day)),
                "day {day}"
            );
        }
    }

    #[test]
    fn test_shift_window_adjusts_by_one_day() {
        let table = CalendarTable::standard();
        let bs = BikramSambat::new(&table);

        // the raw table places Asar 1, 2084 on 15 June 2027
        assert_eq!(bs.bs_to_ad(2084, 2, 1), Some(ymd(2027, 6, 14)));
        assert_eq!(bs.bs_to_ad(2084, 2, 32), Some(ymd(2027, 7, 15)));
    }

    #[test]
    fn test_shift_not_applied_to_neighbours() {
        let table = CalendarTable::standard();
        let bs = BikramSambat::new(&table);

        // Jestha 2084 and Shrawan 2084 keep the raw arithmetic
        assert_eq!(bs.bs_to_ad(2084, 1, 31), Some(ymd(2027, 6, 14)));
        assert_eq!(bs.bs_to_ad(2084, 3, 1), Some(ymd(2027, 7, 17)));
        assert_eq!(bs.ad_to_bs(2027, 6, 17), Some(DateInfo::new(2084, 3, 1)));

        let jestha_mid = bs.bs_to_ad(2084, 1, 15).unwrap();
        assert_eq!(
            bs.ad_to_bs(jestha_mid.year, jestha_mid.month, jestha_mid.day),
            Some(DateInfo::new(2084, 1, 15))
        );
        // same month index, other year
        assert_eq!(bs.bs_to_ad(2083, 2, 1), Some(ymd(2026, 6, 15)));
    }

    #[test]
    fn test_ad_round_trip_outside_window() {
        let table = CalendarTable::standard();
        let bs = BikramSambat::new(&table);

        let mut date = NaiveDate::from_ymd_opt(1943, 4, 14).unwrap();
        let last = NaiveDate::from_ymd_opt(2034, 4, 13).unwrap();
        while date <= last {
            let ad = DateInfo::from_naive(date);
            let converted = bs.ad_to_bs(ad.year, ad.month, ad.day).unwrap();
            if !is_shift_window(converted.year, converted.month) {
                assert_eq!(
                    bs.bs_to_ad(converted.year, converted.month, converted.day),
                    Some(ad),
                    "AD {date}"
                );
            }
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_first_weekday() {
        let table = CalendarTable::standard();
        let ad = Calendar::new(CalendarType::Ad, &table);
        let bs = Calendar::new(CalendarType::Bs, &table);

        // 1 December 2024 was a Sunday, 1 January 2025 a Wednesday
        assert_eq!(ad.first_weekday(2024, 11), Some(0));
        assert_eq!(ad.first_weekday(2025, 0), Some(3));

        // Poush 1, 2081 = 16 December 2024, a Monday
        assert_eq!(bs.first_weekday(2081, 8), Some(1));
        // Asar 2084 starts on the corrected date (Monday 14 June 2027)
        assert_eq!(bs.first_weekday(2084, 2), Some(1));
        assert_eq!(bs.first_weekday(2084, 1), Some(6));
        assert_eq!(bs.first_weekday(2084, 3), Some(6));

        assert_eq!(bs.first_weekday(1990, 0), None);
    }

    #[test]
    fn test_calendar_dispatch() {
        let table = CalendarTable::standard();
        let bs = Calendar::new(CalendarType::Bs, &table);
        let ad = Calendar::new(CalendarType::Ad, &table);

        assert_eq!(bs.kind(), CalendarType::Bs);
        assert_eq!(ad.kind(), CalendarType::Ad);
        assert_eq!(bs.days_in_month(2081, 2), 32);
        assert_eq!(ad.days_in_month(2081, 2), 31);

        let poush = DateInfo::new(2081, 8, 15);
        assert_eq!(bs.to_ad_iso(poush).as_deref(), Some("2024-12-30"));
        assert_eq!(bs.convert(poush, &ad), Some(ymd(2024, 12, 30)));
        assert_eq!(ad.convert(ymd(2024, 12, 30), &bs), Some(poush));
        assert_eq!(ad.to_ad_iso(DateInfo::new(2024, 1, 30)), None);
    }

    #[test]
    fn test_today_is_convertible() {
        let table = CalendarTable::standard();
        let ad_today = Calendar::new(CalendarType::Ad, &table).today().unwrap();
        assert!(ad_today.to_naive().is_some());
    }

    #[test]
    fn test_shift_month() {
        assert_eq!(shift_month(2081, 11, 1), (2082, 0));
        assert_eq!(shift_month(2081, 0, -1), (2080, 11));
        assert_eq!(shift_month(2081, 5, 14), (2082, 7));
        assert_eq!(shift_month(2081, 5, -18), (2079, 11));
    }
}
