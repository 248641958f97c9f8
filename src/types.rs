use crate::error::DateError;
use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A calendar date in either system.
///
/// The calendar is always supplied alongside the value, never stored in it.
/// `month` is 0-based (`0..=11`), `day` is 1-based. The derived ordering is
/// lexicographic on (year, month, day), which is chronological within one
/// calendar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display(fmt = "{:04}-{:02}-{:02}", year, "u16::from(*month) + 1", day)]
pub struct DateInfo {
    pub year:  i32,
    pub month: u8,
    pub day:   u8,
}

impl DateInfo {
    pub const fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// True when `self` falls strictly before `other`
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    pub fn is_same_date(&self, other: &Self) -> bool {
        self == other
    }

    /// Interprets the triple as a Gregorian date.
    /// Returns `None` if it does not name a real day.
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, u32::from(self.month) + 1, u32::from(self.day))
    }

    /// Builds an AD `DateInfo` from a chrono date
    pub fn from_naive(date: NaiveDate) -> Self {
        // month0/day are bounded by chrono (0..=11, 1..=31)
        Self {
            year:  date.year(),
            month: u8::try_from(date.month0()).unwrap_or_default(),
            day:   u8::try_from(date.day()).unwrap_or_default(),
        }
    }
}

/// Which calendar a `DateInfo` is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum CalendarType {
    /// Bikram Sambat
    #[default]
    #[serde(rename = "BS")]
    #[display(fmt = "BS")]
    Bs,
    /// Gregorian
    #[serde(rename = "AD")]
    #[display(fmt = "AD")]
    Ad,
}

impl CalendarType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bs => "BS",
            Self::Ad => "AD",
        }
    }
}

impl FromStr for CalendarType {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "BS" => Ok(Self::Bs),
            "AD" => Ok(Self::Ad),
            other => Err(DateError::UnknownLiteral {
                kind:  "calendar type",
                value: other.to_owned(),
            }),
        }
    }
}

/// The two supported textual layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    #[serde(rename = "YYYY-MM-DD")]
    #[display(fmt = "YYYY-MM-DD")]
    YearMonthDay,
    /// `MM/DD/YYYY`
    #[serde(rename = "MM/DD/YYYY")]
    #[display(fmt = "MM/DD/YYYY")]
    MonthDayYear,
}

impl DateFormat {
    /// Format used when the caller does not choose one
    pub const fn default_for(calendar: CalendarType) -> Self {
        match calendar {
            CalendarType::Bs => Self::YearMonthDay,
            CalendarType::Ad => Self::MonthDayYear,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YearMonthDay => "YYYY-MM-DD",
            Self::MonthDayYear => "MM/DD/YYYY",
        }
    }

    pub const fn separator(self) -> char {
        match self {
            Self::YearMonthDay => crate::DATE_SEPARATOR,
            Self::MonthDayYear => crate::MONTH_FIRST_SEPARATOR,
        }
    }
}

impl FromStr for DateFormat {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "YYYY-MM-DD" => Ok(Self::YearMonthDay),
            "MM/DD/YYYY" => Ok(Self::MonthDayYear),
            other => Err(DateError::UnknownLiteral {
                kind:  "date format",
                value: other.to_owned(),
            }),
        }
    }
}

/// Shape of the value handed to the change callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum ReturnFormat {
    /// Plain AD ISO string
    #[default]
    #[display(fmt = "iso")]
    Iso,
    /// JSON object carrying both the BS and AD renderings
    #[display(fmt = "detailed")]
    Detailed,
}

impl FromStr for ReturnFormat {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "iso" => Ok(Self::Iso),
            "detailed" => Ok(Self::Detailed),
            other => Err(DateError::UnknownLiteral {
                kind:  "return format",
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based_iso() {
        assert_eq!(DateInfo::new(2081, 8, 15).to_string(), "2081-09-15");
        assert_eq!(DateInfo::new(1991, 0, 1).to_string(), "1991-01-01");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let cases = [
            (DateInfo::new(2080, 11, 30), DateInfo::new(2081, 0, 1)),
            (DateInfo::new(2081, 0, 31), DateInfo::new(2081, 1, 1)),
            (DateInfo::new(2081, 1, 10), DateInfo::new(2081, 1, 11)),
        ];
        for (earlier, later) in cases {
            assert!(earlier.is_before(&later), "{earlier} should precede {later}");
            assert!(!later.is_before(&earlier));
        }
        let d = DateInfo::new(2081, 4, 4);
        assert!(!d.is_before(&d));
        assert!(d.is_same_date(&DateInfo::new(2081, 4, 4)));
    }

    #[test]
    fn test_naive_conversion() {
        let date = DateInfo::new(2024, 1, 29);
        let naive = date.to_naive().unwrap();
        assert_eq!(naive, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(DateInfo::from_naive(naive), date);

        assert!(DateInfo::new(2023, 1, 29).to_naive().is_none());
        assert!(DateInfo::new(2023, 12, 1).to_naive().is_none());
    }

    #[test]
    fn test_calendar_type_literals() {
        assert_eq!("BS".parse::<CalendarType>().unwrap(), CalendarType::Bs);
        assert_eq!("AD".parse::<CalendarType>().unwrap(), CalendarType::Ad);
        assert_eq!(CalendarType::Bs.to_string(), "BS");
        assert_eq!(CalendarType::default(), CalendarType::Bs);

        let result = "bs".parse::<CalendarType>();
        assert!(matches!(result, Err(DateError::UnknownLiteral { .. })));
    }

    #[test]
    fn test_date_format_literals() {
        assert_eq!(
            "YYYY-MM-DD".parse::<DateFormat>().unwrap(),
            DateFormat::YearMonthDay
        );
        assert_eq!(
            "MM/DD/YYYY".parse::<DateFormat>().unwrap(),
            DateFormat::MonthDayYear
        );
        assert!("DD.MM.YYYY".parse::<DateFormat>().is_err());
        assert_eq!(DateFormat::MonthDayYear.to_string(), "MM/DD/YYYY");
    }

    #[test]
    fn test_default_format_per_calendar() {
        assert_eq!(
            DateFormat::default_for(CalendarType::Bs),
            DateFormat::YearMonthDay
        );
        assert_eq!(
            DateFormat::default_for(CalendarType::Ad),
            DateFormat::MonthDayYear
        );
    }

    #[test]
    fn test_return_format_literals() {
        assert_eq!("iso".parse::<ReturnFormat>().unwrap(), ReturnFormat::Iso);
        assert_eq!(
            "detailed".parse::<ReturnFormat>().unwrap(),
            ReturnFormat::Detailed
        );
        assert!("json".parse::<ReturnFormat>().is_err());
    }

    #[test]
    fn test_serde_literals() {
        assert_eq!(serde_json::to_string(&CalendarType::Ad).unwrap(), r#""AD""#);
        assert_eq!(
            serde_json::to_string(&DateFormat::YearMonthDay).unwrap(),
            r#""YYYY-MM-DD""#
        );
        assert_eq!(
            serde_json::to_string(&ReturnFormat::Detailed).unwrap(),
            r#""detailed""#
        );
        let parsed: DateFormat = serde_json::from_str(r#""MM/DD/YYYY""#).unwrap();
        assert_eq!(parsed, DateFormat::MonthDayYear);
    }

    #[test]
    fn test_date_info_serde() {
        let date = DateInfo::new(2081, 8, 15);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#"{"year":2081,"month":8,"day":15}"#);
        let parsed: DateInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
    }
}
