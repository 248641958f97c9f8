use std::str::FromStr;

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarSystem;
use crate::consts::{DAYS_IN_WEEK, FIRST_MONTH, MAX_MONTH, MIN_DAY};
use crate::prelude::*;
use crate::{DateError, DateInfo};

/// Reporting window around an anchor day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[display(fmt = "daily")]
    Daily,
    /// The anchor and up to six days before it, within the anchor's month
    #[display(fmt = "weekly")]
    Weekly,
    #[default]
    #[display(fmt = "monthly")]
    Monthly,
    #[display(fmt = "yearly")]
    Yearly,
}

impl FromStr for Period {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(DateError::UnknownLiteral {
                kind:  "period",
                value: other.to_owned(),
            }),
        }
    }
}

/// Inclusive AD bounds of the period holding `anchor`.
///
/// Months and years are those of `calendar`, so with Bikram Sambat a yearly
/// period runs from Baisakh 1 to the last day of Chaitra. `None` when the
/// anchor or a bound cannot be converted.
pub fn bs_period_range<C: CalendarSystem + ?Sized>(
    calendar: &C,
    period: Period,
    anchor: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let Some(local) = calendar.from_ad(DateInfo::from_naive(anchor)) else {
        debug!("{period} period around {anchor} is outside the {} range", calendar.kind());
        return None;
    };

    let (first, last) = match period {
        Period::Daily => (local, local),
        Period::Weekly => {
            let start = local.day.saturating_sub(DAYS_IN_WEEK - 1).max(MIN_DAY);
            (DateInfo::new(local.year, local.month, start), local)
        }
        Period::Monthly => (
            DateInfo::new(local.year, local.month, MIN_DAY),
            DateInfo::new(
                local.year,
                local.month,
                calendar.days_in_month(local.year, local.month),
            ),
        ),
        Period::Yearly => (
            DateInfo::new(local.year, FIRST_MONTH, MIN_DAY),
            DateInfo::new(local.year, MAX_MONTH, calendar.days_in_month(local.year, MAX_MONTH)),
        ),
    };

    let to_naive = |date: DateInfo| calendar.to_ad(date).and_then(DateInfo::to_naive);
    Some((to_naive(first)?, to_naive(last)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Calendar, Gregorian};
    use crate::table::CalendarTable;
    use crate::CalendarType;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_bs_periods() {
        struct TestCase {
            period:   Period,
            expected: (NaiveDate, NaiveDate),
        }

        let table = CalendarTable::standard();
        let bs = Calendar::new(CalendarType::Bs, &table);
        // Poush 15, 2081
        let anchor = ymd(2024, 12, 30);

        let cases = [
            TestCase {
                period:   Period::Daily,
                expected: (anchor, anchor),
            },
            TestCase {
                period:   Period::Weekly,
                expected: (ymd(2024, 12, 24), anchor),
            },
            TestCase {
                period:   Period::Monthly,
                expected: (ymd(2024, 12, 16), ymd(2025, 1, 13)),
            },
            TestCase {
                period:   Period::Yearly,
                expected: (ymd(2024, 4, 13), ymd(2025, 4, 13)),
            },
        ];

        for case in &cases {
            assert_eq!(
                bs_period_range(&bs, case.period, anchor),
                Some(case.expected),
                "{}",
                case.period
            );
        }
    }

    #[test]
    fn test_weekly_stays_in_month() {
        let table = CalendarTable::standard();
        let bs = Calendar::new(CalendarType::Bs, &table);
        // Poush 3, 2081
        let anchor = ymd(2024, 12, 18);
        assert_eq!(
            bs_period_range(&bs, Period::Weekly, anchor),
            Some((ymd(2024, 12, 16), anchor))
        );
    }

    #[test]
    fn test_gregorian_periods() {
        let anchor = ymd(2024, 2, 10);
        assert_eq!(
            bs_period_range(&Gregorian, Period::Monthly, anchor),
            Some((ymd(2024, 2, 1), ymd(2024, 2, 29)))
        );
        assert_eq!(
            bs_period_range(&Gregorian, Period::Yearly, anchor),
            Some((ymd(2024, 1, 1), ymd(2024, 12, 31)))
        );
    }

    #[test]
    fn test_outside_table() {
        let table = CalendarTable::standard();
        let bs = Calendar::new(CalendarType::Bs, &table);
        assert_eq!(bs_period_range(&bs, Period::Daily, ymd(1900, 1, 1)), None);
    }

    #[test]
    fn test_period_literals() {
        assert_eq!("weekly".parse::<Period>().unwrap(), Period::Weekly);
        assert_eq!(Period::Yearly.to_string(), "yearly");
        assert!("hourly".parse::<Period>().is_err());
        let parsed: Period = serde_json::from_str(r#""daily""#).unwrap();
        assert_eq!(parsed, Period::Daily);
    }
}
