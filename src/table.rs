use crate::consts::{FALLBACK_BS_MONTH_DAYS, MAX_BS_MONTH_DAYS, MIN_BS_MONTH_DAYS, MONTHS_IN_YEAR};
use crate::error::DateError;
use chrono::NaiveDate;
use log::trace;

/// First BS year of the bundled table
pub const STANDARD_BASE_YEAR: i32 = 2000;

/// Day counts of every BS month from 2000 to 2090, Baisakh first.
const STANDARD_YEARS: [[u8; 12]; 91] = [
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2000
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2001
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2002
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2003
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2004
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2005
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2006
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2007
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], // 2008
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2009
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2010
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2011
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2012
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2013
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2014
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2015
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2016
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2017
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2018
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2019
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2020
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2021
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2022
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2023
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2024
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2025
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2026
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2027
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2028
    [31, 31, 32, 31, 32, 30, 30, 29, 30, 29, 30, 30], // 2029
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2030
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2031
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2032
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2033
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2034
    [30, 32, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], // 2035
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2036
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2037
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2038
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2039
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2040
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2041
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2042
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2043
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2044
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2045
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2046
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2047
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2048
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2049
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2050
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2051
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2052
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2053
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2054
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2055
    [31, 31, 32, 31, 32, 30, 30, 29, 30, 29, 30, 30], // 2056
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2057
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2058
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2059
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2060
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2061
    [30, 32, 31, 32, 31, 31, 29, 30, 29, 30, 29, 31], // 2062
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2063
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2064
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2065
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], // 2066
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2067
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2068
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2069
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2070
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2071
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2072
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2073
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2074
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2075
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2076
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2077
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2078
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2079
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2080
    [31, 31, 32, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2081
    [31, 31, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30], // 2082
    [31, 31, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30], // 2083
    [31, 31, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30], // 2084
    [31, 32, 31, 32, 30, 31, 30, 30, 29, 30, 30, 30], // 2085
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2086
    [31, 31, 32, 31, 31, 31, 30, 30, 29, 30, 30, 30], // 2087
    [30, 31, 32, 32, 30, 31, 30, 30, 29, 30, 30, 30], // 2088
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2089
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2090
];

/// Immutable month-length data for the Bikram Sambat calendar.
///
/// Row `i` holds the twelve month lengths of BS year `base_year + i`, and
/// `epoch` is the AD date of Baisakh 1 of `base_year`. Build it once and share
/// it by reference; nothing in the crate keeps a global copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarTable {
    base_year: i32,
    epoch:     NaiveDate,
    years:     Vec<[u8; 12]>,
}

impl CalendarTable {
    /// Creates a table from injected data.
    ///
    /// # Errors
    /// Returns `DateError::InvalidTable` if no years are given or any month
    /// length is outside `29..=32`.
    pub fn new(base_year: i32, epoch: NaiveDate, years: Vec<[u8; 12]>) -> Result<Self, DateError> {
        if years.is_empty() {
            return Err(DateError::InvalidTable("no years supplied".to_owned()));
        }
        for (offset, months) in years.iter().enumerate() {
            if let Some(bad) = months
                .iter()
                .position(|days| !(MIN_BS_MONTH_DAYS..=MAX_BS_MONTH_DAYS).contains(days))
            {
                return Err(DateError::InvalidTable(format!(
                    "year {} month {} has {} days",
                    i64::from(base_year) + i64::try_from(offset).unwrap_or_default(),
                    bad + 1,
                    months[bad]
                )));
            }
        }
        Ok(Self {
            base_year,
            epoch,
            years,
        })
    }

    /// The bundled table: BS 2000 to 2090, Baisakh 1, 2000 = 14 April 1943.
    pub fn standard() -> Self {
        Self {
            base_year: STANDARD_BASE_YEAR,
            epoch:     NaiveDate::from_ymd_opt(1943, 4, 14).unwrap_or_default(),
            years:     STANDARD_YEARS.to_vec(),
        }
    }

    pub const fn first_year(&self) -> i32 {
        self.base_year
    }

    /// Last covered BS year (inclusive)
    pub fn last_year(&self) -> i32 {
        self.base_year + i32::try_from(self.years.len()).unwrap_or(i32::MAX) - 1
    }

    /// AD date of Baisakh 1 of the first covered year
    pub const fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.months(year).is_some()
    }

    /// Month lengths of a covered year
    pub fn months(&self, year: i32) -> Option<&[u8; 12]> {
        let index = usize::try_from(year.checked_sub(self.base_year)?).ok()?;
        self.years.get(index)
    }

    /// Number of days in a BS month.
    ///
    /// Years outside the table answer 30 for every month. That is an
    /// approximation kept so grids still render, not calendar data.
    pub fn days_in_month(&self, year: i32, month: u8) -> u8 {
        match self.months(year).and_then(|months| months.get(usize::from(month))) {
            Some(days) => *days,
            None => {
                trace!("BS {year}/{month} not tabulated, assuming {FALLBACK_BS_MONTH_DAYS} days");
                FALLBACK_BS_MONTH_DAYS
            }
        }
    }

    /// Total days in a covered year
    pub fn year_days(&self, year: i32) -> Option<u32> {
        self.months(year)
            .map(|months| months.iter().map(|days| u32::from(*days)).sum())
    }

    /// Days between the epoch and the first day of `year`.
    pub(crate) fn days_before_year(&self, year: i32) -> Option<u32> {
        if !self.contains_year(year) {
            return None;
        }
        (self.base_year..year).map(|y| self.year_days(y)).sum()
    }

    /// Locates the BS (year, month index, day) lying `offset` days after the epoch.
    pub(crate) fn locate(&self, mut offset: u32) -> Option<(i32, u8, u8)> {
        let mut year = self.base_year;
        for months in &self.years {
            for (month, days) in (0..MONTHS_IN_YEAR).zip(months.iter()) {
                let days = u32::from(*days);
                if offset < days {
                    let day = u8::try_from(offset + 1).ok()?;
                    return Some((year, month, day));
                }
                offset -= days;
            }
            year += 1;
        }
        None
    }
}

impl Default for CalendarTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_coverage() {
        let table = CalendarTable::standard();
        assert_eq!(table.first_year(), 2000);
        assert_eq!(table.last_year(), 2090);
        assert!(table.contains_year(2084));
        assert!(!table.contains_year(1999));
        assert!(!table.contains_year(2091));
        assert_eq!(table.epoch(), NaiveDate::from_ymd_opt(1943, 4, 14).unwrap());
    }

    #[test]
    fn test_days_in_month_lookup() {
        let table = CalendarTable::standard();
        assert_eq!(table.days_in_month(2081, 0), 31);
        assert_eq!(table.days_in_month(2081, 2), 32);
        assert_eq!(table.days_in_month(2081, 8), 29);
        assert_eq!(table.days_in_month(2084, 2), 32);
        assert_eq!(table.days_in_month(2082, 0), 31);
        assert_eq!(table.days_in_month(2082, 1), 31);
    }

    #[test]
    fn test_days_in_month_fallback() {
        let table = CalendarTable::standard();
        for month in 0..12 {
            assert_eq!(table.days_in_month(1950, month), 30);
            assert_eq!(table.days_in_month(2150, month), 30);
        }
        // month index past the year also falls back
        assert_eq!(table.days_in_month(2081, 12), 30);
    }

    #[test]
    fn test_every_month_in_range() {
        let table = CalendarTable::standard();
        for year in table.first_year()..=table.last_year() {
            let total = table.year_days(year).unwrap();
            assert!((365..=366).contains(&total), "BS {year} has {total} days");
            for month in 0..12 {
                let days = table.days_in_month(year, month);
                assert!((29..=32).contains(&days), "BS {year}/{month} has {days} days");
            }
        }
    }

    #[test]
    fn test_locate() {
        let table = CalendarTable::standard();
        assert_eq!(table.locate(0), Some((2000, 0, 1)));
        assert_eq!(table.locate(30), Some((2000, 1, 1)));
        let last = table.days_before_year(2090).unwrap() + table.year_days(2090).unwrap();
        assert_eq!(table.locate(last - 1), Some((2090, 11, 30)));
        assert_eq!(table.locate(last), None);
    }

    #[test]
    fn test_new_rejects_bad_data() {
        let epoch = NaiveDate::from_ymd_opt(1943, 4, 14).unwrap();
        let result = CalendarTable::new(2000, epoch, vec![]);
        assert!(matches!(result, Err(DateError::InvalidTable(_))));

        let result = CalendarTable::new(2000, epoch, vec![[30, 32, 31, 32, 31, 30, 30, 30, 28, 30, 29, 31]]);
        assert!(matches!(result, Err(DateError::InvalidTable(msg)) if msg.contains("month 9")));

        let table = CalendarTable::new(2000, epoch, vec![STANDARD_YEARS[0]]).unwrap();
        assert_eq!(table.last_year(), 2000);
        assert_eq!(table.days_in_month(2001, 0), 30);
    }
}
