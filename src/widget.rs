//! The picker: one string value in, one string value out.
//!
//! [`CalendarWidget`] keeps the transient state of a single date picker
//! (open/closed, shown month, focus, selection and input text) and reports
//! committed values through its change callback, encoded per
//! [`ReturnFormat`].

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::calendar::{BikramSambat, Calendar, CalendarSystem};
use crate::consts::{
    DATE_WIDTH, DECADE, FIRST_MONTH, MAX_MONTH, MIN_DAY, RANGE_SEPARATOR, YEAR_PICKER_LEAD,
    YEAR_PICKER_SPAN,
};
use crate::format::{WEEKDAYS, WEEKDAYS_NEPALI};
use crate::input::{format_partial_input, format_range_input};
use crate::keyboard::{FieldStepper, GridDelegate, GridNavigator, Key, KeyOutcome, MonthView, Step};
use crate::range::{select_date, DateRange, Selection};
use crate::table::CalendarTable;
use crate::validate::is_valid_date;
use crate::{CalendarType, DateError, DateFormat, DateInfo, ReturnFormat};

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid ISO date pattern"));

/// Caller-supplied picker options, as camelCase JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickerConfig {
    pub calendar_type:      CalendarType,
    /// Defaults per calendar when absent
    pub date_format:        Option<DateFormat>,
    pub return_format:      ReturnFormat,
    pub date_range_mode:    bool,
    /// Earliest selectable AD date
    pub min_date:           Option<NaiveDate>,
    /// Latest selectable AD date
    pub max_date:           Option<NaiveDate>,
    pub show_today:         bool,
    pub show_nepali_months: bool,
    pub show_nepali_days:   bool,
    pub placeholder:        Option<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            calendar_type:      CalendarType::Bs,
            date_format:        None,
            return_format:      ReturnFormat::Iso,
            date_range_mode:    false,
            min_date:           None,
            max_date:           None,
            show_today:         true,
            show_nepali_months: false,
            show_nepali_days:   false,
            placeholder:        None,
        }
    }
}

impl PickerConfig {
    /// Loads a configuration from JSON; missing keys take their defaults.
    ///
    /// # Errors
    /// Returns `DateError::Config` for malformed JSON or unknown literals.
    pub fn from_json(json: &str) -> Result<Self, DateError> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn date_format(&self) -> DateFormat {
        self.date_format
            .unwrap_or_else(|| DateFormat::default_for(self.calendar_type))
    }
}

/// The `detailed` encoding: both calendars side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detailed<T> {
    pub bs: T,
    pub ad: T,
}

/// One side of a detailed range value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeText {
    pub start: String,
    pub end:   String,
}

/// An externally supplied value, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerValue {
    Empty,
    /// An AD ISO date
    Date(DateInfo),
    /// Two AD ISO dates
    Range(DateRange),
    /// The older `{bs, ad}` object
    Legacy(Detailed<Option<String>>),
}

/// Decodes a value handed to the picker.
///
/// Range pairs are only recognised in range mode.
///
/// # Errors
/// Returns `DateError::MalformedInput` for text matching none of the shapes
/// and `DateError::InvertedRange` for a range ending before it starts.
pub fn decode_value(value: &str, range_mode: bool) -> Result<PickerValue, DateError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(PickerValue::Empty);
    }
    if range_mode && value.contains(RANGE_SEPARATOR) {
        return value.parse::<DateRange>().map(PickerValue::Range);
    }
    if ISO_DATE.is_match(value) {
        return DateFormat::YearMonthDay
            .parse(value)
            .map(PickerValue::Date)
            .ok_or_else(|| DateError::MalformedInput(value.to_owned()));
    }
    serde_json::from_str::<Detailed<Option<String>>>(value)
        .map(PickerValue::Legacy)
        .map_err(|_| DateError::MalformedInput(value.to_owned()))
}

/// What the picker is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    Closed,
    OpenGrid { focused: Option<u8> },
    OpenMonthYearPicker { year_range_start: i32 },
}

type ChangeCallback = Box<dyn FnMut(&str)>;

pub struct CalendarWidget {
    config:           PickerConfig,
    format:           DateFormat,
    table:            Arc<CalendarTable>,
    state:            PickerState,
    view:             MonthView,
    year_range_start: i32,
    selected:         Option<DateInfo>,
    range:            DateRange,
    input:            String,
    on_change:        Option<ChangeCallback>,
}

impl fmt::Debug for CalendarWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarWidget")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("view", &self.view)
            .field("selected", &self.selected)
            .field("range", &self.range)
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

const fn year_page_start(year: i32) -> i32 {
    year.div_euclid(DECADE) * DECADE - YEAR_PICKER_LEAD
}

fn to_json<T: Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value)
        .inspect_err(|err| warn!("failed to encode picker value: {err}"))
        .ok()
}

impl CalendarWidget {
    /// Creates a closed picker showing the current month.
    pub fn new(config: PickerConfig, table: Arc<CalendarTable>) -> Self {
        let format = config.date_format();
        let today = Calendar::new(config.calendar_type, &table)
            .today()
            .unwrap_or_else(|| DateInfo::new(table.first_year(), FIRST_MONTH, MIN_DAY));

        Self {
            config,
            format,
            table,
            state: PickerState::Closed,
            view: MonthView::new(today.year, today.month),
            year_range_start: year_page_start(today.year),
            selected: None,
            range: DateRange::empty(),
            input: String::new(),
            on_change: None,
        }
    }

    /// Registers the callback receiving every committed value.
    pub fn on_change(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub const fn state(&self) -> PickerState {
        self.state
    }

    pub const fn view(&self) -> MonthView {
        self.view
    }

    pub const fn selected(&self) -> Option<DateInfo> {
        self.selected
    }

    pub const fn range(&self) -> DateRange {
        self.range
    }

    pub fn input_text(&self) -> &str {
        &self.input
    }

    pub fn calendar(&self) -> Calendar<'_> {
        Calendar::new(self.config.calendar_type, &self.table)
    }

    pub fn placeholder(&self) -> String {
        if let Some(placeholder) = &self.config.placeholder {
            return placeholder.clone();
        }
        let format = self.format.as_str();
        if self.config.date_range_mode {
            format!("{format}{RANGE_SEPARATOR}{format}")
        } else {
            format.to_owned()
        }
    }

    /// Replaces the shown value without emitting.
    ///
    /// AD values are converted into the picker's calendar. Values that do
    /// not decode or convert leave the current state untouched.
    pub fn set_value(&mut self, value: &str) {
        let decoded = match decode_value(value, self.config.date_range_mode) {
            Ok(decoded) => decoded,
            Err(err) => {
                debug!("ignoring picker value {value:?}: {err}");
                return;
            }
        };

        let table = Arc::clone(&self.table);
        let calendar = Calendar::new(self.config.calendar_type, &table);
        match decoded {
            PickerValue::Empty => {
                self.selected = None;
                self.range = DateRange::empty();
                self.input.clear();
            }
            PickerValue::Date(ad) => match calendar.from_ad(ad) {
                Some(date) => self.show_single(date),
                None => debug!("picker value {ad} has no {} date", calendar.kind()),
            },
            PickerValue::Range(range) => {
                let converted = range
                    .start()
                    .and_then(|start| calendar.from_ad(start))
                    .zip(range.end().and_then(|end| calendar.from_ad(end)));
                match converted.map(|(start, end)| DateRange::new(start, end)) {
                    Some(Ok(range)) => self.show_range(range),
                    Some(Err(err)) => debug!("ignoring picker range {value:?}: {err}"),
                    None => debug!("picker range {value:?} has no {} dates", calendar.kind()),
                }
            }
            PickerValue::Legacy(detailed) => {
                let text = match calendar.kind() {
                    CalendarType::Bs => detailed.bs,
                    CalendarType::Ad => detailed.ad,
                };
                let Some(text) = text.filter(|text| !text.is_empty()) else {
                    return;
                };
                if let Some(date) = calendar.parse(self.format, &text) {
                    self.selected = Some(date);
                    self.view = MonthView::new(date.year, date.month);
                }
                self.input = text;
            }
        }
    }

    /// Handles a click on `day` of the shown month.
    /// Returns `false` when the day cannot be selected.
    pub fn click_day(&mut self, day: u8) -> bool {
        let table = Arc::clone(&self.table);
        let calendar = Calendar::new(self.config.calendar_type, &table);
        let date = DateInfo::new(self.view.year, self.view.month, day);
        if !is_valid_date(&calendar, &date) || self.out_of_bounds(&calendar, date) {
            debug!("day {date} is not selectable");
            return false;
        }

        let outcome = select_date(Some(&self.range), date, self.config.date_range_mode);
        match outcome.selection {
            Selection::Single(date) => {
                let Some(value) = self.encode_single(&calendar, date) else {
                    debug!("{date} cannot be converted; keeping the previous value");
                    return false;
                };
                self.show_single(date);
                self.emit(&value);
                self.close();
            }
            Selection::Range(range) if outcome.committed => {
                let encoded = range
                    .start()
                    .zip(range.end())
                    .and_then(|(start, end)| self.encode_range(&calendar, start, end));
                let Some(value) = encoded else {
                    debug!("range {range} cannot be converted; keeping the previous value");
                    return false;
                };
                self.show_range(range);
                self.emit(&value);
                self.close();
            }
            Selection::Range(range) => {
                self.range = range;
                self.input = self.range_text(&range);
            }
        }
        true
    }

    /// Handles typing into the text field.
    pub fn type_input(&mut self, raw: &str) {
        let table = Arc::clone(&self.table);
        let calendar = Calendar::new(self.config.calendar_type, &table);

        if self.config.date_range_mode {
            self.input = format_range_input(raw, self.format, &calendar);
            let complete = self
                .input
                .split_once(RANGE_SEPARATOR)
                .filter(|(start, end)| start.len() == DATE_WIDTH && end.len() == DATE_WIDTH)
                .and_then(|(start, end)| {
                    calendar
                        .parse(self.format, start)
                        .zip(calendar.parse(self.format, end))
                })
                .filter(|(start, end)| {
                    !self.out_of_bounds(&calendar, *start) && !self.out_of_bounds(&calendar, *end)
                });
            if let Some((start, end)) = complete {
                if let (Ok(range), Some(value)) =
                    (DateRange::new(start, end), self.encode_range(&calendar, start, end))
                {
                    self.range = range;
                    self.view = MonthView::new(start.year, start.month);
                    self.emit(&value);
                }
            }
            return;
        }

        self.input = format_partial_input(raw, self.format);
        if self.input.len() < DATE_WIDTH {
            return;
        }
        let Some(date) = calendar
            .parse(self.format, &self.input)
            .filter(|date| !self.out_of_bounds(&calendar, *date))
        else {
            return;
        };
        if let Some(value) = self.encode_single(&calendar, date) {
            self.selected = Some(date);
            self.view = MonthView::new(date.year, date.month);
            self.emit(&value);
        }
    }

    /// Handles a key pressed in the text field with the caret at `caret`.
    /// Returns whether the key was consumed.
    pub fn input_key(&mut self, key: Key, caret: usize) -> bool {
        if self.config.date_range_mode {
            if key == Key::Escape && self.is_open() {
                self.close();
                return true;
            }
            return false;
        }

        let table = Arc::clone(&self.table);
        let calendar = Calendar::new(self.config.calendar_type, &table);

        if let Some(direction) = Step::from_key(key) {
            let stepped = FieldStepper::step(self.format, &calendar, &self.input, caret, direction)
                .filter(|date| is_valid_date(&calendar, date) && !self.out_of_bounds(&calendar, *date));
            if let Some(date) = stepped {
                if let Some(value) = self.encode_single(&calendar, date) {
                    self.show_single(date);
                    self.emit(&value);
                }
            }
            return true;
        }

        match key {
            Key::Enter => {
                if let Some(date) = calendar.parse(self.format, &self.input) {
                    self.selected = Some(date);
                    self.view = MonthView::new(date.year, date.month);
                    self.close();
                }
                true
            }
            Key::Escape if self.is_open() => {
                self.close();
                true
            }
            _ => false,
        }
    }

    /// Handles a key pressed while the day grid has focus.
    pub fn grid_key(&mut self, key: Key) -> KeyOutcome {
        let PickerState::OpenGrid { focused } = self.state else {
            return KeyOutcome::Unhandled;
        };
        let table = Arc::clone(&self.table);
        let navigator = GridNavigator::new(Calendar::new(self.config.calendar_type, &table));

        let outcome = navigator.handle_key(key, self.view, focused, self);
        if let (KeyOutcome::Focus(day), PickerState::OpenGrid { .. }) = (outcome, self.state) {
            self.state = PickerState::OpenGrid { focused: Some(day) };
        }
        outcome
    }

    /// Clears the selection and emits an empty value.
    pub fn clear(&mut self) {
        self.selected = None;
        self.range = DateRange::empty();
        self.input.clear();
        self.emit("");
    }

    /// Clears, closes and emits an empty value.
    pub fn reset(&mut self) {
        self.clear();
        self.close();
    }

    pub const fn is_open(&self) -> bool {
        !matches!(self.state, PickerState::Closed)
    }

    pub fn open(&mut self) {
        if !self.is_open() {
            self.state = PickerState::OpenGrid { focused: None };
        }
    }

    pub fn close(&mut self) {
        self.state = PickerState::Closed;
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn navigate_month(&mut self, step: i32) {
        self.view = self.view.shifted(step);
        self.drop_focus();
    }

    pub fn navigate_year(&mut self, step: i32) {
        self.view.year += step;
        self.drop_focus();
    }

    pub fn open_month_year_picker(&mut self) {
        self.state = PickerState::OpenMonthYearPicker {
            year_range_start: self.year_range_start,
        };
    }

    pub fn close_month_year_picker(&mut self) {
        if matches!(self.state, PickerState::OpenMonthYearPicker { .. }) {
            self.state = PickerState::OpenGrid { focused: None };
        }
    }

    /// Pages the year picker by `delta` years.
    pub fn shift_year_range(&mut self, delta: i32) {
        self.year_range_start += delta;
        if let PickerState::OpenMonthYearPicker { .. } = self.state {
            self.open_month_year_picker();
        }
    }

    /// Years offered by the year picker
    pub const fn picker_years(&self) -> Range<i32> {
        self.year_range_start..self.year_range_start + YEAR_PICKER_SPAN
    }

    /// Shows `year`; the month/year picker stays open.
    pub fn pick_year(&mut self, year: i32) {
        self.view.year = year;
    }

    /// Shows `month` and returns to the day grid.
    pub fn pick_month(&mut self, month: u8) -> bool {
        if month > MAX_MONTH {
            return false;
        }
        self.view.month = month;
        self.close_month_year_picker();
        true
    }

    /// Shows the current month and returns to the day grid.
    pub fn go_to_today(&mut self) {
        let today = self.calendar().today();
        match today {
            Some(today) => self.view = MonthView::new(today.year, today.month),
            None => debug!("today has no {} date", self.config.calendar_type),
        }
        self.close_month_year_picker();
    }

    /// Cells of the shown month, Sunday first; `None` pads the first week.
    pub fn grid_cells(&self) -> Vec<Option<u8>> {
        let calendar = self.calendar();
        let lead = calendar
            .first_weekday(self.view.year, self.view.month)
            .unwrap_or(0);
        let days = calendar.days_in_month(self.view.year, self.view.month);
        std::iter::repeat_n(None, usize::from(lead))
            .chain((MIN_DAY..=days).map(Some))
            .collect()
    }

    pub fn weekday_headers(&self) -> [&'static str; 7] {
        match self.config.calendar_type {
            CalendarType::Bs if self.config.show_nepali_days => WEEKDAYS_NEPALI,
            _ => WEEKDAYS,
        }
    }

    /// Header of the day grid, e.g. `Poush 2081`
    pub fn month_label(&self) -> String {
        let name = self
            .calendar()
            .month_name(self.view.month, self.config.show_nepali_months)
            .unwrap_or_default();
        format!("{name} {}", self.view.year)
    }

    /// True when `day` of the shown month falls outside `minDate`/`maxDate`.
    pub fn is_disabled(&self, day: u8) -> bool {
        let date = DateInfo::new(self.view.year, self.view.month, day);
        self.out_of_bounds(&self.calendar(), date)
    }

    pub fn is_today(&self, day: u8) -> bool {
        self.config.show_today
            && self.calendar().today() == Some(DateInfo::new(self.view.year, self.view.month, day))
    }

    pub fn is_selected(&self, day: u8) -> bool {
        let date = DateInfo::new(self.view.year, self.view.month, day);
        if self.config.date_range_mode {
            self.range.start() == Some(date) || self.range.end() == Some(date)
        } else {
            self.selected == Some(date)
        }
    }

    pub fn is_in_range(&self, day: u8) -> bool {
        self.range
            .contains(&DateInfo::new(self.view.year, self.view.month, day))
    }

    fn drop_focus(&mut self) {
        if let PickerState::OpenGrid { .. } = self.state {
            self.state = PickerState::OpenGrid { focused: None };
        }
    }

    fn show_single(&mut self, date: DateInfo) {
        self.selected = Some(date);
        self.input = self.format.format_date(&date);
        self.view = MonthView::new(date.year, date.month);
    }

    fn show_range(&mut self, range: DateRange) {
        self.range = range;
        self.input = self.range_text(&range);
        if let Some(start) = range.start() {
            self.view = MonthView::new(start.year, start.month);
        }
    }

    fn range_text(&self, range: &DateRange) -> String {
        match (range.start(), range.end()) {
            (Some(start), Some(end)) => format!(
                "{}{RANGE_SEPARATOR}{}",
                self.format.format_date(&start),
                self.format.format_date(&end)
            ),
            (Some(start), None) => self.format.format_date(&start),
            (None, _) => String::new(),
        }
    }

    /// Dates with no AD counterpart count as out of bounds when bounds exist.
    fn out_of_bounds(&self, calendar: &Calendar<'_>, date: DateInfo) -> bool {
        let (min, max) = (self.config.min_date, self.config.max_date);
        if min.is_none() && max.is_none() {
            return false;
        }
        let Some(ad) = calendar.to_ad(date).and_then(DateInfo::to_naive) else {
            return true;
        };
        min.is_some_and(|min| ad < min) || max.is_some_and(|max| ad > max)
    }

    /// BS rendering for the detailed encoding; empty when not convertible.
    fn bs_text(&self, calendar: &Calendar<'_>, date: DateInfo) -> String {
        match calendar {
            Calendar::Bs(_) => self.format.format_date(&date),
            Calendar::Ad(_) => BikramSambat::new(&self.table)
                .from_ad(date)
                .map(|bs| DateFormat::YearMonthDay.format_date(&bs))
                .unwrap_or_default(),
        }
    }

    fn encode_single(&self, calendar: &Calendar<'_>, date: DateInfo) -> Option<String> {
        let ad = calendar.to_ad(date)?;
        match self.config.return_format {
            ReturnFormat::Iso => Some(ad.to_string()),
            ReturnFormat::Detailed => to_json(&Detailed {
                bs: self.bs_text(calendar, date),
                ad: ad.to_string(),
            }),
        }
    }

    fn encode_range(&self, calendar: &Calendar<'_>, start: DateInfo, end: DateInfo) -> Option<String> {
        let (ad_start, ad_end) = (calendar.to_ad(start)?, calendar.to_ad(end)?);
        match self.config.return_format {
            ReturnFormat::Iso => Some(format!("{ad_start}{RANGE_SEPARATOR}{ad_end}")),
            ReturnFormat::Detailed => to_json(&Detailed {
                bs: RangeText {
                    start: self.bs_text(calendar, start),
                    end:   self.bs_text(calendar, end),
                },
                ad: RangeText {
                    start: ad_start.to_string(),
                    end:   ad_end.to_string(),
                },
            }),
        }
    }

    fn emit(&mut self, value: &str) {
        trace!("picker emits {value:?}");
        if let Some(callback) = self.on_change.as_mut() {
            callback(value);
        }
    }
}

impl GridDelegate for CalendarWidget {
    fn navigate_month(&mut self, step: i32) {
        Self::navigate_month(self, step);
    }

    fn select_day(&mut self, day: u8) -> bool {
        self.click_day(day)
    }

    fn go_to(&mut self, date: DateInfo) {
        self.view = MonthView::new(date.year, date.month);
    }

    fn close(&mut self) {
        Self::close(self);
    }
}
