use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use super::event::CalendarEvent;

/// A fixed 7-column month grid: leading blanks up to the first day's weekday
/// (Sunday-first), then one cell per day of the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub leading_blanks: usize,
    pub days: Vec<NaiveDate>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let leading_blanks = first.weekday().num_days_from_sunday() as usize;

        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let day_count = (next_month - first).num_days() as u32;

        let days = (1..=day_count)
            .map(|d| NaiveDate::from_ymd_opt(year, month, d))
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            leading_blanks,
            days,
        })
    }

    /// The padded cell sequence: `None` blanks, `Some(date)` days, then
    /// trailing blanks out to a whole number of weeks.
    pub fn cells(&self) -> Vec<Option<NaiveDate>> {
        let mut cells: Vec<Option<NaiveDate>> = Vec::new();
        cells.resize(self.leading_blanks, None);
        cells.extend(self.days.iter().copied().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells
    }

    /// Cells chunked into 7-column rows.
    pub fn weeks(&self) -> Vec<Vec<Option<NaiveDate>>> {
        self.cells().chunks(7).map(|week| week.to_vec()).collect()
    }
}

/// Which month is displayed and which day is selected, if any.
#[derive(Debug, Clone)]
pub struct GridCursor {
    /// First day of the displayed month.
    pub displayed_month: NaiveDate,
    pub selected_day: Option<NaiveDate>,
}

impl GridCursor {
    pub fn new(today: NaiveDate) -> Self {
        let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
            .unwrap_or(today);
        Self {
            displayed_month: first,
            selected_day: Some(today),
        }
    }

    pub fn prev_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_sub_months(chrono::Months::new(1))
            .unwrap_or(self.displayed_month);
        self.selected_day = None;
    }

    pub fn next_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(self.displayed_month);
        self.selected_day = None;
    }

    /// Selecting the already-selected day deselects it.
    pub fn select_day(&mut self, date: NaiveDate) {
        if self.selected_day == Some(date) {
            self.selected_day = None;
        } else {
            self.selected_day = Some(date);
        }
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::new(self.displayed_month.year(), self.displayed_month.month())
            .expect("displayed_month is always a valid month start")
    }
}

/// Bucket already-fetched events into a grid cell by calendar-date equality.
pub fn events_on<'a>(events: &'a [CalendarEvent], date: NaiveDate) -> Vec<&'a CalendarEvent> {
    events.iter().filter(|e| e.occurs_on(date)).collect()
}

/// The set of dates that have at least one event, for day-cell markers.
pub fn busy_days(events: &[CalendarEvent]) -> HashSet<NaiveDate> {
    events.iter().map(|e| e.start.date()).collect()
}
