use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::matches_search;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Planning,
    Confirmed,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub const ALL: [TripStatus; 4] = [
        Self::Planning,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|st| st.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub title: String,
    /// HH:MM, as entered in the form.
    pub time: String,
    pub location: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub id: u64,
    pub date: NaiveDate,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingItem {
    pub id: u64,
    pub item: String,
    pub category: String,
    pub packed: bool,
}

/// Issues client-side ids for nested records while a trip is being edited.
/// The backend replaces the nested collections wholesale on save, so these
/// only need to be unique within one editing session.
#[derive(Debug, Default)]
pub struct TempIds {
    next: u64,
}

impl TempIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Option<u64>,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub status: TripStatus,
    pub itinerary: Vec<ItineraryDay>,
    pub expenses: Vec<Expense>,
    pub packing_list: Vec<PackingItem>,
}

impl Trip {
    pub fn new(
        title: impl Into<String>,
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            destination: destination.into(),
            start_date,
            end_date,
            budget: 0.0,
            status: TripStatus::Planning,
            itinerary: Vec::new(),
            expenses: Vec::new(),
            packing_list: Vec::new(),
        }
    }

    /// Add an activity under its date's itinerary day, creating the day on
    /// first use. Days stay sorted by date.
    pub fn add_activity(&mut self, ids: &mut TempIds, date: NaiveDate, activity: Activity) {
        match self.itinerary.iter_mut().find(|d| d.date == date) {
            Some(day) => day.activities.push(activity),
            None => {
                self.itinerary.push(ItineraryDay {
                    id: ids.alloc(),
                    date,
                    activities: vec![activity],
                });
                self.itinerary.sort_by_key(|d| d.date);
            }
        }
    }

    /// Remove an activity; an itinerary day that becomes empty is dropped.
    pub fn remove_activity(&mut self, day_id: u64, activity_id: u64) {
        if let Some(day) = self.itinerary.iter_mut().find(|d| d.id == day_id) {
            day.activities.retain(|a| a.id != activity_id);
        }
        self.itinerary.retain(|d| !d.activities.is_empty());
    }

    pub fn add_expense(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    pub fn remove_expense(&mut self, id: u64) {
        self.expenses.retain(|e| e.id != id);
    }

    pub fn add_packing_item(&mut self, item: PackingItem) {
        self.packing_list.push(item);
    }

    pub fn remove_packing_item(&mut self, id: u64) {
        self.packing_list.retain(|p| p.id != id);
    }

    pub fn toggle_packed(&mut self, id: u64) {
        if let Some(item) = self.packing_list.iter_mut().find(|p| p.id == id) {
            item.packed = !item.packed;
        }
    }

    pub fn total_spent(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    pub fn budget_remaining(&self) -> f64 {
        self.budget - self.total_spent()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TripFilter {
    pub status: Option<TripStatus>,
    pub search: String,
}

impl TripFilter {
    pub fn matches(&self, trip: &Trip) -> bool {
        if self.status.is_some_and(|s| trip.status != s) {
            return false;
        }
        matches_search(&self.search, &[&trip.title, &trip.destination])
    }

    pub fn apply<'a>(&self, trips: &'a [Trip]) -> Vec<&'a Trip> {
        trips.iter().filter(|t| self.matches(t)).collect()
    }
}
