use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Birthday,
    Anniversary,
    Holiday,
    Other,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        Self::Birthday,
        Self::Anniversary,
        Self::Holiday,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::Anniversary => "anniversary",
            Self::Holiday => "holiday",
            Self::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
    /// Wire name is `type`, which is reserved in Rust.
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub reminder: bool,
}

impl CalendarEvent {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            start,
            end,
            location: String::new(),
            kind: EventKind::Other,
            reminder: false,
        }
    }

    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.start.date() == date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event(title: &str, start: &str) -> CalendarEvent {
        let start: NaiveDateTime = start.parse().unwrap();
        CalendarEvent::new(title, start, start + chrono::Duration::hours(1))
    }

    #[test]
    fn kind_serializes_under_type_key() {
        let mut event = make_event("Mum's birthday", "2026-09-14T09:00:00");
        event.kind = EventKind::Birthday;
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "birthday");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn kind_roundtrip() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::from_str("Birthday"), None);
    }

    #[test]
    fn occurs_on_compares_calendar_dates() {
        let event = make_event("Dentist", "2026-08-07T15:30:00");
        assert!(event.occurs_on(NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()));
        assert!(!event.occurs_on(NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()));
    }
}
