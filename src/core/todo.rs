use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::matches_search;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub completed: bool,
}

impl Todo {
    /// A fresh, unpersisted task: the backend assigns the id on first save.
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            due_date,
            priority: Priority::Medium,
            completed: false,
        }
    }

    pub fn complete(&mut self) {
        self.completed = true;
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date < today
    }

    /// Due within the next `days` days, inclusive of today.
    pub fn is_due_within(&self, today: NaiveDate, days: i64) -> bool {
        if self.completed {
            return false;
        }
        let until = (self.due_date - today).num_days();
        (0..=days).contains(&until)
    }
}

/// Criteria for the task list view, applied over the already-fetched list.
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub search: String,
}

impl TodoFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        if self.completed.is_some_and(|done| todo.completed != done) {
            return false;
        }
        if self.priority.is_some_and(|p| todo.priority != p) {
            return false;
        }
        matches_search(&self.search, &[&todo.title, &todo.description])
    }

    pub fn apply<'a>(&self, todos: &'a [Todo]) -> Vec<&'a Todo> {
        todos.iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_todo(title: &str) -> Todo {
        Todo::new(title, NaiveDate::from_ymd_opt(2026, 8, 10).unwrap())
    }

    #[test]
    fn new_todo_has_no_id() {
        let todo = make_todo("Water the plants");
        assert_eq!(todo.id, None);
        assert!(!todo.completed);
        assert_eq!(todo.priority, Priority::Medium);
    }

    #[test]
    fn priority_wire_format_is_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let p: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(p, Priority::Low);
    }

    #[test]
    fn overdue_only_when_incomplete() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        let mut todo = make_todo("Pay rent");
        assert!(todo.is_overdue(today));
        todo.complete();
        assert!(!todo.is_overdue(today));
    }

    #[test]
    fn due_within_window() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        let todo = make_todo("Book dentist");
        assert!(todo.is_due_within(today, 7));
        assert!(!todo.is_due_within(today, 1));
    }

    #[test]
    fn filter_by_completion_and_search() {
        let mut done = make_todo("Buy groceries");
        done.complete();
        let open = make_todo("Call plumber about the sink");
        let todos = vec![done, open];

        let filter = TodoFilter {
            completed: Some(false),
            ..Default::default()
        };
        let visible = filter.apply(&todos);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Call plumber about the sink");

        let filter = TodoFilter {
            search: "SINK".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&todos).len(), 1);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let todos = vec![make_todo("A"), make_todo("B")];
        assert_eq!(TodoFilter::default().apply(&todos).len(), 2);
    }
}
