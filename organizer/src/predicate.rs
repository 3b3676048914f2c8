//! Pure classifiers deciding whether a record belongs in a view.

use std::convert::Infallible;

use chrono::NaiveDateTime;

use crate::types::Appointment;
use crate::types::AppointmentCategory;
use crate::types::Contact;
use crate::types::ContactCategory;
use crate::types::Record;
use crate::types::Stock;
use crate::types::Task;
use crate::types::Website;

/// Status filter for tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Completed,
    Pending,
}

/// Temporal filter for appointments, relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFilter {
    /// Starts strictly after now.
    Upcoming,
    /// Starts at or before now.
    Past,
}

/// Per-kind hooks the view projector filters with.
pub trait Filterable: Record {
    /// Status filter values; `Infallible` when the kind has none.
    type Status: Copy + std::fmt::Debug + PartialEq;
    /// Category filter values; `Infallible` when the kind has none.
    type Category: Clone + std::fmt::Debug + PartialEq;

    /// Fields a text search looks at.
    fn search_fields(&self) -> Vec<&str>;

    fn matches_status(&self, status: Self::Status, now: NaiveDateTime) -> bool;

    fn category(&self) -> Option<&Self::Category>;
}

/// Case-insensitive substring match of `query` against any of `fields`.
/// An empty query matches everything.
pub fn text_matches(fields: &[&str], query: &str) -> bool {
    let q = query.to_lowercase();
    if q.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&q))
}

pub fn search_matches<R: Filterable>(record: &R, query: &str) -> bool {
    text_matches(&record.search_fields(), query)
}

pub fn category_matches<R: Filterable>(record: &R, category: &R::Category) -> bool {
    record.category() == Some(category)
}

pub fn time_filter_matches(appt: &Appointment, filter: TimeFilter, now: NaiveDateTime) -> bool {
    match filter {
        TimeFilter::Upcoming => appt.is_upcoming(now),
        TimeFilter::Past => !appt.is_upcoming(now),
    }
}

pub fn task_status_matches(task: &Task, status: TaskStatus) -> bool {
    match status {
        TaskStatus::Completed => task.completed,
        TaskStatus::Pending => !task.completed,
    }
}

impl Filterable for Contact {
    type Status = Infallible;
    type Category = ContactCategory;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.phone.as_str(), self.email.as_str()]
    }

    fn matches_status(&self, status: Infallible, _now: NaiveDateTime) -> bool {
        match status {}
    }

    fn category(&self) -> Option<&ContactCategory> {
        Some(&self.category)
    }
}

impl Filterable for Appointment {
    type Status = TimeFilter;
    type Category = AppointmentCategory;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.location.as_str(),
            self.category.as_label(),
        ]
    }

    fn matches_status(&self, status: TimeFilter, now: NaiveDateTime) -> bool {
        time_filter_matches(self, status, now)
    }

    fn category(&self) -> Option<&AppointmentCategory> {
        Some(&self.category)
    }
}

impl Filterable for Task {
    type Status = TaskStatus;
    type Category = Infallible;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn matches_status(&self, status: TaskStatus, _now: NaiveDateTime) -> bool {
        task_status_matches(self, status)
    }

    fn category(&self) -> Option<&Infallible> {
        None
    }
}

impl Filterable for Stock {
    type Status = Infallible;
    type Category = Infallible;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.symbol.as_str(), self.name.as_str()]
    }

    fn matches_status(&self, status: Infallible, _now: NaiveDateTime) -> bool {
        match status {}
    }

    fn category(&self) -> Option<&Infallible> {
        None
    }
}

impl Filterable for Website {
    type Status = Infallible;
    type Category = String;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.url.as_str(),
            self.category.as_str(),
            self.description.as_str(),
        ]
    }

    fn matches_status(&self, status: Infallible, _now: NaiveDateTime) -> bool {
        match status {}
    }

    fn category(&self) -> Option<&String> {
        Some(&self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono::NaiveTime;

    fn contact(name: &str, phone: &str, email: &str) -> Contact {
        Contact {
            id: String::new(),
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            category: ContactCategory::General,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(h, min, 0))
            .unwrap()
    }

    fn appointment(starts: NaiveDateTime) -> Appointment {
        Appointment {
            id: "a_1".to_string(),
            title: "Standup".to_string(),
            description: "daily sync".to_string(),
            date: starts.date(),
            time: starts.time(),
            location: "Room 2".to_string(),
            category: AppointmentCategory::Work,
            reminder_sent: false,
            created_at: None,
        }
    }

    #[test]
    fn contact_search_is_case_insensitive_over_name_phone_email() {
        assert!(search_matches(&contact("Anna", "555", ""), "an"));
        assert!(!search_matches(&contact("Bob", "555", ""), "an"));
        assert!(search_matches(&contact("Bob", "555-0199", ""), "0199"));
        assert!(search_matches(&contact("Bob", "555", "BOB@Example.com"), "example"));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(search_matches(&contact("Bob", "1", ""), ""));
    }

    #[test]
    fn appointment_search_includes_category_label() {
        let appt = appointment(at(2025, 1, 1, 9, 0));
        assert!(search_matches(&appt, "work"));
        assert!(search_matches(&appt, "ROOM"));
        assert!(!search_matches(&appt, "dentist"));
    }

    #[test]
    fn exactly_now_counts_as_past() {
        let now = at(2025, 6, 1, 12, 0);
        let appt = appointment(now);
        assert!(time_filter_matches(&appt, TimeFilter::Past, now));
        assert!(!time_filter_matches(&appt, TimeFilter::Upcoming, now));
        let later = appointment(now + chrono::Duration::minutes(1));
        assert!(time_filter_matches(&later, TimeFilter::Upcoming, now));
        assert_eq!(later.time, NaiveTime::from_hms_opt(12, 1, 0).unwrap());
    }

    #[test]
    fn task_status_is_exact() {
        let mut task = Task {
            id: String::new(),
            title: "t".to_string(),
            description: String::new(),
            due_date: None,
            priority: Default::default(),
            completed: false,
            created_at: None,
        };
        assert!(task_status_matches(&task, TaskStatus::Pending));
        task.completed = true;
        assert!(task_status_matches(&task, TaskStatus::Completed));
        assert!(!task_status_matches(&task, TaskStatus::Pending));
    }
}
