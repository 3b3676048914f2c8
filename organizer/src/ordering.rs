//! Display order for each record kind.
//!
//! Every comparator here is a total preorder; callers sort with a stable
//! sort so ties keep insertion order.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::types::Appointment;
use crate::types::Contact;
use crate::types::Stock;
use crate::types::Task;
use crate::types::Website;

pub trait DisplayOrder {
    /// Defaults to insertion order.
    fn display_cmp(&self, _other: &Self, _now: NaiveDateTime) -> Ordering {
        Ordering::Equal
    }
}

/// Upcoming appointments first, soonest first; then the rest, most recent
/// first. An appointment starting exactly at `now` is not upcoming.
pub fn appointment_cmp(a: &Appointment, b: &Appointment, now: NaiveDateTime) -> Ordering {
    let (a_at, b_at) = (a.starts_at(), b.starts_at());
    let (a_up, b_up) = (a_at > now, b_at > now);
    b_up.cmp(&a_up).then_with(|| {
        if a_up {
            a_at.cmp(&b_at)
        } else {
            b_at.cmp(&a_at)
        }
    })
}

/// Pending before completed, then higher priority, then tasks with a due
/// date (earliest first) before those without, then newest created first.
///
/// Creation time only breaks ties between tasks that both lack a due date.
pub fn task_cmp(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| b.priority.rank().cmp(&a.priority.rank()))
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.created_at.cmp(&a.created_at),
        })
}

impl DisplayOrder for Appointment {
    fn display_cmp(&self, other: &Self, now: NaiveDateTime) -> Ordering {
        appointment_cmp(self, other, now)
    }
}

impl DisplayOrder for Task {
    fn display_cmp(&self, other: &Self, _now: NaiveDateTime) -> Ordering {
        task_cmp(self, other)
    }
}

impl DisplayOrder for Contact {}

impl DisplayOrder for Stock {}

impl DisplayOrder for Website {}
