//! Appointment reminder windows.

use chrono::Duration;
use chrono::NaiveDateTime;

use crate::types::Appointment;

/// How far ahead an appointment counts as due soon, in hours.
pub const DUE_SOON_HOURS: i64 = 24;

/// Starts after `now` and no later than [`DUE_SOON_HOURS`] from it.
pub fn is_due_soon(appt: &Appointment, now: NaiveDateTime) -> bool {
    let starts = appt.starts_at();
    starts > now && starts <= now + Duration::hours(DUE_SOON_HOURS)
}

pub fn is_today(appt: &Appointment, now: NaiveDateTime) -> bool {
    appt.date == now.date()
}

/// Due-soon appointments whose reminder has not gone out, soonest first.
pub fn pending_reminders(appts: &[Appointment], now: NaiveDateTime) -> Vec<Appointment> {
    let mut out: Vec<Appointment> = appts
        .iter()
        .filter(|a| !a.reminder_sent && is_due_soon(a, now))
        .cloned()
        .collect();
    out.sort_by_key(Appointment::starts_at);
    out
}

pub fn due_soon(appts: &[Appointment], now: NaiveDateTime) -> Vec<Appointment> {
    let mut out: Vec<Appointment> = appts
        .iter()
        .filter(|a| is_due_soon(a, now))
        .cloned()
        .collect();
    out.sort_by_key(Appointment::starts_at);
    out
}

pub fn today(appts: &[Appointment], now: NaiveDateTime) -> Vec<Appointment> {
    let mut out: Vec<Appointment> = appts.iter().filter(|a| is_today(a, now)).cloned().collect();
    out.sort_by_key(Appointment::starts_at);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppointmentCategory;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .and_then(|d| d.and_hms_opt(20, 0, 0))
            .unwrap()
    }

    fn appt(id: &str, starts: NaiveDateTime, reminder_sent: bool) -> Appointment {
        Appointment {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            date: starts.date(),
            time: starts.time(),
            location: String::new(),
            category: AppointmentCategory::General,
            reminder_sent,
            created_at: None,
        }
    }

    fn ids(items: &[Appointment]) -> Vec<&str> {
        items.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn due_soon_window_bounds() {
        let now = now();
        assert!(!is_due_soon(&appt("now", now, false), now));
        assert!(is_due_soon(&appt("edge", now + Duration::hours(24), false), now));
        assert!(!is_due_soon(
            &appt("beyond", now + Duration::hours(24) + Duration::minutes(1), false),
            now
        ));
        assert!(!is_due_soon(&appt("past", now - Duration::minutes(1), false), now));
    }

    #[test]
    fn pending_reminders_skip_sent_ones() {
        let now = now();
        let items = vec![
            appt("later", now + Duration::hours(10), false),
            appt("sent", now + Duration::hours(1), true),
            appt("sooner", now + Duration::hours(2), false),
        ];
        assert_eq!(ids(&pending_reminders(&items, now)), vec!["sooner", "later"]);
        assert_eq!(ids(&due_soon(&items, now)), vec!["sent", "sooner", "later"]);
    }

    #[test]
    fn today_compares_calendar_date() {
        let now = now();
        let items = vec![
            appt("tonight", now + Duration::hours(2), false),
            appt("morning", now - Duration::hours(12), false),
            appt("tomorrow", now + Duration::hours(5), false),
        ];
        assert_eq!(ids(&today(&items, now)), vec!["morning", "tonight"]);
    }
}
