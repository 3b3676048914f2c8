//! Form input checks run before anything reaches the mutation gateway.
//!
//! Each `*Input` holds raw form values. `into_record` trims text fields,
//! parses dates and numbers, and either returns the record to save or every
//! problem found. Passing the record being edited as `existing` keeps its id
//! and the fields a form never shows (creation time, completion and reminder
//! flags).

use chrono::NaiveDateTime;

use crate::serde_fmt::parse_clock_time;
use crate::serde_fmt::parse_date;
use crate::types::Appointment;
use crate::types::AppointmentCategory;
use crate::types::Contact;
use crate::types::ContactCategory;
use crate::types::Priority;
use crate::types::Stock;
use crate::types::Task;
use crate::types::Website;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .messages.join(" "))]
pub struct ValidationErrors {
    pub messages: Vec<String>,
}

impl ValidationErrors {
    fn check(messages: Vec<String>) -> Result<(), Self> {
        if messages.is_empty() {
            Ok(())
        } else {
            Err(Self { messages })
        }
    }
}

fn existing_id<T>(existing: Option<&T>, id: impl Fn(&T) -> &str) -> String {
    existing.map(|e| id(e).to_string()).unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInput {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub category: ContactCategory,
}

impl ContactInput {
    pub fn from_record(c: &Contact) -> Self {
        Self {
            name: c.name.clone(),
            phone: c.phone.clone(),
            email: c.email.clone(),
            category: c.category,
        }
    }

    pub fn into_record(self, existing: Option<&Contact>) -> Result<Contact, ValidationErrors> {
        let mut errs = Vec::new();
        if self.name.trim().is_empty() {
            errs.push("Name is required.".to_string());
        }
        if self.phone.trim().is_empty() {
            errs.push("Phone number is required.".to_string());
        }
        ValidationErrors::check(errs)?;
        Ok(Contact {
            id: existing_id(existing, |c| c.id.as_str()),
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            category: self.category,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentInput {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub location: String,
    pub category: AppointmentCategory,
}

impl AppointmentInput {
    pub fn from_record(a: &Appointment) -> Self {
        Self {
            title: a.title.clone(),
            description: a.description.clone(),
            date: a.date.format("%Y-%m-%d").to_string(),
            time: a.time.format("%H:%M").to_string(),
            location: a.location.clone(),
            category: a.category,
        }
    }

    /// Scheduling in the past is rejected only when creating; an existing
    /// appointment may be edited after it has happened.
    pub fn into_record(
        self,
        existing: Option<&Appointment>,
        now: NaiveDateTime,
    ) -> Result<Appointment, ValidationErrors> {
        let mut errs = Vec::new();
        if self.title.trim().is_empty() {
            errs.push("Appointment title is required.".to_string());
        }
        let date = if self.date.trim().is_empty() {
            errs.push("Date is required.".to_string());
            None
        } else {
            let parsed = parse_date(&self.date);
            if parsed.is_none() {
                errs.push("Date is invalid.".to_string());
            }
            parsed
        };
        let time = if self.time.trim().is_empty() {
            errs.push("Time is required.".to_string());
            None
        } else {
            let parsed = parse_clock_time(&self.time);
            if parsed.is_none() {
                errs.push("Time is invalid.".to_string());
            }
            parsed
        };
        if let (Some(date), Some(time), None) = (date, time, existing) {
            if date.and_time(time) < now {
                errs.push("Appointment cannot be scheduled in the past.".to_string());
            }
        }
        ValidationErrors::check(errs)?;
        let (Some(date), Some(time)) = (date, time) else {
            return Err(ValidationErrors {
                messages: vec!["Date and time are required.".to_string()],
            });
        };
        Ok(Appointment {
            id: existing_id(existing, |a| a.id.as_str()),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date,
            time,
            location: self.location.trim().to_string(),
            category: self.category,
            reminder_sent: existing.is_some_and(|a| a.reminder_sent),
            created_at: existing.and_then(|a| a.created_at),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`, or empty for no due date.
    pub due_date: String,
    pub priority: Priority,
}

impl TaskInput {
    pub fn from_record(t: &Task) -> Self {
        Self {
            title: t.title.clone(),
            description: t.description.clone(),
            due_date: t
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            priority: t.priority,
        }
    }

    pub fn into_record(self, existing: Option<&Task>) -> Result<Task, ValidationErrors> {
        let mut errs = Vec::new();
        if self.title.trim().is_empty() {
            errs.push("Task title is required.".to_string());
        }
        let due_date = if self.due_date.trim().is_empty() {
            None
        } else {
            let parsed = parse_date(&self.due_date);
            if parsed.is_none() {
                errs.push("Due date is invalid.".to_string());
            }
            parsed
        };
        ValidationErrors::check(errs)?;
        Ok(Task {
            id: existing_id(existing, |t| t.id.as_str()),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            due_date,
            priority: self.priority,
            completed: existing.is_some_and(|t| t.completed),
            created_at: existing.and_then(|t| t.created_at),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockInput {
    pub symbol: String,
    pub name: String,
    pub quantity: String,
    pub purchase_price: String,
    pub current_price: String,
}

fn parse_number(raw: &str, field: &str, errs: &mut Vec<String>) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            errs.push(format!("{field} is invalid."));
            None
        }
    }
}

impl StockInput {
    pub fn from_record(s: &Stock) -> Self {
        Self {
            symbol: s.symbol.clone(),
            name: s.name.clone(),
            quantity: s.quantity.to_string(),
            purchase_price: s.purchase_price.to_string(),
            current_price: s.current_price.to_string(),
        }
    }

    pub fn into_record(self, existing: Option<&Stock>) -> Result<Stock, ValidationErrors> {
        let mut errs = Vec::new();
        if self.symbol.trim().is_empty() {
            errs.push("Symbol is required.".to_string());
        }
        let quantity = parse_number(&self.quantity, "Quantity", &mut errs);
        let purchase_price = parse_number(&self.purchase_price, "Purchase price", &mut errs);
        let current_price = parse_number(&self.current_price, "Current price", &mut errs);
        if quantity.is_some_and(|q| q <= 0.0) {
            errs.push("Quantity must be greater than zero.".to_string());
        }
        if purchase_price.is_some_and(|p| p < 0.0) || current_price.is_some_and(|p| p < 0.0) {
            errs.push("Prices cannot be negative.".to_string());
        }
        ValidationErrors::check(errs)?;
        Ok(Stock {
            id: existing_id(existing, |s| s.id.as_str()),
            symbol: self.symbol.trim().to_uppercase(),
            name: self.name.trim().to_string(),
            quantity: quantity.unwrap_or_default(),
            purchase_price: purchase_price.unwrap_or_default(),
            current_price: current_price.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebsiteInput {
    pub name: String,
    pub url: String,
    pub category: String,
    pub description: String,
}

impl WebsiteInput {
    pub fn from_record(w: &Website) -> Self {
        Self {
            name: w.name.clone(),
            url: w.url.clone(),
            category: w.category.clone(),
            description: w.description.clone(),
        }
    }

    pub fn into_record(self, existing: Option<&Website>) -> Result<Website, ValidationErrors> {
        let mut errs = Vec::new();
        if self.name.trim().is_empty() {
            errs.push("Website name is required.".to_string());
        }
        if self.url.trim().is_empty() {
            errs.push("URL is required.".to_string());
        }
        ValidationErrors::check(errs)?;
        Ok(Website {
            id: existing_id(existing, |w| w.id.as_str()),
            name: self.name.trim().to_string(),
            url: self.url.trim().to_string(),
            category: self.category.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn appt_input(date: &str, time: &str) -> AppointmentInput {
        AppointmentInput {
            title: "  Dentist ".to_string(),
            date: date.to_string(),
            time: time.to_string(),
            category: AppointmentCategory::Medical,
            ..Default::default()
        }
    }

    #[test]
    fn contact_requires_name_and_phone() {
        let err = ContactInput::default().into_record(None).unwrap_err();
        assert_eq!(
            err.messages,
            vec!["Name is required.", "Phone number is required."]
        );
    }

    #[test]
    fn contact_fields_are_trimmed() {
        let input = ContactInput {
            name: " Anna ".to_string(),
            phone: " 555 ".to_string(),
            email: "".to_string(),
            category: ContactCategory::Family,
        };
        let c = input.into_record(None).unwrap();
        assert_eq!((c.id.as_str(), c.name.as_str(), c.phone.as_str()), ("", "Anna", "555"));
    }

    #[test]
    fn appointment_lists_every_missing_field() {
        let err = AppointmentInput::default().into_record(None, now()).unwrap_err();
        assert_eq!(
            err.messages,
            vec![
                "Appointment title is required.",
                "Date is required.",
                "Time is required.",
            ]
        );
    }

    #[test]
    fn new_appointment_in_the_past_is_rejected() {
        let err = appt_input("2025-06-15", "11:59").into_record(None, now()).unwrap_err();
        assert_eq!(err.messages, vec!["Appointment cannot be scheduled in the past."]);
        // Exactly now is allowed.
        assert!(appt_input("2025-06-15", "12:00").into_record(None, now()).is_ok());
    }

    #[test]
    fn editing_a_past_appointment_is_allowed_and_keeps_hidden_fields() {
        let created = now() - Duration::days(40);
        let existing = Appointment {
            id: "a_1".to_string(),
            title: "Dentist".to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            location: String::new(),
            category: AppointmentCategory::Medical,
            reminder_sent: true,
            created_at: Some(created),
        };
        let mut input = AppointmentInput::from_record(&existing);
        input.location = "Clinic".to_string();
        let edited = input.into_record(Some(&existing), now()).unwrap();
        assert_eq!(edited.id, "a_1");
        assert_eq!(edited.location, "Clinic");
        assert!(edited.reminder_sent);
        assert_eq!(edited.created_at, Some(created));
    }

    #[test]
    fn malformed_date_and_time_are_reported() {
        let err = appt_input("15/06/2025", "noon").into_record(None, now()).unwrap_err();
        assert_eq!(err.messages, vec!["Date is invalid.", "Time is invalid."]);
    }

    #[test]
    fn task_due_date_is_optional_but_must_parse() {
        let input = TaskInput {
            title: "Pay rent".to_string(),
            ..Default::default()
        };
        let task = input.clone().into_record(None).unwrap();
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, Priority::Medium);
        let bad = TaskInput {
            due_date: "soon".to_string(),
            ..input
        };
        assert_eq!(
            bad.into_record(None).unwrap_err().messages,
            vec!["Due date is invalid."]
        );
    }

    #[test]
    fn stock_numbers_are_checked() {
        let input = StockInput {
            symbol: "acme".to_string(),
            name: "Acme".to_string(),
            quantity: "0".to_string(),
            purchase_price: "-1".to_string(),
            current_price: "abc".to_string(),
        };
        assert_eq!(
            input.into_record(None).unwrap_err().messages,
            vec![
                "Current price is invalid.",
                "Quantity must be greater than zero.",
                "Prices cannot be negative.",
            ]
        );
    }

    #[test]
    fn website_requires_name_and_url() {
        let err = WebsiteInput::default().into_record(None).unwrap_err();
        assert_eq!(err.to_string(), "Website name is required. URL is required.");
    }
}
