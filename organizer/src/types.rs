use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// The record collections the organizer keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Contact,
    Appointment,
    Task,
    Stock,
    Website,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Contact,
        RecordKind::Appointment,
        RecordKind::Task,
        RecordKind::Stock,
        RecordKind::Website,
    ];

    /// Key under which the whole collection is persisted.
    pub fn storage_key(self) -> &'static str {
        match self {
            RecordKind::Contact => "contacts",
            RecordKind::Appointment => "appointments",
            RecordKind::Task => "tasks",
            RecordKind::Stock => "stocks",
            RecordKind::Website => "websites",
        }
    }

    pub fn id_prefix(self) -> &'static str {
        match self {
            RecordKind::Contact => "c_",
            RecordKind::Appointment => "a_",
            RecordKind::Task => "t_",
            RecordKind::Stock => "s_",
            RecordKind::Website => "w_",
        }
    }

    /// Human-readable singular name used in status messages.
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Contact => "Contact",
            RecordKind::Appointment => "Appointment",
            RecordKind::Task => "Task",
            RecordKind::Stock => "Stock",
            RecordKind::Website => "Website",
        }
    }

    pub fn from_storage_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.storage_key() == key)
    }
}

/// A flat value stored as one element of a per-kind collection.
///
/// An empty id means the record has not been assigned one yet; the mutation
/// gateway fills it in on creation.
pub trait Record:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: RecordKind;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Set the creation timestamp if this kind tracks one and it is unset.
    fn stamp_created(&mut self, _now: NaiveDateTime) {}
}

/// Error returned when a label does not name any variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {what}: {value}")]
pub struct UnknownLabel {
    pub what: &'static str,
    pub value: String,
}

/// Implements `as_label`, `from_label`, `Display` and `FromStr` for a
/// fieldless enum. `from_label` ignores ASCII case.
macro_rules! labeled {
    ($ty:ident, $what:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_label(self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }

            pub fn from_label(s: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_label().eq_ignore_ascii_case(s.trim()))
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_label())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_label(s).ok_or_else(|| UnknownLabel {
                    what: $what,
                    value: s.to_string(),
                })
            }
        }
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactCategory {
    #[default]
    General,
    Family,
    Friends,
    Work,
    Business,
    Emergency,
}

labeled!(ContactCategory, "contact category", {
    General => "General",
    Family => "Family",
    Friends => "Friends",
    Work => "Work",
    Business => "Business",
    Emergency => "Emergency",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentCategory {
    #[default]
    General,
    Work,
    Personal,
    Medical,
    Business,
    Social,
}

labeled!(AppointmentCategory, "appointment category", {
    General => "General",
    Work => "Work",
    Personal => "Personal",
    Medical => "Medical",
    Business => "Business",
    Social => "Social",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

labeled!(Priority, "priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
});

impl Priority {
    /// Sort tier; higher ranks are shown first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "crate::serde_fmt::lenient_label")]
    pub category: ContactCategory,
}

impl Record for Contact {
    const KIND: RecordKind = RecordKind::Contact;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "crate::serde_fmt::clock_time")]
    pub time: NaiveTime,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "crate::serde_fmt::lenient_label")]
    pub category: AppointmentCategory,
    #[serde(default)]
    pub reminder_sent: bool,
    #[serde(default, with = "crate::serde_fmt::timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl Appointment {
    /// Local date and time the appointment starts.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.starts_at() > now
    }
}

impl Record for Appointment {
    const KIND: RecordKind = RecordKind::Appointment;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: NaiveDateTime) {
        self.created_at.get_or_insert(now);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "crate::serde_fmt::optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::serde_fmt::lenient_label")]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, with = "crate::serde_fmt::timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl Record for Task {
    const KIND: RecordKind = RecordKind::Task;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: NaiveDateTime) {
        self.created_at.get_or_insert(now);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    #[serde(default)]
    pub id: String,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
}

impl Record for Stock {
    const KIND: RecordKind = RecordKind::Stock;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl Record for Website {
    const KIND: RecordKind = RecordKind::Website;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
