//! Default collections used to seed an empty or unreadable store.

use anyhow::Context as _;

use crate::types::Record;
use crate::types::RecordKind;

const CONTACTS: &str = include_str!("../fixtures/contacts.json");
const APPOINTMENTS: &str = include_str!("../fixtures/appointments.json");
const TASKS: &str = include_str!("../fixtures/tasks.json");
const STOCKS: &str = include_str!("../fixtures/stocks.json");
const WEBSITES: &str = include_str!("../fixtures/websites.json");

pub fn raw(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Contact => CONTACTS,
        RecordKind::Appointment => APPOINTMENTS,
        RecordKind::Task => TASKS,
        RecordKind::Stock => STOCKS,
        RecordKind::Website => WEBSITES,
    }
}

/// Parsed default collection for `R`. Fixture ids are fixed, so seeding twice
/// yields identical collections.
pub fn defaults<R: Record>() -> anyhow::Result<Vec<R>> {
    let key = R::KIND.storage_key();
    serde_json::from_str(raw(R::KIND)).with_context(|| format!("parse {key} fixture"))
}
