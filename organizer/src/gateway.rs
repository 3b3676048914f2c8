//! The only write path into a record collection.
//!
//! Every mutation loads the whole collection, transforms it and writes the
//! whole collection back through [`RecordStore::replace`].

use chrono::Duration;
use chrono::NaiveDateTime;
use tracing::info;

use crate::id::generate_id;
use crate::store::RecordStore;
use crate::types::Appointment;
use crate::types::Record;
use crate::types::Task;

/// How long a mutation confirmation stays visible, in seconds.
pub const STATUS_TTL_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient message for the notification surface.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }
}

/// Holds the most recent notice until its deadline passes.
///
/// Posting replaces both the notice and its deadline, so an expired older
/// notice can never hide a newer one.
#[derive(Debug, Default)]
pub struct StatusSlot {
    current: Option<(Notice, NaiveDateTime)>,
}

impl StatusSlot {
    pub fn post(&mut self, notice: Notice, now: NaiveDateTime) {
        self.current = Some((notice, now + Duration::seconds(STATUS_TTL_SECS)));
    }

    /// The notice still visible at `now`, if any.
    pub fn current(&self, now: NaiveDateTime) -> Option<&Notice> {
        match &self.current {
            Some((notice, expires_at)) if now < *expires_at => Some(notice),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome<R> {
    Created(R),
    Updated(R),
}

impl<R> SaveOutcome<R> {
    pub fn record(&self) -> &R {
        match self {
            SaveOutcome::Created(r) | SaveOutcome::Updated(r) => r,
        }
    }

    pub fn into_record(self) -> R {
        match self {
            SaveOutcome::Created(r) | SaveOutcome::Updated(r) => r,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

pub struct MutationGateway<R> {
    store: RecordStore<R>,
    status: StatusSlot,
}

impl<R: Record> MutationGateway<R> {
    pub fn new(store: RecordStore<R>) -> Self {
        Self {
            store,
            status: StatusSlot::default(),
        }
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub fn get(&self, id: &str) -> anyhow::Result<Option<R>> {
        Ok(self.store.load()?.into_iter().find(|r| r.id() == id))
    }

    /// Replace the record with the same id, or append it as a new record.
    ///
    /// New records get an id when theirs is empty and a creation timestamp
    /// when their kind tracks one. Input is assumed to be validated.
    pub fn save(&mut self, mut record: R, now: NaiveDateTime) -> anyhow::Result<SaveOutcome<R>> {
        let label = R::KIND.label();
        let mut items = self.store.load()?;
        let existing = if record.id().is_empty() {
            None
        } else {
            items.iter().position(|r| r.id() == record.id())
        };
        let outcome = match existing {
            Some(idx) => {
                items[idx] = record.clone();
                self.store.replace(&items)?;
                self.post(Notice::success(format!("{label} updated successfully!")), now);
                SaveOutcome::Updated(record)
            }
            None => {
                if record.id().is_empty() {
                    record.set_id(generate_id(R::KIND));
                }
                record.stamp_created(now);
                items.push(record.clone());
                self.store.replace(&items)?;
                self.post(Notice::success(format!("{label} added successfully!")), now);
                SaveOutcome::Created(record)
            }
        };
        Ok(outcome)
    }

    /// Delete the record with `id`. A missing id writes nothing and posts no
    /// notice.
    pub fn remove(&mut self, id: &str, now: NaiveDateTime) -> anyhow::Result<RemoveOutcome> {
        let mut items = self.store.load()?;
        let before = items.len();
        items.retain(|r| r.id() != id);
        if items.len() == before {
            return Ok(RemoveOutcome::NotFound);
        }
        self.store.replace(&items)?;
        let label = R::KIND.label();
        self.post(Notice::success(format!("{label} deleted successfully!")), now);
        Ok(RemoveOutcome::Removed)
    }

    /// The confirmation still visible at `now`.
    pub fn status(&self, now: NaiveDateTime) -> Option<&Notice> {
        self.status.current(now)
    }

    pub fn clear_status(&mut self) {
        self.status.clear();
    }

    fn post(&mut self, notice: Notice, now: NaiveDateTime) {
        info!(kind = R::KIND.storage_key(), "{}", notice.message);
        self.status.post(notice, now);
    }

    /// Apply `f` to the record with `id` and write the collection back.
    fn modify(&self, id: &str, f: impl FnOnce(&mut R)) -> anyhow::Result<Option<R>> {
        let mut items = self.store.load()?;
        let Some(item) = items.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        f(item);
        let updated = item.clone();
        self.store.replace(&items)?;
        Ok(Some(updated))
    }
}

impl MutationGateway<Task> {
    /// Flip `completed`; `None` when no task has `id`.
    pub fn toggle_status(&mut self, id: &str) -> anyhow::Result<Option<Task>> {
        self.modify(id, |task| task.completed = !task.completed)
    }
}

impl MutationGateway<Appointment> {
    /// Mark the reminder as sent. Idempotent; returns whether `id` exists.
    pub fn mark_reminder_sent(&mut self, id: &str) -> anyhow::Result<bool> {
        let found = self.modify(id, |appt| appt.reminder_sent = true)?;
        Ok(found.is_some())
    }
}
