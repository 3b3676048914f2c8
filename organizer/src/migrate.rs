//! Moving collections between backends, and whole-organizer backups.

use std::path::Path;

use anyhow::Context as _;
use serde_json::Map;
use serde_json::Value;
use tracing::info;

use crate::store::KvBackend;
use crate::store::RecordStore;
use crate::types::Appointment;
use crate::types::Contact;
use crate::types::Record;
use crate::types::RecordKind;
use crate::types::Stock;
use crate::types::Task;
use crate::types::Website;

/// Copy every key from `from` into `to`, overwriting what is there.
///
/// Returns the number of keys copied.
pub fn copy_all(from: &dyn KvBackend, to: &dyn KvBackend) -> anyhow::Result<usize> {
    let mut copied = 0;
    for key in from.keys()? {
        if let Some(value) = from.get(&key)? {
            to.set(&key, &value)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Copy the file backend under `data_dir` into a SQLite database file
/// (created if missing). Returns the count of collections copied.
#[cfg(feature = "sqlite")]
pub fn migrate_file_to_sqlite(data_dir: &Path, sqlite_path: &Path) -> anyhow::Result<usize> {
    use crate::store::file::FileBackend;
    use crate::store::sqlite::SqliteBackend;

    let from = FileBackend::new(data_dir);
    let to = SqliteBackend::new(sqlite_path);
    let copied = copy_all(&from, &to)?;
    info!("migrated {copied} collections into {}", sqlite_path.display());
    Ok(copied)
}

#[cfg(not(feature = "sqlite"))]
pub fn migrate_file_to_sqlite(_data_dir: &Path, _sqlite_path: &Path) -> anyhow::Result<usize> {
    anyhow::bail!("sqlite backend not compiled; enable with `--features organizer-core/sqlite`");
}

fn export_kind<R: Record>(
    backend: &std::sync::Arc<dyn KvBackend>,
    out: &mut Map<String, Value>,
) -> anyhow::Result<()> {
    let items = RecordStore::<R>::new(backend.clone()).load()?;
    out.insert(R::KIND.storage_key().to_string(), serde_json::to_value(items)?);
    Ok(())
}

/// Every collection as one JSON object keyed by collection name.
///
/// Collections never written are seeded first, as any read would.
pub fn export_all(backend: &std::sync::Arc<dyn KvBackend>) -> anyhow::Result<Value> {
    let mut out = Map::new();
    export_kind::<Contact>(backend, &mut out)?;
    export_kind::<Appointment>(backend, &mut out)?;
    export_kind::<Task>(backend, &mut out)?;
    export_kind::<Stock>(backend, &mut out)?;
    export_kind::<Website>(backend, &mut out)?;
    Ok(Value::Object(out))
}

fn parse_kind<R: Record>(value: &Value) -> anyhow::Result<String> {
    let items: Vec<R> = serde_json::from_value(value.clone())
        .with_context(|| format!("invalid {} collection", R::KIND.storage_key()))?;
    Ok(serde_json::to_string(&items)?)
}

/// Replace the collections present in `doc` (an [`export_all`] document).
///
/// Every collection is checked before anything is written, so a bad document
/// leaves the backend untouched. Returns the number of collections written.
pub fn import_all(backend: &dyn KvBackend, doc: &Value) -> anyhow::Result<usize> {
    let Some(obj) = doc.as_object() else {
        anyhow::bail!("import document must be a JSON object");
    };
    let mut staged = Vec::new();
    for (key, value) in obj {
        let kind = RecordKind::from_storage_key(key)
            .with_context(|| format!("unknown collection `{key}`"))?;
        let data = match kind {
            RecordKind::Contact => parse_kind::<Contact>(value)?,
            RecordKind::Appointment => parse_kind::<Appointment>(value)?,
            RecordKind::Task => parse_kind::<Task>(value)?,
            RecordKind::Stock => parse_kind::<Stock>(value)?,
            RecordKind::Website => parse_kind::<Website>(value)?,
        };
        staged.push((kind.storage_key(), data));
    }
    for (key, data) in &staged {
        backend.set(key, data)?;
    }
    info!("imported {} collections", staged.len());
    Ok(staged.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::in_memory::InMemoryBackend;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn copy_all_copies_every_key() {
        let from = InMemoryBackend::default();
        from.set("tasks", "[]").unwrap();
        from.set("contacts", "[]").unwrap();
        let to = InMemoryBackend::default();
        assert_eq!(copy_all(&from, &to).unwrap(), 2);
        assert_eq!(to.keys().unwrap(), vec!["contacts", "tasks"]);
    }

    #[test]
    fn export_then_import_into_fresh_backend() {
        let source: Arc<dyn KvBackend> = Arc::new(InMemoryBackend::default());
        let doc = export_all(&source).unwrap();
        assert_eq!(doc.as_object().map(|o| o.len()), Some(5));

        let target: Arc<dyn KvBackend> = Arc::new(InMemoryBackend::default());
        assert_eq!(import_all(target.as_ref(), &doc).unwrap(), 5);
        assert_eq!(export_all(&target).unwrap(), doc);
    }

    #[test]
    fn bad_document_writes_nothing() {
        let backend = InMemoryBackend::default();
        let doc = json!({
            "tasks": [],
            "contacts": [{ "id": "c_1", "name": 3 }],
        });
        assert!(import_all(&backend, &doc).is_err());
        assert!(backend.keys().unwrap().is_empty());

        let unknown = json!({ "notes": [] });
        assert!(import_all(&backend, &unknown).is_err());
    }
}
