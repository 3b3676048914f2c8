use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::Context as _;
use tracing::debug;
use tracing::warn;

use crate::fixtures;
use crate::types::Record;

/// String key-value persistence shared by every record collection.
pub trait KvBackend: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
    fn keys(&self) -> anyhow::Result<Vec<String>>;
}

pub mod file;
pub mod in_memory;
pub mod sqlite;

/// Typed view of one persisted collection.
///
/// The whole collection is read and written at once; there is no per-record
/// update primitive.
pub struct RecordStore<R> {
    backend: Arc<dyn KvBackend>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            _record: PhantomData,
        }
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            backend,
            _record: PhantomData,
        }
    }

    fn key(&self) -> &'static str {
        R::KIND.storage_key()
    }

    /// Read the persisted collection.
    ///
    /// A missing or unreadable value is replaced by the kind's default
    /// fixture, which is persisted before returning.
    pub fn load(&self) -> anyhow::Result<Vec<R>> {
        let key = self.key();
        let Some(raw) = self.backend.get(key)? else {
            debug!("{key}: nothing persisted, seeding defaults");
            return self.seed();
        };
        match serde_json::from_str::<Vec<R>>(&raw) {
            Ok(items) => {
                debug!("{key}: loaded {} records", items.len());
                Ok(items)
            }
            Err(e) => {
                warn!("{key}: persisted collection is unreadable ({e}); reseeding defaults");
                self.seed()
            }
        }
    }

    /// Persist `items` as the whole collection.
    pub fn replace(&self, items: &[R]) -> anyhow::Result<()> {
        let key = self.key();
        let data = serde_json::to_string(items)
            .with_context(|| format!("serialize {key} collection"))?;
        self.backend.set(key, &data)?;
        debug!("{key}: wrote {} records", items.len());
        Ok(())
    }

    fn seed(&self) -> anyhow::Result<Vec<R>> {
        let items = fixtures::defaults::<R>()?;
        self.replace(&items)?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::in_memory::InMemoryBackend;
    use crate::types::Contact;
    use crate::types::ContactCategory;
    use pretty_assertions::assert_eq;

    fn contact(id: &str, name: &str) -> Contact {
        Contact {
            id: id.to_string(),
            name: name.to_string(),
            phone: "555-0100".to_string(),
            email: String::new(),
            category: ContactCategory::General,
        }
    }

    #[test]
    fn first_load_seeds_and_persists_fixture() {
        let backend = Arc::new(InMemoryBackend::default());
        let store: RecordStore<Contact> = RecordStore::new(backend.clone());
        let seeded = store.load().unwrap();
        assert!(!seeded.is_empty());
        assert!(backend.get("contacts").unwrap().is_some());
        assert_eq!(store.load().unwrap(), seeded);
    }

    #[test]
    fn empty_collection_is_not_reseeded() {
        let store: RecordStore<Contact> = RecordStore::new(Arc::new(InMemoryBackend::default()));
        store.replace(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_value_reseeds_stably() {
        let backend = Arc::new(InMemoryBackend::default());
        backend.set("contacts", "{not json").unwrap();
        let store: RecordStore<Contact> = RecordStore::new(backend.clone());
        let first = store.load().unwrap();
        let second = store.load().unwrap();
        assert_eq!(first, fixtures::defaults::<Contact>().unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_category_keeps_the_collection() {
        let backend = Arc::new(InMemoryBackend::default());
        backend
            .set(
                "contacts",
                r#"[{"id":"c_mine","name":"Mine","phone":"1","category":"General"},
                    {"id":"c_old","name":"Old","phone":"2","category":"Colleagues"}]"#,
            )
            .unwrap();
        let store: RecordStore<Contact> = RecordStore::new(backend);
        let items = store.load().unwrap();
        let ids: Vec<&str> = items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c_mine", "c_old"]);
        assert_eq!(items[1].category, ContactCategory::General);
    }

    #[test]
    fn replace_round_trips() {
        let store: RecordStore<Contact> = RecordStore::new(Arc::new(InMemoryBackend::default()));
        let items = vec![contact("c_1", "Anna"), contact("c_2", "Bob")];
        store.replace(&items).unwrap();
        assert_eq!(store.load().unwrap(), items);
    }
}
