use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use super::KvBackend;

/// Process-local backend; nothing outlives the value.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemoryBackend {
    fn entries(&self) -> anyhow::Result<MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("in-memory backend lock poisoned"))
    }
}

impl KvBackend for InMemoryBackend {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.entries()?.keys().cloned().collect())
    }
}
