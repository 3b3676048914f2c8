//! Backend selection and data location.
//!
//! Environment overrides:
//! - `ORGANIZER_BACKEND`: `file` (default) or `sqlite`
//! - `ORGANIZER_DATA_DIR`: data directory (default `<cwd>/.organizer`)
//! - `ORGANIZER_DB`: SQLite file (default `<data dir>/organizer.db`)

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::store::KvBackend;
use crate::store::file::FileBackend;

#[cfg(feature = "sqlite")]
use crate::store::sqlite::SqliteBackend;

pub const BACKEND_ENV: &str = "ORGANIZER_BACKEND";
pub const DATA_DIR_ENV: &str = "ORGANIZER_DATA_DIR";
pub const DB_ENV: &str = "ORGANIZER_DB";

/// Backend selection for record persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    File,
    #[cfg(feature = "sqlite")]
    Sqlite,
}

impl Backend {
    /// `None` for unknown names and for `sqlite` when it is not compiled in.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "file" | "json" => Some(Backend::File),
            #[cfg(feature = "sqlite")]
            "sqlite" => Some(Backend::Sqlite),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Backend::File => "file",
            #[cfg(feature = "sqlite")]
            Backend::Sqlite => "sqlite",
        }
    }
}

/// Choose backend using env `ORGANIZER_BACKEND`; anything unrecognised falls
/// back to the file backend.
pub fn choose_backend_from_env() -> Backend {
    std::env::var(BACKEND_ENV)
        .ok()
        .and_then(|v| Backend::parse(&v))
        .unwrap_or(Backend::File)
}

pub fn data_dir_from_env(cwd: &Path) -> PathBuf {
    std::env::var(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| cwd.join(".organizer"))
}

pub fn sqlite_path(data_dir: &Path) -> PathBuf {
    std::env::var(DB_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir.join("organizer.db"))
}

/// Open the backend rooted at `data_dir`. `backend` defaults to
/// [`choose_backend_from_env`].
pub fn open_backend(
    data_dir: &Path,
    backend: Option<Backend>,
) -> anyhow::Result<Arc<dyn KvBackend>> {
    let be = backend.unwrap_or_else(choose_backend_from_env);
    debug!("opening {} backend under {}", be.name(), data_dir.display());
    Ok(match be {
        Backend::File => Arc::new(FileBackend::new(data_dir)),
        #[cfg(feature = "sqlite")]
        Backend::Sqlite => {
            let path = sqlite_path(data_dir);
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            Arc::new(SqliteBackend::new(path))
        }
    })
}
