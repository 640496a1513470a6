use crate::store::KvStore;
use crate::store::json::JsonFileStore;

#[cfg(feature = "sqlite")]
use crate::store::sqlite::SqliteStore;

/// Backend selection for persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Json,
    #[cfg(feature = "sqlite")]
    Sqlite,
}

/// Choose backend using env `SCHOLAR_STORAGE_BACKEND` if present: `sqlite` or `json`.
/// Defaults to JSON; if `sqlite` is requested but not compiled in, falls back to JSON.
pub fn choose_backend_from_env() -> Backend {
    let v = std::env::var("SCHOLAR_STORAGE_BACKEND").unwrap_or_default();
    match v.as_str() {
        #[cfg(feature = "sqlite")]
        "sqlite" | "SQLITE" => Backend::Sqlite,
        _ => Backend::Json,
    }
}

/// Build a store under the data directory.
/// Paths can be overridden via env:
/// - `SCHOLAR_STORAGE_DB` for the SQLite file path
/// - `SCHOLAR_STORAGE_JSON` for the JSON file path
pub fn open_store(
    home: &std::path::Path,
    backend: Option<Backend>,
) -> anyhow::Result<Box<dyn KvStore>> {
    let be = backend.unwrap_or_else(choose_backend_from_env);
    tracing::debug!("opening {be:?} storage under {}", home.display());
    Ok(match be {
        Backend::Json => {
            let path = std::env::var("SCHOLAR_STORAGE_JSON")
                .map(std::path::PathBuf::from)
                .unwrap_or_else(|_| home.join("storage.json"));
            Box::new(JsonFileStore::new(path))
        }
        #[cfg(feature = "sqlite")]
        Backend::Sqlite => {
            let path = std::env::var("SCHOLAR_STORAGE_DB")
                .map(std::path::PathBuf::from)
                .unwrap_or_else(|_| home.join("storage.db"));
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            Box::new(SqliteStore::new(path))
        }
    })
}
