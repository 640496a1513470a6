/// Local key-value storage, the persistence layer behind usage state.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

pub mod json;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;
