mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Result;

/// Named-blob persistence behind the dashboard modules.
///
/// Writes replace the whole blob and there is no locking, so concurrent
/// writers are last-save-wins. That is acceptable for a single-user
/// deployment; anything stronger belongs behind a different impl.
pub trait BlobStore: Send + Sync {
    /// Read a blob by name. `Ok(None)` when the blob does not exist.
    fn read(&self, name: &str) -> Result<Option<String>>;

    /// Replace the blob's contents.
    fn write(&self, name: &str, contents: &str) -> Result<()>;
}

/// Load a JSON blob, treating a missing, unreadable or corrupt blob as
/// absent. Callers fall back to their defaults instead of erroring.
pub fn load_json<T: DeserializeOwned>(store: &dyn BlobStore, name: &str) -> Option<T> {
    match store.read(name) {
        Ok(Some(contents)) => match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Discarding corrupt blob '{}': {}", name, e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Failed to read blob '{}': {}", name, e);
            None
        }
    }
}

/// Serialize a value and replace the named blob with it.
pub fn save_json<T: Serialize>(store: &dyn BlobStore, name: &str, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    store.write(name, &contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_json_missing_blob_is_none() {
        let store = MemoryStore::new();
        let loaded: Option<Vec<String>> = load_json(&store, "absent.json");
        assert!(loaded.is_none());
    }

    #[test]
    fn load_json_corrupt_blob_is_none() {
        let store = MemoryStore::new();
        store.write("bad.json", "{not json at all").unwrap();

        let loaded: Option<Vec<String>> = load_json(&store, "bad.json");
        assert!(loaded.is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = MemoryStore::new();
        let value = vec!["a".to_string(), "b".to_string()];

        save_json(&store, "list.json", &value).unwrap();
        let loaded: Vec<String> = load_json(&store, "list.json").unwrap();

        assert_eq!(loaded, value);
    }

    #[test]
    fn concurrent_style_writes_are_last_save_wins() {
        let store = MemoryStore::new();

        save_json(&store, "slot.json", &vec![1, 2, 3]).unwrap();
        save_json(&store, "slot.json", &vec![9]).unwrap();

        let loaded: Vec<i32> = load_json(&store, "slot.json").unwrap();
        assert_eq!(loaded, vec![9]);
    }
}
