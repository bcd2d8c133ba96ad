//! Local fallback store — a string-keyed, string-valued persistent map
//! backed by one JSON file in the platform data directory. The local copy
//! is a backup, not a cache: it is written on every save and read only when
//! the remote tier fails, and never reconciled back.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing::info;

pub struct LocalStore {
    path: PathBuf,
    map: Mutex<HashMap<String, String>>,
}

impl LocalStore {
    /// Opens the store at its default platform location, creating the data
    /// directory and loading any existing contents.
    pub fn open() -> io::Result<Self> {
        let dirs = ProjectDirs::from("", "", "compass").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no usable data directory")
        })?;
        fs::create_dir_all(dirs.data_dir())?;
        Self::open_at(dirs.data_dir().join("local_store.json"))
    }

    pub fn open_at(path: PathBuf) -> io::Result<Self> {
        let map = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e),
        };
        info!("Local store at {} ({} entries)", path.display(), map.len());
        Ok(Self {
            path,
            map: Mutex::new(map),
        })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.map
            .lock()
            .expect("local store mutex poisoned")
            .get(key)
            .cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut map = self.map.lock().expect("local store mutex poisoned");
        map.insert(key.to_string(), value.to_string());
        let serialized = serde_json::to_string(&*map)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, serialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_then_get_round_trip() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open_at(dir.path().join("store.json")).unwrap();
        store.set("profile_u1", "{\"careers\":[]}").unwrap();
        assert_eq!(store.get("profile_u1").as_deref(), Some("{\"careers\":[]}"));
        assert_eq!(store.get("profile_u2"), None);
    }

    #[test]
    fn test_contents_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = LocalStore::open_at(path.clone()).unwrap();
        store.set("k", "v").unwrap();
        drop(store);

        let reopened = LocalStore::open_at(path).unwrap();
        assert_eq!(reopened.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open_at(dir.path().join("store.json")).unwrap();
        store.set("k", "old").unwrap();
        store.set("k", "new").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("new"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json at all").unwrap();

        let store = LocalStore::open_at(path).unwrap();
        assert_eq!(store.get("anything"), None);
    }
}
