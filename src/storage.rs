//! Local key-value persistence for the two hub documents.
//!
//! Each document is a JSON blob stored under a fixed key. [`FileStore`] keeps
//! one `<key>.json` file per key in the data directory; [`MemoryStore`] keeps
//! them in memory and is what the tests run against.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::Result;
use crate::state::{ContentTree, ResourceMap};

pub const CONTENT_KEY: &str = "courseContent";
pub const RESOURCES_KEY: &str = "courseResources";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // write then rename so a crash never leaves half a document behind
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// What [`Storage::load`] found. A `None` document means "use defaults".
#[derive(Debug, Default)]
pub struct Loaded {
    pub content: Option<ContentTree>,
    pub resources: Option<ResourceMap>,
    /// Human-readable reports for documents that were present but unusable.
    pub problems: Vec<String>,
}

pub struct Storage {
    backend: Box<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Reads both documents. Corrupt or unreadable documents are reported
    /// and treated as absent.
    pub fn load(&self) -> Loaded {
        let mut problems = Vec::new();
        let content = self.read_or_report(CONTENT_KEY, &mut problems);
        let resources = self.read_or_report(RESOURCES_KEY, &mut problems);
        Loaded {
            content,
            resources,
            problems,
        }
    }

    pub fn persist_content(&mut self, tree: &ContentTree) -> Result<()> {
        self.write(CONTENT_KEY, tree)
    }

    pub fn persist_resources(&mut self, map: &ResourceMap) -> Result<()> {
        self.write(RESOURCES_KEY, map)
    }

    fn read_or_report<T: DeserializeOwned>(
        &self,
        key: &str,
        problems: &mut Vec<String>,
    ) -> Option<T> {
        match self.read(key) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(key, error = %e, "stored document unusable, falling back to defaults");
                problems.push(format!("Stored {key} could not be read ({e}); using defaults."));
                None
            }
        }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.backend.get(key)? else {
            debug!(key, "no stored document");
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write<T: Serialize>(&mut self, key: &str, doc: &T) -> Result<()> {
        let raw = serde_json::to_string(doc)?;
        debug!(key, bytes = raw.len(), "persisting document");
        self.backend.set(key, &raw)
    }
}
