//! Local persistence for the cart identifier.
//!
//! Only one value is ever stored: the id of the shopper's current cart,
//! under [`CART_ID_KEY`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use joyeria_commerce::CartId;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// Key the cart id is stored under.
pub const CART_ID_KEY: &str = "cartId";

/// Where the current cart id lives between runs.
pub trait CartIdStore: Send + Sync {
    /// Read the stored id, if any.
    fn load(&self) -> Result<Option<CartId>, StoreError>;

    /// Persist `id`, replacing any previous one.
    fn save(&self, id: &CartId) -> Result<(), StoreError>;

    /// Forget the stored id. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}

impl<S: CartIdStore + ?Sized> CartIdStore for Arc<S> {
    fn load(&self) -> Result<Option<CartId>, StoreError> {
        (**self).load()
    }

    fn save(&self, id: &CartId) -> Result<(), StoreError> {
        (**self).save(id)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

/// In-process store; the id is lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    id: Mutex<Option<CartId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `id`.
    pub fn with_id(id: CartId) -> Self {
        Self {
            id: Mutex::new(Some(id)),
        }
    }

    /// Current value, without going through the trait.
    pub fn current(&self) -> Option<CartId> {
        self.id.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl CartIdStore for MemoryStore {
    fn load(&self) -> Result<Option<CartId>, StoreError> {
        Ok(self.current())
    }

    fn save(&self, id: &CartId) -> Result<(), StoreError> {
        *self.id.lock().unwrap_or_else(PoisonError::into_inner) = Some(id.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.id.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// A JSON object on disk, e.g. `{"cartId": "65a1f0c2"}`.
///
/// Other keys in the file are preserved. A missing file reads as empty;
/// writes go through a temporary file and a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }

    fn read_map(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::Corrupt {
                path: self.path.display().to_string(),
                message: "expected a JSON object".to_string(),
            }),
            Err(e) => Err(StoreError::Corrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let content = serde_json::to_string_pretty(map).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }
}

impl CartIdStore for FileStore {
    fn load(&self) -> Result<Option<CartId>, StoreError> {
        let map = self.read_map()?;
        Ok(map
            .get(CART_ID_KEY)
            .and_then(Value::as_str)
            .map(CartId::new)
            .filter(|id| !id.is_blank()))
    }

    fn save(&self, id: &CartId) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        map.insert(CART_ID_KEY.to_string(), Value::String(id.to_string()));
        self.write_map(&map)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        if map.remove(CART_ID_KEY).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }
}
