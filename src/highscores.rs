//! High score tracking
//!
//! A single best score. On the web it is persisted to LocalStorage as a
//! plain decimal string under `highScore`.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Best score seen so far; never decreases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Fold in a finished run. Returns true if it set a new best.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Read the stored best (absent or unreadable counts as 0)
    pub fn load_from(store: &dyn ScoreStore) -> Self {
        Self::new(store.load().unwrap_or(0))
    }
}

/// Persistent storage for the best score
pub trait ScoreStore {
    fn load(&self) -> Option<u32>;
    fn save(&mut self, best: u32);
}

impl<T: ScoreStore + ?Sized> ScoreStore for Rc<RefCell<T>> {
    fn load(&self) -> Option<u32> {
        self.borrow().load()
    }

    fn save(&mut self, best: u32) {
        self.borrow_mut().save(best);
    }
}

/// Parse a stored value; tolerates whitespace and a trailing ".0"
pub fn parse_stored(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    raw.parse::<u32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u32::MAX as f64)
            .map(|v| v as u32)
    })
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    writes: u32,
}

impl MemoryStore {
    pub fn with_value(best: u32) -> Self {
        Self {
            value: Some(best),
            writes: 0,
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// Number of `save` calls
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Option<u32> {
        self.value
    }

    fn save(&mut self, best: u32) {
        self.value = Some(best);
        self.writes += 1;
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "highScore";

    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, high score will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Option<u32> {
        let raw = self.storage.as_ref()?.get_item(Self::STORAGE_KEY).ok()??;
        let best = parse_stored(&raw);
        if best.is_none() {
            log::warn!("Ignoring unreadable stored high score {:?}", raw);
        }
        best
    }

    fn save(&mut self, best: u32) {
        if let Some(storage) = &self.storage {
            match storage.set_item(Self::STORAGE_KEY, &best.to_string()) {
                Ok(()) => log::info!("High score saved ({})", best),
                Err(e) => log::warn!("Failed to save high score: {:?}", e),
            }
        }
    }
}
