//! Persistence seam for the client session

use std::sync::Mutex;

/// Keyed blob storage for the serialized session
///
/// Mirrors browser-local storage semantics: a single serialized slot that
/// survives restarts of the embedding client. Implementations own where
/// the blob lives; the context owns its shape.
pub trait SessionStore: Send + Sync {
    /// Read the stored session blob, `None` when nothing is stored
    fn load(&self) -> Result<Option<String>, String>;

    /// Replace the stored session blob
    fn save(&self, raw: &str) -> Result<(), String>;

    /// Remove the stored session blob
    fn clear(&self) -> Result<(), String>;
}

/// In-memory session store
///
/// Holds the blob for the life of the process. Suitable for tests and for
/// embedders that do not persist sessions across restarts.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>, String> {
        Ok(self.slot.lock().map_err(|e| e.to_string())?.clone())
    }

    fn save(&self, raw: &str) -> Result<(), String> {
        *self.slot.lock().map_err(|e| e.to_string())? = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        *self.slot.lock().map_err(|e| e.to_string())? = None;
        Ok(())
    }
}
