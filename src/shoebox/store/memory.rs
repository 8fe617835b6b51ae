use super::BlobStore;
use crate::error::{Result, ShoeboxError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory blob store for testing and development.
/// Does NOT persist data.
///
/// Uses `RefCell` for interior mutability since shoebox is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    blobs: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Raw blob inspection for tests.
    pub fn blob(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }
}

impl BlobStore for MemBackend {
    fn write_blob(&self, key: &str, blob: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(ShoeboxError::Store("Simulated write error".to_string()));
        }
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }
}
