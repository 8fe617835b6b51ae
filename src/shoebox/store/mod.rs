use crate::error::Result;
use crate::model::Record;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod fs;
pub mod memory;
pub mod records;

/// Abstract interface for the key-value blob store backing the collections.
///
/// All receivers are `&self`: shoebox is single-threaded, so backends use
/// interior mutability (`RefCell`) instead of locks. A write is always a
/// full overwrite of the keyed blob, last writer wins.
pub trait BlobStore {
    /// Overwrite the blob stored under `key`.
    fn write_blob(&self, key: &str, blob: &str) -> Result<()>;

    /// Read the blob stored under `key`. An absent key is `Ok(None)`, not an
    /// error.
    fn read_blob(&self, key: &str) -> Result<Option<String>>;
}

/// Serialize `records` as a JSON array and durably store it under `key`.
pub fn save_collection<B, F>(store: &B, key: &str, records: &[Record<F>]) -> Result<()>
where
    B: BlobStore,
    F: Serialize,
{
    let blob = serde_json::to_string(records)?;
    store.write_blob(key, &blob)?;
    debug!("flushed {} records to key `{}`", records.len(), key);
    Ok(())
}

/// Load and deserialize the collection stored under `key`. An absent key
/// yields an empty collection.
pub fn load_collection<B, F>(store: &B, key: &str) -> Result<Vec<Record<F>>>
where
    B: BlobStore,
    F: DeserializeOwned,
{
    match store.read_blob(key)? {
        Some(blob) => Ok(serde_json::from_str(&blob)?),
        None => Ok(Vec::new()),
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::memory::MemBackend;
    use super::records::RecordStore;
    use crate::domain::{Note, NoteDraft, Product, ProductDraft, Todo, TodoDraft};
    use std::rc::Rc;

    /// The three collections wired to one shared in-memory backend.
    pub struct StoreFixture {
        pub backend: Rc<MemBackend>,
        pub notes: RecordStore<Note, MemBackend>,
        pub products: RecordStore<Product, MemBackend>,
        pub todos: RecordStore<Todo, MemBackend>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            let backend = Rc::new(MemBackend::new());
            Self {
                notes: RecordStore::open(Rc::clone(&backend)).unwrap(),
                products: RecordStore::open(Rc::clone(&backend)).unwrap(),
                todos: RecordStore::open(Rc::clone(&backend)).unwrap(),
                backend,
            }
        }

        pub fn with_notes(mut self, count: usize) -> Self {
            for i in 0..count {
                let draft = NoteDraft {
                    title: format!("Test Note {}", i + 1),
                    content: format!("Content for note {}", i + 1),
                    ..NoteDraft::default()
                };
                self.notes.create(&draft).unwrap();
            }
            self
        }

        pub fn with_products(mut self, count: usize) -> Self {
            for i in 0..count {
                let draft = ProductDraft {
                    name: format!("Test Product {}", i + 1),
                    price: format!("{}.00", i + 1),
                    rating: "3".to_string(),
                    ..ProductDraft::default()
                };
                self.products.create(&draft).unwrap();
            }
            self
        }

        pub fn with_todos(mut self, count: usize) -> Self {
            for i in 0..count {
                let draft = TodoDraft {
                    title: format!("Test Task {}", i + 1),
                    ..TodoDraft::default()
                };
                self.todos.create(&draft).unwrap();
            }
            self
        }
    }
}
