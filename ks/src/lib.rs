//! KeyStore - string-keyed persistent value store
//!
//! A tiny origin-scoped store in the spirit of browser local storage: every
//! value is an opaque string addressed by a fixed string key. Callers decide
//! the encoding (PromptForge stores JSON documents).
//!
//! # Layout
//!
//! ```text
//! {store_dir}/
//! ├── .lock                     # exclusive write lock
//! ├── promptforge-saved         # one file per key, value stored verbatim
//! └── promptforge-preferences
//! ```
//!
//! # Example
//!
//! ```ignore
//! use keystore::{FileStore, KeyValueStore};
//!
//! let store = FileStore::open(".promptforge")?;
//! store.set("greeting", "hello")?;
//! assert_eq!(store.get("greeting")?.as_deref(), Some("hello"));
//! ```

mod error;
mod memory;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{FileStore, KeyValueStore, validate_key};

/// Current wall-clock time in unix milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
