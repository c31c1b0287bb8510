//! Entry store contract and the JSON file journal

mod journal;
mod models;
mod store;

pub use journal::{JournalStorage, StorageError};
pub use models::*;
pub use store::EntryStore;
