//! Cross-store preference synchronizer for the admin console.
//!
//! A small scalar preference record (page size, display-unit base, font
//! scale) lives in three places: the in-memory value every screen reads,
//! a durable local cache, and the remote preference service. This crate
//! keeps the three convergent without feedback loops: [`PreferenceStore`]
//! hydrates once at startup (local first, then a remote-wins
//! reconciliation) and from then on persists every user mutation locally
//! before firing a background write of the full record at the service.

pub mod error;
pub mod local;
pub mod memory;
pub mod model;
pub mod remote;
pub mod sqlite;
pub mod store;

pub use error::PrefsError;
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use model::{
    ALLOWED_PAGE_SIZES, DEFAULT_PAGE_SIZE, PrefUpdate, Preferences, RemotePreferences, SizeBase,
    nearest_page_size,
};
pub use remote::{HttpPreferenceService, PreferenceService};
pub use sqlite::SqliteStore;
pub use store::PreferenceStore;
