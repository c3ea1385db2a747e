// Teacher Absence Tracker - Core Library
// Exposes the roster and persistence modules for use in the UI and tests

pub mod roster;
pub mod store;

// Re-export commonly used types
pub use roster::{Roster, Teacher};
pub use store::{default_teachers, FileStore, MemoryStore, RosterStore, DEFAULT_DATA_FILE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
