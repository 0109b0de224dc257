pub mod db;
pub mod models;
pub mod storage;
pub mod store;
pub mod tracker;
pub mod view;

pub use db::Database;
pub use models::Item;
pub use storage::{ClearScope, KeyValueStore, MemoryStore, Persistence};
pub use store::ItemStore;
pub use tracker::{Action, Outcome, Reason, Tracker};
pub use view::{ListView, ViewMode};
