// storage/mod.rs
// Saved-search persistence

pub mod migrations;
pub mod models;
pub mod pool;
pub mod searches;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use migrations::run_migrations;
pub use models::{NewSavedSearch, SaveOutcome, SavedSearch};
pub use pool::init_db_pool_with_path;
pub use searches::{delete_search, list_searches, save_search};
