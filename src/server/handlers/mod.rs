//! API server HTTP handlers.

mod compare;
mod searches;

pub use compare::{compare_handler, health_handler};
pub use searches::{delete_search_handler, load_searches_handler, save_search_handler};
