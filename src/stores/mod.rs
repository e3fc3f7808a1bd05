pub mod comment_store;
pub mod record_table;
pub mod user_store;

pub use record_table::SortDirection;
