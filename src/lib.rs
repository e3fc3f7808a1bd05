pub mod console;
pub mod core;
pub mod models;
pub mod security;
pub mod stores;
pub mod utils;
