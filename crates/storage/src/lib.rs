pub mod database;
pub mod dto;
pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;

pub use database::Database;
pub use memory::MemoryStore;
pub use store::BracketStore;
