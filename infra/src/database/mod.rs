//! Database module - user persistence
//!
//! - MySQL connection pool and migrations
//! - MySQL user repository
//! - In-memory user repository

pub mod connection;
pub mod memory;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use memory::InMemoryUserRepository;
pub use mysql::MySqlUserRepository;
