//! Credential store adapters.
//!
//! Accounts live in process memory; the store is lost on restart.

mod in_memory_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
