//! In-memory storage module
//!
//! Single source of truth for tweets, users and follow edges.
//! This module is independent of the service and transport layers
//! (loose coupling).

mod memory;

pub use memory::MemoryStore;
