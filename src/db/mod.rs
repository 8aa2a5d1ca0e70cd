//! Database layer.
//!
//! The application only needs simple create/read/update/delete calls, so the
//! store is an in-process document store. Swapping in a real database means
//! reimplementing `MemoryDb`'s methods against it.

pub mod memory;

pub use memory::MemoryDb;
