//! Configuration types
//!
//! Board-agnostic configuration structures; with the `serde` feature they
//! can be stored as postcard binary data.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
