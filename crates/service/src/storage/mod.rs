//! Storage abstractions for service layer
//!
//! The meme endpoints store raw image bytes behind an `ObjectStore` trait so
//! the rest of the code never touches paths directly.

pub mod object_store;

pub use object_store::{FsObjectStore, ObjectStore, StorageError};
