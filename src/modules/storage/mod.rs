//! Storage module for uploaded files
//!
//! Provides a local-disk image store; the upload directory is exposed
//! read-only through the static file route.

mod local_store;

pub use local_store::{LocalImageStore, StoredImage};
