//! Factories for settings documents in their historical shapes.
//!
//! Each factory returns a `serde_json::Value` so tests can feed documents to the
//! migration chain exactly as they would be read from disk.

pub mod legacy;
