//! The Quill record engine.
//!
//! Two record collections (blogs, and posts nested under each blog) are
//! held in sorted, uniquely-keyed indexes, persisted whole on every
//! mutation, and reachable only through the [`Controller`], which enforces
//! the session and ownership rules before any store is touched.
//!
//! # Key Types
//!
//! - [`Controller`] — the sole public entry point; owns session and stores
//! - [`BlogStore`] — the sorted blog collection with snapshot-on-write
//! - [`PostStore`] — one selected blog's sorted post collection
//! - [`EngineConfig`] — startup configuration, immutable once constructed
//! - [`EngineError`] — the full failure taxonomy surfaced to callers

pub mod blogs;
pub mod config;
pub mod controller;
pub mod error;
mod persistence;
pub mod posts;

pub use blogs::BlogStore;
pub use config::EngineConfig;
pub use controller::Controller;
pub use error::{EngineError, EngineResult};
pub use posts::PostStore;
