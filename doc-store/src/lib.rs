//! Qdrant-backed store with two collections: the document corpus and the
//! conversation history.
//!
//! The rest of the workspace never touches `qdrant-client` directly; all
//! interactions go through [`DocStore`], which exposes four capabilities:
//! passage similarity search, whole-corpus concatenation (fallback),
//! history similarity search, and exchange insertion.

pub mod config;
pub mod errors;
pub mod qdrant_facade;
pub mod record;

pub use config::{DistanceKind, StoreConfig};
pub use errors::StoreError;
pub use qdrant_facade::DocStore;
pub use record::{NewExchange, PassageMatch, StoredExchange};
