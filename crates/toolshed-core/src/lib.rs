//! Toolshed Core Library
//!
//! This crate provides the core functionality for Toolshed, a workshop
//! discovery and booking service:
//! - Catalog records (categories, hosts, workshops, testimonials)
//! - Workshop search semantics
//! - The [`Storage`] repository contract and an in-memory implementation
//! - Sample catalog seeding
//! - Project configuration
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  HTTP API   │────▶│   Storage   │────▶│ Memory / PG │
//! │   (axum)    │     │   (trait)   │     │   backend   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use toolshed_core::{MemoryStorage, SearchQuery, Storage, seed};
//!
//! let storage = MemoryStorage::new();
//! seed::seed_if_empty(&storage).await?;
//! let hits = storage.search_workshops(&SearchQuery::new("plumbing")).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod memory;
pub mod models;
pub mod search;
pub mod seed;
pub mod storage;

pub use config::{Config, ProjectConfig};
pub use error::{Error, Result};
pub use memory::MemoryStorage;
pub use models::{
    Category, Host, NewCategory, NewHost, NewTestimonial, NewWorkshop, Testimonial, Workshop,
};
pub use search::SearchQuery;
pub use storage::Storage;
