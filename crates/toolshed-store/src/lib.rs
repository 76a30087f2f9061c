//! Toolshed Store
//!
//! PostgreSQL implementation of the [`toolshed_core::Storage`] contract.
//!
//! # Features
//!
//! - Connection pooling via `sqlx`
//! - Embedded schema migrations (`migrations/`)
//! - Single-statement availability updates and bookings, so concurrent
//!   requests cannot oversell a workshop
//!
//! # Usage
//!
//! ```rust,ignore
//! use toolshed_store::PgStorage;
//!
//! let storage = PgStorage::connect(&url, 5).await?;
//! storage.migrate().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod pg;

pub use pg::PgStorage;
