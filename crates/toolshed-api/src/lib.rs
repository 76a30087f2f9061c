//! Toolshed HTTP API
//!
//! Thin REST surface over the [`toolshed_core::Storage`] contract.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Path/query/body parsing and validation                 │
//! │  - Status-code mapping, JSON error bodies                 │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Storage (toolshed-core trait)                            │
//! │  - MemoryStorage / PgStorage                              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Endpoints
//!
//! | Method | Path | Notes |
//! |---|---|---|
//! | GET | `/api/categories` | by name |
//! | GET | `/api/categories/:id` | |
//! | GET | `/api/categories/:id/workshops` | 404 for unknown category |
//! | GET | `/api/workshops` | `q`, `categoryId` |
//! | GET | `/api/workshops/featured` | |
//! | GET | `/api/workshops/weekend` | |
//! | GET | `/api/workshops/:id` | |
//! | PATCH | `/api/workshops/:id/availability` | `{"availableSpots": n}` |
//! | POST | `/api/workshops/:id/book` | 409 when full |
//! | GET | `/api/hosts`, `/api/hosts/:id` | |
//! | GET | `/api/testimonials` | |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::{create_router, serve};
pub use state::AppState;
