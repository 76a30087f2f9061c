//! Repository contract
//!
//! [`Storage`] is the seam between the HTTP layer and a backing store. The
//! in-memory implementation lives in [`crate::memory`]; the PostgreSQL one in
//! the `toolshed-store` crate.
//!
//! Listing order is part of the contract:
//! categories by name, workshops by date (newest first), hosts and
//! testimonials by rating (highest first). Ties fall back to id ascending.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Category, Host, NewCategory, NewHost, NewTestimonial, NewWorkshop, Testimonial, Workshop,
};
use crate::search::SearchQuery;

/// Typed access to the workshop catalog
#[async_trait]
pub trait Storage: Send + Sync {
    /// All categories
    async fn categories(&self) -> Result<Vec<Category>>;

    /// Category by id
    async fn category(&self, id: i32) -> Result<Option<Category>>;

    /// Insert a category with a workshop count of zero
    async fn create_category(&self, new: NewCategory) -> Result<Category>;

    /// All workshops
    async fn workshops(&self) -> Result<Vec<Workshop>>;

    /// Workshop by id
    async fn workshop(&self, id: i32) -> Result<Option<Workshop>>;

    /// Workshops whose `category_id` equals `category_id`
    async fn workshops_by_category(&self, category_id: i32) -> Result<Vec<Workshop>>;

    /// Workshops tagged featured
    async fn featured_workshops(&self) -> Result<Vec<Workshop>>;

    /// Workshops tagged this-weekend
    async fn weekend_workshops(&self) -> Result<Vec<Workshop>>;

    /// Insert a workshop and bump its category's workshop count in the same
    /// atomic step. Unknown category or host ids are rejected.
    async fn create_workshop(&self, new: NewWorkshop) -> Result<Workshop>;

    /// Overwrite the remaining capacity (last write wins).
    ///
    /// Returns `Ok(None)` when no workshop has this id, and
    /// [`crate::Error::CapacityExceeded`] when `available_spots` is outside
    /// `0..=total_spots`.
    async fn update_availability(&self, id: i32, available_spots: i64)
    -> Result<Option<Workshop>>;

    /// Atomically take one spot if any is left.
    ///
    /// Returns `Ok(None)` when no workshop has this id, and
    /// [`crate::Error::SoldOut`] when it has no spots left.
    async fn book_spot(&self, id: i32) -> Result<Option<Workshop>>;

    /// Workshops matching `query`
    async fn search_workshops(&self, query: &SearchQuery) -> Result<Vec<Workshop>>;

    /// All hosts
    async fn hosts(&self) -> Result<Vec<Host>>;

    /// Host by id
    async fn host(&self, id: i32) -> Result<Option<Host>>;

    /// Insert a host
    async fn create_host(&self, new: NewHost) -> Result<Host>;

    /// All testimonials
    async fn testimonials(&self) -> Result<Vec<Testimonial>>;

    /// Insert a testimonial
    async fn create_testimonial(&self, new: NewTestimonial) -> Result<Testimonial>;
}
