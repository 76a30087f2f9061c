//! In-memory [`Storage`] implementation
//!
//! Tables are plain vectors behind one `RwLock`. Every mutation (including the
//! workshop insert + category count bump) happens under a single write guard,
//! so it is atomic with respect to other callers.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::{
    Category, Host, NewCategory, NewHost, NewTestimonial, NewWorkshop, Testimonial, Workshop,
};
use crate::search::{SearchQuery, sort_workshops};
use crate::storage::Storage;

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    hosts: Vec<Host>,
    workshops: Vec<Workshop>,
    testimonials: Vec<Testimonial>,
}

/// Next serial id for a table (ids start at 1 and are never reused)
fn next_id(len: usize) -> i32 {
    len as i32 + 1
}

impl Tables {
    fn workshops_where(&self, keep: impl Fn(&Workshop) -> bool) -> Vec<Workshop> {
        let mut found: Vec<Workshop> = self.workshops.iter().filter(|w| keep(w)).cloned().collect();
        sort_workshops(&mut found);
        found
    }

    fn workshop_mut(&mut self, id: i32) -> Option<&mut Workshop> {
        self.workshops.iter_mut().find(|w| w.id == id)
    }
}

/// Catalog held in process memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn categories(&self) -> Result<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut categories = tables.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn category(&self, id: i32) -> Result<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn create_category(&self, new: NewCategory) -> Result<Category> {
        new.validate()?;
        let mut tables = self.tables.write().await;
        let category = Category {
            id: next_id(tables.categories.len()),
            name: new.name,
            icon: new.icon,
            description: new.description,
            workshop_count: 0,
        };
        tables.categories.push(category.clone());
        tracing::debug!(id = category.id, "created category");
        Ok(category)
    }

    async fn workshops(&self) -> Result<Vec<Workshop>> {
        Ok(self.tables.read().await.workshops_where(|_| true))
    }

    async fn workshop(&self, id: i32) -> Result<Option<Workshop>> {
        let tables = self.tables.read().await;
        Ok(tables.workshops.iter().find(|w| w.id == id).cloned())
    }

    async fn workshops_by_category(&self, category_id: i32) -> Result<Vec<Workshop>> {
        Ok(self
            .tables
            .read()
            .await
            .workshops_where(|w| w.category_id == category_id))
    }

    async fn featured_workshops(&self) -> Result<Vec<Workshop>> {
        Ok(self.tables.read().await.workshops_where(|w| w.featured))
    }

    async fn weekend_workshops(&self) -> Result<Vec<Workshop>> {
        Ok(self.tables.read().await.workshops_where(|w| w.this_weekend))
    }

    async fn create_workshop(&self, new: NewWorkshop) -> Result<Workshop> {
        new.validate()?;
        let mut tables = self.tables.write().await;

        if !tables.hosts.iter().any(|h| h.id == new.host_id) {
            return Err(Error::InvalidReference {
                entity: "host",
                id: new.host_id,
            });
        }
        let category = tables
            .categories
            .iter_mut()
            .find(|c| c.id == new.category_id)
            .ok_or(Error::InvalidReference {
                entity: "category",
                id: new.category_id,
            })?;
        category.workshop_count += 1;

        let workshop = Workshop::from_new(next_id(tables.workshops.len()), new);
        tables.workshops.push(workshop.clone());
        tracing::debug!(
            id = workshop.id,
            category_id = workshop.category_id,
            "created workshop"
        );
        Ok(workshop)
    }

    async fn update_availability(
        &self,
        id: i32,
        available_spots: i64,
    ) -> Result<Option<Workshop>> {
        let mut tables = self.tables.write().await;
        let Some(workshop) = tables.workshop_mut(id) else {
            return Ok(None);
        };
        workshop.set_available_spots(available_spots)?;
        tracing::debug!(id, available_spots, "updated workshop availability");
        Ok(Some(workshop.clone()))
    }

    async fn book_spot(&self, id: i32) -> Result<Option<Workshop>> {
        let mut tables = self.tables.write().await;
        let Some(workshop) = tables.workshop_mut(id) else {
            return Ok(None);
        };
        workshop.take_spot()?;
        tracing::debug!(
            id,
            available_spots = workshop.available_spots,
            "booked workshop spot"
        );
        Ok(Some(workshop.clone()))
    }

    async fn search_workshops(&self, query: &SearchQuery) -> Result<Vec<Workshop>> {
        Ok(self.tables.read().await.workshops_where(|w| query.matches(w)))
    }

    async fn hosts(&self) -> Result<Vec<Host>> {
        let tables = self.tables.read().await;
        let mut hosts = tables.hosts.clone();
        hosts.sort_by(|a, b| b.rating.total_cmp(&a.rating).then(a.id.cmp(&b.id)));
        Ok(hosts)
    }

    async fn host(&self, id: i32) -> Result<Option<Host>> {
        let tables = self.tables.read().await;
        Ok(tables.hosts.iter().find(|h| h.id == id).cloned())
    }

    async fn create_host(&self, new: NewHost) -> Result<Host> {
        new.validate()?;
        let mut tables = self.tables.write().await;
        let host = Host {
            id: next_id(tables.hosts.len()),
            name: new.name,
            image: new.image,
            description: new.description,
            rating: new.rating,
            review_count: new.review_count,
        };
        tables.hosts.push(host.clone());
        Ok(host)
    }

    async fn testimonials(&self) -> Result<Vec<Testimonial>> {
        let tables = self.tables.read().await;
        let mut testimonials = tables.testimonials.clone();
        testimonials.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
        Ok(testimonials)
    }

    async fn create_testimonial(&self, new: NewTestimonial) -> Result<Testimonial> {
        new.validate()?;
        let mut tables = self.tables.write().await;
        let testimonial = Testimonial {
            id: next_id(tables.testimonials.len()),
            content: new.content,
            rating: new.rating,
            name: new.name,
            location: new.location,
            initials: new.initials,
        };
        tables.testimonials.push(testimonial.clone());
        Ok(testimonial)
    }
}
