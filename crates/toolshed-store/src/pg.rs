//! PostgreSQL storage backend

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, QueryBuilder};
use toolshed_core::models::spots_available;
use toolshed_core::search::like_pattern;
use toolshed_core::{
    Category, Error, Host, NewCategory, NewHost, NewTestimonial, NewWorkshop, Result, SearchQuery,
    Storage, Testimonial, Workshop,
};

use crate::error::{db_error, insert_error};

const WORKSHOP_ORDER: &str = " ORDER BY date DESC, id ASC";

/// [`Storage`] over a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url`
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        tracing::debug!(max_connections, "Connecting to PostgreSQL");
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(db_error)?;
        Ok(Self::new(pool))
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Applying database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::storage(format!("migration failed: {e}")))
    }

    async fn workshops_where(&self, condition: &str) -> Result<Vec<Workshop>> {
        let sql = format!("SELECT * FROM workshops WHERE {condition}{WORKSHOP_ORDER}");
        sqlx::query_as::<_, Workshop>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn categories(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn category(&self, id: i32) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn create_category(&self, new: NewCategory) -> Result<Category> {
        new.validate()?;
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, icon, description) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(new.name)
        .bind(new.icon)
        .bind(new.description)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn workshops(&self) -> Result<Vec<Workshop>> {
        self.workshops_where("TRUE").await
    }

    async fn workshop(&self, id: i32) -> Result<Option<Workshop>> {
        sqlx::query_as::<_, Workshop>("SELECT * FROM workshops WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn workshops_by_category(&self, category_id: i32) -> Result<Vec<Workshop>> {
        let sql = format!("SELECT * FROM workshops WHERE category_id = $1{WORKSHOP_ORDER}");
        sqlx::query_as::<_, Workshop>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn featured_workshops(&self) -> Result<Vec<Workshop>> {
        self.workshops_where("featured").await
    }

    async fn weekend_workshops(&self) -> Result<Vec<Workshop>> {
        self.workshops_where("this_weekend").await
    }

    async fn create_workshop(&self, new: NewWorkshop) -> Result<Workshop> {
        new.validate()?;
        let (category_id, host_id) = (new.category_id, new.host_id);

        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let workshop = sqlx::query_as::<_, Workshop>(
            "INSERT INTO workshops (title, description, image, price, date, start_time, end_time, \
             formatted_date, formatted_time, location, distance, total_spots, available_spots, \
             is_available, category_id, host_id, featured, this_weekend) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18) \
             RETURNING *",
        )
        .bind(new.title)
        .bind(new.description)
        .bind(new.image)
        .bind(new.price)
        .bind(new.date)
        .bind(new.start_time)
        .bind(new.end_time)
        .bind(new.formatted_date)
        .bind(new.formatted_time)
        .bind(new.location)
        .bind(new.distance)
        .bind(new.total_spots)
        .bind(new.available_spots)
        .bind(spots_available(new.available_spots))
        .bind(category_id)
        .bind(host_id)
        .bind(new.featured)
        .bind(new.this_weekend)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| insert_error(e, category_id, host_id))?;

        sqlx::query("UPDATE categories SET workshop_count = workshop_count + 1 WHERE id = $1")
            .bind(category_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        tx.commit().await.map_err(db_error)?;

        tracing::debug!(id = workshop.id, category_id, "created workshop");
        Ok(workshop)
    }

    async fn update_availability(
        &self,
        id: i32,
        available_spots: i64,
    ) -> Result<Option<Workshop>> {
        if let Some(spots) = i32::try_from(available_spots).ok().filter(|s| *s >= 0) {
            let updated = sqlx::query_as::<_, Workshop>(
                "UPDATE workshops SET available_spots = $2, is_available = $3 \
                 WHERE id = $1 AND total_spots >= $2 RETURNING *",
            )
            .bind(id)
            .bind(spots)
            .bind(spots_available(spots))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

            if updated.is_some() {
                tracing::debug!(id, available_spots, "updated workshop availability");
                return Ok(updated);
            }
        }

        // Nothing was written: either the row is missing or the value is out of range.
        match self.workshop(id).await? {
            None => Ok(None),
            Some(workshop) => Err(Error::CapacityExceeded {
                workshop_id: id,
                requested: available_spots,
                total: workshop.total_spots,
            }),
        }
    }

    async fn book_spot(&self, id: i32) -> Result<Option<Workshop>> {
        // Right-hand sides see the pre-update row, so `available_spots > 1`
        // is the availability of the decremented value.
        let booked = sqlx::query_as::<_, Workshop>(
            "UPDATE workshops \
             SET available_spots = available_spots - 1, is_available = available_spots > 1 \
             WHERE id = $1 AND available_spots > 0 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        if let Some(workshop) = booked {
            tracing::debug!(
                id,
                available_spots = workshop.available_spots,
                "booked workshop spot"
            );
            return Ok(Some(workshop));
        }

        match self.workshop(id).await? {
            None => Ok(None),
            Some(_) => Err(Error::SoldOut { workshop_id: id }),
        }
    }

    async fn search_workshops(&self, query: &SearchQuery) -> Result<Vec<Workshop>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM workshops WHERE TRUE");
        if let Some(category_id) = query.category_id {
            builder.push(" AND category_id = ").push_bind(category_id);
        }
        for term in query.terms() {
            let pattern = like_pattern(&term);
            builder
                .push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR location ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        builder.push(WORKSHOP_ORDER);

        builder
            .build_query_as::<Workshop>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn hosts(&self) -> Result<Vec<Host>> {
        sqlx::query_as::<_, Host>("SELECT * FROM hosts ORDER BY rating DESC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn host(&self, id: i32) -> Result<Option<Host>> {
        sqlx::query_as::<_, Host>("SELECT * FROM hosts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn create_host(&self, new: NewHost) -> Result<Host> {
        new.validate()?;
        sqlx::query_as::<_, Host>(
            "INSERT INTO hosts (name, image, description, rating, review_count) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(new.name)
        .bind(new.image)
        .bind(new.description)
        .bind(new.rating)
        .bind(new.review_count)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn testimonials(&self) -> Result<Vec<Testimonial>> {
        sqlx::query_as::<_, Testimonial>("SELECT * FROM testimonials ORDER BY rating DESC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn create_testimonial(&self, new: NewTestimonial) -> Result<Testimonial> {
        new.validate()?;
        sqlx::query_as::<_, Testimonial>(
            "INSERT INTO testimonials (content, rating, name, location, initials) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(new.content)
        .bind(new.rating)
        .bind(new.name)
        .bind(new.location)
        .bind(new.initials)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }
}
