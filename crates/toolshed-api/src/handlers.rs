//! Endpoint handlers
//!
//! Each handler parses path/query/body input, calls one or two storage
//! operations and maps the outcome onto a status code.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use toolshed_core::{Category, Host, SearchQuery, Testimonial, Workshop};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn parse_id(raw: &str, what: &str) -> ApiResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {what} ID")))
}

/// Liveness probe
pub async fn health() -> &'static str {
    "OK"
}

/// `GET /api/categories`
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    state
        .storage
        .categories()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_storage(e, "Failed to fetch categories"))
}

/// `GET /api/categories/:id`
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    let id = parse_id(&id, "category")?;
    state
        .storage
        .category(id)
        .await
        .map_err(|e| ApiError::from_storage(e, "Failed to fetch category"))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))
}

/// `GET /api/categories/:id/workshops`
pub async fn list_category_workshops(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Workshop>>> {
    let id = parse_id(&id, "category")?;
    let context = "Failed to fetch workshops for category";

    if state
        .storage
        .category(id)
        .await
        .map_err(|e| ApiError::from_storage(e, context))?
        .is_none()
    {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    state
        .storage
        .workshops_by_category(id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_storage(e, context))
}

/// Query string accepted by `GET /api/workshops`
#[derive(Debug, Default, Deserialize)]
pub struct WorkshopParams {
    /// Free-text search
    pub q: Option<String>,
    /// Category filter, numeric
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
}

impl WorkshopParams {
    fn into_search(self) -> ApiResult<SearchQuery> {
        let mut query = SearchQuery::new(self.q.unwrap_or_default());
        let category_id = match self.category_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_id(raw, "category")?),
        };
        // Category ids start at 1; `0` means "any category"
        if let Some(id) = category_id.filter(|id| *id != 0) {
            query = query.in_category(id);
        }
        Ok(query)
    }
}

/// `GET /api/workshops?q=&categoryId=`
pub async fn list_workshops(
    State(state): State<AppState>,
    params: Result<Query<WorkshopParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Workshop>>> {
    let Ok(Query(params)) = params else {
        return Err(ApiError::BadRequest("Invalid query string".to_string()));
    };
    let query = params.into_search()?;
    let result = if query.is_unfiltered() {
        state.storage.workshops().await
    } else {
        tracing::debug!(text = %query.text, category_id = ?query.category_id, "searching workshops");
        state.storage.search_workshops(&query).await
    };
    result
        .map(Json)
        .map_err(|e| ApiError::from_storage(e, "Failed to fetch workshops"))
}

/// `GET /api/workshops/featured`
pub async fn list_featured_workshops(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Workshop>>> {
    state
        .storage
        .featured_workshops()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_storage(e, "Failed to fetch featured workshops"))
}

/// `GET /api/workshops/weekend`
pub async fn list_weekend_workshops(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Workshop>>> {
    state
        .storage
        .weekend_workshops()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_storage(e, "Failed to fetch weekend workshops"))
}

/// `GET /api/workshops/:id`
pub async fn get_workshop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Workshop>> {
    let id = parse_id(&id, "workshop")?;
    state
        .storage
        .workshop(id)
        .await
        .map_err(|e| ApiError::from_storage(e, "Failed to fetch workshop"))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Workshop not found".to_string()))
}

/// Body of `PATCH /api/workshops/:id/availability`
#[derive(Debug, Deserialize)]
pub struct AvailabilityUpdate {
    /// New remaining capacity, an integer `>= 0`
    #[serde(rename = "availableSpots")]
    pub available_spots: i64,
}

/// `PATCH /api/workshops/:id/availability`
pub async fn update_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<AvailabilityUpdate>, JsonRejection>,
) -> ApiResult<Json<Workshop>> {
    let id = parse_id(&id, "workshop")?;
    let Ok(Json(update)) = body else {
        return Err(ApiError::BadRequest("Invalid request body".to_string()));
    };
    if update.available_spots < 0 {
        return Err(ApiError::BadRequest("Invalid request body".to_string()));
    }

    let workshop = state
        .storage
        .update_availability(id, update.available_spots)
        .await
        .map_err(|e| ApiError::from_storage(e, "Failed to update workshop availability"))?
        .ok_or_else(|| ApiError::NotFound("Workshop not found".to_string()))?;

    tracing::info!(
        workshop_id = id,
        available_spots = workshop.available_spots,
        "availability updated"
    );
    Ok(Json(workshop))
}

/// `POST /api/workshops/:id/book`
pub async fn book_workshop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Workshop>> {
    let id = parse_id(&id, "workshop")?;
    let workshop = state
        .storage
        .book_spot(id)
        .await
        .map_err(|e| ApiError::from_storage(e, "Failed to book workshop"))?
        .ok_or_else(|| ApiError::NotFound("Workshop not found".to_string()))?;

    tracing::info!(
        workshop_id = id,
        available_spots = workshop.available_spots,
        "spot booked"
    );
    Ok(Json(workshop))
}

/// `GET /api/hosts`
pub async fn list_hosts(State(state): State<AppState>) -> ApiResult<Json<Vec<Host>>> {
    state
        .storage
        .hosts()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_storage(e, "Failed to fetch hosts"))
}

/// `GET /api/hosts/:id`
pub async fn get_host(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Host>> {
    let id = parse_id(&id, "host")?;
    state
        .storage
        .host(id)
        .await
        .map_err(|e| ApiError::from_storage(e, "Failed to fetch host"))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Host not found".to_string()))
}

/// `GET /api/testimonials`
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Testimonial>>> {
    state
        .storage
        .testimonials()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_storage(e, "Failed to fetch testimonials"))
}
