//! Catalog records
//!
//! Stored rows ([`Category`], [`Host`], [`Workshop`], [`Testimonial`]) and the
//! insert payloads that create them. Rows serialize with camelCase field
//! names, which is the JSON shape the HTTP API serves.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Availability flag for a given number of free spots.
///
/// Every write path that touches `available_spots` derives `is_available`
/// through this function (or its SQL twin in the Postgres store).
pub fn spots_available(available_spots: i32) -> bool {
    available_spots > 0
}

/// Workshop category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Identifier
    pub id: i32,
    /// Display name
    pub name: String,
    /// Icon name (font-awesome style, e.g. `fa-hammer`)
    pub icon: String,
    /// Short description
    pub description: Option<String>,
    /// Number of workshops created in this category
    pub workshop_count: i32,
}

/// Payload for creating a category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    /// Display name
    pub name: String,
    /// Icon name
    pub icon: String,
    /// Short description
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCategory {
    /// Reject blank names and icons
    pub fn validate(&self) -> Result<()> {
        require_text("category", "name", &self.name)?;
        require_text("category", "icon", &self.icon)
    }
}

/// Workshop host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Host {
    /// Identifier
    pub id: i32,
    /// Display name
    pub name: String,
    /// Image URL
    pub image: Option<String>,
    /// Short description
    pub description: Option<String>,
    /// Average rating, 0 to 5
    pub rating: f32,
    /// Number of reviews behind `rating`
    pub review_count: i32,
}

/// Payload for creating a host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHost {
    /// Display name
    pub name: String,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Short description
    #[serde(default)]
    pub description: Option<String>,
    /// Average rating
    #[serde(default)]
    pub rating: f32,
    /// Number of reviews
    #[serde(default)]
    pub review_count: i32,
}

impl NewHost {
    /// Reject blank names and out-of-range ratings
    pub fn validate(&self) -> Result<()> {
        require_text("host", "name", &self.name)?;
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(invalid("host", format!("rating {} is outside 0..=5", self.rating)));
        }
        if self.review_count < 0 {
            return Err(invalid("host", "reviewCount must not be negative"));
        }
        Ok(())
    }
}

/// A scheduled, bookable class with fixed capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    /// Identifier
    pub id: i32,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Image URL
    pub image: String,
    /// Price in US dollars
    pub price: f32,
    /// Start timestamp (local time, no zone)
    pub date: NaiveDateTime,
    /// Start time as displayed
    pub start_time: String,
    /// End time as displayed
    pub end_time: String,
    /// Date as displayed
    pub formatted_date: String,
    /// Time range as displayed
    pub formatted_time: String,
    /// Venue
    pub location: String,
    /// Distance in miles from the reference point
    pub distance: Option<f32>,
    /// Capacity
    pub total_spots: i32,
    /// Remaining capacity
    pub available_spots: i32,
    /// `available_spots > 0`
    pub is_available: bool,
    /// Owning category
    pub category_id: i32,
    /// Hosting organisation
    pub host_id: i32,
    /// Homepage "featured" tag
    pub featured: bool,
    /// Homepage "this weekend" tag
    pub this_weekend: bool,
}

impl Workshop {
    /// Build the stored row for `new` under identifier `id`
    pub fn from_new(id: i32, new: NewWorkshop) -> Self {
        Self {
            id,
            is_available: spots_available(new.available_spots),
            title: new.title,
            description: new.description,
            image: new.image,
            price: new.price,
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            formatted_date: new.formatted_date,
            formatted_time: new.formatted_time,
            location: new.location,
            distance: new.distance,
            total_spots: new.total_spots,
            available_spots: new.available_spots,
            category_id: new.category_id,
            host_id: new.host_id,
            featured: new.featured,
            this_weekend: new.this_weekend,
        }
    }

    /// Set the remaining capacity, keeping `is_available` in step.
    ///
    /// Fails with [`Error::CapacityExceeded`] when `spots` is negative or
    /// above `total_spots`; the row is left untouched in that case.
    pub fn set_available_spots(&mut self, spots: i64) -> Result<()> {
        if spots < 0 || spots > i64::from(self.total_spots) {
            return Err(Error::CapacityExceeded {
                workshop_id: self.id,
                requested: spots,
                total: self.total_spots,
            });
        }
        self.available_spots = spots as i32;
        self.is_available = spots_available(self.available_spots);
        Ok(())
    }

    /// Take one spot, failing with [`Error::SoldOut`] when none are left
    pub fn take_spot(&mut self) -> Result<()> {
        if !spots_available(self.available_spots) {
            return Err(Error::SoldOut {
                workshop_id: self.id,
            });
        }
        self.available_spots -= 1;
        self.is_available = spots_available(self.available_spots);
        Ok(())
    }

    /// Whether the capacity invariants hold for this row
    pub fn is_consistent(&self) -> bool {
        (0..=self.total_spots).contains(&self.available_spots)
            && self.is_available == spots_available(self.available_spots)
    }
}

/// Payload for creating a workshop.
///
/// There is no `is_available` field: it is derived from `available_spots`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkshop {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Image URL
    pub image: String,
    /// Price in US dollars
    pub price: f32,
    /// Start timestamp
    pub date: NaiveDateTime,
    /// Start time as displayed
    pub start_time: String,
    /// End time as displayed
    pub end_time: String,
    /// Date as displayed
    pub formatted_date: String,
    /// Time range as displayed
    pub formatted_time: String,
    /// Venue
    pub location: String,
    /// Distance in miles
    #[serde(default)]
    pub distance: Option<f32>,
    /// Capacity
    pub total_spots: i32,
    /// Remaining capacity
    pub available_spots: i32,
    /// Owning category
    pub category_id: i32,
    /// Hosting organisation
    pub host_id: i32,
    /// Homepage "featured" tag
    #[serde(default)]
    pub featured: bool,
    /// Homepage "this weekend" tag
    #[serde(default)]
    pub this_weekend: bool,
}

impl NewWorkshop {
    /// Check required text and the capacity invariant `0 <= available <= total`
    pub fn validate(&self) -> Result<()> {
        require_text("workshop", "title", &self.title)?;
        require_text("workshop", "location", &self.location)?;
        if self.price.is_nan() || self.price < 0.0 {
            return Err(invalid("workshop", format!("price {} is not a valid amount", self.price)));
        }
        if self.total_spots < 0 {
            return Err(invalid("workshop", "totalSpots must not be negative"));
        }
        if !(0..=self.total_spots).contains(&self.available_spots) {
            return Err(invalid(
                "workshop",
                format!(
                    "availableSpots {} is outside 0..={}",
                    self.available_spots, self.total_spots
                ),
            ));
        }
        Ok(())
    }
}

/// Customer testimonial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    /// Identifier
    pub id: i32,
    /// Quote
    pub content: String,
    /// Star rating, 0 to 5
    pub rating: i32,
    /// Author name
    pub name: String,
    /// Author location blurb
    pub location: String,
    /// Author initials for the avatar
    pub initials: String,
}

/// Payload for creating a testimonial
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    /// Quote
    pub content: String,
    /// Star rating
    #[serde(default = "default_testimonial_rating")]
    pub rating: i32,
    /// Author name
    pub name: String,
    /// Author location blurb
    pub location: String,
    /// Author initials
    pub initials: String,
}

fn default_testimonial_rating() -> i32 {
    5
}

impl NewTestimonial {
    /// Reject blank content and out-of-range ratings
    pub fn validate(&self) -> Result<()> {
        require_text("testimonial", "content", &self.content)?;
        require_text("testimonial", "name", &self.name)?;
        if !(0..=5).contains(&self.rating) {
            return Err(invalid(
                "testimonial",
                format!("rating {} is outside 0..=5", self.rating),
            ));
        }
        Ok(())
    }
}

fn require_text(entity: &'static str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(entity, format!("{field} must not be blank")));
    }
    Ok(())
}

fn invalid(entity: &'static str, message: impl Into<String>) -> Error {
    Error::InvalidRecord {
        entity,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn new_workshop(total: i32, available: i32) -> NewWorkshop {
        NewWorkshop {
            title: "Tile Grouting".to_string(),
            description: "Regrout a bathroom wall".to_string(),
            image: "https://example.com/tile.jpg".to_string(),
            price: 25.0,
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, 2)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            start_time: "9:00 AM".to_string(),
            end_time: "11:00 AM".to_string(),
            formatted_date: "Mar 2, 2024".to_string(),
            formatted_time: "9:00 AM - 11:00 AM".to_string(),
            location: "Tool Library".to_string(),
            distance: Some(1.5),
            total_spots: total,
            available_spots: available,
            category_id: 1,
            host_id: 1,
            featured: false,
            this_weekend: false,
        }
    }

    #[test]
    fn test_from_new_derives_availability() {
        assert!(Workshop::from_new(1, new_workshop(10, 3)).is_available);
        assert!(!Workshop::from_new(1, new_workshop(10, 0)).is_available);
    }

    #[rstest]
    #[case(10, 10, true)]
    #[case(10, 0, true)]
    #[case(0, 0, true)]
    #[case(10, 11, false)]
    #[case(10, -1, false)]
    #[case(-1, 0, false)]
    fn test_new_workshop_capacity_validation(
        #[case] total: i32,
        #[case] available: i32,
        #[case] ok: bool,
    ) {
        assert_eq!(new_workshop(total, available).validate().is_ok(), ok);
    }

    #[test]
    fn test_set_available_spots_to_zero_marks_unavailable() {
        let mut workshop = Workshop::from_new(7, new_workshop(15, 15));
        workshop.set_available_spots(0).unwrap();
        assert_eq!(workshop.available_spots, 0);
        assert!(!workshop.is_available);
        assert!(workshop.is_consistent());
    }

    #[test]
    fn test_set_available_spots_out_of_range_leaves_row() {
        let mut workshop = Workshop::from_new(7, new_workshop(15, 4));
        let err = workshop.set_available_spots(16).unwrap_err();
        assert!(matches!(
            err,
            Error::CapacityExceeded {
                workshop_id: 7,
                requested: 16,
                total: 15
            }
        ));
        assert!(workshop.set_available_spots(-1).is_err());
        assert_eq!(workshop.available_spots, 4);
    }

    #[test]
    fn test_take_spot_until_sold_out() {
        let mut workshop = Workshop::from_new(3, new_workshop(2, 2));
        workshop.take_spot().unwrap();
        assert!(workshop.is_available);
        workshop.take_spot().unwrap();
        assert!(!workshop.is_available);
        assert!(matches!(
            workshop.take_spot(),
            Err(Error::SoldOut { workshop_id: 3 })
        ));
        assert_eq!(workshop.available_spots, 0);
    }

    #[test]
    fn test_workshop_json_uses_camel_case() {
        let workshop = Workshop::from_new(1, new_workshop(20, 8));
        let json = serde_json::to_value(&workshop).unwrap();
        assert_eq!(json["availableSpots"], 8);
        assert_eq!(json["isAvailable"], true);
        assert_eq!(json["categoryId"], 1);
        assert_eq!(json["thisWeekend"], false);
        assert_eq!(json["date"], "2024-03-02T09:00:00");
    }

    #[test]
    fn test_testimonial_rating_defaults_to_five() {
        let new: NewTestimonial = serde_json::from_str(
            r#"{"content":"Great","name":"A B","location":"Austin","initials":"AB"}"#,
        )
        .unwrap();
        assert_eq!(new.rating, 5);
        assert!(new.validate().is_ok());
    }

    #[test]
    fn test_host_rating_range() {
        let host = NewHost {
            name: "Fixers".to_string(),
            image: None,
            description: None,
            rating: 5.5,
            review_count: 0,
        };
        assert!(matches!(
            host.validate(),
            Err(Error::InvalidRecord { entity: "host", .. })
        ));
    }
}
