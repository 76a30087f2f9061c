//! Sample catalog
//!
//! Rows are inserted one at a time so identifiers are stable: categories get
//! ids 1..=6 in the order listed here, hosts 1..=3, workshops 1..=7.

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::models::{NewCategory, NewHost, NewTestimonial, NewWorkshop};
use crate::storage::Storage;

/// Insert the sample catalog unless categories already exist.
///
/// Returns `true` when rows were inserted.
pub async fn seed_if_empty<S: Storage + ?Sized>(storage: &S) -> Result<bool> {
    if !storage.categories().await?.is_empty() {
        tracing::debug!("catalog already populated, skipping seed");
        return Ok(false);
    }

    tracing::info!("Seeding sample catalog");
    for category in categories() {
        storage.create_category(category).await?;
    }
    for host in hosts() {
        storage.create_host(host).await?;
    }
    for workshop in workshops()? {
        storage.create_workshop(workshop).await?;
    }
    for testimonial in testimonials() {
        storage.create_testimonial(testimonial).await?;
    }
    Ok(true)
}

fn category(name: &str, icon: &str, description: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        icon: icon.to_string(),
        description: Some(description.to_string()),
    }
}

/// Sample categories
pub fn categories() -> Vec<NewCategory> {
    vec![
        category("Home Repair", "fa-hammer", "Essential home repair and maintenance skills"),
        category("DIY Decor", "fa-palette", "Creative home decoration workshops"),
        category("Gardening", "fa-leaf", "Garden design and plant care"),
        category("Electrical", "fa-bolt", "Basic to advanced electrical repairs"),
        category("Plumbing", "fa-faucet", "Plumbing maintenance and fixes"),
        category("Renovation", "fa-paint-roller", "Home renovation and remodeling projects"),
    ]
}

/// Sample hosts
pub fn hosts() -> Vec<NewHost> {
    vec![
        NewHost {
            name: "Home Depot Workshop Team".to_string(),
            image: Some("https://images.unsplash.com/photo-1607990281513-2c110a25bd8c?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=600&q=80".to_string()),
            description: Some("Expert-led workshops on home improvement basics, repairs, and DIY projects.".to_string()),
            rating: 4.7,
            review_count: 126,
        },
        NewHost {
            name: "Green Thumb Gardening Club".to_string(),
            image: Some("https://images.unsplash.com/photo-1523741543316-beb7fc7023d8?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=600&q=80".to_string()),
            description: Some("Community-based gardening experts specializing in organic techniques and landscaping.".to_string()),
            rating: 4.9,
            review_count: 87,
        },
        NewHost {
            name: "Modern Renovations Co.".to_string(),
            image: Some("https://pixabay.com/get/g763893a40e3835661c42c28914d960d3b53c8a2efa6cc9bc297d96b46845a06f623132629cb001ec3e72ab3a46c823d48266a5198f58b805ef4d53ae02c05144_1280.jpg".to_string()),
            description: Some("Professional contractors offering advanced renovation and remodeling workshops.".to_string()),
            rating: 4.2,
            review_count: 54,
        },
    ]
}

fn at(timestamp: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S").map_err(|e| {
        Error::InvalidRecord {
            entity: "workshop",
            message: format!("bad seed timestamp '{timestamp}': {e}"),
        }
    })
}

/// Fields that vary between sample workshops
struct Sample {
    title: &'static str,
    description: &'static str,
    image: &'static str,
    price: f32,
    date: &'static str,
    start_time: &'static str,
    end_time: &'static str,
    formatted_date: &'static str,
    formatted_time: &'static str,
    location: &'static str,
    distance: f32,
    total_spots: i32,
    available_spots: i32,
    category_id: i32,
    host_id: i32,
    featured: bool,
    this_weekend: bool,
}

impl Sample {
    fn into_new(self) -> Result<NewWorkshop> {
        Ok(NewWorkshop {
            title: self.title.to_string(),
            description: self.description.to_string(),
            image: self.image.to_string(),
            price: self.price,
            date: at(self.date)?,
            start_time: self.start_time.to_string(),
            end_time: self.end_time.to_string(),
            formatted_date: self.formatted_date.to_string(),
            formatted_time: self.formatted_time.to_string(),
            location: self.location.to_string(),
            distance: Some(self.distance),
            total_spots: self.total_spots,
            available_spots: self.available_spots,
            category_id: self.category_id,
            host_id: self.host_id,
            featured: self.featured,
            this_weekend: self.this_weekend,
        })
    }
}

/// Sample workshops (category and host ids assume [`categories`] and [`hosts`] were inserted first)
pub fn workshops() -> Result<Vec<NewWorkshop>> {
    [
        Sample {
            title: "Basic Electrical Repairs",
            description: "Learn how to safely handle common electrical issues every homeowner should know.",
            image: "https://images.unsplash.com/photo-1621905252507-b35492cc74b4?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=500&q=80",
            price: 45.0,
            date: "2023-10-15T10:00:00",
            start_time: "10:00 AM",
            end_time: "12:30 PM",
            formatted_date: "Oct 15, 2023",
            formatted_time: "10:00 AM - 12:30 PM",
            location: "HomeDepot Community Center",
            distance: 2.3,
            total_spots: 20,
            available_spots: 8,
            category_id: 4,
            host_id: 1,
            featured: true,
            this_weekend: false,
        },
        Sample {
            title: "DIY Furniture Basics",
            description: "Create your own custom furniture pieces and learn woodworking fundamentals.",
            image: "https://images.unsplash.com/photo-1538307602205-80b5c2ff26ec?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=500&q=80",
            price: 65.0,
            date: "2023-10-18T13:00:00",
            start_time: "1:00 PM",
            end_time: "4:00 PM",
            formatted_date: "Oct 18, 2023",
            formatted_time: "1:00 PM - 4:00 PM",
            location: "Maker Space Workshop",
            distance: 4.1,
            total_spots: 15,
            available_spots: 0,
            category_id: 2,
            host_id: 3,
            featured: true,
            this_weekend: false,
        },
        Sample {
            title: "Garden Planning 101",
            description: "Design and plan your perfect home garden with expert guidance and tips.",
            image: "https://pixabay.com/get/g1b4e646abd7f29c920f207e79760643e91e1a96af6c52c246d52213490ddce4c5263ad0426670f3b142b75d82292cb87c488265177341a7e72426d105a5be371_1280.jpg",
            price: 35.0,
            date: "2023-10-22T09:00:00",
            start_time: "9:00 AM",
            end_time: "11:00 AM",
            formatted_date: "Oct 22, 2023",
            formatted_time: "9:00 AM - 11:00 AM",
            location: "Community Garden Center",
            distance: 1.7,
            total_spots: 25,
            available_spots: 12,
            category_id: 3,
            host_id: 2,
            featured: true,
            this_weekend: false,
        },
        Sample {
            title: "Plumbing Basics",
            description: "Learn essential plumbing skills to handle common home plumbing issues.",
            image: "https://pixabay.com/get/gaee83ac78c4cadd73a14a159b65f91058084dd4d93f00bdb6333fde3f9d9de47034ed486d490266bb4f645c0b9e95753c5973529ad8ea3ae0a16578fddb729c9_1280.jpg",
            price: 40.0,
            date: "2023-10-14T14:00:00",
            start_time: "2:00 PM",
            end_time: "4:30 PM",
            formatted_date: "Sat, Oct 14",
            formatted_time: "2:00 PM",
            location: "Community Center",
            distance: 3.2,
            total_spots: 15,
            available_spots: 3,
            category_id: 5,
            host_id: 1,
            featured: false,
            this_weekend: true,
        },
        Sample {
            title: "Wall Painting Techniques",
            description: "Learn professional wall painting and texturing techniques.",
            image: "https://images.unsplash.com/photo-1589939705384-5185137a7f0f?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=400&q=80",
            price: 35.0,
            date: "2023-10-14T10:00:00",
            start_time: "10:00 AM",
            end_time: "12:30 PM",
            formatted_date: "Sat, Oct 14",
            formatted_time: "10:00 AM",
            location: "Design Studio",
            distance: 2.8,
            total_spots: 12,
            available_spots: 7,
            category_id: 6,
            host_id: 3,
            featured: false,
            this_weekend: true,
        },
        Sample {
            title: "Smart Home Setup",
            description: "Set up and configure smart home devices for convenience and automation.",
            image: "https://images.unsplash.com/photo-1558002038-1055907df827?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=400&q=80",
            price: 50.0,
            date: "2023-10-15T13:00:00",
            start_time: "1:00 PM",
            end_time: "3:30 PM",
            formatted_date: "Sun, Oct 15",
            formatted_time: "1:00 PM",
            location: "Tech Hub",
            distance: 5.4,
            total_spots: 10,
            available_spots: 0,
            category_id: 4,
            host_id: 1,
            featured: false,
            this_weekend: true,
        },
        Sample {
            title: "Kitchen Organization",
            description: "Optimize your kitchen space with practical organization solutions.",
            image: "https://images.unsplash.com/photo-1556911220-e15b29be8c8f?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=400&q=80",
            price: 30.0,
            date: "2023-10-15T11:00:00",
            start_time: "11:00 AM",
            end_time: "1:00 PM",
            formatted_date: "Sun, Oct 15",
            formatted_time: "11:00 AM",
            location: "Home Living Center",
            distance: 1.9,
            total_spots: 15,
            available_spots: 4,
            category_id: 2,
            host_id: 3,
            featured: false,
            this_weekend: true,
        },
    ]
    .into_iter()
    .map(Sample::into_new)
    .collect()
}

fn testimonial(content: &str, rating: i32, name: &str, location: &str, initials: &str) -> NewTestimonial {
    NewTestimonial {
        content: content.to_string(),
        rating,
        name: name.to_string(),
        location: location.to_string(),
        initials: initials.to_string(),
    }
}

/// Sample testimonials
pub fn testimonials() -> Vec<NewTestimonial> {
    vec![
        testimonial(
            "The electrical basics workshop saved me so much money! I can now handle simple repairs myself instead of calling an electrician every time.",
            5,
            "James Miller",
            "New homeowner in Portland",
            "JM",
        ),
        testimonial(
            "I loved the garden planning workshop! The instructor was knowledgeable and I left with a complete plan for my backyard. Highly recommend!",
            5,
            "Amanda Rodriguez",
            "Homeowner in Austin",
            "AR",
        ),
        testimonial(
            "The real-time availability feature is amazing! No more calling around to check if spots are open. Booked my plumbing workshop in seconds.",
            4,
            "David Kim",
            "First-time homeowner in Chicago",
            "DK",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;

    #[test]
    fn test_sample_workshops_are_valid() {
        let workshops = workshops().unwrap();
        assert_eq!(workshops.len(), 7);
        for workshop in &workshops {
            workshop.validate().unwrap();
            assert!((1..=6).contains(&workshop.category_id));
            assert!((1..=3).contains(&workshop.host_id));
        }
    }

    #[test]
    fn test_sample_images_keep_their_sources() {
        let hosts = hosts();
        assert!(hosts[2].image.as_deref().unwrap().starts_with("https://pixabay.com/get/"));

        let workshops = workshops().unwrap();
        for index in [2, 3] {
            assert!(workshops[index].image.starts_with("https://pixabay.com/get/"));
        }
        for index in [0, 1, 4, 5, 6] {
            assert!(workshops[index].image.starts_with("https://images.unsplash.com/"));
        }
    }

    #[test]
    fn test_bad_timestamp_is_reported() {
        assert!(matches!(
            at("Oct 15"),
            Err(Error::InvalidRecord { entity: "workshop", .. })
        ));
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let storage = MemoryStorage::new();
        assert!(seed_if_empty(&storage).await.unwrap());
        assert!(!seed_if_empty(&storage).await.unwrap());
        assert_eq!(storage.categories().await.unwrap().len(), 6);
        assert_eq!(storage.hosts().await.unwrap().len(), 3);
        assert_eq!(storage.workshops().await.unwrap().len(), 7);
        assert_eq!(storage.testimonials().await.unwrap().len(), 3);
    }
}
