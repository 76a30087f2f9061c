//! Browse the catalog through a running API

use anyhow::Result;
use toolshed_core::Workshop;

use crate::client::ApiClient;
use crate::render;

/// Which workshop listing to fetch
pub enum WorkshopFilter<'a> {
    All {
        q: Option<&'a str>,
        category_id: Option<i32>,
    },
    Featured,
    Weekend,
}

fn print_workshops(workshops: &[Workshop]) {
    if workshops.is_empty() {
        println!("No workshops found.");
        return;
    }
    for workshop in workshops {
        println!("{}", render::workshop_line(workshop));
    }
}

/// List all categories
pub async fn categories(api: &str) -> Result<()> {
    let client = ApiClient::new(api)?;
    for category in client.categories().await? {
        println!("{}", render::category_line(&category));
    }
    Ok(())
}

/// Show one category and its workshops
pub async fn category(api: &str, id: i32) -> Result<()> {
    let client = ApiClient::new(api)?;
    let category = client.category(id).await?;
    let workshops = client.category_workshops(id).await?;

    println!("{}", render::category_line(&category));
    if let Some(description) = &category.description {
        println!("{description}");
    }
    println!();
    print_workshops(&workshops);
    Ok(())
}

/// List workshops, optionally filtered
pub async fn workshops(api: &str, filter: WorkshopFilter<'_>) -> Result<()> {
    let client = ApiClient::new(api)?;
    let workshops = match filter {
        WorkshopFilter::All { q, category_id } => client.workshops(q, category_id).await?,
        WorkshopFilter::Featured => client.featured_workshops().await?,
        WorkshopFilter::Weekend => client.weekend_workshops().await?,
    };
    print_workshops(&workshops);
    Ok(())
}

/// Show a workshop with its category and host
pub async fn workshop(api: &str, id: i32) -> Result<()> {
    let client = ApiClient::new(api)?;
    let workshop = client.workshop(id).await?;

    // The detail view still renders when a related record is missing
    let category = client
        .category(workshop.category_id)
        .await
        .inspect_err(|e| tracing::debug!("Category lookup failed: {}", e))
        .ok();
    let host = client
        .host(workshop.host_id)
        .await
        .inspect_err(|e| tracing::debug!("Host lookup failed: {}", e))
        .ok();

    let related = client
        .category_workshops(workshop.category_id)
        .await
        .inspect_err(|e| tracing::debug!("Similar workshops lookup failed: {}", e))
        .unwrap_or_default();

    println!(
        "{}",
        render::workshop_detail(&workshop, category.as_ref(), host.as_ref())
    );
    if let Some(similar) = render::similar_section(&workshop, &related) {
        println!("\n{similar}");
    }
    Ok(())
}

/// List hosts
pub async fn hosts(api: &str) -> Result<()> {
    let client = ApiClient::new(api)?;
    for host in client.hosts().await? {
        println!("{}\n", render::host_card(&host));
    }
    Ok(())
}

/// Show one host
pub async fn host(api: &str, id: i32) -> Result<()> {
    let client = ApiClient::new(api)?;
    let host = client.host(id).await?;
    println!("{}", render::host_card(&host));
    Ok(())
}

/// List testimonials
pub async fn testimonials(api: &str) -> Result<()> {
    let client = ApiClient::new(api)?;
    for testimonial in client.testimonials().await? {
        println!("{}\n", render::testimonial_block(&testimonial));
    }
    Ok(())
}
