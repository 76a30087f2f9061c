//! Booking and waitlist commands

use anyhow::Result;
use reqwest::StatusCode;

use crate::client::{ApiClient, failure_status};
use crate::render;

/// Book one spot on a workshop
pub async fn book(api: &str, id: i32) -> Result<()> {
    let client = ApiClient::new(api)?;

    match client.book(id).await {
        Ok(workshop) => {
            println!("Workshop booked successfully: \"{}\"", workshop.title);
            println!("Check your email for confirmation details.");
            println!("{}", render::availability_badge(&workshop));
            Ok(())
        }
        Err(e) if failure_status(&e) == Some(StatusCode::CONFLICT) => {
            println!("Booking failed: this workshop is fully booked.");
            println!("Run `toolshed waitlist {id}` to join the waitlist.");
            Err(e)
        }
        Err(e) => Err(e),
    }
}

/// Join the waitlist for a workshop
pub async fn waitlist(api: &str, id: i32) -> Result<()> {
    let client = ApiClient::new(api)?;
    let workshop = client.workshop(id).await?;

    // Waitlist requests are acknowledged locally; nothing is stored server-side
    tracing::warn!("Waitlist entries are not persisted");

    println!("Added to waitlist for \"{}\"!", workshop.title);
    println!("We'll notify you if a spot becomes available.");
    Ok(())
}
