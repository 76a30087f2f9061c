//! Plain-text rendering of catalog records

use toolshed_core::{Category, Host, Testimonial, Workshop};

/// Whole-dollar price with thousands separators, e.g. `$1,250`
pub fn format_currency(amount: f32) -> String {
    let dollars = amount.round() as i64;
    let digits = dollars.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if dollars < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Cut `text` to `max_len` characters, marking the cut with `...`
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_len).collect();
    format!("{kept}...")
}

/// Star counts for a rating out of five
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    /// Filled stars
    pub full: u32,
    /// Half star (0 or 1)
    pub half: u32,
    /// Empty stars
    pub empty: u32,
}

impl StarRating {
    /// Round down to half stars, clamped to `0..=5`
    pub fn new(rating: f32) -> Self {
        let rating = rating.clamp(0.0, 5.0);
        let full = rating.floor() as u32;
        let half = u32::from(rating.fract() >= 0.5);
        Self {
            full,
            half,
            empty: 5 - full - half,
        }
    }
}

impl std::fmt::Display for StarRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stars = "★".repeat(self.full as usize)
            + &"½".repeat(self.half as usize)
            + &"☆".repeat(self.empty as usize);
        f.write_str(&stars)
    }
}

fn spots(n: i32) -> String {
    if n == 1 {
        "1 spot".to_string()
    } else {
        format!("{n} spots")
    }
}

/// Short availability badge
pub fn availability_badge(workshop: &Workshop) -> String {
    if workshop.is_available {
        format!("{} left", spots(workshop.available_spots))
    } else {
        "Fully Booked".to_string()
    }
}

/// Availability line for the detail view
pub fn capacity_line(workshop: &Workshop) -> String {
    if workshop.is_available {
        format!(
            "{} left out of {}",
            spots(workshop.available_spots),
            workshop.total_spots
        )
    } else {
        format!("0 spots left ({} capacity)", workshop.total_spots)
    }
}

/// One line per category
pub fn category_line(category: &Category) -> String {
    format!(
        "#{:<3} {:<14} {:<16} {} workshops",
        category.id, category.icon, category.name, category.workshop_count
    )
}

/// One line per workshop in a listing
pub fn workshop_line(workshop: &Workshop) -> String {
    let distance = workshop
        .distance
        .map(|d| format!(" ({d:.1} mi)"))
        .unwrap_or_default();
    format!(
        "#{:<3} {:<28} {:>5}  {} {}  {}{}  [{}]",
        workshop.id,
        truncate_text(&workshop.title, 28),
        format_currency(workshop.price),
        workshop.formatted_date,
        workshop.formatted_time,
        workshop.location,
        distance,
        availability_badge(workshop)
    )
}

/// Host summary block
pub fn host_card(host: &Host) -> String {
    let mut out = format!(
        "{}\n{} {:.1} ({} reviews)",
        host.name,
        StarRating::new(host.rating),
        host.rating,
        host.review_count
    );
    if let Some(description) = &host.description {
        out.push('\n');
        out.push_str(description);
    }
    out
}

/// Full workshop detail view
pub fn workshop_detail(
    workshop: &Workshop,
    category: Option<&Category>,
    host: Option<&Host>,
) -> String {
    let mut lines = vec![
        workshop.title.clone(),
        "=".repeat(workshop.title.chars().count()),
        workshop.description.clone(),
        String::new(),
        format!("Price:     {}", format_currency(workshop.price)),
        format!(
            "When:      {} ({} - {})",
            workshop.formatted_date, workshop.start_time, workshop.end_time
        ),
        format!("Where:     {}", workshop.location),
    ];
    if let Some(distance) = workshop.distance {
        lines.push(format!("Distance:  {distance:.1} miles"));
    }
    if let Some(category) = category {
        lines.push(format!("Category:  {}", category.name));
    }
    lines.push(format!("Spots:     {}", capacity_line(workshop)));
    if let Some(host) = host {
        lines.push(String::new());
        lines.push("Hosted by".to_string());
        lines.push(host_card(host));
    }
    lines.join("\n")
}

/// Maximum number of entries in the "Similar workshops" block
pub const SIMILAR_LIMIT: usize = 3;

/// Other workshops from the same category listing, current one excluded
pub fn similar_workshops<'a>(
    current: &Workshop,
    category_workshops: &'a [Workshop],
) -> Vec<&'a Workshop> {
    category_workshops
        .iter()
        .filter(|w| w.id != current.id)
        .take(SIMILAR_LIMIT)
        .collect()
}

/// "Similar workshops" block, or `None` when there is nothing to suggest
pub fn similar_section(current: &Workshop, category_workshops: &[Workshop]) -> Option<String> {
    let similar = similar_workshops(current, category_workshops);
    if similar.is_empty() {
        return None;
    }
    let mut lines = vec!["Similar workshops".to_string(), "-".repeat(17)];
    lines.extend(similar.into_iter().map(workshop_line));
    Some(lines.join("\n"))
}

/// Testimonial quote block
pub fn testimonial_block(testimonial: &Testimonial) -> String {
    format!(
        "{} \"{}\"\n    - {} ({}), {}",
        StarRating::new(testimonial.rating as f32),
        testimonial.content,
        testimonial.name,
        testimonial.initials,
        testimonial.location
    )
}
