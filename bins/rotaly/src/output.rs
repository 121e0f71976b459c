//! Text and JSON rendering of backend rows

use crate::{OutputFormat, Resource};
use anyhow::Result;
use owo_colors::OwoColorize;
use rotaly_api_client::endpoints::bookings::Booking;
use rotaly_api_client::endpoints::hotel_applications::HotelApplication;
use rotaly_api_client::endpoints::properties::Property;
use rotaly_api_client::endpoints::reviews::Review;
use rotaly_api_client::endpoints::support_tickets::SupportTicket;
use rotaly_api_client::endpoints::users::User;
use serde::Serialize;

/// One-line text rendering of a row
pub trait Summary {
    fn id(&self) -> &str;
    fn summary(&self) -> String;
}

/// Wire name of a serde enum value, e.g. `pay_at_property`
fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => "-".to_string(),
    }
}

impl Summary for Booking {
    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        format!(
            "{}  {}  {} -> {}  {}  {:.2} {}",
            self.booking_number,
            label(&self.status),
            self.check_in_date,
            self.check_out_date,
            self.guest_name,
            self.total_price,
            self.currency
        )
    }
}

impl Summary for Property {
    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        let stars = self.star_rating.map(|s| format!("{s}*")).unwrap_or_default();
        format!(
            "{}  {} {}  {}, {}  {:.1} ({} reviews)",
            self.slug,
            label(&self.property_type),
            stars,
            self.city,
            self.country,
            self.avg_rating,
            self.review_count
        )
    }
}

impl Summary for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        format!(
            "{}  {}  {}{}",
            self.email,
            label(&self.role),
            self.full_name.as_deref().unwrap_or("-"),
            if self.is_active { "" } else { "  (inactive)" }
        )
    }
}

impl Summary for HotelApplication {
    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        format!(
            "{}  {}  {}  {}, {}",
            self.application_number,
            label(&self.status),
            self.business_name,
            self.city,
            self.country
        )
    }
}

impl Summary for SupportTicket {
    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        format!(
            "{}  {}/{}  {}",
            self.ticket_number,
            label(&self.status),
            label(&self.priority),
            self.subject
        )
    }
}

impl Summary for Review {
    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        format!(
            "{}/5  {}  {}",
            self.overall_rating,
            self.title.as_deref().unwrap_or("-"),
            if self.is_featured { "featured" } else { "" }
        )
    }
}

fn empty_state(resource: Resource, configured: bool) {
    if configured {
        println!("  {}", format!("No {} found", resource.table()).dimmed());
    } else {
        println!(
            "  {} {}",
            format!("No {}:", resource.table()).dimmed(),
            "backend not configured (set SUPABASE_URL and SUPABASE_ANON_KEY)".yellow()
        );
    }
}

/// Print a list of rows
pub fn print_rows<T: Serialize + Summary>(
    resource: Resource,
    rows: &[T],
    format: OutputFormat,
    configured: bool,
) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        empty_state(resource, configured);
        return Ok(());
    }

    println!();
    println!("  {} ({})", resource.table().blue().bold(), rows.len());
    for row in rows {
        println!("  {}  {}", row.id().dimmed(), row.summary());
    }
    println!();
    Ok(())
}

/// Print a single row, or note its absence
pub fn print_one<T: Serialize + Summary>(
    resource: Resource,
    id: &str,
    row: Option<&T>,
    format: OutputFormat,
    configured: bool,
) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&row)?);
        return Ok(());
    }

    match row {
        Some(row) => {
            println!("  {}  {}", row.id().dimmed(), row.summary());
            println!("{}", serde_json::to_string_pretty(row)?);
        }
        None if configured => {
            println!("  {}", format!("No {} row with id {id}", resource.table()).dimmed());
        }
        None => empty_state(resource, configured),
    }
    Ok(())
}
