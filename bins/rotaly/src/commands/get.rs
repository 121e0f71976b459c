//! Get command - fetch one row by id

use crate::output::print_one;
use crate::{OutputFormat, Resource};
use anyhow::Result;
use rotaly_api_client::RotalyClient;

/// Fetch and print the row with `id`
pub async fn run(
    client: &RotalyClient,
    resource: Resource,
    id: &str,
    format: OutputFormat,
) -> Result<()> {
    let configured = client.is_configured();
    match resource {
        Resource::Bookings => {
            let row = client.bookings().get(id).await;
            print_one(resource, id, row.as_ref(), format, configured)
        }
        Resource::Properties => {
            let row = client.properties().get(id).await;
            print_one(resource, id, row.as_ref(), format, configured)
        }
        Resource::Users => {
            let row = client.users().get(id).await;
            print_one(resource, id, row.as_ref(), format, configured)
        }
        Resource::Applications => {
            let row = client.hotel_applications().get(id).await;
            print_one(resource, id, row.as_ref(), format, configured)
        }
        Resource::Tickets => {
            let row = client.support_tickets().get(id).await;
            print_one(resource, id, row.as_ref(), format, configured)
        }
        Resource::Reviews => {
            let row = client.reviews().get(id).await;
            print_one(resource, id, row.as_ref(), format, configured)
        }
    }
}
