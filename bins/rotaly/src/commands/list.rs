//! List command - newest rows of a table, narrowed client-side

use crate::output::print_rows;
use crate::{OutputFormat, Resource};
use anyhow::{bail, Context, Result};
use clap::Args;
use rotaly_api_client::endpoints::bookings::BookingFilter;
use rotaly_api_client::endpoints::hotel_applications::ApplicationFilter;
use rotaly_api_client::endpoints::properties::PropertyFilter;
use rotaly_api_client::endpoints::support_tickets::TicketFilter;
use rotaly_api_client::endpoints::users::UserFilter;
use rotaly_api_client::RotalyClient;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Filters accepted by `rotaly list`; each table uses the ones it knows
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Newest rows to fetch before filtering
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Status (bookings, applications, tickets)
    #[arg(short, long)]
    pub status: Option<String>,

    /// User id (bookings, tickets)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Property id (bookings, reviews)
    #[arg(short, long)]
    pub property: Option<String>,

    /// Owner id (properties)
    #[arg(long)]
    pub owner: Option<String>,

    /// City, case-insensitive (properties)
    #[arg(long)]
    pub city: Option<String>,

    /// Property type (properties)
    #[arg(long = "type")]
    pub property_type: Option<String>,

    /// Role (users)
    #[arg(long)]
    pub role: Option<String>,

    /// Assignee id (tickets)
    #[arg(long)]
    pub assignee: Option<String>,

    /// Priority (tickets)
    #[arg(long)]
    pub priority: Option<String>,
}

/// Parse a flag value by its wire name, e.g. `in_progress`
fn parse<T: DeserializeOwned>(flag: &str, value: Option<&str>) -> Result<Option<T>> {
    value
        .map(|v| {
            serde_json::from_value(serde_json::Value::String(v.to_string()))
                .with_context(|| format!("invalid --{flag} value `{v}`"))
        })
        .transpose()
}

/// Fetch and print rows of `resource`
pub async fn run(
    client: &RotalyClient,
    resource: Resource,
    args: &ListArgs,
    format: OutputFormat,
) -> Result<()> {
    let configured = client.is_configured();
    debug!(table = resource.table(), ?args, configured, "Listing rows");

    match resource {
        Resource::Bookings => {
            let filter = BookingFilter {
                user_id: args.user.clone(),
                property_id: args.property.clone(),
                status: parse("status", args.status.as_deref())?,
                limit: args.limit,
            };
            let rows = client.bookings().list(&filter).await;
            print_rows(resource, &rows, format, configured)
        }
        Resource::Properties => {
            let rows = match &args.owner {
                Some(owner) => client.properties().by_owner(owner).await,
                None => {
                    let filter = PropertyFilter {
                        city: args.city.clone(),
                        property_type: parse("type", args.property_type.as_deref())?,
                        limit: args.limit,
                    };
                    client.properties().list(&filter).await
                }
            };
            print_rows(resource, &rows, format, configured)
        }
        Resource::Users => {
            let filter = UserFilter {
                role: parse("role", args.role.as_deref())?,
                limit: args.limit,
            };
            let rows = client.users().list(&filter).await;
            print_rows(resource, &rows, format, configured)
        }
        Resource::Applications => {
            let filter = ApplicationFilter {
                status: parse("status", args.status.as_deref())?,
                limit: args.limit,
            };
            let rows = client.hotel_applications().list(&filter).await;
            print_rows(resource, &rows, format, configured)
        }
        Resource::Tickets => {
            let filter = TicketFilter {
                user_id: args.user.clone(),
                assigned_to: args.assignee.clone(),
                status: parse("status", args.status.as_deref())?,
                priority: parse("priority", args.priority.as_deref())?,
                limit: args.limit,
            };
            let rows = client.support_tickets().list(&filter).await;
            print_rows(resource, &rows, format, configured)
        }
        Resource::Reviews => {
            let Some(property) = &args.property else {
                bail!("listing reviews needs --property <id>");
            };
            let rows = client.reviews().by_property(property).await;
            print_rows(resource, &rows, format, configured)
        }
    }
}
