//! Support ticket endpoints
//!
//! New tickets always open with status `open`; priority defaults to
//! `medium` when the reporter does not choose one.

use super::{find_by_id, written, Record};
use crate::client::RotalyClient;
use crate::payload::Payload;
use crate::query::SelectQuery;
use chrono::{DateTime, Utc};
use rotaly_core::validation::{ValidationResult, Validator};
use serde::{Deserialize, Serialize};

const SUPPORT_TICKETS: &str = "support_tickets";

pub const DEFAULT_LIMIT: u32 = 100;

/// Support tickets API interface
#[derive(Clone)]
pub struct SupportTicketsApi {
    client: RotalyClient,
}

impl SupportTicketsApi {
    pub(crate) fn new(client: RotalyClient) -> Self {
        Self { client }
    }

    /// List the newest tickets matching every set filter field
    pub async fn list(&self, filter: &TicketFilter) -> Vec<SupportTicket> {
        let query = SelectQuery::newest_first().limit(filter.limit.unwrap_or(DEFAULT_LIMIT));
        self.client
            .select::<SupportTicket>(SUPPORT_TICKETS, &query)
            .await
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect()
    }

    pub async fn get(&self, id: &str) -> Option<SupportTicket> {
        find_by_id(&self.client, SUPPORT_TICKETS, id).await
    }

    /// Open a ticket
    pub async fn create(&self, ticket: &NewSupportTicket) -> Option<SupportTicket> {
        let payload = TicketInsert {
            ticket,
            status: TicketStatus::Open,
            priority: ticket.priority.unwrap_or(TicketPriority::Medium),
        };
        written(
            SUPPORT_TICKETS,
            self.client.insert(SUPPORT_TICKETS, &payload).await,
        )
    }

    /// Reassign, reprioritise or move a ticket along
    pub async fn update(&self, id: &str, patch: &SupportTicketPatch) -> Option<SupportTicket> {
        written(
            SUPPORT_TICKETS,
            self.client.update(SUPPORT_TICKETS, id, patch).await,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Support ticket row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: String,
    pub ticket_number: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub booking_id: Option<String>,
    pub subject: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub assigned_to: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for SupportTicket {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Client-side narrowing for [`SupportTicketsApi::list`]
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub user_id: Option<String>,
    pub assigned_to: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub limit: Option<u32>,
}

impl TicketFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_assignee(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = Some(assigned_to.into());
        self
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, ticket: &SupportTicket) -> bool {
        self.user_id.as_ref().is_none_or(|u| *u == ticket.user_id)
            && self
                .assigned_to
                .as_ref()
                .is_none_or(|a| ticket.assigned_to.as_ref() == Some(a))
            && self.status.is_none_or(|s| s == ticket.status)
            && self.priority.is_none_or(|p| p == ticket.priority)
    }
}

/// What a reporter submits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupportTicket {
    pub user_id: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(skip)]
    pub priority: Option<TicketPriority>,
}

impl NewSupportTicket {
    fn check(&self) -> ValidationResult {
        Validator::new()
            .required("user_id", &self.user_id)
            .required("subject", &self.subject)
            .max_length("subject", &self.subject, 200)
            .validate()
    }
}

#[derive(Serialize)]
struct TicketInsert<'a> {
    #[serde(flatten)]
    ticket: &'a NewSupportTicket,
    status: TicketStatus,
    priority: TicketPriority,
}

impl Payload for TicketInsert<'_> {
    fn validate(&self) -> ValidationResult {
        self.ticket.check()
    }
}

/// Partial ticket update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupportTicketPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

impl Payload for SupportTicketPatch {
    fn validate(&self) -> ValidationResult {
        let mut v = Validator::new();
        if let Some(subject) = &self.subject {
            v = v.required("subject", subject).max_length("subject", subject, 200);
        }
        v.validate()
    }
}
