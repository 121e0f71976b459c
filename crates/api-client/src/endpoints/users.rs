//! Users API endpoints

use super::{find_by_id, written, Record};
use crate::client::RotalyClient;
use crate::payload::Payload;
use crate::query::SelectQuery;
use chrono::{DateTime, Utc};
use rotaly_core::validation::{ValidationResult, Validator};
use serde::{Deserialize, Serialize};

const USERS: &str = "users";

/// Default number of newest users fetched by [`UsersApi::list`]
pub const DEFAULT_LIMIT: u32 = 100;

/// Users API interface
#[derive(Clone)]
pub struct UsersApi {
    client: RotalyClient,
}

impl UsersApi {
    pub(crate) fn new(client: RotalyClient) -> Self {
        Self { client }
    }

    /// List the newest users, then keep those matching the filter
    ///
    /// The role is checked after the fetch, so users older than the
    /// `limit` newest rows never appear even when their role matches.
    pub async fn list(&self, filter: &UserFilter) -> Vec<User> {
        let query = SelectQuery::newest_first().limit(filter.limit.unwrap_or(DEFAULT_LIMIT));
        self.client
            .select::<User>(USERS, &query)
            .await
            .into_iter()
            .filter(|u| filter.role.is_none_or(|r| r == u.role))
            .collect()
    }

    /// Get a single user by ID
    pub async fn get(&self, id: &str) -> Option<User> {
        find_by_id(&self.client, USERS, id).await
    }

    /// Profile of the signed-in user
    ///
    /// Sessions are owned by the auth service; pass the id it reports.
    /// Returns `None` when nobody is signed in.
    pub async fn current(&self, auth_user_id: Option<&str>) -> Option<User> {
        match auth_user_id {
            Some(id) => self.get(id).await,
            None => None,
        }
    }

    /// Update a user profile
    pub async fn update(&self, id: &str, patch: &UserPatch) -> Option<User> {
        written(USERS, self.client.update(USERS, id, patch).await)
    }

    /// Set or clear the forced password change flag
    ///
    /// Returns whether the backend acknowledged the write with a row.
    pub async fn set_must_change_password(&self, id: &str, must_change: bool) -> bool {
        let patch = UserPatch {
            must_change_password: Some(must_change),
            ..UserPatch::default()
        };
        self.update(id, &patch).await.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    HotelOwner,
    Admin,
    Support,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredLanguage {
    Tr,
    En,
}

/// User profile row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub preferred_language: PreferredLanguage,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub is_active: bool,
    pub must_change_password: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Client-side narrowing for [`UsersApi::list`]
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub limit: Option<u32>,
}

impl UserFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Partial profile update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<PreferredLanguage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub must_change_password: Option<bool>,
}

impl Payload for UserPatch {
    fn validate(&self) -> ValidationResult {
        let mut v = Validator::new();
        if let Some(name) = &self.full_name {
            v = v.required("full_name", name).max_length("full_name", name, 120);
        }
        if let Some(phone) = &self.phone {
            v = v.max_length("phone", phone, 32);
        }
        v.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{configured_client, user_row, MockTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_filters_role() {
        let rows = json!([
            user_row("u1", "customer", 9),
            user_row("u2", "admin", 8),
            user_row("u3", "hotel_owner", 7),
        ]);
        let mock = MockTransport::replying_json(200, &rows);
        let client = configured_client(&mock);

        let owners = client
            .users()
            .list(&UserFilter::new().with_role(UserRole::HotelOwner))
            .await;
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].id, "u3");
        assert!(mock.last_request().unwrap().url.contains("limit=100"));
    }

    #[tokio::test]
    async fn test_current_without_session() {
        let mock = MockTransport::replying_json(200, &json!([user_row("u1", "admin", 1)]));
        let client = configured_client(&mock);

        assert!(client.users().current(None).await.is_none());
        assert_eq!(mock.calls(), 0);

        let me = client.users().current(Some("u1")).await.unwrap();
        assert_eq!(me.role, UserRole::Admin);
        assert_eq!(me.preferred_language, PreferredLanguage::Tr);
    }

    #[tokio::test]
    async fn test_set_must_change_password() {
        let mut row = user_row("u1", "support", 1);
        row["must_change_password"] = json!(true);
        let mock = MockTransport::replying_json(200, &json!([row]));
        let client = configured_client(&mock);

        assert!(client.users().set_must_change_password("u1", true).await);

        let request = mock.last_request().unwrap();
        assert_eq!(request.method.as_str(), "PATCH");
        assert!(request.url.ends_with("/users?id=eq.u1"));
        assert_eq!(request.body, Some(json!({"must_change_password": true})));
    }

    #[tokio::test]
    async fn test_set_must_change_password_reports_failure() {
        let mock = MockTransport::replying(404, "");
        let client = configured_client(&mock);

        assert!(!client.users().set_must_change_password("nobody", false).await);
    }

    #[test]
    fn test_patch_rejects_blank_name() {
        let patch = UserPatch {
            full_name: Some("  ".to_string()),
            ..UserPatch::default()
        };
        assert!(!patch.validate().is_valid());
        assert!(UserPatch::default().validate().is_valid());
    }
}
