//! Main API client implementation
//!
//! Three layers live here:
//!
//! - [`RotalyClient::request`]: one HTTP exchange, or an immediate
//!   [`ApiError::NotConfigured`] when credentials are absent
//! - [`RotalyClient::select`] / [`RotalyClient::select_rows`]: list reads that
//!   collapse every response shape into a `Vec`
//! - [`RotalyClient::insert`] / [`RotalyClient::update`]: writes that unwrap
//!   the returned representation into a single record

use crate::config::ClientConfig;
use crate::endpoints::{
    BookingsApi, HotelApplicationsApi, PropertiesApi, ReviewsApi, SupportTicketsApi, UsersApi,
};
use crate::error::{ApiError, ApiResult, ErrorContext};
use crate::payload::Payload;
use crate::query::{row_path, SelectQuery};
use crate::transport::{HttpMethod, HttpRequest, ReqwestTransport, Transport};
use rotaly_telemetry::{metrics, Timer};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// API key header for Supabase
const APIKEY_HEADER: &str = "apikey";

/// Asks PostgREST to return the affected rows after a write
const PREFER_HEADER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Client for the Rotaly PostgREST backend
///
/// Construct one at startup and pass it (or clones of it) to whoever needs
/// backend access; clones share configuration and transport.
#[derive(Clone)]
pub struct RotalyClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl RotalyClient {
    /// Create a client from environment configuration
    pub fn new() -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Create a client with specific configuration and the `reqwest` transport
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        })
    }

    /// Create a client with specific configuration and transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether requests will reach the network
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Resolve a resource path against the REST base URL
    ///
    /// Absolute `http(s)://` URLs pass through unchanged. Returns `None` for
    /// relative paths when no URL is configured.
    #[must_use]
    pub fn resolve_url(&self, path: &str) -> Option<String> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        self.config
            .rest_url()
            .map(|base| format!("{base}/{}", path.trim_start_matches('/')))
    }

    // -------------------------------------------------------------------------
    // Resource accessors
    // -------------------------------------------------------------------------

    /// Access bookings and booking payments
    #[must_use]
    pub fn bookings(&self) -> BookingsApi {
        BookingsApi::new(self.clone())
    }

    /// Access properties
    #[must_use]
    pub fn properties(&self) -> PropertiesApi {
        PropertiesApi::new(self.clone())
    }

    /// Access user profiles
    #[must_use]
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Access hotel owner applications
    #[must_use]
    pub fn hotel_applications(&self) -> HotelApplicationsApi {
        HotelApplicationsApi::new(self.clone())
    }

    /// Access support tickets
    #[must_use]
    pub fn support_tickets(&self) -> SupportTicketsApi {
        SupportTicketsApi::new(self.clone())
    }

    /// Access reviews
    #[must_use]
    pub fn reviews(&self) -> ReviewsApi {
        ReviewsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Request executor
    // -------------------------------------------------------------------------

    /// Perform one HTTP exchange
    ///
    /// Returns `Ok(None)` for an empty (or `null`) success body. Non-2xx
    /// statuses become [`ApiError::ApiResponse`] carrying the body text.
    /// There is no retry: a failure is reported as soon as it happens.
    #[instrument(skip(self, body, extra_headers), fields(request_id))]
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        extra_headers: &[(&str, &str)],
    ) -> ApiResult<Option<Value>> {
        let (Some(url), Some(anon_key)) = (self.configured_url(path), self.configured_key())
        else {
            metrics().increment("rest.not_configured");
            debug!(path = %path, "Backend not configured, skipping request");
            return Err(ApiError::NotConfigured);
        };

        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let request = HttpRequest {
            method,
            url,
            headers: merge_headers(&request_id, anon_key, extra_headers),
            body,
        };
        let ctx = ErrorContext {
            request_id,
            endpoint: path.to_string(),
            method: method.to_string(),
        };

        metrics().increment("rest.requests");
        let timer = Timer::start("rest.latency_ms");
        let result = self.transport.send(request).await;
        let elapsed = timer.stop();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                metrics().increment("rest.errors");
                warn!(context = %ctx, error = %e, "Request failed");
                return Err(e);
            }
        };

        if !response.is_success() {
            metrics().increment("rest.errors");
            warn!(
                context = %ctx,
                status = response.status,
                elapsed_ms = elapsed.as_millis(),
                "Backend returned an error status"
            );
            return Err(ApiError::api_response(response.status, response.body));
        }

        debug!(
            context = %ctx,
            status = response.status,
            elapsed_ms = elapsed.as_millis(),
            "Request succeeded"
        );

        if response.body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(&response.body) {
            Ok(Value::Null) => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                metrics().increment("rest.errors");
                warn!(context = %ctx, error = %e, "Malformed response body");
                Err(ApiError::Json(e))
            }
        }
    }

    fn configured_url(&self, path: &str) -> Option<String> {
        if self.is_configured() {
            self.resolve_url(path)
        } else {
            None
        }
    }

    fn configured_key(&self) -> Option<&str> {
        self.config.anon_key.as_deref().filter(|k| !k.is_empty())
    }

    // -------------------------------------------------------------------------
    // Table helpers
    // -------------------------------------------------------------------------

    /// Read rows, reporting failures
    ///
    /// A single-object body becomes a one-element list and an empty body an
    /// empty list. Rows that do not decode into `T` fail the whole call.
    pub async fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &SelectQuery,
    ) -> ApiResult<Vec<T>> {
        let data = self
            .request(HttpMethod::Get, &query.to_path(table), None, &[])
            .await?;
        decode_rows(data)
    }

    /// Read rows, treating every failure as "no rows"
    ///
    /// Suited to callers that render either data or an empty state. Use
    /// [`select_rows`](Self::select_rows) to tell an unreachable backend apart
    /// from an empty table.
    pub async fn select<T: DeserializeOwned>(&self, table: &str, query: &SelectQuery) -> Vec<T> {
        match self.select_rows(table, query).await {
            Ok(rows) => rows,
            Err(e) if e.is_not_configured() => Vec::new(),
            Err(e) => {
                debug!(table = %table, error = %e, "Select failed, returning no rows");
                Vec::new()
            }
        }
    }

    /// Create a row and return the stored representation
    ///
    /// The payload is validated first; an invalid payload is never sent.
    pub async fn insert<T, P>(&self, table: &str, payload: &P) -> ApiResult<Option<T>>
    where
        T: DeserializeOwned,
        P: Payload,
    {
        let body = prepare_body(table, payload)?;
        let data = self
            .request(
                HttpMethod::Post,
                table,
                Some(body),
                &[(PREFER_HEADER, RETURN_REPRESENTATION)],
            )
            .await?;
        decode_single(data)
    }

    /// Patch the row with the given id and return its new representation
    ///
    /// Only the fields present in the payload are sent; the backend decides
    /// which of them may change.
    pub async fn update<T, P>(&self, table: &str, id: &str, payload: &P) -> ApiResult<Option<T>>
    where
        T: DeserializeOwned,
        P: Payload,
    {
        let body = prepare_body(table, payload)?;
        let data = self
            .request(
                HttpMethod::Patch,
                &row_path(table, id),
                Some(body),
                &[(PREFER_HEADER, RETURN_REPRESENTATION)],
            )
            .await?;
        decode_single(data)
    }
}

/// Standard headers first, caller headers replace same-named ones
fn merge_headers(
    request_id: &str,
    anon_key: &str,
    extra: &[(&str, &str)],
) -> Vec<(String, String)> {
    let mut headers = vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        (APIKEY_HEADER.to_string(), anon_key.to_string()),
        ("Authorization".to_string(), format!("Bearer {anon_key}")),
        (X_REQUEST_ID.to_string(), request_id.to_string()),
    ];
    for (name, value) in extra {
        headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        headers.push(((*name).to_string(), (*value).to_string()));
    }
    headers
}

fn prepare_body<P: Payload>(table: &str, payload: &P) -> ApiResult<Value> {
    payload
        .validate()
        .to_result()
        .map_err(|e| ApiError::Validation(e.with_context(format!("payload for `{table}`"))))?;
    Ok(serde_json::to_value(payload)?)
}

fn decode_rows<T: DeserializeOwned>(data: Option<Value>) -> ApiResult<Vec<T>> {
    match data {
        None => Ok(Vec::new()),
        Some(rows @ Value::Array(_)) => Ok(serde_json::from_value(rows)?),
        Some(row) => Ok(vec![serde_json::from_value(row)?]),
    }
}

fn decode_single<T: DeserializeOwned>(data: Option<Value>) -> ApiResult<Option<T>> {
    let row = match data {
        Some(Value::Array(rows)) => rows.into_iter().next(),
        other => other,
    };
    match row {
        None | Some(Value::Null) => Ok(None),
        Some(row) => Ok(Some(serde_json::from_value(row)?)),
    }
}
