//! PostgREST select descriptors
//!
//! A [`SelectQuery`] serialises to `select=…&order=…&limit=…` followed by the
//! raw filters in insertion order. Filter values are passed through in
//! PostgREST operator syntax (`eq.`, `gt.`, `in.(…)`); this module does not
//! interpret them.

use url::form_urlencoded;

/// Projection, ordering, limit and filters for one select call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    /// Column projection, e.g. `*` or `id,city`
    pub select: Option<String>,
    /// Ordering, e.g. `created_at.desc`
    pub order: Option<String>,
    /// Maximum rows
    pub limit: Option<u32>,
    /// Raw `column → operator.value` pairs
    pub filters: Vec<(String, String)>,
}

impl SelectQuery {
    /// Empty descriptor: every column, backend order, no limit
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `select=*&order=created_at.desc`, the shape every list getter uses
    #[must_use]
    pub fn newest_first() -> Self {
        Self::new().columns("*").order("created_at.desc")
    }

    /// Set the column projection
    #[must_use]
    pub fn columns(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    /// Set the ordering
    #[must_use]
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Set the row limit
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Add a raw filter; a later filter on the same column replaces the earlier one
    #[must_use]
    pub fn filter(mut self, column: impl Into<String>, expr: impl Into<String>) -> Self {
        let column = column.into();
        let expr = expr.into();
        if let Some(slot) = self.filters.iter_mut().find(|(c, _)| *c == column) {
            slot.1 = expr;
        } else {
            self.filters.push((column, expr));
        }
        self
    }

    /// Equality filter, `column=eq.value`
    #[must_use]
    pub fn eq(self, column: impl Into<String>, value: impl AsRef<str>) -> Self {
        let expr = format!("eq.{}", value.as_ref());
        self.filter(column, expr)
    }

    /// Serialise into a query string without the leading `?`
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(select) = self.select.as_deref().filter(|s| !s.is_empty()) {
            serializer.append_pair("select", select);
        }
        if let Some(order) = self.order.as_deref().filter(|s| !s.is_empty()) {
            serializer.append_pair("order", order);
        }
        if let Some(limit) = self.limit {
            serializer.append_pair("limit", &limit.to_string());
        }
        for (column, expr) in &self.filters {
            serializer.append_pair(column, expr);
        }
        serializer.finish()
    }

    /// `table` or `table?<query>` when any parameter is set
    #[must_use]
    pub fn to_path(&self, table: &str) -> String {
        let qs = self.to_query_string();
        if qs.is_empty() {
            table.to_string()
        } else {
            format!("{table}?{qs}")
        }
    }
}

/// Path that targets a single row by id, `table?id=eq.<id>`
#[must_use]
pub fn row_path(table: &str, id: &str) -> String {
    SelectQuery::new().eq("id", id).to_path(table)
}
