use serde::{Deserialize, Serialize};

use crate::client_identity::ClientToken;
use crate::ids::CategoryId;

/// Page size used by the list views.
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// View discriminator understood by the list and export endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketView {
    Open,
    Answered,
}

impl TicketView {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketView::Open => "open",
            TicketView::Answered => "answered",
        }
    }
}

impl std::str::FromStr for TicketView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(TicketView::Open),
            "answered" => Ok(TicketView::Answered),
            other => Err(format!("unknown ticket view: {other}")),
        }
    }
}

/// Filters shared by the list and export operations.
///
/// Empty strings are treated as "no filter", matching what the list views
/// send when an input box is cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<CategoryId>,
    pub request_category: Option<String>,
    pub view: Option<TicketView>,
}

impl TicketFilter {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_view(mut self, view: TicketView) -> Self {
        self.view = Some(view);
        self
    }

    /// Query string pairs for the non-empty filters, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_non_empty(&mut pairs, "search", self.search.as_deref());
        push_non_empty(&mut pairs, "status", self.status.as_deref());
        if let Some(category_id) = self.category_id {
            pairs.push(("category_id", category_id.to_string()));
        }
        push_non_empty(
            &mut pairs,
            "request_category",
            self.request_category.as_deref(),
        );
        if let Some(view) = self.view {
            pairs.push(("view", view.as_str().to_string()));
        }
        pairs
    }
}

fn push_non_empty(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        pairs.push((key, value.to_string()));
    }
}

/// A list request: filters, pagination and the optional client scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketQuery {
    pub filter: TicketFilter,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub client_token: Option<ClientToken>,
}

impl TicketQuery {
    pub fn new(filter: TicketFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn scoped_to(mut self, token: ClientToken) -> Self {
        self.client_token = Some(token);
        self
    }

    /// Full query string pairs. Zero limit/offset and the empty token are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.filter.query_pairs();
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset.filter(|o| *o > 0) {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(scope) = self.client_token.as_ref().and_then(ClientToken::as_scope) {
            pairs.push(("client_token", scope.to_string()));
        }
        pairs
    }
}
