//! The `{success, data, error, pagination}` response convention shared by
//! every JSON endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generic message used when no better error text is available.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationInfo {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Read a backend `pagination` or `meta` object, filling in whatever the
    /// backend left out. Returns `None` when the object carries no paging
    /// field at all.
    pub fn from_backend(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        if !PAGING_KEYS.iter().any(|key| map.contains_key(*key)) {
            return None;
        }
        let total = read_u64(map, &["total", "totalCount", "totalItems"]).unwrap_or(0);
        let page = read_u64(map, &["page", "currentPage"]).unwrap_or(1);
        let limit = read_u64(map, &["limit", "pageSize", "perPage"]).unwrap_or(0);

        let mut info = Self::new(page, limit, total);
        if let Some(total_pages) = read_u64(map, &["totalPages", "pageCount"]) {
            info.total_pages = total_pages;
            info.has_next = page < total_pages;
        }
        if let Some(has_next) = map.get("hasNext").and_then(Value::as_bool) {
            info.has_next = has_next;
        }
        if let Some(has_prev) = map.get("hasPrev").and_then(Value::as_bool) {
            info.has_prev = has_prev;
        }
        Some(info)
    }
}

/// Every key [`PaginationInfo::from_backend`] understands.
pub const PAGING_KEYS: &[&str] = &[
    "page",
    "currentPage",
    "limit",
    "pageSize",
    "perPage",
    "total",
    "totalCount",
    "totalItems",
    "totalPages",
    "pageCount",
    "hasNext",
    "hasPrev",
];

fn read_u64(map: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| match map.get(*key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    })
}

/// Normalized response envelope.
///
/// `success` is true iff the upstream answered 2xx. On failure `data` is
/// never emitted and `error.message` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyEnvelope<T = Value> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

impl<T> ProxyEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            pagination: None,
        }
    }

    pub fn failure(message: impl Into<String>, details: Option<Value>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        };

        Self {
            success: false,
            data: None,
            error: Some(ErrorBody { message, details }),
            pagination: None,
        }
    }

    pub fn with_pagination(mut self, pagination: Option<PaginationInfo>) -> Self {
        self.pagination = pagination;
        self
    }
}
