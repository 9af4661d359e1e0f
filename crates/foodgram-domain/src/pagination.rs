//! Page-number pagination shared by all paginated list endpoints.

use serde::{Deserialize, Serialize};

/// Default number of results per page.
pub const DEFAULT_LIMIT: u32 = 6;

/// Upper bound for `limit`.
pub const MAX_LIMIT: u32 = 100;

/// Pagination parameters taken from the `page` and `limit` query params.
///
/// - `limit`: 1–100, default 6
/// - `page`: ≥ 1, default 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or_else(default_page),
            limit: limit.unwrap_or_else(default_limit),
        }
        .clamped()
    }

    /// Clamp `limit` to 1–100 and `page` to ≥ 1.
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    pub fn has_next(&self, count: u64) -> bool {
        self.offset() + u64::from(self.limit) < count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// One page of results with the total row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            request: self.request,
        }
    }
}
