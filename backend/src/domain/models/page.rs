//! 1-based pagination window.

use crate::domain::error::{FarmError, FarmResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u32,
    limit: u32,
}

impl Page {
    /// Both `page` and `limit` must be at least 1.
    pub fn new(page: u32, limit: u32) -> FarmResult<Self> {
        if page == 0 {
            return Err(FarmError::validation("page must be at least 1"));
        }
        if limit == 0 {
            return Err(FarmError::validation("limit must be at least 1"));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.limit) * (i64::from(self.page) - 1)
    }
}
