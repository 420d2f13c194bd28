use super::errors::BusinessResult;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const MAX_PAGE_LIMIT: i64 = 100;

#[derive(ToSchema, Deserialize, Serialize)]
pub struct HealthCheck {
    pub status: String,
}

/// `limit`/`offset` as they arrive on the query string
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page size, between 1 and 100 (default 10)
    pub limit: Option<i64>,
    /// Rows to skip, at least 0 (default 0)
    pub offset: Option<i64>,
}

/// Bounds-checked pagination, safe to hand to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl PaginationParams {
    pub fn validate(&self) -> BusinessResult<Pagination> {
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        let offset = self.offset.unwrap_or(0);

        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(crate::validation_error!(
                "limit",
                format!("must be between 1 and {MAX_PAGE_LIMIT}")
            ));
        }
        let offset = u64::try_from(offset)
            .map_err(|_| crate::validation_error!("offset", "must be greater than or equal to 0"))?;

        Ok(Pagination {
            limit: limit.unsigned_abs(),
            offset,
        })
    }
}

/// One page of results plus the count the page was sliced from
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub results: Vec<T>,
    pub total_count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmation {
    pub ok: bool,
}

/// Insertion timestamp, truncated to the microsecond precision every
/// supported store keeps, so a created entity reads back unchanged.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
