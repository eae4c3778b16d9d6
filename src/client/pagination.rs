//! Cursor pagination for DeepSource GraphQL connections.
//!
//! DeepSource exposes Relay-style connections: forward paging with
//! `first`/`after`, backward paging with `last`/`before`, opaque string
//! cursors. Callers of the MCP tools send loosely-typed pagination
//! arguments, so this module canonicalizes them ([`normalize`]) and can
//! aggregate several upstream pages into one logical page
//! ([`fetch_with_pagination`]).

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Page size applied when a cursor is given without an explicit count.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Page size applied to each upstream fetch during multi-page aggregation.
pub const AGGREGATE_PAGE_SIZE: i64 = 50;

/// Pagination arguments accepted by list tools and queries.
///
/// All fields are optional. Integer fields tolerate floats (floored) and
/// cursor fields tolerate scalars (stringified); see [`crate::serde_utils`].
/// Call [`normalize`] to resolve the canonical form before building
/// GraphQL variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaginationParams {
    /// Zero-based row offset (legacy offset-style paging).
    #[schemars(description = "Number of items to skip from the start of the result set")]
    #[serde(
        default,
        deserialize_with = "crate::serde_utils::lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub offset: Option<i64>,

    /// Page size when paging forward.
    #[schemars(description = "Number of items to return when paging forward")]
    #[serde(
        default,
        deserialize_with = "crate::serde_utils::lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub first: Option<i64>,

    /// Page size when paging backward.
    #[schemars(description = "Number of items to return when paging backward")]
    #[serde(
        default,
        deserialize_with = "crate::serde_utils::lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub last: Option<i64>,

    /// Fetch items strictly after this opaque cursor.
    #[schemars(description = "Cursor to start after, as returned in pageInfo.endCursor")]
    #[serde(
        default,
        deserialize_with = "crate::serde_utils::lenient_cursor",
        skip_serializing_if = "Option::is_none"
    )]
    pub after: Option<String>,

    /// Fetch items strictly before this opaque cursor.
    #[schemars(description = "Cursor to end before, as returned in pageInfo.startCursor")]
    #[serde(
        default,
        deserialize_with = "crate::serde_utils::lenient_cursor",
        skip_serializing_if = "Option::is_none"
    )]
    pub before: Option<String>,

    /// Alias for `first`; resolved before any other rule.
    #[schemars(description = "Alias for 'first'")]
    #[serde(
        default,
        deserialize_with = "crate::serde_utils::lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub page_size: Option<i64>,

    /// Upper bound on upstream fetches when aggregating. Absent or <= 1
    /// means a single page.
    #[schemars(description = "Maximum number of upstream pages to fetch and merge (default: 1)")]
    #[serde(
        default,
        deserialize_with = "crate::serde_utils::lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_pages: Option<i64>,
}

/// Relay page metadata, as returned inside every connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
}

/// One logical page of results.
///
/// `total_count` is the upstream-reported total where the API provides
/// one; after aggregation it is always filled in, falling back to the
/// number of merged items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
}

// Manual impl: the derive would require `T: Default`.
impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page_info: PageInfo::default(),
            total_count: None,
        }
    }
}

impl<T> PaginatedResponse<T> {
    /// Map every item, keeping page metadata intact. Used to flatten
    /// GraphQL node shapes into domain types.
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            page_info: self.page_info,
            total_count: self.total_count,
        }
    }
}

/// Resolve pagination arguments into their canonical form.
///
/// The precedence rules mirror the GraphQL connection contract:
///
/// 1. `page_size` is folded into `first`.
/// 2. `offset` is clamped to >= 0, `first` and `last` to >= 1.
/// 3. A non-empty `before` wins over everything else: the request becomes
///    backward paging (`last` falling back to `first`, then to
///    [`DEFAULT_PAGE_SIZE`]) and `first`/`after` are dropped.
/// 4. Otherwise a non-empty `after` makes it a forward request (`first`
///    defaulting to [`DEFAULT_PAGE_SIZE`]) and `last`/`before` are dropped.
/// 5. With no usable cursor, `offset`/`first`/`last` pass through as-is.
///
/// An empty-string cursor counts as absent. Conflicting input is resolved
/// silently rather than rejected, and the result is a fixed point:
/// normalizing twice yields the same value.
pub fn normalize(mut params: PaginationParams) -> PaginationParams {
    if params.first.is_none() {
        params.first = params.page_size.take();
    } else {
        params.page_size = None;
    }

    params.offset = params.offset.map(|v| v.max(0));
    params.first = params.first.map(|v| v.max(1));
    params.last = params.last.map(|v| v.max(1));

    let before_set = params.before.as_deref().is_some_and(|c| !c.is_empty());
    let after_set = params.after.as_deref().is_some_and(|c| !c.is_empty());

    if before_set {
        params.last = params.last.or(params.first).or(Some(DEFAULT_PAGE_SIZE));
        params.first = None;
        params.after = None;
    } else if after_set {
        params.first = Some(params.first.unwrap_or(DEFAULT_PAGE_SIZE));
        params.last = None;
        params.before = None;
    }

    params
}

/// Fetch one logical page, aggregating several upstream pages when
/// `max_pages` asks for it.
///
/// With `max_pages` absent or <= 1 this is a single call to `fetcher`
/// whose result is returned unchanged. Otherwise pages are fetched
/// strictly sequentially (each request's `after` is the previous page's
/// `end_cursor`, so calls cannot overlap) until the upstream reports no
/// more data or the page budget is reached. `max_pages` itself is never
/// forwarded to `fetcher`.
///
/// The merged result concatenates items in fetch order. Its
/// `has_next_page` is true only when the budget cut the loop short while
/// the upstream still had more; `has_previous_page` is always false;
/// `end_cursor` is present only when further pages remain; `total_count`
/// is the last page's reported total, falling back to the merged item
/// count.
///
/// Errors from `fetcher` propagate unchanged on any iteration. Items
/// accumulated before the failure are discarded; there is no partial
/// result.
pub async fn fetch_with_pagination<T, E, F, Fut>(
    mut fetcher: F,
    params: PaginationParams,
) -> Result<PaginatedResponse<T>, E>
where
    F: FnMut(PaginationParams) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>, E>>,
{
    let mut request = normalize(params);
    let max_pages = request.max_pages.take();

    let Some(max_pages) = max_pages.filter(|&n| n > 1) else {
        return fetcher(request).await;
    };

    request.first = Some(request.first.unwrap_or(AGGREGATE_PAGE_SIZE));

    let mut items = Vec::new();
    let mut total_count = None;
    let mut last_cursor = None;
    let mut upstream_has_more;
    let mut pages_fetched = 0;

    loop {
        let page = fetcher(request.clone()).await?;
        pages_fetched += 1;

        items.extend(page.items);
        total_count = page.total_count;
        last_cursor = page.page_info.end_cursor;
        upstream_has_more = page.page_info.has_next_page;

        if !upstream_has_more || pages_fetched >= max_pages {
            break;
        }

        match last_cursor.clone() {
            Some(cursor) => request.after = Some(cursor),
            None => {
                // Upstream claims more data but gave us nothing to
                // continue from; treat as exhausted.
                upstream_has_more = false;
                break;
            }
        }
    }

    let total = total_count.unwrap_or(items.len());

    Ok(PaginatedResponse {
        items,
        page_info: PageInfo {
            has_next_page: upstream_has_more,
            has_previous_page: false,
            start_cursor: None,
            end_cursor: if upstream_has_more { last_cursor } else { None },
        },
        total_count: Some(total),
    })
}
