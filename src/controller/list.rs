//! Lazy, server-driven list state.
//!
//! The controller owns `(page, page_size, filter)` and the last good page of
//! rows. Every change produces exactly one fetch; responses are tagged with a
//! generation so a slow stale response can never overwrite a newer one.

use serde_json::Value;
use tracing::{debug, warn};

use admin_wire::Page;

use crate::backend::{ApiRequest, Backend};
use crate::error::ApiError;
use crate::resources::Resource;

use super::StateCell;

/// Name of the page-number query parameter an endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageParam {
    /// `?pageNumber=`
    PageNumber,
    /// `?page=`
    Page,
    /// Unpaged list; no paging parameters are sent
    Unpaged,
}

impl PageParam {
    pub fn key(self) -> Option<&'static str> {
        match self {
            PageParam::PageNumber => Some("pageNumber"),
            PageParam::Page => Some("page"),
            PageParam::Unpaged => None,
        }
    }
}

/// Filter state that knows how to encode itself as query parameters.
pub trait ListFilter {
    fn apply(&self, request: ApiRequest) -> ApiRequest;
}

impl ListFilter for () {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
    }
}

/// The request half of one fetch. Hand it back to [`ListController::complete`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    pub request: ApiRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The response replaced the list
    Applied,
    /// A newer fetch was started; the response was dropped
    Stale,
    /// The fetch failed; the last good rows are kept
    Failed(ApiError),
}

pub struct ListController<R: Resource> {
    page: u32,
    page_size: u32,
    filter: R::Filter,
    items: Vec<R::Item>,
    total: u64,
    loading: bool,
    generation: u64,
    error: Option<ApiError>,
}

impl<R: Resource> Clone for ListController<R> {
    fn clone(&self) -> Self {
        Self {
            page: self.page,
            page_size: self.page_size,
            filter: self.filter.clone(),
            items: self.items.clone(),
            total: self.total,
            loading: self.loading,
            generation: self.generation,
            error: self.error.clone(),
        }
    }
}

impl<R: Resource> ListController<R> {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            filter: R::Filter::default(),
            items: Vec::new(),
            total: 0,
            loading: false,
            generation: 0,
            error: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn filter(&self) -> &R::Filter {
        &self.filter
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn total_pages(&self) -> u32 {
        if self.total == 0 {
            return 1;
        }
        u32::try_from(self.total.div_ceil(u64::from(self.page_size))).unwrap_or(u32::MAX)
    }

    /// 1-based index of the first row on the current page (0 when empty).
    pub fn first_row(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            u64::from(self.page - 1) * u64::from(self.page_size) + 1
        }
    }

    pub fn last_row(&self) -> u64 {
        (self.first_row() + self.items.len() as u64).saturating_sub(1)
    }

    /// Move to `page`. Returns true when a fetch is needed.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Change the page size and go back to page 1. Returns true when a fetch is needed.
    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.page = 1;
        true
    }

    /// Replace the filter and go back to page 1. Returns true when a fetch is needed.
    pub fn set_filter(&mut self, filter: R::Filter) -> bool {
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        self.page = 1;
        true
    }

    /// Edit the filter in place, resetting to page 1 when it changed.
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut R::Filter)) -> bool {
        let mut filter = self.filter.clone();
        edit(&mut filter);
        self.set_filter(filter)
    }

    /// The GET request for the current `(page, page_size, filter)`.
    pub fn request(&self) -> ApiRequest {
        let mut request = ApiRequest::get(R::PATH);
        if let Some(key) = R::PAGE_PARAM.key() {
            request = request
                .query(key, self.page)
                .query("pageSize", self.page_size);
        }
        self.filter.apply(request)
    }

    /// Start a fetch: marks loading and invalidates older tickets.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            request: self.request(),
        }
    }

    /// Apply the response for `ticket`.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Value, ApiError>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation {
            debug!(
                path = R::PATH,
                stale = ticket.generation,
                current = self.generation,
                "Dropping stale list response"
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;
        let decoded = result.and_then(|data| {
            Page::<R::Item>::from_data(data, R::TOTAL).map_err(ApiError::decode)
        });

        match decoded {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                self.error = None;
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!(path = R::PATH, error = %e, "List fetch failed");
                self.error = Some(e.clone());
                FetchOutcome::Failed(e)
            }
        }
    }
}

/// Fetch the current page. Changes made while the request is out win over its response.
pub async fn load<R, C>(mut list: C, backend: &dyn Backend) -> FetchOutcome
where
    R: Resource,
    C: StateCell<ListController<R>>,
{
    let ticket = list.modify(ListController::begin);
    let result = backend.send(ticket.request.clone()).await;
    list.modify(|l| l.complete(ticket, result))
}
