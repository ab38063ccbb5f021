//! Pagination driver.
//!
//! Fetches `page = start, start + 1, ...` until a reply carries no
//! pagination metadata or reports no further pages. There is no page cap:
//! a server that always claims another page keeps the driver going.
//! Any error ends the run and discards whatever was gathered so far.

use std::ops::ControlFlow;

use futures::Stream;

use crate::client::FabulousClient;
use crate::error::Result;
use crate::response::ParsedResponse;
use crate::types::Params;

/// One fetched page.
#[derive(Debug, Clone)]
pub struct Page {
    /// Page number that was requested.
    pub number: u32,
    pub response: ParsedResponse,
}

/// Drives one paginated action. Cheap to build; every entry point starts
/// over from the start page.
pub struct Paginator<'c> {
    client: &'c FabulousClient,
    action: String,
    params: Params,
    start_page: u32,
}

impl<'c> Paginator<'c> {
    pub(crate) fn new(client: &'c FabulousClient, action: impl Into<String>, params: Params) -> Self {
        Self {
            client,
            action: action.into(),
            params,
            start_page: 1,
        }
    }

    #[must_use]
    pub fn start_page(mut self, page: u32) -> Self {
        self.start_page = page;
        self
    }

    async fn fetch(&self, page: u32) -> Result<ParsedResponse> {
        let mut params = self.params.clone();
        params.insert("page", page);
        let response = self.client.request(&self.action, &params).await?;
        log::debug!(
            "[fabulous] {} page {page}: pagination={:?}",
            self.action,
            response.pagination()
        );
        Ok(response)
    }

    /// Page after `page`, if the reply asks for one.
    fn next_page(page: u32, response: &ParsedResponse) -> Option<u32> {
        if response.has_more() {
            page.checked_add(1)
        } else {
            None
        }
    }

    /// Collect mode: concatenate `extract(page)` over every page, in order.
    pub async fn collect<T, F>(&self, mut extract: F) -> Result<Vec<T>>
    where
        F: FnMut(&ParsedResponse) -> Vec<T>,
    {
        let mut items = Vec::new();
        let mut page = self.start_page;
        loop {
            let response = self.fetch(page).await?;
            items.extend(extract(&response));
            match Self::next_page(page, &response) {
                Some(next) => page = next,
                None => break,
            }
        }
        Ok(items)
    }

    /// Streaming mode: hand each page to `handler` as it arrives.
    ///
    /// Returning [`ControlFlow::Break`] stops before the next request.
    pub async fn for_each_page<F>(&self, mut handler: F) -> Result<()>
    where
        F: FnMut(&ParsedResponse, u32) -> ControlFlow<()>,
    {
        let mut page = self.start_page;
        loop {
            let response = self.fetch(page).await?;
            if handler(&response, page).is_break() {
                log::debug!("[fabulous] {} stopped by caller after page {page}", self.action);
                return Ok(());
            }
            match Self::next_page(page, &response) {
                Some(next) => page = next,
                None => return Ok(()),
            }
        }
    }

    /// Lazy page sequence. Each page is requested only when polled; the
    /// stream ends after the last page or right after yielding an error.
    pub fn stream(&self) -> impl Stream<Item = Result<Page>> + '_ {
        futures::stream::try_unfold(Some(self.start_page), move |next| async move {
            let Some(number) = next else {
                return Ok(None);
            };
            let response = self.fetch(number).await?;
            let following = Self::next_page(number, &response);
            Ok(Some((Page { number, response }, following)))
        })
    }
}
