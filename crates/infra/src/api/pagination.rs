//! Pagination engines
//!
//! Every engine awaits page N before requesting page N+1, returns the
//! concatenated items of all pages, and aborts with the first error. Nothing
//! is shared between calls.
//!
//! Link-following engines (`cursor`, `json_api`, `results_cursor`) send the
//! caller's query parameters with the first request only; continuation URLs
//! already carry the server's own query string and are followed verbatim.
//! Offset engines re-send the caller's parameters with each page, plus
//! `offset` and `limit`. Headers and scopes apply to every page.

use forge_domain::{CursorPage, ForgeError, JsonApiPage, Page, Result, ResultsPage, Scope};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::client::ApiClient;
use crate::http::RequestOptions;

impl ApiClient {
    /// Follow `{ items, next }` pages until `next` is absent, null or empty
    ///
    /// # Errors
    /// Aborts with the first page error.
    pub async fn get_all_cursor<T: DeserializeOwned>(
        &self,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
    ) -> Result<Vec<T>> {
        self.follow_links::<CursorPage<T>>(path, scopes, options, "cursor").await
    }

    /// Follow JSON:API `{ data, links.next.href }` pages
    ///
    /// `links.next` may also be a bare URL string. A missing `links`, `next`
    /// or `href` ends pagination.
    ///
    /// # Errors
    /// Aborts with the first page error.
    pub async fn get_all_json_api<T: DeserializeOwned>(
        &self,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
    ) -> Result<Vec<T>> {
        self.follow_links::<JsonApiPage<T>>(path, scopes, options, "json:api").await
    }

    /// Follow `{ results, pagination.next }` pages
    ///
    /// # Errors
    /// Aborts with the first page error.
    pub async fn get_all_results_cursor<T: DeserializeOwned>(
        &self,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
    ) -> Result<Vec<T>> {
        self.follow_links::<ResultsPage<T>>(path, scopes, options, "results").await
    }

    async fn follow_links<P: Page + DeserializeOwned>(
        &self,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
        shape: &'static str,
    ) -> Result<Vec<P::Item>> {
        let headers = options.headers.clone();
        let mut items = Vec::new();
        let mut pages = 0usize;
        let mut page: P = self.get_json(path, scopes, options).await?;

        loop {
            pages += 1;
            let page_cursor = page.next_url().map(str::to_string);
            items.extend(page.into_items());

            let Some(url) = page_cursor else {
                break;
            };
            page = self.get_json(&url, scopes, continuation(&headers)).await?;
        }

        debug!(shape, pages, items = items.len(), "link pagination complete");
        Ok(items)
    }

    /// Page through a bare JSON array with `offset`/`limit` parameters
    ///
    /// Stops at the first page shorter than `limit`. When the total is an
    /// exact multiple of `limit`, the final request returns an empty page.
    ///
    /// # Errors
    /// Returns `ForgeError::InvalidInput` if `limit` is zero.
    pub async fn get_all_offset<T: DeserializeOwned>(
        &self,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
        limit: usize,
    ) -> Result<Vec<T>> {
        check_limit(limit)?;
        let mut items = Vec::new();
        let mut offset = 0usize;
        let mut pages = 0usize;

        loop {
            let page: Vec<T> =
                self.get_json(path, scopes, with_window(&options, offset, limit)).await?;
            pages += 1;
            let returned = page.len();
            items.extend(page);

            if returned < limit {
                break;
            }
            offset += limit;
        }

        debug!(pages, items = items.len(), "offset pagination complete");
        Ok(items)
    }

    /// Page through `{ results, pagination.totalResults }` with
    /// `offset`/`limit` parameters
    ///
    /// Stops once `offset + limit` reaches the server-reported total or a
    /// page comes back empty. Pages without a total fall back to the
    /// short-page rule of [`Self::get_all_offset`].
    ///
    /// # Errors
    /// Returns `ForgeError::InvalidInput` if `limit` is zero.
    pub async fn get_all_total_results<T: DeserializeOwned>(
        &self,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
        limit: usize,
    ) -> Result<Vec<T>> {
        check_limit(limit)?;
        let mut items = Vec::new();
        let mut offset = 0usize;
        let mut pages = 0usize;

        loop {
            let page: ResultsPage<T> =
                self.get_json(path, scopes, with_window(&options, offset, limit)).await?;
            pages += 1;
            let total = page.total_results();
            let returned = page.results.len();
            items.extend(page.results);
            offset += limit;

            let done = match total {
                _ if returned == 0 => true,
                Some(total) => offset as u64 >= total,
                None => returned < limit,
            };
            if done {
                break;
            }
        }

        debug!(pages, items = items.len(), "total-results pagination complete");
        Ok(items)
    }
}

fn continuation(headers: &HeaderMap) -> RequestOptions {
    RequestOptions { headers: headers.clone(), ..RequestOptions::default() }
}

fn with_window(options: &RequestOptions, offset: usize, limit: usize) -> RequestOptions {
    options.clone().param("offset", offset).param("limit", limit)
}

fn check_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(ForgeError::InvalidInput("page limit must be greater than zero".to_string()));
    }
    Ok(())
}
