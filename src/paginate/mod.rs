//! Pagination of one search API into an identifier set.
//!
//! Pages are fetched strictly in order: each continuation token is only known
//! once the previous response has arrived. A failure never panics or bubbles
//! up; it ends the loop and is recorded on the returned [`FetchOutcome`].

mod profile;

use std::collections::HashSet;
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::{VirtualHosts, CONTINUATION_TIMEOUT_SECS, DEFAULT_PAGE_SIZE};
use crate::error_handling::FetchError;
use crate::models::{FetchOutcome, IdentifierSet};
use crate::normalize::extract_ips;
use crate::transport::Transport;

pub use profile::{PageResult, SourceProfile};

/// Options for one pagination run.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    /// Records requested per page
    pub page_size: u32,
    /// Follow continuation tokens until exhausted (otherwise first page only)
    pub fetch_all: bool,
    /// Stop after this many pages even if more are available
    pub max_pages: Option<usize>,
    /// Legacy virtual-host mode (ignored by the new API)
    pub virtual_hosts: VirtualHosts,
    /// Time bound for each continuation-page fetch
    pub continuation_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            fetch_all: false,
            max_pages: None,
            virtual_hosts: VirtualHosts::default(),
            continuation_timeout: Duration::from_secs(CONTINUATION_TIMEOUT_SECS),
        }
    }
}

fn absorb(profile: &SourceProfile, page: &PageResult, identifiers: &mut IdentifierSet) -> usize {
    let before = identifiers.len();
    for record in &page.records {
        identifiers.extend(extract_ips(profile.api(), record));
    }
    identifiers.len() - before
}

/// Fetches `query` from one API and accumulates the IPs of every page.
///
/// 1. The first page is fetched with the client's default timeout. If it
///    fails the outcome is empty and carries the transport error.
/// 2. The total hint comes from the first page (first known field name),
///    falling back to the number of IPs it produced.
/// 3. With `fetch_all`, continuation tokens are followed until none is
///    returned, the page cap is reached, or a page hands back a token that
///    was already followed. A continuation failure stops the loop but keeps every
///    IP gathered so far, with the error marked as a pagination error.
pub async fn paginate(
    transport: &dyn Transport,
    profile: &SourceProfile,
    query: &str,
    options: &FetchOptions,
) -> FetchOutcome {
    let api = profile.api();
    let request = profile.build_request(query, options, None);

    let first = match transport.fetch(&request).await {
        Ok(response) => profile.parse_page(response.body),
        Err(e) => {
            let error = FetchError::Transport(e);
            warn!("[{api}] First page failed: {error}");
            return FetchOutcome::failed(error.to_string());
        }
    };

    let mut identifiers = IdentifierSet::new();
    let added = absorb(profile, &first, &mut identifiers);
    let mut pages = 1usize;
    debug!(
        "[{api}] Page 1: {} hits, {added} new IPs (total: {})",
        first.records.len(),
        identifiers.len()
    );

    let total_hint = first.total_hint.unwrap_or(identifiers.len() as u64);
    let max_pages = options.max_pages.map(|max| max.max(1));
    let mut error = None;
    let mut followed: HashSet<String> = HashSet::new();
    let mut next = if options.fetch_all {
        first.next_token
    } else {
        None
    };

    while let Some(token) = next.take() {
        if let Some(max) = max_pages {
            if pages >= max {
                info!("[{api}] Reached page limit of {max}");
                break;
            }
        }

        let request = profile.build_request(query, options, Some(&token));
        let page = match transport.fetch(&request).await {
            Ok(response) => profile.parse_page(response.body),
            Err(e) => {
                let failure = FetchError::Pagination {
                    page: pages + 1,
                    source: e,
                };
                warn!(
                    "[{api}] {failure} (keeping {} IPs from {pages} pages)",
                    identifiers.len()
                );
                error = Some(failure.to_string());
                break;
            }
        };

        pages += 1;
        let added = absorb(profile, &page, &mut identifiers);
        debug!(
            "[{api}] Page {pages}: {} hits, {added} new IPs (total: {})",
            page.records.len(),
            identifiers.len()
        );

        followed.insert(token);
        if let Some(candidate) = &page.next_token {
            if followed.contains(candidate) {
                warn!("[{api}] Continuation token {candidate:?} repeated on page {pages}, stopping");
                break;
            }
        }
        next = page.next_token;
    }

    info!(
        "[{api}] Fetched {} IPs across {pages} page(s) (reported total: {total_hint})",
        identifiers.len()
    );

    FetchOutcome {
        identifiers,
        total_hint,
        error,
        pages,
    }
}
