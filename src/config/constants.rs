//! Configuration constants.
//!
//! This module defines the endpoints, environment variable names, timeouts
//! and paging defaults used throughout the application.

/// Legacy host search endpoint (v2).
pub const DEFAULT_LEGACY_URL: &str = "https://search.censys.io/api/v2/hosts/search";
/// New platform global search endpoint (v3).
pub const DEFAULT_NEW_URL: &str = "https://api.platform.censys.io/v3/global/search/query";

/// Default SQLite database holding saved searches.
pub const DB_PATH: &str = "./hostdiff.db";

/// Default address for the JSON API.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

// Paging
/// Records requested per page from either API.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

// Network operation timeouts
/// Overall client timeout in seconds (applies to first-page fetches)
pub const REQUEST_TIMEOUT_SECS: u64 = 60;
/// Per-request bound for continuation-page fetches in seconds
pub const CONTINUATION_TIMEOUT_SECS: u64 = 30;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// User-Agent sent with every API request.
pub const USER_AGENT: &str = concat!("hostdiff/", env!("CARGO_PKG_VERSION"));

// Error message size limits
/// Maximum number of response body characters appended to an error description.
/// Keeps stored snapshots small when an API answers with an HTML error page.
pub const MAX_ERROR_BODY_LENGTH: usize = 2000;

// Credentials
pub const ENV_LEGACY_API_ID: &str = "CENSYS_LEGACY_API_ID";
pub const ENV_LEGACY_API_SECRET: &str = "CENSYS_LEGACY_API_SECRET";
pub const ENV_NEW_API_KEY: &str = "CENSYS_NEW_API_KEY";
pub const ENV_ORG_ID: &str = "CENSYS_ORG_ID";

/// Header carrying the organization id on new-API requests.
pub const ORGANIZATION_HEADER: &str = "X-Organization-ID";
