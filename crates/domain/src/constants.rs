//! Service constants
//!
//! Host, path prefixes and wire-level names shared by the service clients.

// Hosts
pub const DEFAULT_HOST: &str = "https://developer.api.autodesk.com";

// Service path prefixes (appended to the host)
pub const AUTHENTICATION_PATH: &str = "/authentication/v1";
pub const OSS_PATH: &str = "/oss/v2";
pub const DATA_MANAGEMENT_PATH: &str = "/project/v1";
pub const DATA_MANAGEMENT_DATA_PATH: &str = "/data/v1";
pub const MODEL_DERIVATIVE_PATH: &str = "/modelderivative/v2";
pub const WEBHOOKS_PATH: &str = "/webhooks/v1";
pub const DOCUMENT_MANAGEMENT_PATH: &str = "/bim360/docs/v1";
pub const ACCOUNT_MANAGEMENT_PATH: &str = "/hq/v1";
pub const ACCOUNT_MANAGEMENT_V2_PATH: &str = "/hq/v2";
pub const BIM360_ADMIN_PATH: &str = "/bim360/admin/v1";
pub const RELATIONSHIPS_PATH: &str = "/bim360/relationship/v2";
pub const REVIEWS_PATH: &str = "/dm/v2";

// OAuth grant types
pub const GRANT_CLIENT_CREDENTIALS: &str = "client_credentials";
pub const GRANT_AUTHORIZATION_CODE: &str = "authorization_code";
pub const GRANT_REFRESH_TOKEN: &str = "refresh_token";

// Headers
pub const HEADER_REGION: &str = "x-ads-region";
pub const HEADER_FORCE: &str = "x-ads-force";
pub const CONTENT_TYPE_JSON_API: &str = "application/vnd.api+json";

// Pagination
/// Lowest maximum page size accepted by the account-admin endpoints
pub const ACCOUNT_PAGE_LIMIT: usize = 100;
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;

// HTTP client
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
