//! Endpoint descriptors
//!
//! Each service operation is a `(verb, path template, scopes)` triple. Path
//! templates use `{name}` placeholders that are filled positionally and
//! percent-encoded by [`Endpoint::render`]. Service clients only add query
//! parameters, headers and bodies on top of these.

use forge_domain::{ForgeError, Result, Scope};
use reqwest::Method;

/// One remote operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    /// Path relative to the service base URL, with `{name}` placeholders
    pub path: &'static str,
    /// Scopes the bearer token must carry
    pub scopes: &'static [Scope],
}

impl Endpoint {
    #[must_use]
    pub const fn new(method: Method, path: &'static str, scopes: &'static [Scope]) -> Self {
        Self { method, path, scopes }
    }

    /// Number of `{...}` placeholders in the path template
    #[must_use]
    pub fn arity(&self) -> usize {
        self.path.matches('{').count()
    }

    /// Path with each placeholder replaced by the matching percent-encoded arg
    ///
    /// # Errors
    /// Returns `ForgeError::InvalidInput` when `args.len()` differs from
    /// [`Self::arity`] or when an argument is empty.
    pub fn render(&self, args: &[&str]) -> Result<String> {
        if args.len() != self.arity() {
            return Err(ForgeError::InvalidInput(format!(
                "{} expects {} path argument(s), got {}",
                self.path,
                self.arity(),
                args.len()
            )));
        }

        let mut rendered = String::with_capacity(self.path.len() + 32);
        let mut rest = self.path;
        for arg in args {
            if arg.is_empty() {
                return Err(ForgeError::InvalidInput(format!(
                    "empty path argument for {}",
                    self.path
                )));
            }
            // Arity was checked above, so both braces are present.
            let (Some(open), Some(close)) = (rest.find('{'), rest.find('}')) else {
                break;
            };
            rendered.push_str(&rest[..open]);
            rendered.push_str(&urlencoding::encode(arg));
            rest = &rest[close + 1..];
        }
        rendered.push_str(rest);
        Ok(rendered)
    }
}

/// Object storage (`/oss/v2`)
pub mod oss {
    use super::{Endpoint, Method, Scope};

    pub const READ_SCOPES: &[Scope] = &[Scope::BucketRead, Scope::DataRead];
    pub const WRITE_SCOPES: &[Scope] = &[Scope::BucketCreate, Scope::DataCreate, Scope::DataWrite];
    pub const DELETE_SCOPES: &[Scope] = &[Scope::BucketDelete];

    pub const GET_BUCKETS: Endpoint = Endpoint::new(Method::GET, "/buckets", READ_SCOPES);
    pub const GET_BUCKET_DETAILS: Endpoint =
        Endpoint::new(Method::GET, "/buckets/{bucket_key}/details", READ_SCOPES);
    pub const CREATE_BUCKET: Endpoint = Endpoint::new(Method::POST, "/buckets", WRITE_SCOPES);
    pub const DELETE_BUCKET: Endpoint =
        Endpoint::new(Method::DELETE, "/buckets/{bucket_key}", DELETE_SCOPES);
    pub const GET_OBJECTS: Endpoint =
        Endpoint::new(Method::GET, "/buckets/{bucket_key}/objects", READ_SCOPES);
    pub const GET_OBJECT_DETAILS: Endpoint =
        Endpoint::new(Method::GET, "/buckets/{bucket_key}/objects/{object_key}", READ_SCOPES);
    pub const UPLOAD_OBJECT: Endpoint =
        Endpoint::new(Method::PUT, "/buckets/{bucket_key}/objects/{object_key}", WRITE_SCOPES);
    pub const DELETE_OBJECT: Endpoint =
        Endpoint::new(Method::DELETE, "/buckets/{bucket_key}/objects/{object_key}", DELETE_SCOPES);
    pub const GET_SIGNED_S3_UPLOAD: Endpoint = Endpoint::new(
        Method::GET,
        "/buckets/{bucket_key}/objects/{object_key}/signeds3upload",
        WRITE_SCOPES,
    );
    pub const COMPLETE_SIGNED_S3_UPLOAD: Endpoint = Endpoint::new(
        Method::POST,
        "/buckets/{bucket_key}/objects/{object_key}/signeds3upload",
        WRITE_SCOPES,
    );
}

/// Data management (`/project/v1` and `/data/v1`)
pub mod data_management {
    use super::{Endpoint, Method, Scope};

    pub const READ_SCOPES: &[Scope] = &[Scope::DataRead];
    pub const DATA_READ_SCOPES: &[Scope] = &[Scope::BucketRead, Scope::DataRead];
    pub const WRITE_SCOPES: &[Scope] = &[Scope::BucketCreate, Scope::DataCreate, Scope::DataWrite];

    pub const GET_HUBS: Endpoint = Endpoint::new(Method::GET, "/hubs", READ_SCOPES);
    pub const GET_PROJECTS: Endpoint =
        Endpoint::new(Method::GET, "/hubs/{hub_id}/projects", READ_SCOPES);

    // Served from `/data/v1`
    pub const GET_FOLDER: Endpoint = Endpoint::new(
        Method::GET,
        "/projects/{project_id}/folders/{folder_id}",
        DATA_READ_SCOPES,
    );
    pub const GET_FOLDER_CONTENTS: Endpoint = Endpoint::new(
        Method::GET,
        "/projects/{project_id}/folders/{folder_id}/contents",
        DATA_READ_SCOPES,
    );
    pub const GET_ITEM: Endpoint =
        Endpoint::new(Method::GET, "/projects/{project_id}/items/{item_id}", DATA_READ_SCOPES);
    pub const CREATE_STORAGE: Endpoint =
        Endpoint::new(Method::POST, "/projects/{project_id}/storage", WRITE_SCOPES);
    pub const CREATE_VERSION: Endpoint =
        Endpoint::new(Method::POST, "/projects/{project_id}/versions", WRITE_SCOPES);
}

/// Model derivative (`/modelderivative/v2`); EMEA paths add `/regions/eu`
pub mod model_derivative {
    use super::{Endpoint, Method, Scope};

    pub const READ_SCOPES: &[Scope] = &[Scope::DataRead, Scope::ViewablesRead];
    pub const WRITE_SCOPES: &[Scope] = &[Scope::DataCreate, Scope::DataWrite, Scope::DataRead];

    pub const GET_FORMATS: Endpoint = Endpoint::new(Method::GET, "/designdata/formats", &[]);
    pub const SUBMIT_JOB: Endpoint = Endpoint::new(Method::POST, "/designdata/job", WRITE_SCOPES);
    pub const GET_THUMBNAIL: Endpoint =
        Endpoint::new(Method::GET, "/designdata/{urn}/thumbnail", READ_SCOPES);
    pub const GET_MANIFEST: Endpoint =
        Endpoint::new(Method::GET, "/designdata/{urn}/manifest", READ_SCOPES);
    pub const DELETE_MANIFEST: Endpoint =
        Endpoint::new(Method::DELETE, "/designdata/{urn}/manifest", WRITE_SCOPES);
    pub const GET_METADATA: Endpoint =
        Endpoint::new(Method::GET, "/designdata/{urn}/metadata", READ_SCOPES);
    pub const GET_VIEWABLE_TREE: Endpoint =
        Endpoint::new(Method::GET, "/designdata/{urn}/metadata/{guid}", READ_SCOPES);
    pub const GET_VIEWABLE_PROPERTIES: Endpoint =
        Endpoint::new(Method::GET, "/designdata/{urn}/metadata/{guid}/properties", READ_SCOPES);
    pub const GET_DERIVATIVE_INFO: Endpoint =
        Endpoint::new(Method::HEAD, "/designdata/{urn}/manifest/{derivative_urn}", READ_SCOPES);
    pub const GET_DERIVATIVE: Endpoint =
        Endpoint::new(Method::GET, "/designdata/{urn}/manifest/{derivative_urn}", READ_SCOPES);
}

/// Webhooks (`/webhooks/v1`)
pub mod webhooks {
    use super::{Endpoint, Method, Scope};

    pub const READ_SCOPES: &[Scope] = &[Scope::BucketRead, Scope::DataRead];

    pub const GET_HOOKS: Endpoint = Endpoint::new(Method::GET, "/systems/data/hooks", READ_SCOPES);
    pub const CREATE_HOOK: Endpoint =
        Endpoint::new(Method::POST, "/systems/data/events/{event}/hooks", READ_SCOPES);
    pub const DELETE_HOOK: Endpoint =
        Endpoint::new(Method::DELETE, "/systems/data/events/{event}/hooks/{hook_id}", READ_SCOPES);
}

/// BIM 360 document management (`/bim360/docs/v1`)
pub mod document_management {
    use super::{Endpoint, Method, Scope};

    pub const READ_SCOPES: &[Scope] = &[Scope::BucketRead, Scope::DataRead];
    pub const WRITE_SCOPES: &[Scope] = &[Scope::BucketCreate, Scope::DataCreate, Scope::DataWrite];

    pub const GET_NAMING_STANDARD: Endpoint = Endpoint::new(
        Method::GET,
        "/projects/{project_id}/naming-standards/{naming_standard_id}",
        READ_SCOPES,
    );
    pub const BATCH_GET_VERSIONS: Endpoint =
        Endpoint::new(Method::POST, "/projects/{project_id}/versions:batch-get", READ_SCOPES);
    pub const GET_CUSTOM_ATTRIBUTE_DEFINITIONS: Endpoint = Endpoint::new(
        Method::GET,
        "/projects/{project_id}/folders/{folder_id}/custom-attribute-definitions",
        READ_SCOPES,
    );
    pub const BATCH_UPDATE_CUSTOM_ATTRIBUTES: Endpoint = Endpoint::new(
        Method::POST,
        "/projects/{project_id}/versions/{version_id}/custom-attributes:batch-update",
        READ_SCOPES,
    );
    pub const GET_FOLDER_PERMISSIONS: Endpoint = Endpoint::new(
        Method::GET,
        "/projects/{project_id}/folders/{folder_id}/permissions",
        READ_SCOPES,
    );
    pub const BATCH_UPDATE_PERMISSIONS: Endpoint = Endpoint::new(
        Method::POST,
        "/projects/{project_id}/folders/{folder_id}/permissions:batch-update",
        WRITE_SCOPES,
    );
}

/// Account management (`/hq/v1`, `/hq/v2`, `/bim360/admin/v1`)
pub mod account_management {
    use super::{Endpoint, Method, Scope};

    pub const READ_SCOPES: &[Scope] = &[Scope::BucketRead, Scope::DataRead, Scope::AccountRead];

    pub const GET_USERS: Endpoint =
        Endpoint::new(Method::GET, "/accounts/{account_id}/users", READ_SCOPES);
    pub const GET_USER: Endpoint =
        Endpoint::new(Method::GET, "/accounts/{account_id}/users/{user_id}", READ_SCOPES);
    pub const SEARCH_COMPANIES: Endpoint =
        Endpoint::new(Method::GET, "/accounts/{account_id}/companies/search", READ_SCOPES);
    pub const GET_COMPANIES: Endpoint =
        Endpoint::new(Method::GET, "/accounts/{account_id}/companies", READ_SCOPES);
    /// Served from `/hq/v2`
    pub const GET_INDUSTRY_ROLES: Endpoint = Endpoint::new(
        Method::GET,
        "/accounts/{account_id}/projects/{project_id}/industry_roles",
        READ_SCOPES,
    );
    /// Served from `/bim360/admin/v1`
    pub const GET_PROJECT_USERS: Endpoint =
        Endpoint::new(Method::GET, "/projects/{project_id}/users", READ_SCOPES);
}

/// BIM 360 relationships (`/bim360/relationship/v2`)
pub mod relationships {
    use super::{Endpoint, Method, Scope};

    pub const READ_SCOPES: &[Scope] = &[Scope::BucketRead, Scope::DataRead];

    pub const SEARCH_RELATIONSHIPS: Endpoint = Endpoint::new(
        Method::GET,
        "/containers/{container_id}/relationships:search",
        READ_SCOPES,
    );
}

/// Document reviews (`/dm/v2`)
pub mod reviews {
    use super::{Endpoint, Method, Scope};

    pub const READ_SCOPES: &[Scope] = &[Scope::BucketRead, Scope::DataRead];

    pub const GET_REVIEWS: Endpoint =
        Endpoint::new(Method::GET, "/projects/{project_id}/reviews", READ_SCOPES);
    pub const GET_REVIEW_VERSIONS: Endpoint = Endpoint::new(
        Method::GET,
        "/projects/{project_id}/reviews/{review_id}/versions",
        READ_SCOPES,
    );
}
