//! Data management service client
//!
//! Hubs and projects live under `/project/v1`; folders, items, storage and
//! versions under `/data/v1`. The client holds one dispatcher for each.

use std::sync::Arc;

use forge_domain::{ForgeConfig, JsonApiPage, Result};
use serde_json::{json, Value};
use tracing::instrument;

use super::json_api;
use crate::api::ApiClient;
use crate::auth::TokenProvider;
use crate::endpoints::data_management::{
    CREATE_STORAGE, CREATE_VERSION, GET_FOLDER, GET_FOLDER_CONTENTS, GET_HUBS, GET_ITEM,
    GET_PROJECTS,
};
use crate::http::HttpClient;

/// Hubs, projects, folders and items visible to the token's user
#[derive(Clone, Debug)]
pub struct DataManagementClient {
    project: ApiClient,
    data: ApiClient,
}

impl DataManagementClient {
    /// Client for explicit `/project/v1` and `/data/v1` base URLs
    ///
    /// # Errors
    /// Returns `ForgeError::InvalidInput` if the HTTP client cannot be built.
    pub fn new(
        project_url: impl Into<String>,
        data_url: impl Into<String>,
        auth: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        let http = HttpClient::new()?;
        Ok(Self::with_apis(
            ApiClient::with_http(http.clone(), project_url, auth.clone()),
            ApiClient::with_http(http, data_url, auth),
        ))
    }

    /// Client using the host, timeout and user agent from `config`
    ///
    /// # Errors
    /// Returns `ForgeError::InvalidInput` if the HTTP client cannot be built.
    pub fn from_config(config: &ForgeConfig, auth: Arc<dyn TokenProvider>) -> Result<Self> {
        let http = HttpClient::from_config(config)?;
        Ok(Self::with_apis(
            ApiClient::with_http(http.clone(), config.data_management_url(), auth.clone()),
            ApiClient::with_http(http, config.data_management_data_url(), auth),
        ))
    }

    #[must_use]
    pub const fn with_apis(project: ApiClient, data: ApiClient) -> Self {
        Self { project, data }
    }

    /// One page of hubs
    ///
    /// # Errors
    /// Propagates dispatcher errors; a body without `data` is
    /// `ForgeError::MalformedResponse`.
    pub async fn get_hubs(
        &self,
        filter_id: Option<&str>,
        filter_name: Option<&str>,
    ) -> Result<JsonApiPage<Value>> {
        let options =
            json_api().param_opt("filter[id]", filter_id).param_opt("filter[name]", filter_name);
        self.project.call_json(&GET_HUBS, &[], options).await
    }

    /// Every hub, following `links.next.href`
    ///
    /// # Errors
    /// Aborts with the first page error.
    #[instrument(skip(self))]
    pub async fn get_all_hubs(
        &self,
        filter_id: Option<&str>,
        filter_name: Option<&str>,
    ) -> Result<Vec<Value>> {
        let options =
            json_api().param_opt("filter[id]", filter_id).param_opt("filter[name]", filter_name);
        self.project.get_all_json_api(&GET_HUBS.render(&[])?, GET_HUBS.scopes, options).await
    }

    /// One page of projects in a hub
    ///
    /// Page numbers are zero-based; the server caps `page_limit` at 200.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_projects(
        &self,
        hub_id: &str,
        filter_id: Option<&str>,
        page_number: Option<u32>,
        page_limit: Option<u32>,
    ) -> Result<JsonApiPage<Value>> {
        let options = json_api()
            .param_opt("filter[id]", filter_id)
            .param_opt("page[number]", page_number)
            .param_opt("page[limit]", page_limit);
        self.project.call_json(&GET_PROJECTS, &[hub_id], options).await
    }

    /// Every project in a hub, following `links.next.href`
    ///
    /// # Errors
    /// Aborts with the first page error.
    #[instrument(skip(self))]
    pub async fn get_all_projects(
        &self,
        hub_id: &str,
        filter_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        let options = json_api().param_opt("filter[id]", filter_id);
        let path = GET_PROJECTS.render(&[hub_id])?;
        self.project.get_all_json_api(&path, GET_PROJECTS.scopes, options).await
    }

    /// A folder of a project, including the root folder
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_folder(
        &self,
        project_id: &str,
        folder_id: &str,
        filter_id: Option<&str>,
    ) -> Result<Value> {
        let options = json_api().param_opt("filter[id]", filter_id);
        self.data.call_json(&GET_FOLDER, &[project_id, folder_id], options).await
    }

    /// Every item and sub-folder of a folder, following `links.next.href`
    ///
    /// # Errors
    /// Aborts with the first page error.
    #[instrument(skip(self))]
    pub async fn get_content(
        &self,
        project_id: &str,
        folder_id: &str,
        filter_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        let options = json_api().param_opt("filter[id]", filter_id);
        let path = GET_FOLDER_CONTENTS.render(&[project_id, folder_id])?;
        self.data.get_all_json_api(&path, GET_FOLDER_CONTENTS.scopes, options).await
    }

    /// Item metadata, with its tip version under `included`
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_item(&self, project_id: &str, item_id: &str) -> Result<Value> {
        self.data.call_json(&GET_ITEM, &[project_id, item_id], json_api()).await
    }

    /// Reserve an OSS object for uploading `filename` into a folder or item
    ///
    /// `target_type` is `folders` or `items`.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    #[instrument(skip(self))]
    pub async fn create_storage(
        &self,
        project_id: &str,
        filename: &str,
        resource_id: &str,
        target_type: &str,
    ) -> Result<Value> {
        let options = json_api().json(storage_body(filename, resource_id, target_type));
        self.data.call_json(&CREATE_STORAGE, &[project_id], options).await
    }

    /// Add a version to an existing item from an uploaded storage object
    ///
    /// `resource_type` is the extension without its `versions:` prefix, such
    /// as `autodesk.bim360:File` or `autodesk.core:File`.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    #[instrument(skip(self))]
    pub async fn new_file_version(
        &self,
        project_id: &str,
        filename: &str,
        item_id: &str,
        object_id: &str,
        resource_type: &str,
    ) -> Result<Value> {
        let body = version_body(filename, item_id, object_id, resource_type);
        self.data.call_json(&CREATE_VERSION, &[project_id], json_api().json(body)).await
    }
}

fn storage_body(filename: &str, resource_id: &str, target_type: &str) -> Value {
    json!({
        "jsonapi": { "version": "1.0" },
        "data": {
            "type": "objects",
            "attributes": { "name": filename },
            "relationships": {
                "target": { "data": { "type": target_type, "id": resource_id } }
            }
        }
    })
}

fn version_body(filename: &str, item_id: &str, object_id: &str, resource_type: &str) -> Value {
    json!({
        "jsonapi": { "version": "1.0" },
        "data": {
            "type": "versions",
            "attributes": {
                "displayName": filename,
                "extension": { "type": format!("versions:{resource_type}"), "version": "1.0" }
            },
            "relationships": {
                "item": { "data": { "type": "items", "id": item_id } },
                "storage": { "data": { "type": "objects", "id": object_id } }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_body_targets_folder() {
        let body = storage_body("plan.pdf", "urn:adsk.wipprod:fs.folder:co.abc", "folders");
        assert_eq!(body["data"]["attributes"]["name"], "plan.pdf");
        assert_eq!(body["data"]["relationships"]["target"]["data"]["type"], "folders");
        assert_eq!(body["jsonapi"]["version"], "1.0");
    }

    #[test]
    fn version_body_prefixes_extension_type() {
        let body = version_body("plan.pdf", "item-1", "obj-1", "autodesk.bim360:File");
        let extension = &body["data"]["attributes"]["extension"];
        assert_eq!(extension["type"], "versions:autodesk.bim360:File");
        assert_eq!(body["data"]["relationships"]["storage"]["data"]["id"], "obj-1");
        assert_eq!(body["data"]["relationships"]["item"]["data"]["type"], "items");
    }
}
