//! BIM 360 document management client

use forge_domain::{ForgeError, Result, Subject};
use serde_json::{json, Value};
use tracing::instrument;

use super::{content_type, json_api};
use crate::api::ApiClient;
use crate::endpoints::document_management::{
    BATCH_GET_VERSIONS, BATCH_UPDATE_CUSTOM_ATTRIBUTES, BATCH_UPDATE_PERMISSIONS,
    GET_CUSTOM_ATTRIBUTE_DEFINITIONS, GET_FOLDER_PERMISSIONS, GET_NAMING_STANDARD, READ_SCOPES,
};
use crate::http::RequestOptions;

/// Naming standards, custom attributes and folder permissions
#[derive(Clone, Debug)]
pub struct DocumentManagementClient {
    api: ApiClient,
}

impl_service_client!(DocumentManagementClient, document_management_url);

impl DocumentManagementClient {
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_naming_standard(
        &self,
        project_id: &str,
        naming_standard_id: &str,
    ) -> Result<Value> {
        let args = [project_id, naming_standard_id];
        self.api.call_json(&GET_NAMING_STANDARD, &args, json_api()).await
    }

    /// Naming standard applied to a folder, given the folder's data management
    /// representation
    ///
    /// # Errors
    /// Returns `ForgeError::InvalidInput` unless the folder lists exactly one
    /// naming standard.
    pub async fn get_naming_standard_for_folder(
        &self,
        project_id: &str,
        folder: &Value,
    ) -> Result<Value> {
        let id = naming_standard_id(folder)?;
        self.get_naming_standard(project_id, &id).await
    }

    /// Custom attribute values of the given document versions
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_custom_attribute_definitions_for_docs(
        &self,
        project_id: &str,
        urns: &[String],
    ) -> Result<Value> {
        let options = json_api().json(json!({ "urns": urns }));
        self.api.call_json(&BATCH_GET_VERSIONS, &[project_id], options).await
    }

    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_custom_attribute_definitions(
        &self,
        project_id: &str,
        folder_id: &str,
    ) -> Result<Value> {
        self.api
            .call_json(&GET_CUSTOM_ATTRIBUTE_DEFINITIONS, &[project_id, folder_id], json_api())
            .await
    }

    /// # Errors
    /// Propagates dispatcher errors.
    #[instrument(skip(self, attributes))]
    pub async fn batch_update_custom_attribute_definitions(
        &self,
        project_id: &str,
        version_id: &str,
        attributes: Value,
    ) -> Result<Value> {
        let options = json_api().json(attributes);
        let args = [project_id, version_id];
        self.api.call_json(&BATCH_UPDATE_CUSTOM_ATTRIBUTES, &args, options).await
    }

    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_folder_permissions(&self, project_id: &str, folder_id: &str) -> Result<Value> {
        let options = content_type(RequestOptions::new(), "application/json");
        self.api.call_json(&GET_FOLDER_PERMISSIONS, &[project_id, folder_id], options).await
    }

    /// # Errors
    /// Propagates dispatcher errors.
    #[instrument(skip(self, subjects), fields(subjects = subjects.len()))]
    pub async fn batch_update_permissions(
        &self,
        project_id: &str,
        folder_id: &str,
        subjects: &[Subject],
    ) -> Result<Value> {
        let body = serde_json::to_value(subjects)
            .map_err(|err| ForgeError::Serialization(err.to_string()))?;
        let options = content_type(RequestOptions::new(), "application/json").json(body);
        self.api.call_json(&BATCH_UPDATE_PERMISSIONS, &[project_id, folder_id], options).await
    }

    /// Every item of an `{ items, next }` listing under this service
    ///
    /// # Errors
    /// Aborts with the first page error.
    pub async fn get_all_items(&self, path: &str) -> Result<Vec<Value>> {
        self.api.get_all_cursor(path, READ_SCOPES, json_api()).await
    }
}

/// Single naming standard ID listed in a folder's
/// `attributes.extension.data.namingStandardIds`
///
/// # Errors
/// `ForgeError::MalformedResponse` when the response carries no naming standard id.
pub fn naming_standard_id(folder: &Value) -> Result<String> {
    let ids = folder
        .pointer("/attributes/extension/data/namingStandardIds")
        .and_then(Value::as_array)
        .ok_or_else(|| ForgeError::InvalidInput("folder has no namingStandardIds".into()))?;

    match ids.as_slice() {
        [id] => id
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ForgeError::InvalidInput("naming standard ID is not a string".into())),
        [] => Err(ForgeError::InvalidInput("folder has no naming standard".into())),
        many => Err(ForgeError::InvalidInput(format!(
            "expected one naming standard per folder, found {}",
            many.len()
        ))),
    }
}
