//! Model derivative service client
//!
//! Endpoints exist once per region; [`Region::Emea`] calls go through the
//! `/regions/eu` variant of each path.

use forge_domain::constants::{DEFAULT_CHUNK_SIZE, HEADER_FORCE};
use forge_domain::{ForgeError, Region, Result};
use reqwest::header::{HeaderName, HeaderValue, CONTENT_LENGTH, RANGE};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::endpoints::model_derivative::{
    DELETE_MANIFEST, GET_DERIVATIVE, GET_DERIVATIVE_INFO, GET_FORMATS, GET_MANIFEST, GET_METADATA,
    GET_THUMBNAIL, GET_VIEWABLE_PROPERTIES, GET_VIEWABLE_TREE, SUBMIT_JOB,
};
use crate::endpoints::Endpoint;
use crate::errors::InfraError;
use crate::http::{read_bytes, read_json, RequestOptions};

/// Translation job submitted to [`ModelDerivativeClient::submit_job`]
#[derive(Debug, Clone, PartialEq)]
pub struct JobRequest {
    /// URL-safe base64 ID of the source object, see [`forge_domain::urnify`]
    pub urn: String,
    /// Requested outputs, each with at least a `type` (`svf`, `svf2`, ...)
    pub formats: Vec<Value>,
    pub output_region: Region,
    /// Entry file when the source is a ZIP archive
    pub root_filename: Option<String>,
    pub workflow_id: Option<String>,
    pub workflow_attribute: Option<Value>,
    /// Re-translate even if derivatives already exist
    pub force: bool,
}

impl JobRequest {
    #[must_use]
    pub fn new(urn: impl Into<String>, formats: Vec<Value>) -> Self {
        Self {
            urn: urn.into(),
            formats,
            output_region: Region::Us,
            root_filename: None,
            workflow_id: None,
            workflow_attribute: None,
            force: false,
        }
    }

    #[must_use]
    pub fn output_region(mut self, region: Region) -> Self {
        self.output_region = region;
        self
    }

    #[must_use]
    pub fn root_filename(mut self, name: impl Into<String>) -> Self {
        self.root_filename = Some(name.into());
        self
    }

    #[must_use]
    pub fn workflow(mut self, id: impl Into<String>, attribute: Option<Value>) -> Self {
        self.workflow_id = Some(id.into());
        self.workflow_attribute = attribute;
        self
    }

    #[must_use]
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// JSON body of the job request
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut body = json!({
            "input": { "urn": self.urn },
            "output": {
                "formats": self.formats,
                "destination": { "region": self.output_region.as_str() }
            }
        });
        if let Some(root) = &self.root_filename {
            body["input"]["compressedUrn"] = Value::Bool(true);
            body["input"]["rootFilename"] = Value::String(root.clone());
        }
        if let Some(workflow_id) = &self.workflow_id {
            body["misc"] = json!({ "workflowId": workflow_id });
            if let Some(attribute) = &self.workflow_attribute {
                body["misc"]["workflowAttribute"] = attribute.clone();
            }
        }
        body
    }
}

/// Result of a derivative HEAD request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivativeInfo {
    /// Size in bytes, from `Content-Length`
    pub size: u64,
}

/// Translation jobs, manifests, metadata and derivative downloads
#[derive(Clone, Debug)]
pub struct ModelDerivativeClient {
    api: ApiClient,
}

impl_service_client!(ModelDerivativeClient, model_derivative_url);

impl ModelDerivativeClient {
    /// Supported translation formats; needs no scopes
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_formats(&self) -> Result<Value> {
        self.api.call_json(&GET_FORMATS, &[], RequestOptions::new()).await
    }

    /// Start translating a design
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    #[instrument(skip(self, job), fields(region = %job.output_region, force = job.force))]
    pub async fn submit_job(&self, job: &JobRequest) -> Result<Value> {
        let mut options = RequestOptions::new().json(job.to_body());
        if job.force {
            options = options
                .header(HeaderName::from_static(HEADER_FORCE), HeaderValue::from_static("true"));
        }
        self.send_json(job.output_region, &SUBMIT_JOB, &[], options).await
    }

    /// Thumbnail image bytes
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_thumbnail(
        &self,
        urn: &str,
        width: Option<u32>,
        height: Option<u32>,
        region: Region,
    ) -> Result<Vec<u8>> {
        let options = RequestOptions::new().param_opt("width", width).param_opt("height", height);
        let response = self.send(region, &GET_THUMBNAIL, &[urn], options).await?;
        read_bytes(response).await
    }

    /// Translation status and derivative tree of a source file
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_manifest(&self, urn: &str, region: Region) -> Result<Value> {
        self.send_json(region, &GET_MANIFEST, &[urn], RequestOptions::new()).await
    }

    /// Delete the manifest and all derivatives of a source file
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    #[instrument(skip(self))]
    pub async fn delete_manifest(&self, urn: &str, region: Region) -> Result<()> {
        self.send(region, &DELETE_MANIFEST, &[urn], RequestOptions::new()).await?;
        Ok(())
    }

    /// Viewables (model views) of a translated file
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_metadata(&self, urn: &str, region: Region) -> Result<Value> {
        self.send_json(region, &GET_METADATA, &[urn], RequestOptions::new()).await
    }

    /// Object hierarchy of one viewable
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_viewable_tree(&self, urn: &str, guid: &str, region: Region) -> Result<Value> {
        self.send_json(region, &GET_VIEWABLE_TREE, &[urn, guid], RequestOptions::new()).await
    }

    /// Properties of every object in one viewable
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_viewable_properties(
        &self,
        urn: &str,
        guid: &str,
        region: Region,
    ) -> Result<Value> {
        self.send_json(region, &GET_VIEWABLE_PROPERTIES, &[urn, guid], RequestOptions::new()).await
    }

    /// Size of a derivative, without downloading it
    ///
    /// # Errors
    /// Returns `ForgeError::MalformedResponse` if the response carries no
    /// usable `Content-Length`.
    pub async fn get_derivative_info(
        &self,
        urn: &str,
        derivative_urn: &str,
        region: Region,
    ) -> Result<DerivativeInfo> {
        let response =
            self.send(region, &GET_DERIVATIVE_INFO, &[urn, derivative_urn], RequestOptions::new())
                .await?;
        let size = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .ok_or_else(|| {
                ForgeError::MalformedResponse("derivative has no Content-Length".to_string())
            })?;
        Ok(DerivativeInfo { size })
    }

    /// Derivative bytes, optionally limited to the inclusive byte range
    /// `(first, last)`
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_derivative(
        &self,
        urn: &str,
        derivative_urn: &str,
        region: Region,
        byte_range: Option<(u64, u64)>,
    ) -> Result<Vec<u8>> {
        let mut options = RequestOptions::new();
        if let Some((first, last)) = byte_range {
            let value =
                HeaderValue::from_str(&format!("bytes={first}-{last}")).map_err(InfraError::from)?;
            options = options.header(RANGE, value);
        }
        let response = self.send(region, &GET_DERIVATIVE, &[urn, derivative_urn], options).await?;
        read_bytes(response).await
    }

    /// Whole derivative, fetched as sequential ranged requests of
    /// `chunk_size` bytes (1 MiB when `None`)
    ///
    /// # Errors
    /// Returns `ForgeError::InvalidInput` for a zero chunk size.
    #[instrument(skip(self))]
    pub async fn get_derivative_chunked(
        &self,
        urn: &str,
        derivative_urn: &str,
        region: Region,
        chunk_size: Option<u64>,
    ) -> Result<Vec<u8>> {
        let chunk_size = chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
        if chunk_size == 0 {
            return Err(ForgeError::InvalidInput("chunk size must be greater than zero".into()));
        }

        let DerivativeInfo { size } = self.get_derivative_info(urn, derivative_urn, region).await?;
        let mut buffer = Vec::new();
        let mut downloaded = 0u64;
        let mut chunks = 0usize;

        while downloaded < size {
            let last = downloaded.saturating_add(chunk_size - 1).min(size - 1);
            let chunk =
                self.get_derivative(urn, derivative_urn, region, Some((downloaded, last))).await?;
            if chunk.is_empty() {
                return Err(ForgeError::MalformedResponse(format!(
                    "empty chunk for bytes {downloaded}-{last} of {size}"
                )));
            }
            downloaded += chunk.len() as u64;
            buffer.extend_from_slice(&chunk);
            chunks += 1;
        }

        debug!(chunks, size, "derivative download complete");
        Ok(buffer)
    }

    async fn send(
        &self,
        region: Region,
        endpoint: &Endpoint,
        args: &[&str],
        options: RequestOptions,
    ) -> Result<reqwest::Response> {
        let path = format!("{}{}", region.derivative_prefix(), endpoint.render(args)?);
        self.api.request(endpoint.method.clone(), &path, endpoint.scopes, options).await
    }

    async fn send_json(
        &self,
        region: Region,
        endpoint: &Endpoint,
        args: &[&str],
        options: RequestOptions,
    ) -> Result<Value> {
        let response = self.send(region, endpoint, args, options).await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_body_defaults_to_us_destination() {
        let job = JobRequest::new("dXJu", vec![json!({"type": "svf", "views": ["2d", "3d"]})]);
        assert_eq!(
            job.to_body(),
            json!({
                "input": {"urn": "dXJu"},
                "output": {
                    "formats": [{"type": "svf", "views": ["2d", "3d"]}],
                    "destination": {"region": "US"}
                }
            })
        );
    }

    #[test]
    fn job_body_includes_archive_and_workflow_fields() {
        let body = JobRequest::new("dXJu", vec![])
            .output_region(Region::Emea)
            .root_filename("main.rvt")
            .workflow("wf-1", Some(json!({"k": "v"})))
            .to_body();

        assert_eq!(body["input"]["compressedUrn"], true);
        assert_eq!(body["input"]["rootFilename"], "main.rvt");
        assert_eq!(body["output"]["destination"]["region"], "EMEA");
        assert_eq!(body["misc"], json!({"workflowId": "wf-1", "workflowAttribute": {"k": "v"}}));
    }
}
