//! Object storage service client

use forge_domain::{CursorPage, DataRetention, Region, Result};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::{json, Value};
use tracing::instrument;

use super::with_region;
use crate::api::ApiClient;
use crate::endpoints::oss::{
    COMPLETE_SIGNED_S3_UPLOAD, CREATE_BUCKET, DELETE_BUCKET, DELETE_OBJECT, GET_BUCKETS,
    GET_BUCKET_DETAILS, GET_OBJECTS, GET_OBJECT_DETAILS, GET_SIGNED_S3_UPLOAD, UPLOAD_OBJECT,
};
use crate::http::RequestOptions;

/// Buckets and objects
#[derive(Clone, Debug)]
pub struct OssClient {
    api: ApiClient,
}

impl_service_client!(OssClient, oss_url);

impl OssClient {
    /// One page of buckets
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_buckets(
        &self,
        region: Option<Region>,
        limit: Option<u32>,
        start_at: Option<&str>,
    ) -> Result<CursorPage<Value>> {
        let options = RequestOptions::new()
            .param_opt("region", region)
            .param_opt("limit", limit)
            .param_opt("startAt", start_at);
        self.api.call_json(&GET_BUCKETS, &[], options).await
    }

    /// Every bucket, following `next` links
    ///
    /// # Errors
    /// Aborts with the first page error.
    #[instrument(skip(self))]
    pub async fn get_all_buckets(&self, region: Option<Region>) -> Result<Vec<Value>> {
        let options = RequestOptions::new().param_opt("region", region);
        self.api.get_all_cursor(&GET_BUCKETS.render(&[])?, GET_BUCKETS.scopes, options).await
    }

    /// Bucket owner, creation date and retention policy
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_bucket_details(&self, bucket_key: &str) -> Result<Value> {
        self.api.call_json(&GET_BUCKET_DETAILS, &[bucket_key], RequestOptions::new()).await
    }

    /// Create a bucket owned by the application
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    #[instrument(skip(self))]
    pub async fn create_bucket(
        &self,
        bucket_key: &str,
        policy: DataRetention,
        region: Region,
    ) -> Result<Value> {
        let options = with_region(RequestOptions::new(), Some(region))
            .json(json!({ "bucketKey": bucket_key, "policyKey": policy.as_str() }));
        self.api.call_json(&CREATE_BUCKET, &[], options).await
    }

    /// Delete a bucket and every object in it
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    #[instrument(skip(self))]
    pub async fn delete_bucket(&self, bucket_key: &str) -> Result<()> {
        self.api.call(&DELETE_BUCKET, &[bucket_key], RequestOptions::new()).await?;
        Ok(())
    }

    /// One page of objects in a bucket
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_objects(
        &self,
        bucket_key: &str,
        limit: Option<u32>,
        begins_with: Option<&str>,
        start_at: Option<&str>,
    ) -> Result<CursorPage<Value>> {
        let options = RequestOptions::new()
            .param_opt("limit", limit)
            .param_opt("beginsWith", begins_with)
            .param_opt("startAt", start_at);
        self.api.call_json(&GET_OBJECTS, &[bucket_key], options).await
    }

    /// Every object in a bucket, following `next` links
    ///
    /// # Errors
    /// Aborts with the first page error.
    #[instrument(skip(self))]
    pub async fn get_all_objects(
        &self,
        bucket_key: &str,
        begins_with: Option<&str>,
    ) -> Result<Vec<Value>> {
        let options = RequestOptions::new().param_opt("beginsWith", begins_with);
        let path = GET_OBJECTS.render(&[bucket_key])?;
        self.api.get_all_cursor(&path, GET_OBJECTS.scopes, options).await
    }

    /// Size, SHA-1 and location of one object
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_object_details(&self, bucket_key: &str, object_key: &str) -> Result<Value> {
        self.api
            .call_json(&GET_OBJECT_DETAILS, &[bucket_key, object_key], RequestOptions::new())
            .await
    }

    /// Upload `data`, overwriting any object with the same key
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn upload_object(
        &self,
        bucket_key: &str,
        object_key: &str,
        data: Vec<u8>,
    ) -> Result<Value> {
        let options = RequestOptions::new()
            .header(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"))
            .bytes(data);
        self.api.call_json(&UPLOAD_OBJECT, &[bucket_key, object_key], options).await
    }

    /// Delete one object
    ///
    /// # Errors
    /// A missing object is `ForgeError::HttpStatus` with status 404.
    #[instrument(skip(self))]
    pub async fn delete_object(&self, bucket_key: &str, object_key: &str) -> Result<()> {
        self.api.call(&DELETE_OBJECT, &[bucket_key, object_key], RequestOptions::new()).await?;
        Ok(())
    }

    /// Signed S3 URL(s) for uploading the object directly, plus its `uploadKey`
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_signeds3upload(&self, bucket_key: &str, object_key: &str) -> Result<Value> {
        self.api
            .call_json(&GET_SIGNED_S3_UPLOAD, &[bucket_key, object_key], RequestOptions::new())
            .await
    }

    /// Finish a direct S3 upload started with [`Self::get_signeds3upload`]
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    #[instrument(skip(self))]
    pub async fn post_signeds3upload(
        &self,
        bucket_key: &str,
        object_key: &str,
        upload_key: &str,
    ) -> Result<Value> {
        let options = RequestOptions::new().json(json!({ "uploadKey": upload_key }));
        self.api.call_json(&COMPLETE_SIGNED_S3_UPLOAD, &[bucket_key, object_key], options).await
    }
}
