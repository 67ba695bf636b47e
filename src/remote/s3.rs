use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

use crate::error::{Error, Result};

use super::ObjectStore;

/// S3-backed object store.
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn bucket_exists(&self, bucket: &str) -> Result<()> {
        self.client
            .head_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                Error::Storage(format!(
                    "bucket {bucket:?} is not accessible: {}",
                    e.into_service_error()
                ))
            })?;
        Ok(())
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_err = e.into_service_error();
                if service_err.is_not_found() {
                    debug!(bucket, key, "object not found");
                    return Ok(false);
                }
                Err(Error::Storage(format!(
                    "head object s3://{bucket}/{key}: {service_err}"
                )))
            }
        }
    }

    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| Error::Storage(format!("read {path:?} for upload: {e}")))?;
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                Error::Storage(format!(
                    "put object s3://{bucket}/{key}: {}",
                    e.into_service_error()
                ))
            })?;
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                Error::Storage(format!(
                    "get object s3://{bucket}/{key}: {}",
                    e.into_service_error()
                ))
            })?;
        let body = resp
            .body
            .collect()
            .await
            .map_err(|e| Error::Storage(format!("read object body s3://{bucket}/{key}: {e}")))?;
        Ok(body.into_bytes().to_vec())
    }
}
