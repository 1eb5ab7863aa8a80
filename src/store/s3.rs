use async_trait::async_trait;
use aws_credential_types::provider::error::CredentialsError;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::Client;
use std::error::Error;
use futures::stream::BoxStream;
use tracing::debug;

use super::{classify, FailureKind, ObjectStore, StoreError};

/// A single bucket reached through the S3 API. Works against AWS, MinIO and
/// the Google Cloud Storage interoperability endpoint.
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

fn failure_of<E>(err: &SdkError<E, HttpResponse>) -> FailureKind
where
    E: ProvideErrorMetadata + Error + 'static,
{
    if credentials_unavailable(err) {
        return FailureKind::Authentication;
    }
    let status = err.raw_response().map(|response| response.status().as_u16());
    classify(err.code(), status)
}

/// True when the request never left the client because no credentials could
/// be resolved. The SDK reports this as a dispatch failure with neither a
/// service code nor a response.
fn credentials_unavailable(err: &(dyn Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if err.is::<CredentialsError>() {
            return true;
        }
        current = err.source();
    }
    false
}

#[async_trait]
impl ObjectStore for S3Store {
    fn list<'a>(&'a self, prefix: &'a str) -> BoxStream<'a, Result<String, StoreError>> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        Box::pin(async_stream::stream! {
            let mut page_number = 0usize;
            while let Some(page) = pages.next().await {
                let page = match page {
                    Ok(page) => page,
                    Err(err) => {
                        let kind = failure_of(&err);
                        yield Err(StoreError::listing(&self.bucket, kind, Box::new(err)));
                        break;
                    }
                };
                page_number += 1;
                debug!(page = page_number, objects = page.contents().len(), "listed page");
                for object in page.contents() {
                    if let Some(key) = object.key() {
                        yield Ok(key.to_string());
                    }
                }
            }
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| StoreError::DeleteFailure {
                key: key.to_string(),
                source: Box::new(err),
            })?;
        Ok(())
    }
}
