//! Object storage capability consumed by the purge flow.
//!
//! Only two calls are needed: a prefix-scoped listing that yields keys lazily
//! and a single-key delete. [`S3Store`] talks to any S3-protocol endpoint;
//! tests run against an in-memory store.

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

#[cfg(test)]
pub mod memory;
mod s3;

pub use s3::S3Store;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("access to bucket {bucket} was refused, check the storage credentials")]
    Authentication {
        bucket: String,
        #[source]
        source: BoxError,
    },

    #[error("bucket {bucket} does not exist")]
    NotFound {
        bucket: String,
        #[source]
        source: BoxError,
    },

    #[error("listing bucket {bucket} failed")]
    Transient {
        bucket: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to delete {key}")]
    DeleteFailure {
        key: String,
        #[source]
        source: BoxError,
    },
}

/// Coarse failure class of a backend response, derived from the service
/// error code and the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureKind {
    Authentication,
    NotFound,
    Other,
}

const AUTH_CODES: &[&str] = &[
    "AccessDenied",
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "InvalidToken",
    "ExpiredToken",
];

pub(crate) fn classify(code: Option<&str>, status: Option<u16>) -> FailureKind {
    if let Some(code) = code {
        if code == "NoSuchBucket" {
            return FailureKind::NotFound;
        }
        if AUTH_CODES.contains(&code) {
            return FailureKind::Authentication;
        }
    }
    match status {
        Some(401) | Some(403) => FailureKind::Authentication,
        Some(404) => FailureKind::NotFound,
        _ => FailureKind::Other,
    }
}

impl StoreError {
    /// Wraps a failed listing call in the variant matching its failure class.
    pub(crate) fn listing(bucket: &str, kind: FailureKind, source: BoxError) -> Self {
        let bucket = bucket.to_string();
        match kind {
            FailureKind::Authentication => StoreError::Authentication { bucket, source },
            FailureKind::NotFound => StoreError::NotFound { bucket, source },
            FailureKind::Other => StoreError::Transient { bucket, source },
        }
    }
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Keys starting with `prefix`, in the order the backend returns them.
    fn list<'a>(&'a self, prefix: &'a str) -> BoxStream<'a, Result<String, StoreError>>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bucket_code_wins_over_status() {
        assert_eq!(classify(Some("NoSuchBucket"), Some(404)), FailureKind::NotFound);
        assert_eq!(classify(Some("NoSuchBucket"), None), FailureKind::NotFound);
    }

    #[test]
    fn credential_codes_are_authentication() {
        for code in AUTH_CODES {
            assert_eq!(classify(Some(code), Some(400)), FailureKind::Authentication);
        }
    }

    #[test]
    fn falls_back_to_status() {
        assert_eq!(classify(None, Some(403)), FailureKind::Authentication);
        assert_eq!(classify(None, Some(401)), FailureKind::Authentication);
        assert_eq!(classify(Some("Unknown"), Some(404)), FailureKind::NotFound);
        assert_eq!(classify(Some("SlowDown"), Some(503)), FailureKind::Other);
        assert_eq!(classify(None, None), FailureKind::Other);
    }

    #[test]
    fn listing_error_names_the_bucket() {
        let err = StoreError::listing("images", FailureKind::NotFound, "404".into());
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(err.to_string(), "bucket images does not exist");

        let err = StoreError::listing("images", FailureKind::Other, "timeout".into());
        assert!(matches!(err, StoreError::Transient { .. }));
    }
}
