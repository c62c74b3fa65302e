use serde::{Deserialize, Serialize};

/// Connection settings for an S3-backed storage target. Consumed by whoever
/// wires a bucket-backed [`BlobStorage`](super::BlobStorage) implementation;
/// the core only ships the shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketOptions {
    pub profile: String,
    pub region: String,
    pub bucket_name: String,
    #[serde(default = "BucketOptions::default_endpoint_name")]
    pub endpoint_name: String,
    #[serde(default)]
    pub role_arn: Option<String>,
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Default for BucketOptions {
    fn default() -> Self {
        Self {
            profile: String::new(),
            region: String::new(),
            bucket_name: String::new(),
            endpoint_name: Self::default_endpoint_name(),
            role_arn: None,
            endpoint_url: None,
        }
    }
}

impl BucketOptions {
    fn default_endpoint_name() -> String {
        "SAML".to_string()
    }

    pub fn with_profile(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            ..Default::default()
        }
    }

    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn for_bucket(mut self, bucket_name: impl Into<String>) -> Self {
        self.bucket_name = bucket_name.into();
        self
    }
}

/// Shared-key connection settings for an Azure blob storage target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlobSharedKeyOptions {
    pub name: String,
    pub key: String,
    pub container: String,
}

impl BlobSharedKeyOptions {
    pub fn for_account(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn in_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }
}
