//! Error types for rbacgen-kube

use thiserror::Error;

/// Result type for rbacgen-kube operations
pub type Result<T> = std::result::Result<T, KubeError>;

/// Errors that can occur while assembling manifests
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KubeError {
    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid manifest
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}

impl From<serde_json::Error> for KubeError {
    fn from(e: serde_json::Error) -> Self {
        KubeError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for KubeError {
    fn from(e: serde_yaml::Error) -> Self {
        KubeError::Serialization(e.to_string())
    }
}
