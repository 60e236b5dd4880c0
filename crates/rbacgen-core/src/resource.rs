//! Kubernetes resource identities

use kube::core::{ApiResource, GroupVersionKind};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Identity of a Kubernetes resource type
///
/// The plural is optional in configuration; when absent it is derived from
/// the kind the same way `kube` does for dynamic resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceType {
    /// API group (empty for the core group)
    #[serde(default)]
    pub group: String,

    /// API version (e.g. "v1")
    pub version: String,

    /// Kind (e.g. "ConfigMap")
    pub kind: String,

    /// Plural resource name (e.g. "configmaps")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
}

impl ResourceType {
    /// Create a resource type, deriving its plural from the kind
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
            plural: None,
        }
    }

    /// Set an explicit plural
    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    /// Resource type of a statically typed Kubernetes object
    pub fn of<K>() -> Self
    where
        K: kube::core::Resource<DynamicType = ()>,
    {
        Self {
            group: K::group(&()).into_owned(),
            version: K::version(&()).into_owned(),
            kind: K::kind(&()).into_owned(),
            plural: Some(K::plural(&()).into_owned()),
        }
    }

    /// Group/version/kind of this resource
    pub fn gvk(&self) -> GroupVersionKind {
        GroupVersionKind::gvk(&self.group, &self.version, &self.kind)
    }

    /// apiVersion string ("group/version", or "version" for the core group)
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Plural resource name, explicit or derived
    pub fn plural(&self) -> String {
        match &self.plural {
            Some(plural) => plural.clone(),
            None => ApiResource::from_gvk(&self.gvk()).plural,
        }
    }

    pub(crate) fn validate(&self, context: &str) -> Result<()> {
        if self.kind.trim().is_empty() {
            return Err(CoreError::invalid(format!("{context}: resource kind is empty")));
        }
        if self.version.trim().is_empty() {
            return Err(CoreError::invalid(format!(
                "{context}: resource version is empty for kind '{}'",
                self.kind
            )));
        }
        if matches!(&self.plural, Some(p) if p.trim().is_empty()) {
            return Err(CoreError::invalid(format!(
                "{context}: explicit plural is empty for kind '{}'",
                self.kind
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.api_version(), self.kind)
    }
}

/// The resource a controller reconciles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryResource {
    #[serde(flatten)]
    pub resource: ResourceType,

    /// Whether the resource declares a (non-void) status sub-resource
    #[serde(default)]
    pub status: bool,
}

impl PrimaryResource {
    pub fn new(resource: ResourceType) -> Self {
        Self {
            resource,
            status: false,
        }
    }

    pub fn with_status(mut self) -> Self {
        self.status = true;
        self
    }
}
