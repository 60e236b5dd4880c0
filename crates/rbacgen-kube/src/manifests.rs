//! Manifest list and cluster role attachment
//!
//! Generated cluster roles are appended to a `ManifestList`, an ordered
//! collection of arbitrary Kubernetes objects rendered as multi-document
//! YAML.

use k8s_openapi::api::rbac::v1::ClusterRole;
use kube::core::{DynamicObject, Resource};
use rbacgen_core::{ControllerSpec, OperatorConfig};
use serde::Serialize;

use crate::cluster_role::{
    CRD_VALIDATING_CLUSTER_ROLE_NAME, create_cluster_role, crd_validating_cluster_role,
};
use crate::error::{KubeError, Result};

/// Ordered collection of Kubernetes objects
#[derive(Debug, Clone, Default)]
pub struct ManifestList {
    items: Vec<DynamicObject>,
}

impl ManifestList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a Kubernetes object
    ///
    /// The object must serialize with `apiVersion` and `kind`.
    pub fn push<K: Serialize>(&mut self, resource: &K) -> Result<()> {
        let value = serde_json::to_value(resource)?;
        let object: DynamicObject = serde_json::from_value(value)?;

        if object.types.is_none() {
            return Err(KubeError::InvalidManifest(format!(
                "object '{}' has no apiVersion/kind",
                object.metadata.name.as_deref().unwrap_or("<unnamed>")
            )));
        }

        self.items.push(object);
        Ok(())
    }

    /// Check whether an object with this apiVersion, kind and name is present
    pub fn contains(&self, api_version: &str, kind: &str, name: &str) -> bool {
        self.items.iter().any(|item| {
            item.types
                .as_ref()
                .is_some_and(|t| t.api_version == api_version && t.kind == kind)
                && item.metadata.name.as_deref() == Some(name)
        })
    }

    pub fn items(&self) -> &[DynamicObject] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render as multi-document YAML
    pub fn to_yaml(&self) -> Result<String> {
        let docs = self
            .items
            .iter()
            .map(serde_yaml::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(docs.join("---\n"))
    }
}

/// Attaches controller cluster roles to a manifest list
#[derive(Debug, Clone)]
pub struct ClusterRoleGenerator {
    controllers: Vec<ControllerSpec>,
    validate_crds: bool,
}

impl ClusterRoleGenerator {
    pub fn new(controllers: Vec<ControllerSpec>, validate_crds: bool) -> Self {
        Self {
            controllers,
            validate_crds,
        }
    }

    pub fn from_config(config: &OperatorConfig) -> Self {
        Self::new(config.controllers.clone(), config.validate_crds)
    }

    /// Append one cluster role per controller, in order
    ///
    /// When CRD validation is requested the shared CRD-reading role is
    /// appended too, unless the list already holds it.
    pub fn apply(&self, list: &mut ManifestList) -> Result<()> {
        for controller in &self.controllers {
            list.push(&create_cluster_role(controller))?;
        }

        if self.validate_crds {
            let api_version = ClusterRole::api_version(&());
            let kind = ClusterRole::kind(&());
            if !list.contains(&api_version, &kind, CRD_VALIDATING_CLUSTER_ROLE_NAME) {
                list.push(&crd_validating_cluster_role())?;
            } else {
                tracing::debug!("CRD validating cluster role already present");
            }
        }

        Ok(())
    }
}
