//! Controller and operator configuration
//!
//! The configuration file lists every controller of an operator, with the
//! resource it reconciles, its dependents in declaration order, and any
//! access rules that cannot be derived automatically.
//!
//! ```yaml
//! validateCrds: true
//! controllers:
//!   - name: widget-reconciler
//!     resource: { group: example.io, version: v1, kind: Widget, status: true }
//!     dependents:
//!       config:
//!         type: kubernetes
//!         resource: { version: v1, kind: ConfigMap }
//!         capabilities: [update, delete]
//!     additionalRules:
//!       - apiGroups: [coordination.k8s.io]
//!         resources: [leases]
//!         verbs: [get, create, update]
//! ```

use indexmap::IndexMap;
use k8s_openapi::api::rbac::v1::PolicyRule;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::dependent::DependentSpec;
use crate::error::{CoreError, Result};
use crate::resource::PrimaryResource;

/// A controller and everything its access rules are derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerSpec {
    /// Controller name, also the base of its cluster role name
    pub name: String,

    /// The primary resource
    pub resource: PrimaryResource,

    /// Dependents by name, in declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dependents: IndexMap<String, DependentSpec>,

    /// Manually declared rules, merged after the derived ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_rules: Vec<PolicyRule>,
}

impl ControllerSpec {
    pub fn new(name: impl Into<String>, resource: PrimaryResource) -> Self {
        Self {
            name: name.into(),
            resource,
            dependents: IndexMap::new(),
            additional_rules: Vec::new(),
        }
    }

    /// Add a dependent (replaces one of the same name, keeping its position)
    pub fn with_dependent(mut self, name: impl Into<String>, spec: DependentSpec) -> Self {
        self.dependents.insert(name.into(), spec);
        self
    }

    /// Add a manually declared rule
    pub fn with_rule(mut self, rule: PolicyRule) -> Self {
        self.additional_rules.push(rule);
        self
    }

    /// Check that the controller is well formed
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::invalid("controller name is empty"));
        }

        let context = format!("controller '{}'", self.name);
        self.resource.resource.validate(&context)?;

        for (name, dependent) in &self.dependents {
            dependent.validate(&format!("{context}, dependent '{name}'"))?;
        }

        for (idx, rule) in self.additional_rules.iter().enumerate() {
            if rule.verbs.is_empty() {
                return Err(CoreError::invalid(format!(
                    "{context}: additional rule #{} has no verbs",
                    idx + 1
                )));
            }
        }

        Ok(())
    }
}

/// Configuration of a whole operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorConfig {
    /// Also grant read access to CustomResourceDefinitions
    #[serde(default)]
    pub validate_crds: bool,

    #[serde(default)]
    pub controllers: Vec<ControllerSpec>,
}

impl OperatorConfig {
    /// Load and validate a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            controllers = config.controllers.len(),
            "loaded operator configuration"
        );
        Ok(config)
    }

    /// Parse and validate a configuration document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for controller in &self.controllers {
            controller.validate()?;
            if !seen.insert(controller.name.as_str()) {
                return Err(CoreError::DuplicateController {
                    name: controller.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Find a controller by name
    pub fn controller(&self, name: &str) -> Option<&ControllerSpec> {
        self.controllers.iter().find(|c| c.name == name)
    }
}
