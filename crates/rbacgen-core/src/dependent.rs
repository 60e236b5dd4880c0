//! Dependent resources and their capabilities
//!
//! A dependent is an auxiliary resource a controller reads, and possibly
//! creates, updates or deletes, while reconciling its primary resource.
//!
//! # Targets
//!
//! - `kubernetes`: a concrete, statically known Kubernetes resource type
//! - `generic`: a type-erased Kubernetes resource whose group/version/kind is
//!   supplied in configuration; `resource` is the static fallback used when
//!   no group/version/kind is given
//! - `external`: not a cluster object (in-memory state, external systems);
//!   contributes no access rule
//!
//! ```yaml
//! dependents:
//!   config:
//!     type: kubernetes
//!     resource: { version: v1, kind: ConfigMap }
//!     capabilities: [update, delete]
//!   anything:
//!     type: generic
//!     groupVersionKind: { group: apps, version: v1, kind: Deployment }
//!     capabilities: [create]
//!   database:
//!     type: external
//! ```

use indexmap::IndexMap;
use kube::core::GroupVersionKind;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result};
use crate::resource::ResourceType;

/// A single declared capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Always implied, accepted for explicitness
    Read,
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// What a dependent does with its resource beyond reading it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Capability>", into = "Vec<Capability>")]
pub struct Capabilities {
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl Capabilities {
    pub const fn read_only() -> Self {
        Self {
            create: false,
            update: false,
            delete: false,
        }
    }

    pub const fn full() -> Self {
        Self {
            create: true,
            update: true,
            delete: true,
        }
    }

    pub const fn with_create(mut self) -> Self {
        self.create = true;
        self
    }

    pub const fn with_update(mut self) -> Self {
        self.update = true;
        self
    }

    pub const fn with_delete(mut self) -> Self {
        self.delete = true;
        self
    }

    pub fn is_read_only(&self) -> bool {
        !(self.create || self.update || self.delete)
    }
}

impl From<Vec<Capability>> for Capabilities {
    fn from(list: Vec<Capability>) -> Self {
        list.into_iter().fold(Self::read_only(), |caps, cap| match cap {
            Capability::Read => caps,
            Capability::Create => caps.with_create(),
            Capability::Update => caps.with_update(),
            Capability::Delete => caps.with_delete(),
        })
    }
}

impl From<Capabilities> for Vec<Capability> {
    fn from(caps: Capabilities) -> Self {
        let mut list = vec![Capability::Read];
        if caps.create {
            list.push(Capability::Create);
        }
        if caps.update {
            list.push(Capability::Update);
        }
        if caps.delete {
            list.push(Capability::Delete);
        }
        list
    }
}

impl std::fmt::Display for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = Vec::<Capability>::from(*self)
            .iter()
            .map(ToString::to_string)
            .collect();
        write!(f, "{}", names.join(", "))
    }
}

/// What kind of resource a dependent manages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DependentTarget {
    /// A concrete Kubernetes resource type
    Kubernetes { resource: ResourceType },

    /// A type-erased Kubernetes resource
    Generic {
        /// Static fallback when no group/version/kind is supplied
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resource: Option<ResourceType>,

        #[serde(
            default,
            rename = "groupVersionKind",
            deserialize_with = "deserialize_gvk",
            skip_serializing_if = "Option::is_none"
        )]
        group_version_kind: Option<GroupVersionKind>,
    },

    /// Not a cluster object
    External,
}

/// Keys a target may carry next to `capabilities`
const TARGET_KEYS: [&str; 3] = ["type", "resource", "groupVersionKind"];

/// Group/version/kind as written in configuration, with the core group as default
#[derive(Deserialize)]
struct GvkDef {
    #[serde(default)]
    group: String,
    version: String,
    kind: String,
}

fn deserialize_gvk<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<GroupVersionKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let def = Option::<GvkDef>::deserialize(deserializer)?;
    Ok(def.map(|d| GroupVersionKind::gvk(&d.group, &d.version, &d.kind)))
}

impl DependentTarget {
    /// Whether this target is a Kubernetes object at all
    pub fn is_kubernetes(&self) -> bool {
        !matches!(self, Self::External)
    }

    /// Human-readable description
    pub fn description(&self) -> String {
        match self {
            Self::Kubernetes { resource } => resource.to_string(),
            Self::Generic {
                group_version_kind: Some(gvk),
                ..
            } => {
                if gvk.group.is_empty() {
                    format!("generic {}/{}", gvk.version, gvk.kind)
                } else {
                    format!("generic {}/{}/{}", gvk.group, gvk.version, gvk.kind)
                }
            }
            Self::Generic {
                resource: Some(resource),
                group_version_kind: None,
            } => format!("generic (fallback {resource})"),
            Self::Generic { .. } => "generic (unresolved)".to_string(),
            Self::External => "external".to_string(),
        }
    }
}

/// A dependent resource declared by a controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentSpec {
    #[serde(flatten)]
    pub target: DependentTarget,

    #[serde(default, skip_serializing_if = "Capabilities::is_read_only")]
    pub capabilities: Capabilities,

    /// Every other key, rejected on validation
    #[serde(flatten)]
    extra: IndexMap<String, serde_yaml::Value>,
}

impl DependentSpec {
    /// A dependent on a concrete Kubernetes resource type
    pub fn kubernetes(resource: ResourceType, capabilities: Capabilities) -> Self {
        Self {
            target: DependentTarget::Kubernetes { resource },
            capabilities,
            extra: IndexMap::new(),
        }
    }

    /// A generic dependent resolved through its group/version/kind
    pub fn generic(gvk: GroupVersionKind, capabilities: Capabilities) -> Self {
        Self {
            target: DependentTarget::Generic {
                resource: None,
                group_version_kind: Some(gvk),
            },
            capabilities,
            extra: IndexMap::new(),
        }
    }

    /// A generic dependent with only a static fallback resource
    pub fn generic_fallback(resource: ResourceType, capabilities: Capabilities) -> Self {
        Self {
            target: DependentTarget::Generic {
                resource: Some(resource),
                group_version_kind: None,
            },
            capabilities,
            extra: IndexMap::new(),
        }
    }

    /// A dependent that is not a cluster object
    pub fn external(capabilities: Capabilities) -> Self {
        Self {
            target: DependentTarget::External,
            capabilities,
            extra: IndexMap::new(),
        }
    }

    /// Describe a statically declared dependent
    pub fn for_dependent<D: DependentResource>() -> Self {
        Self::kubernetes(ResourceType::of::<D::Resource>(), D::CAPABILITIES)
    }

    pub(crate) fn validate(&self, context: &str) -> Result<()> {
        let unknown: Vec<&str> = self
            .extra
            .keys()
            .map(String::as_str)
            .filter(|key| !TARGET_KEYS.contains(key))
            .collect();
        if !unknown.is_empty() {
            return Err(CoreError::invalid(format!(
                "{context}: unknown field(s) {}",
                unknown
                    .iter()
                    .map(|k| format!("'{k}'"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        match &self.target {
            DependentTarget::Kubernetes { resource } => resource.validate(context),
            DependentTarget::Generic {
                resource,
                group_version_kind,
            } => {
                if let Some(resource) = resource {
                    resource.validate(context)?;
                }
                match group_version_kind {
                    Some(gvk) if gvk.kind.trim().is_empty() => Err(CoreError::invalid(format!(
                        "{context}: groupVersionKind has an empty kind"
                    ))),
                    Some(_) => Ok(()),
                    None if resource.is_none() => Err(CoreError::invalid(format!(
                        "{context}: generic dependent needs a groupVersionKind or a fallback resource"
                    ))),
                    None => Ok(()),
                }
            }
            DependentTarget::External => Ok(()),
        }
    }
}

/// A dependent known at compile time
///
/// Implementors name the Kubernetes type they manage and declare what they
/// do with it.
///
/// ```ignore
/// struct ConfigMapDependent;
///
/// impl DependentResource for ConfigMapDependent {
///     type Resource = ConfigMap;
///     const CAPABILITIES: Capabilities = Capabilities::read_only().with_update();
/// }
/// ```
pub trait DependentResource {
    type Resource: kube::core::Resource<DynamicType = ()>;

    const CAPABILITIES: Capabilities;
}
