//! Candidate rules for the primary resource and the dependents

use indexmap::IndexMap;
use k8s_openapi::api::rbac::v1::PolicyRule;
use rbacgen_core::{DependentSpec, DependentTarget, PrimaryResource};

use super::verbs::{ALL_COMMON_VERBS, verbs_for};

/// Resource name used when the plural of a generic dependent is unknown
pub const ANY_RESOURCE: &str = "*";

/// The (API group, resource name) a dependent's rule targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub group: String,
    pub resource: String,
}

/// Resolve the API group and resource name a dependent needs access to
///
/// Returns `None` for dependents that are not Kubernetes objects.
/// Generic dependents with a group/version/kind use that group and the `*`
/// resource name, since the plural cannot be derived for an arbitrary kind.
/// Without one they fall back to their static resource.
pub fn resolve_dependent(spec: &DependentSpec) -> Option<ResolvedResource> {
    match &spec.target {
        DependentTarget::Kubernetes { resource } => Some(ResolvedResource {
            group: resource.group.clone(),
            resource: resource.plural(),
        }),
        DependentTarget::Generic {
            group_version_kind: Some(gvk),
            ..
        } => Some(ResolvedResource {
            group: gvk.group.clone(),
            resource: ANY_RESOURCE.to_string(),
        }),
        DependentTarget::Generic {
            resource: Some(resource),
            group_version_kind: None,
        } => Some(ResolvedResource {
            group: resource.group.clone(),
            resource: resource.plural(),
        }),
        DependentTarget::Generic {
            resource: None,
            group_version_kind: None,
        } => {
            tracing::warn!("generic dependent has neither groupVersionKind nor resource");
            None
        }
        DependentTarget::External => None,
    }
}

/// Rule for the primary resource
///
/// Grants every common verb on the resource, its status sub-resource when
/// present, and its finalizers sub-resource. Finalizer access is needed even
/// without finalizers: the OwnerReferencesPermissionEnforcement admission
/// plugin checks it when owner references block deletion.
pub fn primary_rule(primary: &PrimaryResource) -> PolicyRule {
    let plural = primary.resource.plural();

    let mut resources = vec![plural.clone()];
    if primary.status {
        resources.push(format!("{plural}/status"));
    }
    resources.push(format!("{plural}/finalizers"));

    PolicyRule {
        api_groups: Some(vec![primary.resource.group.clone()]),
        resources: Some(resources),
        verbs: ALL_COMMON_VERBS.iter().map(|v| v.to_string()).collect(),
        ..Default::default()
    }
}

/// One candidate rule per Kubernetes dependent, in declaration order
///
/// Candidates are not deduplicated here.
pub fn dependent_rules(dependents: &IndexMap<String, DependentSpec>) -> Vec<PolicyRule> {
    dependents
        .iter()
        .filter_map(|(name, spec)| {
            let Some(resolved) = resolve_dependent(spec) else {
                tracing::debug!(dependent = %name, "skipping non-Kubernetes dependent");
                return None;
            };

            tracing::debug!(
                dependent = %name,
                group = %resolved.group,
                resource = %resolved.resource,
                capabilities = %spec.capabilities,
                "dependent rule"
            );

            Some(PolicyRule {
                api_groups: Some(vec![resolved.group]),
                resources: Some(vec![resolved.resource]),
                verbs: verbs_for(&spec.capabilities),
                ..Default::default()
            })
        })
        .collect()
}
