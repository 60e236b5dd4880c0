//! Cluster roles built from derived rules

use k8s_openapi::api::rbac::v1::{ClusterRole, PolicyRule};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use rbacgen_core::ControllerSpec;

use crate::rbac::derive_rules;
use crate::rbac::verbs::{GET, LIST};

/// Name of the shared role granting read access to CRDs
pub const CRD_VALIDATING_CLUSTER_ROLE_NAME: &str = "crd-validating-cluster-role";

/// Cluster role name for a controller
pub fn cluster_role_name(controller: &str) -> String {
    format!("{controller}-cluster-role")
}

/// Build the cluster role of a controller
pub fn create_cluster_role(controller: &ControllerSpec) -> ClusterRole {
    ClusterRole {
        metadata: ObjectMeta {
            name: Some(cluster_role_name(&controller.name)),
            ..Default::default()
        },
        rules: Some(derive_rules(controller)),
        ..Default::default()
    }
}

/// Role letting controllers check that their CRDs are installed and current
pub fn crd_validating_cluster_role() -> ClusterRole {
    ClusterRole {
        metadata: ObjectMeta {
            name: Some(CRD_VALIDATING_CLUSTER_ROLE_NAME.to_string()),
            ..Default::default()
        },
        rules: Some(vec![PolicyRule {
            api_groups: Some(vec!["apiextensions.k8s.io".to_string()]),
            resources: Some(vec!["customresourcedefinitions".to_string()]),
            verbs: vec![GET.to_string(), LIST.to_string()],
            ..Default::default()
        }]),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbacgen_core::{Capabilities, DependentSpec, PrimaryResource, ResourceType};

    #[test]
    fn test_cluster_role_name() {
        assert_eq!(cluster_role_name("widget"), "widget-cluster-role");
    }

    #[test]
    fn test_create_cluster_role() {
        let controller = ControllerSpec::new(
            "widget",
            PrimaryResource::new(ResourceType::new("example.io", "v1", "Widget")).with_status(),
        )
        .with_dependent(
            "config",
            DependentSpec::kubernetes(
                ResourceType::new("", "v1", "ConfigMap"),
                Capabilities::read_only(),
            ),
        );

        let role = create_cluster_role(&controller);
        assert_eq!(role.metadata.name.as_deref(), Some("widget-cluster-role"));
        assert_eq!(role.rules.as_ref().map(Vec::len), Some(2));
        assert!(role.aggregation_rule.is_none());
    }

    #[test]
    fn test_crd_validating_cluster_role() {
        let role = crd_validating_cluster_role();
        assert_eq!(
            role.metadata.name.as_deref(),
            Some(CRD_VALIDATING_CLUSTER_ROLE_NAME)
        );
        let rules = role.rules.unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].verbs, vec!["get", "list"]);
        assert_eq!(
            rules[0].resources,
            Some(vec!["customresourcedefinitions".to_string()])
        );
    }
}
