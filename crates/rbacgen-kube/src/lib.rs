//! rbacgen Kube - Cluster role derivation for Kubernetes controllers
//!
//! This crate provides:
//! - **Verb derivation**: The verbs a dependent needs, from its capabilities
//! - **Rule derivation**: Primary resource, dependent and declared rules for a controller
//! - **Rule merging**: One rule per (API groups, resources) identity, verbs unioned
//! - **Cluster roles**: One `ClusterRole` per controller, plus a shared CRD-reading role
//! - **Manifests**: An ordered manifest list the roles are attached to

pub mod cluster_role;
pub mod error;
pub mod manifests;
pub mod rbac;

pub use cluster_role::{
    CRD_VALIDATING_CLUSTER_ROLE_NAME, cluster_role_name, create_cluster_role,
    crd_validating_cluster_role,
};
pub use error::{KubeError, Result};
pub use manifests::{ClusterRoleGenerator, ManifestList};
pub use rbac::{
    ResolvedResource, dependent_rules, derive_rules, merge_rules, primary_rule,
    resolve_dependent, verbs_for,
};
