//! Access rule derivation for a single controller
//!
//! Rules come from three sources, merged in this order:
//!
//! 1. The primary resource: every common verb on the resource, its `/status`
//!    sub-resource (when declared) and its `/finalizers` sub-resource
//! 2. The dependents, in declaration order: read verbs plus whatever their
//!    capabilities require
//! 3. Manually declared rules
//!
//! Candidates naming the same set of API groups and the same set of
//! resources are merged into one rule carrying the union of their verbs.
//!
//! ```text
//! primary ──┐
//! dependents ─┼──► merge_rules ──► Vec<PolicyRule>
//! declared ──┘
//! ```

mod merge;
mod rules;
pub mod verbs;

pub use merge::merge_rules;
pub use rules::{ResolvedResource, dependent_rules, primary_rule, resolve_dependent};
pub use verbs::verbs_for;

use k8s_openapi::api::rbac::v1::PolicyRule;
use rbacgen_core::ControllerSpec;

/// Derive the merged access rules of a controller
///
/// Pure and deterministic: the same controller always yields the same rules
/// in the same order, with the same verb order inside each rule.
pub fn derive_rules(controller: &ControllerSpec) -> Vec<PolicyRule> {
    let candidates = std::iter::once(primary_rule(&controller.resource))
        .chain(dependent_rules(&controller.dependents))
        .chain(controller.additional_rules.iter().cloned());

    let rules = merge_rules(candidates);
    tracing::debug!(
        controller = %controller.name,
        rules = rules.len(),
        "derived access rules"
    );
    rules
}
