//! Merging of rules with the same API groups and resources

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use k8s_openapi::api::rbac::v1::PolicyRule;
use std::collections::BTreeSet;

/// Identity of a rule: its API groups and resources, order-insensitive
///
/// Verbs are not part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RuleKey {
    api_groups: BTreeSet<String>,
    resources: BTreeSet<String>,
}

impl RuleKey {
    fn of(rule: &PolicyRule) -> Self {
        Self {
            api_groups: rule.api_groups.iter().flatten().cloned().collect(),
            resources: rule.resources.iter().flatten().cloned().collect(),
        }
    }
}

/// Merge rules sharing the same API groups and resources
///
/// Rules are kept in first-seen order. A later rule with an already seen
/// identity is folded into the first one: its verbs are appended to the
/// existing verbs, skipping those already present.
///
/// `resourceNames` and `nonResourceURLs` are not part of the identity and
/// only the first rule's values survive. A later unrestricted rule merged
/// into one limited by `resourceNames` ends up limited as well, and the URLs
/// of a later non-resource rule are lost. Such merges are logged as warnings.
pub fn merge_rules<I>(rules: I) -> Vec<PolicyRule>
where
    I: IntoIterator<Item = PolicyRule>,
{
    let mut merged: IndexMap<RuleKey, PolicyRule> = IndexMap::new();

    for rule in rules {
        match merged.entry(RuleKey::of(&rule)) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                let narrowed = rule.resource_names != existing.resource_names
                    || rule.non_resource_urls != existing.non_resource_urls;

                let mut verbs: IndexSet<String> = existing.verbs.drain(..).collect();
                verbs.extend(rule.verbs);
                existing.verbs = verbs.into_iter().collect();

                if narrowed {
                    tracing::warn!(
                        api_groups = ?entry.key().api_groups,
                        resources = ?entry.key().resources,
                        dropped_resource_names = ?rule.resource_names,
                        dropped_non_resource_urls = ?rule.non_resource_urls,
                        "merged rule keeps the first rule's resourceNames and nonResourceURLs"
                    );
                } else {
                    tracing::debug!(
                        api_groups = ?entry.key().api_groups,
                        resources = ?entry.key().resources,
                        "merged rule verbs"
                    );
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(rule);
            }
        }
    }

    merged.into_values().collect()
}
