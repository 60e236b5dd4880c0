//! Display formatting for CLI output
//!
//! Provides structured display for:
//! - Derived rules as an aligned table per controller
//! - Controller summaries with dependent resolution notes
//!
//! Rules restricted by `resourceNames` show the names in brackets after the
//! resources (`secrets[tls]`). Merged rules keep the restriction of the first
//! rule with the same groups and resources, so a later unrestricted grant on
//! those resources is shown, and applied, with the same names.

use console::style;
use k8s_openapi::api::rbac::v1::PolicyRule;
use rbacgen_core::{ControllerSpec, DependentTarget};
use rbacgen_kube::resolve_dependent;

/// Display name of an API group ("core" for the empty group)
pub fn group_label(group: &str) -> &str {
    if group.is_empty() { "core" } else { group }
}

fn join_groups(rule: &PolicyRule) -> String {
    rule.api_groups
        .iter()
        .flatten()
        .map(|g| group_label(g))
        .collect::<Vec<_>>()
        .join(",")
}

fn join_resources(rule: &PolicyRule) -> String {
    let resources: Vec<&str> = rule.resources.iter().flatten().map(String::as_str).collect();
    if resources.is_empty() {
        // Non-resource rules
        rule.non_resource_urls.iter().flatten().cloned().collect::<Vec<_>>().join(",")
    } else {
        let names: Vec<&str> = rule
            .resource_names
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();
        if names.is_empty() {
            resources.join(",")
        } else {
            format!("{}[{}]", resources.join(","), names.join(","))
        }
    }
}

/// Render rules as aligned rows: groups, resources, verbs
pub fn format_rules(rules: &[PolicyRule]) -> Vec<String> {
    let rows: Vec<(String, String, String)> = rules
        .iter()
        .map(|r| (join_groups(r), join_resources(r), r.verbs.join(",")))
        .collect();

    let group_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0).max(6);
    let resource_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(0).max(9);

    let mut lines = vec![format!(
        "{:<gw$}  {:<rw$}  VERBS",
        "GROUPS",
        "RESOURCES",
        gw = group_width,
        rw = resource_width
    )];
    lines.extend(rows.iter().map(|(groups, resources, verbs)| {
        format!(
            "{:<gw$}  {:<rw$}  {}",
            groups,
            resources,
            verbs,
            gw = group_width,
            rw = resource_width
        )
    }));
    lines
}

/// Print the derived rules of a controller
pub fn print_controller_rules(controller: &str, cluster_role: &str, rules: &[PolicyRule]) {
    println!(
        "{} {} {}",
        style("●").cyan(),
        style(controller).bold(),
        style(format!("({cluster_role})")).dim()
    );

    for (idx, line) in format_rules(rules).into_iter().enumerate() {
        if idx == 0 {
            println!("  {}", style(line).dim());
        } else {
            println!("  {line}");
        }
    }
}

/// Print a controller with its dependents and how each one resolves
pub fn print_controller_summary(controller: &ControllerSpec) {
    let primary = &controller.resource;
    println!(
        "  {} {} reconciles {}{}",
        style("✓").green(),
        style(&controller.name).bold(),
        primary.resource,
        if primary.status { " (with status)" } else { "" }
    );

    for (name, dependent) in &controller.dependents {
        let note = match (&dependent.target, resolve_dependent(dependent)) {
            (DependentTarget::External, _) => {
                style("skipped, not a Kubernetes resource".to_string()).yellow()
            }
            (
                DependentTarget::Generic {
                    group_version_kind: None,
                    ..
                },
                Some(resolved),
            ) => style(format!(
                "falls back to {}/{}",
                group_label(&resolved.group),
                resolved.resource
            ))
            .yellow(),
            (_, Some(resolved)) => style(format!(
                "{}/{}",
                group_label(&resolved.group),
                resolved.resource
            ))
            .dim(),
            (_, None) => style("unresolved".to_string()).red(),
        };

        println!(
            "      {} {} [{}] {}",
            style("-").dim(),
            name,
            dependent.capabilities,
            note
        );
    }

    if !controller.additional_rules.is_empty() {
        println!(
            "      {} {} additional rule(s)",
            style("+").dim(),
            controller.additional_rules.len()
        );
    }
}
