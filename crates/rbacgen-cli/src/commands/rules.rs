//! Rules command - show derived rules per controller

use k8s_openapi::api::rbac::v1::PolicyRule;
use miette::{IntoDiagnostic, Result, WrapErr};
use rbacgen_kube::{cluster_role_name, derive_rules};
use serde::Serialize;
use std::path::Path;

use super::{load_config, select_controllers};
use crate::display;

/// Derived rules of one controller
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerRules {
    pub controller: String,
    pub cluster_role: String,
    pub rules: Vec<PolicyRule>,
}

pub fn run(config_path: &Path, controller: Option<&str>, json_output: bool) -> Result<()> {
    let config = load_config(config_path)?;

    let summaries: Vec<ControllerRules> = select_controllers(&config, controller)?
        .into_iter()
        .map(|c| ControllerRules {
            controller: c.name.clone(),
            cluster_role: cluster_role_name(&c.name),
            rules: derive_rules(c),
        })
        .collect();

    if json_output {
        let json = serde_json::to_string_pretty(&summaries)
            .into_diagnostic()
            .wrap_err("Failed to serialize rules")?;
        println!("{json}");
        return Ok(());
    }

    for (idx, summary) in summaries.iter().enumerate() {
        if idx > 0 {
            println!();
        }
        display::print_controller_rules(&summary.controller, &summary.cluster_role, &summary.rules);
    }

    Ok(())
}
