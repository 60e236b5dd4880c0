//! Generate command - render cluster role manifests

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use rbacgen_kube::{ClusterRoleGenerator, ManifestList};
use std::path::Path;

use super::{load_config, select_controllers};
use crate::error::CliError;

pub fn run(
    config_path: &Path,
    controller: Option<&str>,
    validate_crds: bool,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let controllers = select_controllers(&config, controller)?;
    let validate_crds = validate_crds || config.validate_crds;

    tracing::debug!(
        controllers = controllers.len(),
        validate_crds,
        "generating cluster roles"
    );

    let generator =
        ClusterRoleGenerator::new(controllers.into_iter().cloned().collect(), validate_crds);
    let mut manifests = ManifestList::new();
    generator
        .apply(&mut manifests)
        .map_err(CliError::from)?;

    let yaml = manifests.to_yaml().map_err(CliError::from)?;

    match output {
        Some(path) => {
            std::fs::write(path, &yaml)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} Wrote {} cluster role(s) to {}",
                style("✓").green(),
                manifests.len(),
                path.display()
            );
        }
        None => print!("{yaml}"),
    }

    Ok(())
}
