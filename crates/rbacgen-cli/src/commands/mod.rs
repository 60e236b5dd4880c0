//! CLI commands

pub mod generate;
pub mod rules;
pub mod validate;

use rbacgen_core::{ControllerSpec, OperatorConfig};
use std::path::Path;

use crate::error::CliError;

/// Load and validate the operator configuration
pub(crate) fn load_config(path: &Path) -> Result<OperatorConfig, CliError> {
    OperatorConfig::from_file(path).map_err(CliError::from)
}

/// Controllers to act on: all of them, or only the named one
pub(crate) fn select_controllers<'a>(
    config: &'a OperatorConfig,
    name: Option<&str>,
) -> Result<Vec<&'a ControllerSpec>, CliError> {
    match name {
        None => Ok(config.controllers.iter().collect()),
        Some(name) => match config.controller(name) {
            Some(controller) => Ok(vec![controller]),
            None => {
                let known: Vec<&str> = config.controllers.iter().map(|c| c.name.as_str()).collect();
                Err(CliError::usage_with_help(
                    format!("Controller '{name}' not found"),
                    format!("Known controllers: {}", known.join(", ")),
                ))
            }
        },
    }
}
