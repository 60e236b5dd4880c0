//! Validate command - check a configuration file

use console::style;
use miette::Result;
use std::path::Path;

use super::load_config;
use crate::display;

pub fn run(config_path: &Path) -> Result<()> {
    println!(
        "{} Validating {}",
        style("→").blue(),
        config_path.display()
    );

    let config = load_config(config_path)?;

    for controller in &config.controllers {
        display::print_controller_summary(controller);
    }

    println!();
    println!(
        "{} Configuration is valid ({} controller(s){})",
        style("✓").green(),
        config.controllers.len(),
        if config.validate_crds {
            ", CRD validation enabled"
        } else {
            ""
        }
    );

    Ok(())
}
