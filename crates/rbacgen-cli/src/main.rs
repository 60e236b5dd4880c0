//! rbacgen CLI - Generate cluster roles for operator controllers

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;

use error::CliError;

#[derive(Parser)]
#[command(name = "rbacgen")]
#[command(author = "rbacgen Contributors")]
#[command(version)]
#[command(about = "Generate Kubernetes cluster roles for operator controllers", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render cluster role manifests
    Generate {
        /// Operator configuration file
        #[arg(env = "RBACGEN_CONFIG")]
        config: PathBuf,

        /// Only generate the role of this controller
        #[arg(short, long)]
        controller: Option<String>,

        /// Also emit the role granting read access to CRDs
        #[arg(long)]
        validate_crds: bool,

        /// Output file (if not set, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the derived rules of each controller
    Rules {
        /// Operator configuration file
        #[arg(env = "RBACGEN_CONFIG")]
        config: PathBuf,

        /// Only show this controller
        #[arg(short, long)]
        controller: Option<String>,

        /// Output rules as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Operator configuration file
        #[arg(env = "RBACGEN_CONFIG")]
        config: PathBuf,
    },
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> miette::Result<()> {
    match cli.command {
        Commands::Generate {
            config,
            controller,
            validate_crds,
            output,
        } => commands::generate::run(
            &config,
            controller.as_deref(),
            validate_crds,
            output.as_deref(),
        ),

        Commands::Rules {
            config,
            controller,
            json,
        } => commands::rules::run(&config, controller.as_deref(), json),

        Commands::Validate { config } => commands::validate::run(&config),
    }
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(report) = run(cli) {
        let code = report
            .downcast_ref::<CliError>()
            .map(CliError::exit_code)
            .unwrap_or(exit_codes::ERROR);
        eprintln!("{report:?}");
        std::process::exit(code);
    }
}
