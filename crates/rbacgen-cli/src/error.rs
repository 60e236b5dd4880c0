//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use miette::Diagnostic;
use rbacgen_core::CoreError;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Configuration could not be parsed or is inconsistent
    #[error("Configuration error: {message}")]
    #[diagnostic(code(rbacgen::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Invalid arguments
    #[error("{message}")]
    #[diagnostic(code(rbacgen::cli::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(rbacgen::cli::io))]
    Io { message: String },

    /// Internal error (serialization, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(rbacgen::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Usage { .. } => exit_codes::USAGE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a usage error with help text
    pub fn usage_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConfigNotFound { .. } | CoreError::Io(_) => CliError::Io {
                message: err.to_string(),
            },
            CoreError::YamlParse(_) => CliError::Config {
                message: err.to_string(),
                help: Some("Check the configuration file syntax".to_string()),
            },
            CoreError::DuplicateController { .. } => CliError::Config {
                message: err.to_string(),
                help: Some("Controller names must be unique".to_string()),
            },
            other => CliError::Config {
                message: other.to_string(),
                help: None,
            },
        }
    }
}

impl From<rbacgen_kube::KubeError> for CliError {
    fn from(err: rbacgen_kube::KubeError) -> Self {
        CliError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::internal("boom").exit_code(), exit_codes::ERROR);
        assert_eq!(
            CliError::usage_with_help("bad", "try again").exit_code(),
            exit_codes::USAGE_ERROR
        );
    }

    #[test]
    fn test_core_error_mapping() {
        let missing = CliError::from(CoreError::ConfigNotFound {
            path: "rbacgen.yaml".to_string(),
        });
        assert_eq!(missing.exit_code(), exit_codes::IO_ERROR);

        let duplicate = CliError::from(CoreError::DuplicateController {
            name: "a".to_string(),
        });
        assert_eq!(duplicate.exit_code(), exit_codes::CONFIG_ERROR);
    }
}
