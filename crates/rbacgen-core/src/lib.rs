//! rbacgen Core - Configuration model for access-control generation
//!
//! This crate provides the foundational types used throughout rbacgen:
//! - `ResourceType`: A Kubernetes resource identity (group, version, kind, plural)
//! - `Capabilities`: What a dependent does with its resource (create, update, delete)
//! - `DependentSpec`: A dependent resource of a controller, typed or generic
//! - `ControllerSpec`: A controller with its primary resource and dependents
//! - `OperatorConfig`: The full configuration file, loaded from YAML

pub mod controller;
pub mod dependent;
pub mod error;
pub mod resource;

pub use controller::{ControllerSpec, OperatorConfig};
pub use dependent::{Capabilities, Capability, DependentResource, DependentSpec, DependentTarget};
pub use error::{CoreError, Result};
pub use resource::{PrimaryResource, ResourceType};
