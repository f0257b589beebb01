//! Destination vocabularies for Sixty's import and push surfaces.
//!
//! Each integration surface owns its field list and alias table. Built-in
//! profiles are embedded at compile time; custom profiles load from TOML.

#![deny(unsafe_code)]

pub mod embedded;
pub mod error;
pub mod loaders;
pub mod profile;
pub mod registry;

pub use crate::error::StandardsError;
pub use crate::loaders::{load_builtin, load_profile_file, parse_profile_toml};
pub use crate::profile::{BuiltinProfile, IntegrationProfile};
pub use crate::registry::{PROFILE_DIR_ENV_VAR, ProfileRegistry};
