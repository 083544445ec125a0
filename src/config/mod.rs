// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for cg.
//!
//! This module handles loading, parsing, and overriding configuration from
//! various sources (files, environment variables, defaults).

pub mod default;
pub(crate) mod loader;
mod schema;

pub use default::default_config;
pub use loader::{apply_env_overrides, find_config_file, load_config};
pub use schema::*;
