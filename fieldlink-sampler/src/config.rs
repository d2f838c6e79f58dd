//! Compile-time configuration
//!
//! Generated by build.rs from node.toml.

use fieldlink_core::config::{SamplerConfig, SoilCalibration};

include!(concat!(env!("OUT_DIR"), "/node_config.rs"));
