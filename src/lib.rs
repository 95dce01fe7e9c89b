#![allow(unused_assignments)] // thiserror/miette proc macros trigger false positives

pub mod cli;
pub mod config;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod provider;
pub mod ssh_config;
pub mod status;
