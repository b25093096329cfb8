pub mod changelog;
pub mod classifier;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod grammar;
pub mod manifest;
pub mod ui;
pub mod warning;

pub use error::{CiReleaseError, Result};
