pub mod cli;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod git;
pub mod plan;
pub mod preflight;
pub mod report;
pub mod rewrite;
pub mod ui;

pub use error::{BumpError, Result};
