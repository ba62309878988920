pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod git_ops;
pub mod ui;

pub use error::{GitManagerError, Result};
