//! Git operations: subprocess backend, porcelain parsing, and preflight.

pub mod cli;
pub mod preflight;
pub mod status;

pub use cli::{GitBackend, GitCli};
pub use preflight::{check_git_installed, discover_workdir};
pub use status::parse_porcelain;
