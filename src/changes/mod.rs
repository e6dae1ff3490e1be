//! Classification of changed paths and commit message composition.

pub mod classify;
pub mod message;

pub use classify::{ChangeCategory, ChangeSummary};
pub use message::compose_commit_message;
