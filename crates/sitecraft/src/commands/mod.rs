//! CLI command implementations

pub mod block;
pub mod build;
pub mod new;
pub mod status;
