//! hotpatch — live-patch Helm preview deployments from PR diffs (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod bundle;
pub mod config;
pub mod constants;
pub mod deploy;
pub mod diff;
pub mod encode;
pub mod env;
pub mod helm;
pub mod models;
pub mod output;
pub mod overlay;
pub mod pipeline;
pub mod template;
