//! CLI argument handling for the hotpatch binary.

pub mod args;

/// One-line about text shown in `--help`.
pub const ABOUT: &str = "Live-patch a Helm preview deployment from a pull-request diff";
