//! Application-level configuration.
//!
//! - [`PatchParams`] - limits and write behavior for patch use cases

pub mod patch_params;

pub use patch_params::PatchParams;
