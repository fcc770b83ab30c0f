//! Approval-based committee elections.
//!
//! The rules themselves live in the `abc_rules` crate, re-exported here. This
//! crate adds reading profiles from files (JSON documents and PrefLib ranking
//! files) and writing the computed committees as JSON.

pub mod fileio;

pub use abc_rules::*;
pub use fileio::{
    compute_to_json, read_profile, read_profile_with, IoError, IoResult, ReadOptions,
};
