//! Test helpers shared across crates in the workspace.
//!
//! Fragment directories are built in temporary locations with
//! [`fragments::FragmentDir`], sample documents live in [`samples`], and
//! [`figment::with_clean_jail`] runs settings tests against an empty environment.

pub mod figment;
pub mod fragments;
pub mod samples;
