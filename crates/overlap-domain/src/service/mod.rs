//! Domain services

pub mod overlap_checker;

pub use overlap_checker::{OverlapChecker, StrictOverlapChecker};
