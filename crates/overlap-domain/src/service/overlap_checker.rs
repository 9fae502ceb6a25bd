//! Overlap checking service

use crate::model::DateRange;

/// Decides whether two ranges intersect.
///
/// Implementations must be pure and total; the HTTP layer shares a single
/// instance across all in-flight requests.
pub trait OverlapChecker: Send + Sync {
    fn check(&self, range1: &DateRange, range2: &DateRange) -> bool;
}

/// `range1.start < range2.end && range2.start < range1.end`
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictOverlapChecker;

impl OverlapChecker for StrictOverlapChecker {
    fn check(&self, range1: &DateRange, range2: &DateRange) -> bool {
        range1.overlaps(range2)
    }
}
