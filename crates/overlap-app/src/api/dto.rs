use serde::{Deserialize, Serialize};

use overlap_domain::model::DateRange;

/// Body of `POST /api/v1/overlap-check`; both ranges are required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapRequest {
    pub range1: DateRange,
    pub range2: DateRange,
}
