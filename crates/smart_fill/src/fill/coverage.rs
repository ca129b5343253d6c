//! Rough coverage estimate derived from the ledger.
//!
//! Coverage is the summed footprint area over the region's bounding-box area. Overlaps
//! are counted twice and the region's real outline is ignored, so this is an estimate
//! for display, not a geometric measurement.
use crate::host::Bounds;

/// Summary of a fill session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillStatistics {
    /// Number of copies in the ledger.
    pub count: usize,
    /// Estimated coverage in percent, always in [0, 100].
    pub coverage_percent: f32,
}

/// `min(100, 100 * footprint_area / bounds.area())`, clamped to [0, 100].
pub fn coverage_percent(footprint_area: f32, bounds: &Bounds) -> f32 {
    if footprint_area.is_nan() || footprint_area <= 0.0 {
        return 0.0;
    }
    let region_area = bounds.area();
    if region_area.is_nan() || region_area <= 0.0 {
        return 100.0;
    }
    (100.0 * footprint_area / region_area).clamp(0.0, 100.0)
}
