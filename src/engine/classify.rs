use emath::{Pos2, Rect};

use super::types::{DockRegion, RegionSet};

/// How close to the edge the pointer has to be (as a fraction of the target's
/// extent) before a cardinal region is reported instead of `Center`.
pub const DEFAULT_REGION_SENSITIVITY: f32 = 0.35;

/// Classify a pointer position over a target rectangle into a dock region.
///
/// Pure and total: the same call decides both the drop and the live overlay,
/// so the two can never disagree. A degenerate (zero-area) `bounds` yields
/// `Center` by definition.
///
/// The pointer is normalized into fractional coordinates; whichever axis the
/// pointer is nearer an edge of wins, horizontal winning exact ties. Within
/// the winning axis the edge bands are `sensitivity` wide on each end.
///
/// A cardinal region is only returned when present in `allowed`; everything
/// else falls through to `Center`, which is always available (its membership
/// in `allowed` is ignored).
pub fn classify(bounds: Rect, point: Pos2, allowed: RegionSet, sensitivity: f32) -> DockRegion {
    if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        return DockRegion::Center;
    }

    let h_pct = (point.x - bounds.min.x) / bounds.width();
    let v_pct = (point.y - bounds.min.y) / bounds.height();

    // Distance to the nearest edge on each axis, symmetric about the midline.
    let h_edge = h_pct.min(1.0 - h_pct);
    let v_edge = v_pct.min(1.0 - v_pct);

    let candidate = if h_edge <= v_edge {
        if h_pct < sensitivity {
            Some(DockRegion::West)
        } else if h_pct > 1.0 - sensitivity {
            Some(DockRegion::East)
        } else {
            None
        }
    } else if v_pct < sensitivity {
        Some(DockRegion::North)
    } else if v_pct > 1.0 - sensitivity {
        Some(DockRegion::South)
    } else {
        None
    };

    match candidate {
        Some(region) if allowed.contains(region) => region,
        _ => DockRegion::Center,
    }
}
