use emath::{Pos2, Rect, Vec2};

use super::types::DockRegion;

/// Screen-space point into window-local coordinates.
pub(super) fn screen_to_window(window_bounds: Rect, screen: Pos2) -> Pos2 {
    screen - window_bounds.min.to_vec2()
}

/// The window's content area in window-local coordinates.
pub(super) fn content_rect(window_bounds: Rect) -> Rect {
    Rect::from_min_size(Pos2::ZERO, window_bounds.size())
}

/// The halving rule shared by insert and the drop preview.
///
/// `Center` occupies the full target bounds; a cardinal region occupies the
/// half of the bounds on that edge, mirroring which side of the split the
/// new content would take.
pub fn region_rect(bounds: Rect, region: DockRegion) -> Rect {
    let half_w = bounds.width() * 0.5;
    let half_h = bounds.height() * 0.5;
    match region {
        DockRegion::Center => bounds,
        DockRegion::West => Rect::from_min_size(bounds.min, Vec2::new(half_w, bounds.height())),
        DockRegion::East => Rect::from_min_size(
            Pos2::new(bounds.min.x + half_w, bounds.min.y),
            Vec2::new(half_w, bounds.height()),
        ),
        DockRegion::North => Rect::from_min_size(bounds.min, Vec2::new(bounds.width(), half_h)),
        DockRegion::South => Rect::from_min_size(
            Pos2::new(bounds.min.x, bounds.min.y + half_h),
            Vec2::new(bounds.width(), half_h),
        ),
    }
}
