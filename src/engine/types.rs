use std::fmt;

use emath::Rect;

/// Opaque handle to externally-owned panel content.
///
/// The engine only arranges these; it never creates or destroys the content
/// behind them. The id must be stable and unique across the whole process
/// (typically handed out by the host's panel registry).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PanelId(u64);

impl PanelId {
    pub const fn from_u64(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Handle to a host window hosting one root layout.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn from_u64(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Where a drop lands relative to its target.
///
/// `Center` merges into existing tabs (or fills an empty root); the four
/// cardinal values split along that edge.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DockRegion {
    Center,
    North,
    South,
    East,
    West,
}

impl DockRegion {
    pub const CARDINALS: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Split axis for a cardinal region; `None` for `Center`.
    pub fn orientation(self) -> Option<Orientation> {
        match self {
            Self::Center => None,
            Self::East | Self::West => Some(Orientation::Horizontal),
            Self::North | Self::South => Some(Orientation::Vertical),
        }
    }

    /// Whether new content lands on the second (right/bottom) side of a split.
    pub fn is_second_side(self) -> bool {
        matches!(self, Self::East | Self::South)
    }

    /// The region hit when reflecting the pointer across both axes of the target.
    pub fn mirrored(self) -> Self {
        match self {
            Self::Center => Self::Center,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

/// Axis of a [`super::LayoutNode::Split`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A small set of [`DockRegion`] values, used for per-panel region vetoes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegionSet(u8);

impl RegionSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b1_1111);

    const fn bit(region: DockRegion) -> u8 {
        1 << region as u8
    }

    pub fn of(regions: &[DockRegion]) -> Self {
        regions.iter().fold(Self::EMPTY, |set, r| set.with(*r))
    }

    pub const fn contains(self, region: DockRegion) -> bool {
        self.0 & Self::bit(region) != 0
    }

    pub const fn with(self, region: DockRegion) -> Self {
        Self(self.0 | Self::bit(region))
    }

    pub const fn without(self, region: DockRegion) -> Self {
        Self(self.0 & !Self::bit(region))
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// How a drag gesture ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// A valid target and region existed and the dock was applied.
    Dropped,
    /// Nothing changed: explicit cancel, release outside any tracked window,
    /// or no valid target under the pointer.
    Cancelled,
}

/// Preview geometry for the host renderer.
///
/// The engine never draws; once per paint cycle the host asks for this and
/// fills `rect` (in `window`-local coordinates) however it likes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragOverlay {
    pub window: Option<WindowId>,
    pub rect: Rect,
    pub visible: bool,
}

impl DragOverlay {
    pub const HIDDEN: Self = Self {
        window: None,
        rect: Rect::NOTHING,
        visible: false,
    };
}

/// Errors surfaced by registration and programmatic docking.
///
/// Absence is deliberately not represented here: `undock`/`remove` return
/// `false` when the panel is unknown, because drag sessions routinely probe
/// panels that a programmatic call already removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DockError {
    /// The window already has a registered root.
    DuplicateRoot(WindowId),
    /// The window never registered a root; it cannot receive dock operations.
    UnknownWindow(WindowId),
    /// Insertion into an occupied root needs an explicit target leaf/tab-group.
    NoDockTarget,
    /// The requested target panel is not in the tree.
    TargetNotFound(PanelId),
    /// The panel is already docked somewhere; undock it first.
    AlreadyDocked(PanelId),
    /// Edge docking onto an occupied root's background is disabled by policy
    /// (see [`super::DockingOptions::dock_to_occupied_root_edges`]).
    RootEdgeDockingDisabled,
}

impl fmt::Display for DockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRoot(window) => {
                write!(f, "window {window:?} already has a registered root")
            }
            Self::UnknownWindow(window) => {
                write!(f, "window {window:?} has no registered root")
            }
            Self::NoDockTarget => {
                write!(f, "docking into an occupied root requires an explicit target")
            }
            Self::TargetNotFound(panel) => {
                write!(f, "target panel {panel:?} is not in the tree")
            }
            Self::AlreadyDocked(panel) => {
                write!(f, "panel {panel:?} is already docked")
            }
            Self::RootEdgeDockingDisabled => {
                write!(f, "edge docking onto an occupied root is disabled")
            }
        }
    }
}

impl std::error::Error for DockError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_set_vetoes() {
        let set = RegionSet::of(&[DockRegion::West, DockRegion::North]);
        assert!(set.contains(DockRegion::West));
        assert!(set.contains(DockRegion::North));
        assert!(!set.contains(DockRegion::East));

        let remaining = RegionSet::ALL.difference(set);
        assert!(!remaining.contains(DockRegion::West));
        assert!(remaining.contains(DockRegion::East));
        assert!(remaining.contains(DockRegion::South));
    }

    #[test]
    fn mirroring_swaps_axes_consistently() {
        for region in DockRegion::CARDINALS {
            assert_ne!(region.mirrored(), region);
            assert_eq!(region.mirrored().mirrored(), region);
            assert_eq!(region.orientation(), region.mirrored().orientation());
        }
        assert_eq!(DockRegion::Center.mirrored(), DockRegion::Center);
    }
}
