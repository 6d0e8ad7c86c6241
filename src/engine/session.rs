use emath::Rect;

use super::types::{DockRegion, PanelId, WindowId};

/// State of one drag gesture: IDLE → DRAGGING → {DROPPED, CANCELLED} → IDLE.
///
/// The engine holds an `Option<DragSession>`; `None` is IDLE. The session
/// only tracks geometry and the hovered candidate; tree mutation happens
/// solely on drop, so cancellation never leaves a partial state.
#[derive(Clone, Copy, Debug)]
pub(super) struct DragSession {
    /// The panel being dragged. It may still be docked somewhere (moving a
    /// docked panel is remove + insert as one logical operation on drop), or
    /// already be gone (a programmatic undock during the drag is fine).
    pub(super) floating: PanelId,
    pub(super) hover: Option<HoverTarget>,
}

impl DragSession {
    pub(super) fn new(floating: PanelId) -> Self {
        Self {
            floating,
            hover: None,
        }
    }
}

/// The candidate dock decision under the pointer, recomputed on every
/// pointer move and again at the drop point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct HoverTarget {
    pub(super) window: WindowId,
    /// `None` targets the window's root itself: an empty root (forced
    /// `Center`) or, policy permitting, an occupied root's edge.
    pub(super) target: Option<PanelId>,
    pub(super) region: DockRegion,
    /// Preview rectangle in window-local coordinates; follows the same
    /// halving rule insert uses, so preview and drop cannot disagree.
    pub(super) overlay: Rect,
}
