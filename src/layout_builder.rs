use crate::engine::{LayoutNode, Orientation, PanelId, RootLayout};

/// Split direction for programmatic layout construction.
///
/// The direction says where the *side* node is placed relative to the *main*
/// node, matching the drop regions: `Left`/`Up` put the side content on the
/// first half of the axis, `Right`/`Down` on the second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Lightweight helpers for expressing a default layout in code, to be
/// installed with [`RootLayout::from_node`] before the first frame.
///
/// Deliberately small: it only covers "editor-like" split/tab presets.
/// For full control, construct [`LayoutNode`] values directly.
pub struct LayoutBuilder;

impl LayoutBuilder {
    /// A single-panel slot.
    pub fn leaf(panel: PanelId) -> LayoutNode {
        LayoutNode::Leaf(panel)
    }

    /// A tab group; the first panel starts active. `None` when `panels` is
    /// empty; a single panel degenerates to a leaf, so the built tree always
    /// satisfies the tab-group invariants.
    pub fn tabs(panels: &[PanelId]) -> Option<LayoutNode> {
        match panels {
            [] => None,
            [only] => Some(LayoutNode::Leaf(*only)),
            _ => Some(LayoutNode::Tabbed {
                panels: panels.to_vec(),
                active: 0,
            }),
        }
    }

    /// A binary split. `share` is the fraction of the axis given to `side`
    /// and is clamped into a sane band so the divider invariant holds.
    pub fn split(main: LayoutNode, dir: SplitDirection, side: LayoutNode, share: f32) -> LayoutNode {
        let share = share.clamp(0.05, 0.95);
        let (orientation, side_is_first) = match dir {
            SplitDirection::Left => (Orientation::Horizontal, true),
            SplitDirection::Right => (Orientation::Horizontal, false),
            SplitDirection::Up => (Orientation::Vertical, true),
            SplitDirection::Down => (Orientation::Vertical, false),
        };
        let (ratio, first, second) = if side_is_first {
            (share, side, main)
        } else {
            (1.0 - share, main, side)
        };
        LayoutNode::Split {
            orientation,
            ratio,
            first: Box::new(first),
            second: Box::new(second),
        }
    }
}
