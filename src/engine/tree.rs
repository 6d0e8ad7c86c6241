use itertools::Itertools as _;

use super::types::{DockError, DockRegion, Orientation, PanelId};

pub const DEFAULT_SPLIT_RATIO: f32 = 0.5;

/// One node of a root's layout tree.
///
/// Owned tree of tagged variants, boxed per child; there are no parent
/// back-pointers (upward geometry queries go through the window bounds held
/// by the directory instead). Two invariants hold by construction and are
/// re-checked by the integrity audit after every mutation:
///
/// - a `Split` always has exactly two children (never a dangling side);
/// - a `Tabbed` always holds at least two panels and collapses to `Leaf`
///   when exactly one remains.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutNode {
    /// Exactly one panel filling the slot.
    Leaf(PanelId),
    /// Binary container dividing its slot along one axis.
    Split {
        orientation: Orientation,
        /// Fraction of the axis given to `first`, in `(0, 1)`.
        ratio: f32,
        first: Box<LayoutNode>,
        second: Box<LayoutNode>,
    },
    /// Ordered panels sharing the slot, one active at a time.
    /// Insertion order is preserved; duplicate ids are forbidden.
    Tabbed { panels: Vec<PanelId>, active: usize },
}

impl LayoutNode {
    /// All panel ids in this subtree, in layout order.
    pub fn panels(&self) -> Vec<PanelId> {
        let mut out = Vec::new();
        self.collect_panels(&mut out);
        out
    }

    fn collect_panels(&self, out: &mut Vec<PanelId>) {
        match self {
            Self::Leaf(panel) => out.push(*panel),
            Self::Split { first, second, .. } => {
                first.collect_panels(out);
                second.collect_panels(out);
            }
            Self::Tabbed { panels, .. } => out.extend_from_slice(panels),
        }
    }

    pub fn contains(&self, panel: PanelId) -> bool {
        match self {
            Self::Leaf(existing) => *existing == panel,
            Self::Split { first, second, .. } => first.contains(panel) || second.contains(panel),
            Self::Tabbed { panels, .. } => panels.contains(&panel),
        }
    }
}

/// The one layout tree of a host window. `None` means the root is empty.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RootLayout {
    node: Option<LayoutNode>,
}

impl RootLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_node(node: LayoutNode) -> Self {
        Self { node: Some(node) }
    }

    pub fn node(&self) -> Option<&LayoutNode> {
        self.node.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    pub fn panels(&self) -> Vec<PanelId> {
        self.node.as_ref().map(LayoutNode::panels).unwrap_or_default()
    }

    pub fn contains(&self, panel: PanelId) -> bool {
        self.node.as_ref().is_some_and(|node| node.contains(panel))
    }

    /// Insert `panel` at `target`.
    ///
    /// An empty root takes the panel as its sole leaf regardless of `region`
    /// (forced `Center`). An occupied root requires an explicit target: the
    /// panel whose leaf or tab-group slot receives the new content. `Center`
    /// merges into tabs; a cardinal region replaces the slot with a split,
    /// the new panel on the side matching the requested edge.
    pub fn insert(
        &mut self,
        panel: PanelId,
        target: Option<PanelId>,
        region: DockRegion,
    ) -> Result<(), DockError> {
        if self.contains(panel) {
            return Err(DockError::AlreadyDocked(panel));
        }
        let Some(node) = self.node.take() else {
            self.node = Some(LayoutNode::Leaf(panel));
            return Ok(());
        };
        let Some(target) = target else {
            self.node = Some(node);
            return Err(DockError::NoDockTarget);
        };
        let (node, inserted) = insert_at(node, target, panel, region);
        self.node = Some(node);
        if inserted {
            Ok(())
        } else {
            Err(DockError::TargetNotFound(target))
        }
    }

    /// Split the entire root content along `region`'s edge, the new panel on
    /// that edge. Cardinal regions only; an empty root degenerates to a plain
    /// leaf insert.
    pub fn insert_at_root_edge(
        &mut self,
        panel: PanelId,
        region: DockRegion,
    ) -> Result<(), DockError> {
        if self.contains(panel) {
            return Err(DockError::AlreadyDocked(panel));
        }
        if region == DockRegion::Center {
            return Err(DockError::NoDockTarget);
        }
        let Some(existing) = self.node.take() else {
            self.node = Some(LayoutNode::Leaf(panel));
            return Ok(());
        };
        self.node = Some(split_slot(existing, panel, region));
        Ok(())
    }

    /// Remove `panel` and collapse the tree back to its minimal form.
    ///
    /// Returns `false` when the panel is not in this tree; absence is a
    /// normal outcome, not an error.
    pub fn remove(&mut self, panel: PanelId) -> bool {
        let Some(node) = self.node.take() else {
            return false;
        };
        let (node, removed) = remove_from(node, panel);
        self.node = node;
        removed
    }
}

fn insert_at(
    node: LayoutNode,
    target: PanelId,
    panel: PanelId,
    region: DockRegion,
) -> (LayoutNode, bool) {
    match node {
        LayoutNode::Leaf(existing) if existing == target => {
            let node = match region {
                DockRegion::Center => LayoutNode::Tabbed {
                    panels: vec![existing, panel],
                    active: 1,
                },
                _ => split_slot(LayoutNode::Leaf(existing), panel, region),
            };
            (node, true)
        }
        leaf @ LayoutNode::Leaf(_) => (leaf, false),
        LayoutNode::Tabbed { mut panels, active } if panels.contains(&target) => {
            let node = match region {
                DockRegion::Center => {
                    panels.push(panel);
                    let active = panels.len() - 1;
                    LayoutNode::Tabbed { panels, active }
                }
                _ => split_slot(LayoutNode::Tabbed { panels, active }, panel, region),
            };
            (node, true)
        }
        tabs @ LayoutNode::Tabbed { .. } => (tabs, false),
        LayoutNode::Split {
            orientation,
            ratio,
            first,
            second,
        } => {
            let (first, inserted) = insert_at(*first, target, panel, region);
            if inserted {
                let node = LayoutNode::Split {
                    orientation,
                    ratio,
                    first: Box::new(first),
                    second,
                };
                return (node, true);
            }
            let (second, inserted) = insert_at(*second, target, panel, region);
            let node = LayoutNode::Split {
                orientation,
                ratio,
                first: Box::new(first),
                second: Box::new(second),
            };
            (node, inserted)
        }
    }
}

/// Replace an occupied slot with a split between the existing content and a
/// fresh leaf for `panel`. Callers only pass cardinal regions.
fn split_slot(existing: LayoutNode, panel: PanelId, region: DockRegion) -> LayoutNode {
    let orientation = region.orientation().unwrap_or(Orientation::Horizontal);
    let existing = Box::new(existing);
    let fresh = Box::new(LayoutNode::Leaf(panel));
    // The new panel always lands on the side matching the requested edge.
    let (first, second) = if region.is_second_side() {
        (existing, fresh)
    } else {
        (fresh, existing)
    };
    LayoutNode::Split {
        orientation,
        ratio: DEFAULT_SPLIT_RATIO,
        first,
        second,
    }
}

fn remove_from(node: LayoutNode, panel: PanelId) -> (Option<LayoutNode>, bool) {
    match node {
        LayoutNode::Leaf(existing) if existing == panel => (None, true),
        leaf @ LayoutNode::Leaf(_) => (Some(leaf), false),
        LayoutNode::Tabbed { mut panels, active } => {
            let Some((index, _)) = panels.iter().find_position(|&&p| p == panel) else {
                return (Some(LayoutNode::Tabbed { panels, active }), false);
            };
            panels.remove(index);
            if panels.len() == 1 {
                return (Some(LayoutNode::Leaf(panels[0])), true);
            }
            // Keep the adjacent entry active when the active one was removed.
            let active = if active > index {
                active - 1
            } else {
                active.min(panels.len() - 1)
            };
            (Some(LayoutNode::Tabbed { panels, active }), true)
        }
        LayoutNode::Split {
            orientation,
            ratio,
            first,
            second,
        } => {
            let (first, removed) = remove_from(*first, panel);
            // A split never survives with one populated side: the sibling
            // subtree takes over the whole slot.
            let Some(first) = first else {
                return (Some(*second), true);
            };
            if removed {
                let node = LayoutNode::Split {
                    orientation,
                    ratio,
                    first: Box::new(first),
                    second,
                };
                return (Some(node), true);
            }
            let (second, removed) = remove_from(*second, panel);
            let Some(second) = second else {
                return (Some(first), true);
            };
            let node = LayoutNode::Split {
                orientation,
                ratio,
                first: Box::new(first),
                second: Box::new(second),
            };
            (Some(node), removed)
        }
    }
}
