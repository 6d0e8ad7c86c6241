use emath::{Pos2, Rect};

mod classify;
mod directory;
mod geometry;
mod integrity;
mod options;
mod session;
mod tree;
mod types;

#[cfg(test)]
mod engine_tests;

pub use classify::{DEFAULT_REGION_SENSITIVITY, classify};
pub use directory::RootDirectory;
pub use geometry::region_rect;
pub use options::DockingOptions;
pub use tree::{DEFAULT_SPLIT_RATIO, LayoutNode, RootLayout};
pub use types::{
    DockError, DockRegion, DragOutcome, DragOverlay, Orientation, PanelId, RegionSet, WindowId,
};

use session::{DragSession, HoverTarget};

/// The host side of the panel boundary.
///
/// Panel content, its lifetime and its current on-screen geometry all belong
/// to the host; the engine only asks. Implementations are queried during
/// pointer moves, so they should be cheap lookups.
pub trait PanelDirectory {
    /// The panel's bounds in `window`-local coordinates, or `None` when the
    /// panel is not currently visible there (e.g. an inactive tab).
    fn panel_bounds(&self, window: WindowId, panel: PanelId) -> Option<Rect>;

    /// Regions this panel refuses to be docked into while it is the one
    /// being dragged.
    fn disallowed_regions(&self, panel: PanelId) -> RegionSet {
        let _ = panel;
        RegionSet::EMPTY
    }
}

/// Docking-panel layout engine.
///
/// Maintains one layout tree per registered window, classifies pointer
/// positions into dock regions during a drag, and applies the resulting
/// insert/remove on drop. Geometry only: window creation, painting and input
/// capture stay with the host, which must serialize all calls onto one
/// thread (the usual UI event-loop contract).
#[derive(Debug)]
pub struct DockingEngine {
    pub options: DockingOptions,
    directory: RootDirectory,
    drag: Option<DragSession>,
    last_pointer: Option<Pos2>,
}

impl Default for DockingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DockingEngine {
    pub fn new() -> Self {
        Self::with_options(DockingOptions::default())
    }

    pub fn with_options(options: DockingOptions) -> Self {
        Self {
            options,
            directory: RootDirectory::new(),
            drag: None,
            last_pointer: None,
        }
    }

    pub fn directory(&self) -> &RootDirectory {
        &self.directory
    }

    /// Attach an empty root to `window`. Bounds are in screen coordinates.
    pub fn register_window(&mut self, window: WindowId, bounds: Rect) -> Result<(), DockError> {
        self.directory.register(window, bounds)
    }

    /// Detach the window's root, releasing its whole tree.
    pub fn unregister_window(&mut self, window: WindowId) -> bool {
        self.directory.unregister(window)
    }

    /// Adopt the host's window z-order (front to back).
    pub fn set_stacking_order(&mut self, front_to_back: &[WindowId]) {
        self.directory.set_stacking_order(front_to_back);
    }

    /// The host moved or resized a window. While a drag is in progress the
    /// hovered candidate is re-resolved from the last pointer position, so
    /// the overlay keeps mirroring what a drop would do.
    pub fn window_resized(
        &mut self,
        window: WindowId,
        bounds: Rect,
        panels: &dyn PanelDirectory,
    ) -> Result<(), DockError> {
        self.directory.set_bounds(window, bounds)?;
        if self.drag.is_some() {
            if let Some(pointer) = self.last_pointer {
                self.refresh_hover(pointer, panels);
            }
        }
        Ok(())
    }

    /// Dock `panel` as a tab of (or the whole content of) the window's root.
    pub fn dock_center(&mut self, window: WindowId, panel: PanelId) -> Result<(), DockError> {
        self.dock(window, panel, DockRegion::Center)
    }

    /// Programmatic dock with the window's root content as the implicit
    /// target: an empty root takes the panel outright; a leaf or tab-group
    /// root merges or splits against it; a split root has no single implicit
    /// target, so `Center` is rejected and cardinal regions go through the
    /// occupied-root-edge policy.
    pub fn dock(
        &mut self,
        window: WindowId,
        panel: PanelId,
        region: DockRegion,
    ) -> Result<(), DockError> {
        if self.directory.window_of(panel).is_some() {
            return Err(DockError::AlreadyDocked(panel));
        }
        let edge_docking = self.options.dock_to_occupied_root_edges;
        let layout = self
            .directory
            .layout_mut(window)
            .ok_or(DockError::UnknownWindow(window))?;

        let implicit_target = match layout.node() {
            None => None,
            Some(LayoutNode::Leaf(p)) => Some(*p),
            Some(LayoutNode::Tabbed { panels, active }) => panels.get(*active).copied(),
            Some(LayoutNode::Split { .. }) => {
                return if region == DockRegion::Center {
                    Err(DockError::NoDockTarget)
                } else if edge_docking {
                    let result = layout.insert_at_root_edge(panel, region);
                    if result.is_ok() {
                        log::debug!("docked {panel:?} at {region:?} edge of {window:?}");
                    }
                    result
                } else {
                    Err(DockError::RootEdgeDockingDisabled)
                };
            }
        };

        layout.insert(panel, implicit_target, region)?;
        log::debug!("docked {panel:?} into {window:?} at {region:?}");
        Ok(())
    }

    /// Dock `panel` at an explicit target: the leaf or tab-group currently
    /// holding `target` receives the new panel at `region`.
    pub fn dock_at(
        &mut self,
        window: WindowId,
        panel: PanelId,
        target: PanelId,
        region: DockRegion,
    ) -> Result<(), DockError> {
        if self.directory.window_of(panel).is_some() {
            return Err(DockError::AlreadyDocked(panel));
        }
        let layout = self
            .directory
            .layout_mut(window)
            .ok_or(DockError::UnknownWindow(window))?;
        layout.insert(panel, Some(target), region)?;
        log::debug!("docked {panel:?} next to {target:?} in {window:?} at {region:?}");
        Ok(())
    }

    /// Remove `panel` from whichever tree holds it, collapsing the tree back
    /// to minimal form. Absence returns `false`; it is not an error.
    pub fn undock(&mut self, panel: PanelId) -> bool {
        let removed = self.directory.remove_panel(panel);
        if removed {
            log::debug!("undocked {panel:?}");
        }
        removed
    }

    /// Start a drag gesture for `panel`. Restarting while already dragging
    /// replaces the session; the hovered candidate starts cleared.
    pub fn begin_drag(&mut self, panel: PanelId) {
        log::debug!("drag start {panel:?}");
        self.drag = Some(DragSession::new(panel));
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pointer moved (screen coordinates). While dragging, re-resolves the
    /// hovered window/panel/region; outside any tracked window the candidate
    /// clears and the overlay hides, but the drag stays alive.
    pub fn on_pointer_move(&mut self, screen: Pos2, panels: &dyn PanelDirectory) {
        self.last_pointer = Some(screen);
        if self.drag.is_some() {
            self.refresh_hover(screen, panels);
        }
    }

    /// Release with intent to drop. The candidate is re-resolved at the drop
    /// point; with a valid target and region the panel is moved there
    /// (implicitly undocking it first; a source root emptied this way stays
    /// registered), otherwise nothing changes.
    pub fn on_drop(&mut self, screen: Pos2, panels: &dyn PanelDirectory) -> DragOutcome {
        self.last_pointer = Some(screen);
        let Some(session) = self.drag.take() else {
            return DragOutcome::Cancelled;
        };
        let floating = session.floating;
        let Some(hover) = self.resolve_hover(floating, screen, panels) else {
            log::debug!("drag drop {floating:?}: no target, cancelled");
            return DragOutcome::Cancelled;
        };

        self.directory.remove_panel(floating);
        let Some(layout) = self.directory.layout_mut(hover.window) else {
            return DragOutcome::Cancelled;
        };
        let result = match hover.target {
            Some(target) => layout.insert(floating, Some(target), hover.region),
            None if layout.is_empty() => layout.insert(floating, None, DockRegion::Center),
            None => layout.insert_at_root_edge(floating, hover.region),
        };
        match result {
            Ok(()) => {
                log::debug!(
                    "drag drop {floating:?} -> {:?} target={:?} region={:?}",
                    hover.window,
                    hover.target,
                    hover.region
                );
                DragOutcome::Dropped
            }
            Err(err) => {
                // Unreachable with a freshly resolved hover; surface it
                // rather than panic, the panel is simply left undocked.
                log::warn!("drag drop {floating:?} failed: {err}");
                DragOutcome::Cancelled
            }
        }
    }

    /// Explicit cancel (escape, release outside every tracked window, host
    /// shutdown). Always safe: no tree was touched during the drag.
    pub fn on_cancel(&mut self) -> DragOutcome {
        if let Some(session) = self.drag.take() {
            log::debug!("drag cancel {:?}", session.floating);
        }
        DragOutcome::Cancelled
    }

    /// Current preview geometry for the host renderer, queried once per
    /// paint cycle. Hidden whenever there is no valid candidate.
    pub fn overlay(&self) -> DragOverlay {
        match self.drag.as_ref().and_then(|session| session.hover) {
            Some(hover) => DragOverlay {
                window: Some(hover.window),
                rect: hover.overlay,
                visible: true,
            },
            None => DragOverlay::HIDDEN,
        }
    }

    /// Audit every registered tree plus forest-wide panel uniqueness.
    /// Empty means all structural invariants hold.
    pub fn integrity_issues(&self) -> Vec<String> {
        integrity::forest_integrity_issues(&self.directory)
    }

    fn refresh_hover(&mut self, screen: Pos2, panels: &dyn PanelDirectory) {
        let Some(floating) = self.drag.as_ref().map(|session| session.floating) else {
            return;
        };
        let hover = self.resolve_hover(floating, screen, panels);
        if let Some(session) = self.drag.as_mut() {
            if session.hover != hover {
                log::trace!("drag hover {floating:?} -> {hover:?}");
            }
            session.hover = hover;
        }
    }

    /// The dock candidate under the pointer, if any. This is the single
    /// decision point shared by the live overlay and the drop itself.
    fn resolve_hover(
        &self,
        floating: PanelId,
        screen: Pos2,
        panels: &dyn PanelDirectory,
    ) -> Option<HoverTarget> {
        let window = self.directory.window_at(screen)?;
        let bounds = self.directory.bounds(window)?;
        let local = geometry::screen_to_window(bounds, screen);
        let content = geometry::content_rect(bounds);
        let layout = self.directory.layout(window)?;
        let sensitivity = self.options.clamped_sensitivity();
        let allowed = RegionSet::ALL.difference(panels.disallowed_regions(floating));

        if layout.is_empty() {
            // An empty root is always a Center drop over the whole content.
            return Some(HoverTarget {
                window,
                target: None,
                region: DockRegion::Center,
                overlay: content,
            });
        }

        // Deepest panel under the pointer. The floating panel is never its
        // own target: dropping a panel onto itself is a no-op, not a dock.
        let hit = layout
            .panels()
            .into_iter()
            .filter(|p| *p != floating)
            .find_map(|p| {
                let rect = panels.panel_bounds(window, p)?;
                rect.contains(local).then_some((p, rect))
            });

        if let Some((panel, rect)) = hit {
            let region = classify(rect, local, allowed, sensitivity);
            return Some(HoverTarget {
                window,
                target: Some(panel),
                region,
                overlay: region_rect(rect, region),
            });
        }

        // Root background of an occupied root: only an edge split, and only
        // when the policy opts in.
        if self.options.dock_to_occupied_root_edges {
            let region = classify(content, local, allowed, sensitivity);
            if region != DockRegion::Center {
                return Some(HoverTarget {
                    window,
                    target: None,
                    region,
                    overlay: region_rect(content, region),
                });
            }
        }

        None
    }
}
