use ahash::AHashMap;
use emath::{Pos2, Rect};

use super::tree::RootLayout;
use super::types::{DockError, PanelId, WindowId};

#[derive(Debug)]
struct RootEntry {
    layout: RootLayout,
    /// Window bounds in screen coordinates, host-supplied.
    bounds: Rect,
}

/// Registry mapping each top-level window to its one root layout, plus the
/// reverse lookup from screen position to the window beneath it.
///
/// The host owns window placement entirely: bounds and stacking order are
/// stored as given and never guessed. One directory per engine instance, so
/// independent engines (e.g. in tests) do not interfere.
#[derive(Debug, Default)]
pub struct RootDirectory {
    roots: AHashMap<WindowId, RootEntry>,
    front_to_back: Vec<WindowId>,
}

impl RootDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a window with an empty root. Newly registered windows start
    /// frontmost until the host supplies a stacking order.
    pub fn register(&mut self, window: WindowId, bounds: Rect) -> Result<(), DockError> {
        if self.roots.contains_key(&window) {
            return Err(DockError::DuplicateRoot(window));
        }
        self.roots.insert(
            window,
            RootEntry {
                layout: RootLayout::new(),
                bounds,
            },
        );
        self.front_to_back.insert(0, window);
        Ok(())
    }

    /// Drop the window's root and its whole tree. The caller is responsible
    /// for having torn down the panel content already.
    pub fn unregister(&mut self, window: WindowId) -> bool {
        self.front_to_back.retain(|w| *w != window);
        self.roots.remove(&window).is_some()
    }

    /// Adopt the host's z-order. Unknown windows are ignored; registered
    /// windows missing from `front_to_back` keep their previous relative
    /// order behind the listed ones.
    pub fn set_stacking_order(&mut self, front_to_back: &[WindowId]) {
        let mut order: Vec<WindowId> = front_to_back
            .iter()
            .copied()
            .filter(|w| self.roots.contains_key(w))
            .collect();
        for w in &self.front_to_back {
            if !order.contains(w) {
                order.push(*w);
            }
        }
        self.front_to_back = order;
    }

    pub fn set_bounds(&mut self, window: WindowId, bounds: Rect) -> Result<(), DockError> {
        let entry = self
            .roots
            .get_mut(&window)
            .ok_or(DockError::UnknownWindow(window))?;
        entry.bounds = bounds;
        Ok(())
    }

    pub fn bounds(&self, window: WindowId) -> Option<Rect> {
        self.roots.get(&window).map(|entry| entry.bounds)
    }

    pub fn layout(&self, window: WindowId) -> Option<&RootLayout> {
        self.roots.get(&window).map(|entry| &entry.layout)
    }

    pub fn layout_mut(&mut self, window: WindowId) -> Option<&mut RootLayout> {
        self.roots.get_mut(&window).map(|entry| &mut entry.layout)
    }

    /// Registered windows, front to back.
    pub fn windows(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.front_to_back.iter().copied()
    }

    pub fn window_count(&self) -> usize {
        self.roots.len()
    }

    /// First window (front to back) whose bounds contain the point.
    pub fn window_at(&self, screen: Pos2) -> Option<WindowId> {
        self.front_to_back
            .iter()
            .copied()
            .find(|w| self.roots.get(w).is_some_and(|e| e.bounds.contains(screen)))
    }

    /// The window whose tree currently owns the panel, if any.
    pub fn window_of(&self, panel: PanelId) -> Option<WindowId> {
        self.front_to_back
            .iter()
            .copied()
            .find(|w| self.roots.get(w).is_some_and(|e| e.layout.contains(panel)))
    }

    /// Remove the panel from whichever tree holds it. A root emptied this way
    /// stays registered; only `unregister` destroys roots.
    pub fn remove_panel(&mut self, panel: PanelId) -> bool {
        self.roots.values_mut().any(|e| e.layout.remove(panel))
    }
}
