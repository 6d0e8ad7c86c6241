use ahash::AHashMap;
use emath::{Pos2, Rect, vec2};

use super::tree::LayoutNode;
use super::{
    DockError, DockRegion, DockingEngine, DockingOptions, DragOutcome, Orientation,
    PanelDirectory, PanelId, RegionSet, WindowId,
};

fn win(id: u64) -> WindowId {
    WindowId::from_u64(id)
}

fn panel(id: u64) -> PanelId {
    PanelId::from_u64(id)
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::from_min_size(Pos2::new(x, y), vec2(w, h))
}

fn leaf(id: u64) -> LayoutNode {
    LayoutNode::Leaf(panel(id))
}

/// Host-side stand-in: panel geometry and vetoes are plain lookup tables.
#[derive(Default)]
struct TestPanels {
    bounds: AHashMap<(WindowId, PanelId), Rect>,
    vetoes: AHashMap<PanelId, RegionSet>,
}

impl TestPanels {
    fn place(&mut self, window: WindowId, panel: PanelId, rect: Rect) {
        self.bounds.insert((window, panel), rect);
    }

    fn veto(&mut self, panel: PanelId, regions: RegionSet) {
        self.vetoes.insert(panel, regions);
    }
}

impl PanelDirectory for TestPanels {
    fn panel_bounds(&self, window: WindowId, panel: PanelId) -> Option<Rect> {
        self.bounds.get(&(window, panel)).copied()
    }

    fn disallowed_regions(&self, panel: PanelId) -> RegionSet {
        self.vetoes.get(&panel).copied().unwrap_or(RegionSet::EMPTY)
    }
}

fn assert_forest_ok(engine: &DockingEngine) {
    let issues = engine.integrity_issues();
    assert!(
        issues.is_empty(),
        "forest integrity failed:\n{}",
        issues.join("\n")
    );
}

#[test]
fn dock_east_then_undock_scenario() {
    let mut engine = DockingEngine::new();
    engine.register_window(win(1), rect(0.0, 0.0, 400.0, 300.0)).unwrap();

    engine.dock_center(win(1), panel(1)).unwrap();
    assert_eq!(engine.directory().layout(win(1)).unwrap().node(), Some(&leaf(1)));

    engine.dock(win(1), panel(2), DockRegion::East).unwrap();
    let Some(LayoutNode::Split {
        orientation,
        ratio,
        first,
        second,
    }) = engine.directory().layout(win(1)).unwrap().node()
    else {
        panic!("expected a split");
    };
    assert_eq!(*orientation, Orientation::Horizontal);
    assert_eq!(*ratio, 0.5);
    assert_eq!(**first, leaf(1));
    assert_eq!(**second, leaf(2));

    assert!(engine.undock(panel(1)));
    assert_eq!(engine.directory().layout(win(1)).unwrap().node(), Some(&leaf(2)));
    assert_forest_ok(&engine);
}

#[test]
fn dock_center_makes_tabs_then_collapses_on_undock() {
    let mut engine = DockingEngine::new();
    engine.register_window(win(1), rect(0.0, 0.0, 400.0, 300.0)).unwrap();

    engine.dock_center(win(1), panel(1)).unwrap();
    engine.dock_center(win(1), panel(2)).unwrap();
    assert_eq!(
        engine.directory().layout(win(1)).unwrap().node(),
        Some(&LayoutNode::Tabbed {
            panels: vec![panel(1), panel(2)],
            active: 1,
        })
    );

    assert!(engine.undock(panel(2)));
    assert_eq!(engine.directory().layout(win(1)).unwrap().node(), Some(&leaf(1)));
    assert!(!engine.undock(panel(2)));
}

#[test]
fn programmatic_dock_errors() {
    let mut engine = DockingEngine::new();
    engine.register_window(win(1), rect(0.0, 0.0, 400.0, 300.0)).unwrap();

    assert_eq!(
        engine.register_window(win(1), rect(0.0, 0.0, 100.0, 100.0)),
        Err(DockError::DuplicateRoot(win(1)))
    );
    assert_eq!(
        engine.dock_center(win(9), panel(1)),
        Err(DockError::UnknownWindow(win(9)))
    );

    engine.dock_center(win(1), panel(1)).unwrap();
    assert_eq!(
        engine.dock_center(win(1), panel(1)),
        Err(DockError::AlreadyDocked(panel(1)))
    );
    assert_eq!(
        engine.dock_at(win(1), panel(2), panel(9), DockRegion::East),
        Err(DockError::TargetNotFound(panel(9)))
    );

    // A split root has no single implicit target.
    engine.dock(win(1), panel(2), DockRegion::East).unwrap();
    assert_eq!(
        engine.dock_center(win(1), panel(3)),
        Err(DockError::NoDockTarget)
    );
    assert_eq!(
        engine.dock(win(1), panel(3), DockRegion::South),
        Err(DockError::RootEdgeDockingDisabled)
    );

    // With the policy opted in, the cardinal case wraps the root instead.
    engine.options.dock_to_occupied_root_edges = true;
    engine.dock(win(1), panel(3), DockRegion::South).unwrap();
    let Some(LayoutNode::Split { orientation, second, .. }) =
        engine.directory().layout(win(1)).unwrap().node()
    else {
        panic!("expected a split");
    };
    assert_eq!(*orientation, Orientation::Vertical);
    assert_eq!(**second, leaf(3));
    assert_forest_ok(&engine);
}

#[test]
fn drag_previews_the_west_half_and_drop_splits() {
    let mut engine = DockingEngine::new();
    let mut panels = TestPanels::default();
    engine.register_window(win(1), rect(0.0, 0.0, 400.0, 300.0)).unwrap();
    engine.dock_center(win(1), panel(1)).unwrap();
    panels.place(win(1), panel(1), rect(0.0, 0.0, 400.0, 300.0));

    engine.begin_drag(panel(2));
    assert!(engine.is_dragging());
    assert!(!engine.overlay().visible);

    // h_pct = 0.1: inside the west band at the default sensitivity.
    engine.on_pointer_move(Pos2::new(40.0, 150.0), &panels);
    let overlay = engine.overlay();
    assert!(overlay.visible);
    assert_eq!(overlay.window, Some(win(1)));
    assert_eq!(overlay.rect, rect(0.0, 0.0, 200.0, 300.0));

    let outcome = engine.on_drop(Pos2::new(40.0, 150.0), &panels);
    assert_eq!(outcome, DragOutcome::Dropped);
    assert!(!engine.is_dragging());
    assert!(!engine.overlay().visible);

    let Some(LayoutNode::Split { first, second, .. }) =
        engine.directory().layout(win(1)).unwrap().node()
    else {
        panic!("expected a split");
    };
    // West puts the dropped panel on the first side.
    assert_eq!(**first, leaf(2));
    assert_eq!(**second, leaf(1));
    assert_forest_ok(&engine);
}

#[test]
fn pointer_outside_every_window_hides_overlay_and_drop_cancels() {
    let mut engine = DockingEngine::new();
    let mut panels = TestPanels::default();
    engine.register_window(win(1), rect(0.0, 0.0, 400.0, 300.0)).unwrap();
    engine.dock_center(win(1), panel(1)).unwrap();
    panels.place(win(1), panel(1), rect(0.0, 0.0, 400.0, 300.0));

    engine.begin_drag(panel(2));
    engine.on_pointer_move(Pos2::new(200.0, 150.0), &panels);
    assert!(engine.overlay().visible);

    // Leaving every tracked window clears the candidate but keeps dragging.
    engine.on_pointer_move(Pos2::new(1000.0, 1000.0), &panels);
    assert!(!engine.overlay().visible);
    assert!(engine.is_dragging());

    assert_eq!(
        engine.on_drop(Pos2::new(1000.0, 1000.0), &panels),
        DragOutcome::Cancelled
    );
    assert_eq!(engine.directory().layout(win(1)).unwrap().node(), Some(&leaf(1)));
}

#[test]
fn cancel_restores_idle_without_touching_the_tree() {
    let mut engine = DockingEngine::new();
    let mut panels = TestPanels::default();
    engine.register_window(win(1), rect(0.0, 0.0, 400.0, 300.0)).unwrap();
    engine.dock_center(win(1), panel(1)).unwrap();
    panels.place(win(1), panel(1), rect(0.0, 0.0, 400.0, 300.0));

    engine.begin_drag(panel(2));
    engine.on_pointer_move(Pos2::new(40.0, 150.0), &panels);
    assert!(engine.overlay().visible);

    assert_eq!(engine.on_cancel(), DragOutcome::Cancelled);
    assert!(!engine.is_dragging());
    assert!(!engine.overlay().visible);
    assert_eq!(engine.directory().layout(win(1)).unwrap().node(), Some(&leaf(1)));

    // Idle releases are quiet no-ops.
    assert_eq!(engine.on_drop(Pos2::new(10.0, 10.0), &panels), DragOutcome::Cancelled);
    assert_eq!(engine.on_cancel(), DragOutcome::Cancelled);
}

#[test]
fn moving_a_docked_panel_is_remove_plus_insert() {
    let mut engine = DockingEngine::new();
    let mut panels = TestPanels::default();
    engine.register_window(win(1), rect(0.0, 0.0, 400.0, 300.0)).unwrap();
    engine.register_window(win(2), rect(500.0, 0.0, 400.0, 300.0)).unwrap();
    engine.dock_center(win(1), panel(1)).unwrap();
    engine.dock_center(win(2), panel(2)).unwrap();
    panels.place(win(1), panel(1), rect(0.0, 0.0, 400.0, 300.0));
    panels.place(win(2), panel(2), rect(0.0, 0.0, 400.0, 300.0));

    engine.begin_drag(panel(1));
    let middle_of_win2 = Pos2::new(700.0, 150.0);
    engine.on_pointer_move(middle_of_win2, &panels);
    let overlay = engine.overlay();
    assert_eq!(overlay.window, Some(win(2)));
    assert_eq!(overlay.rect, rect(0.0, 0.0, 400.0, 300.0));

    assert_eq!(engine.on_drop(middle_of_win2, &panels), DragOutcome::Dropped);

    // The source root is emptied, never destroyed.
    assert!(engine.directory().layout(win(1)).unwrap().is_empty());
    assert_eq!(engine.directory().window_count(), 2);
    assert_eq!(
        engine.directory().layout(win(2)).unwrap().node(),
        Some(&LayoutNode::Tabbed {
            panels: vec![panel(2), panel(1)],
            active: 1,
        })
    );
    assert_forest_ok(&engine);
}

#[test]
fn floating_panel_vetoes_turn_edges_into_center() {
    let mut engine = DockingEngine::new();
    let mut panels = TestPanels::default();
    engine.register_window(win(1), rect(0.0, 0.0, 400.0, 300.0)).unwrap();
    engine.dock_center(win(1), panel(1)).unwrap();
    panels.place(win(1), panel(1), rect(0.0, 0.0, 400.0, 300.0));
    panels.veto(panel(2), RegionSet::of(&[DockRegion::West]));

    engine.begin_drag(panel(2));
    engine.on_pointer_move(Pos2::new(40.0, 150.0), &panels);

    // The west band is vetoed for this panel, so the candidate is Center
    // over the full target, and the drop tabs instead of splitting.
    let overlay = engine.overlay();
    assert!(overlay.visible);
    assert_eq!(overlay.rect, rect(0.0, 0.0, 400.0, 300.0));

    assert_eq!(engine.on_drop(Pos2::new(40.0, 150.0), &panels), DragOutcome::Dropped);
    assert_eq!(
        engine.directory().layout(win(1)).unwrap().node(),
        Some(&LayoutNode::Tabbed {
            panels: vec![panel(1), panel(2)],
            active: 1,
        })
    );
}

#[test]
fn a_panel_is_never_its_own_drop_target() {
    let mut engine = DockingEngine::new();
    let mut panels = TestPanels::default();
    engine.register_window(win(1), rect(0.0, 0.0, 400.0, 300.0)).unwrap();
    engine.dock_center(win(1), panel(1)).unwrap();
    panels.place(win(1), panel(1), rect(0.0, 0.0, 400.0, 300.0));

    engine.begin_drag(panel(1));
    engine.on_pointer_move(Pos2::new(200.0, 150.0), &panels);
    assert!(!engine.overlay().visible);

    assert_eq!(
        engine.on_drop(Pos2::new(200.0, 150.0), &panels),
        DragOutcome::Cancelled
    );
    assert_eq!(engine.directory().layout(win(1)).unwrap().node(), Some(&leaf(1)));
    assert_forest_ok(&engine);
}

#[test]
fn empty_root_is_a_forced_center_drop_over_the_whole_content() {
    let mut engine = DockingEngine::new();
    let panels = TestPanels::default();
    engine.register_window(win(1), rect(100.0, 50.0, 400.0, 300.0)).unwrap();

    engine.begin_drag(panel(1));
    // Near the window edge: still Center, the root is empty.
    engine.on_pointer_move(Pos2::new(110.0, 60.0), &panels);
    let overlay = engine.overlay();
    assert!(overlay.visible);
    assert_eq!(overlay.rect, rect(0.0, 0.0, 400.0, 300.0));

    assert_eq!(engine.on_drop(Pos2::new(110.0, 60.0), &panels), DragOutcome::Dropped);
    assert_eq!(engine.directory().layout(win(1)).unwrap().node(), Some(&leaf(1)));
}

#[test]
fn occupied_root_background_is_inert_unless_policy_allows_edges() {
    let mut panels = TestPanels::default();
    let window_bounds = rect(0.0, 0.0, 400.0, 300.0);

    let run = |engine: &mut DockingEngine, panels: &TestPanels| {
        engine.register_window(win(1), window_bounds).unwrap();
        engine.dock_center(win(1), panel(1)).unwrap();
        engine.begin_drag(panel(2));
        // Over the background (panel 1 only covers the left half), near the
        // east edge of the root content.
        engine.on_pointer_move(Pos2::new(390.0, 150.0), panels);
    };
    panels.place(win(1), panel(1), rect(0.0, 0.0, 200.0, 300.0));

    let mut strict = DockingEngine::new();
    run(&mut strict, &panels);
    assert!(!strict.overlay().visible);
    assert_eq!(
        strict.on_drop(Pos2::new(390.0, 150.0), &panels),
        DragOutcome::Cancelled
    );

    let mut permissive = DockingEngine::with_options(DockingOptions {
        dock_to_occupied_root_edges: true,
        ..Default::default()
    });
    run(&mut permissive, &panels);
    let overlay = permissive.overlay();
    assert!(overlay.visible);
    assert_eq!(overlay.rect, rect(200.0, 0.0, 200.0, 300.0));

    assert_eq!(
        permissive.on_drop(Pos2::new(390.0, 150.0), &panels),
        DragOutcome::Dropped
    );
    let Some(LayoutNode::Split { first, second, .. }) =
        permissive.directory().layout(win(1)).unwrap().node()
    else {
        panic!("expected a split");
    };
    assert_eq!(**first, leaf(1));
    assert_eq!(**second, leaf(2));
}

#[test]
fn window_resize_refreshes_the_hover_in_place() {
    let mut engine = DockingEngine::new();
    let mut panels = TestPanels::default();
    engine.register_window(win(1), rect(0.0, 0.0, 400.0, 300.0)).unwrap();
    engine.dock_center(win(1), panel(1)).unwrap();
    panels.place(win(1), panel(1), rect(0.0, 0.0, 400.0, 300.0));

    engine.begin_drag(panel(2));
    // h_pct = 0.35 is exactly the band edge: not West, so Center.
    engine.on_pointer_move(Pos2::new(140.0, 150.0), &panels);
    assert_eq!(engine.overlay().rect, rect(0.0, 0.0, 400.0, 300.0));

    // After widening the window (and the host re-laying-out the panel), the
    // same pointer position lands in the west band.
    panels.place(win(1), panel(1), rect(0.0, 0.0, 800.0, 300.0));
    engine
        .window_resized(win(1), rect(0.0, 0.0, 800.0, 300.0), &panels)
        .unwrap();
    let overlay = engine.overlay();
    assert!(overlay.visible);
    assert_eq!(overlay.rect, rect(0.0, 0.0, 400.0, 300.0));

    assert_eq!(
        engine.window_resized(win(9), rect(0.0, 0.0, 1.0, 1.0), &panels),
        Err(DockError::UnknownWindow(win(9)))
    );
}

#[test]
fn stacking_order_decides_the_hovered_window() {
    let mut engine = DockingEngine::new();
    let mut panels = TestPanels::default();
    engine.register_window(win(1), rect(0.0, 0.0, 200.0, 200.0)).unwrap();
    engine.register_window(win(2), rect(100.0, 0.0, 200.0, 200.0)).unwrap();
    engine.dock_center(win(1), panel(1)).unwrap();
    engine.dock_center(win(2), panel(2)).unwrap();
    panels.place(win(1), panel(1), rect(0.0, 0.0, 200.0, 200.0));
    panels.place(win(2), panel(2), rect(0.0, 0.0, 200.0, 200.0));

    let overlap = Pos2::new(150.0, 100.0);
    engine.begin_drag(panel(3));
    engine.on_pointer_move(overlap, &panels);
    // The most recently registered window starts frontmost.
    assert_eq!(engine.overlay().window, Some(win(2)));

    engine.set_stacking_order(&[win(1), win(2)]);
    engine.on_pointer_move(overlap, &panels);
    assert_eq!(engine.overlay().window, Some(win(1)));
}
