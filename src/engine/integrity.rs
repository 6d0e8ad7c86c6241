use ahash::{AHashMap, AHashSet};

use super::directory::RootDirectory;
use super::tree::{LayoutNode, RootLayout};
use super::types::{PanelId, WindowId};

/// Structural audit of one tree. Returns human-readable issues; empty means
/// every invariant holds.
pub(super) fn layout_integrity_issues(layout: &RootLayout) -> Vec<String> {
    let mut issues = Vec::new();
    let mut seen: AHashSet<PanelId> = AHashSet::new();
    if let Some(node) = layout.node() {
        visit(node, &mut seen, &mut issues);
    }
    issues
}

fn visit(node: &LayoutNode, seen: &mut AHashSet<PanelId>, issues: &mut Vec<String>) {
    match node {
        LayoutNode::Leaf(panel) => {
            if !seen.insert(*panel) {
                issues.push(format!("integrity: panel {panel:?} appears more than once"));
            }
        }
        LayoutNode::Split {
            ratio,
            first,
            second,
            ..
        } => {
            if !(*ratio > 0.0 && *ratio < 1.0) {
                issues.push(format!("integrity: split ratio {ratio} outside (0, 1)"));
            }
            visit(first, seen, issues);
            visit(second, seen, issues);
        }
        LayoutNode::Tabbed { panels, active } => {
            if panels.is_empty() {
                issues.push("integrity: tabs with no panels".to_owned());
                return;
            }
            if panels.len() == 1 {
                issues.push(format!(
                    "integrity: tabs with single panel {:?} should have collapsed to a leaf",
                    panels[0]
                ));
            }
            if *active >= panels.len() {
                issues.push(format!(
                    "integrity: tabs active index {active} out of range for {} panels",
                    panels.len()
                ));
            }
            let mut local: AHashSet<PanelId> = AHashSet::new();
            for panel in panels {
                if !local.insert(*panel) {
                    issues.push(format!("integrity: tabs hold duplicate panel {panel:?}"));
                }
                if !seen.insert(*panel) {
                    issues.push(format!("integrity: panel {panel:?} appears more than once"));
                }
            }
        }
    }
}

/// Audit every registered root plus the forest-wide uniqueness rule: a panel
/// id is owned by at most one node across all windows.
pub(super) fn forest_integrity_issues(directory: &RootDirectory) -> Vec<String> {
    let mut issues = Vec::new();
    let mut owner: AHashMap<PanelId, WindowId> = AHashMap::new();

    for window in directory.windows() {
        let Some(layout) = directory.layout(window) else {
            continue;
        };
        for issue in layout_integrity_issues(layout) {
            issues.push(format!("{issue} (window {window:?})"));
        }
        for panel in layout.panels() {
            if let Some(prev) = owner.insert(panel, window) {
                if prev != window {
                    issues.push(format!(
                        "integrity: panel {panel:?} owned by both {prev:?} and {window:?}"
                    ));
                }
            }
        }
    }

    issues
}
