use super::classify::DEFAULT_REGION_SENSITIVITY;

/// Options for [`super::DockingEngine`].
#[derive(Clone, Copy, Debug)]
pub struct DockingOptions {
    /// Width of the cardinal edge bands as a fraction of the target's extent.
    ///
    /// The pointer must be within this fraction of an edge before the region
    /// classifier reports that edge instead of `Center`. Meaningful values
    /// lie in `(0, 0.5)`; out-of-range values are clamped at use.
    pub region_sensitivity: f32,

    /// Whether the background of an occupied root offers cardinal edge-split
    /// drop targets (splitting the entire root content along that edge).
    ///
    /// - `false` (default): an occupied root only accepts drops with an
    ///   explicit panel target; its background is inert during a drag.
    /// - `true`: hovering the background near a root edge previews and
    ///   commits a whole-root split, like classic docking frameworks' root
    ///   docking handles.
    pub dock_to_occupied_root_edges: bool,
}

impl Default for DockingOptions {
    fn default() -> Self {
        Self {
            region_sensitivity: DEFAULT_REGION_SENSITIVITY,
            dock_to_occupied_root_edges: false,
        }
    }
}

impl DockingOptions {
    /// Sensitivity forced into a sane band: 0 would make cardinal regions
    /// unreachable and 0.5 would leave no `Center` band at the midline.
    pub(crate) fn clamped_sensitivity(&self) -> f32 {
        self.region_sensitivity.clamp(0.01, 0.49)
    }
}
