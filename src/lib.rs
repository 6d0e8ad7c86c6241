#![forbid(unsafe_code)]

pub mod engine;
pub mod layout_builder;

pub use engine::{
    DEFAULT_REGION_SENSITIVITY, DEFAULT_SPLIT_RATIO, DockError, DockRegion, DockingEngine,
    DockingOptions, DragOutcome, DragOverlay, LayoutNode, Orientation, PanelDirectory, PanelId,
    RegionSet, RootDirectory, RootLayout, WindowId, classify, region_rect,
};
pub use layout_builder::{LayoutBuilder, SplitDirection};
