pub mod expansion;
pub mod geometry;
pub mod id;
pub mod layout;
pub mod lint;
pub mod model;
pub mod transform;

pub use expansion::ExpansionSet;
pub use geometry::{EdgeCurve, Point, Rect, edges};
pub use id::NodeId;
pub use layout::{Layout, LayoutConfig, Position, Viewport, layout, subtree_height};
pub use lint::{LintDiagnostic, LintSeverity, lint_tree};
pub use model::{MindMap, ModelError, Node, NodeUpdate};
pub use transform::{FitConfig, ViewTransform, ZoomConfig};
