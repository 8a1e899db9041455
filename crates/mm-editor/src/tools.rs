//! Tool system for canvas interactions.
//!
//! A tool translates input events plus the hit-test result under the pointer
//! into `ToolAction`s that the `Session` applies.
//!
//! | Pointer target | Down | Move (no drag) |
//! |----------------|------|----------------|
//! | Node body | Select | Hover |
//! | Toggle strip | Toggle expansion | Hover |
//! | Background | Start pan | Clear hover |

use crate::input::InputEvent;
use mm_core::{NodeId, Point, ViewTransform};
use mm_render::Hit;

/// What a tool asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolAction {
    /// Move the view so its translation is exactly `(x, y)`.
    SetOffset { x: f32, y: f32 },
    Select(NodeId),
    Toggle(NodeId),
    /// Pointer is over `id` (or nothing) at screen position `(x, y)`.
    Hover { id: Option<NodeId>, x: f32, y: f32 },
    Wheel { delta_y: f32 },
}

/// Trait for tools that handle input and produce actions.
pub trait Tool {
    fn handle(&mut self, event: &InputEvent, hit: Option<Hit>, view: &ViewTransform) -> Vec<ToolAction>;

    /// Whether a gesture is in progress.
    fn is_active(&self) -> bool;
}

// ─── Pan Tool ────────────────────────────────────────────────────────────

/// Background drag pans; clicks on nodes select or toggle.
#[derive(Debug, Default)]
pub struct PanTool {
    /// Pointer position minus view translation at drag start.
    drag_start: Option<Point>,
}

impl PanTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for PanTool {
    fn handle(&mut self, event: &InputEvent, hit: Option<Hit>, view: &ViewTransform) -> Vec<ToolAction> {
        match *event {
            InputEvent::PointerDown { x, y } => match hit {
                Some(Hit::Toggle(id)) => vec![ToolAction::Toggle(id)],
                Some(Hit::Node(id)) => vec![ToolAction::Select(id)],
                None => {
                    self.drag_start = Some(Point::new(x - view.x, y - view.y));
                    vec![]
                }
            },
            InputEvent::PointerMove { x, y } => match self.drag_start {
                Some(start) => vec![ToolAction::SetOffset {
                    x: x - start.x,
                    y: y - start.y,
                }],
                None => vec![ToolAction::Hover {
                    id: hit.map(|h| h.id()),
                    x,
                    y,
                }],
            },
            InputEvent::PointerUp { .. } => {
                self.drag_start = None;
                vec![]
            }
            InputEvent::PointerLeave => {
                self.drag_start = None;
                vec![ToolAction::Hover {
                    id: None,
                    x: 0.0,
                    y: 0.0,
                }]
            }
            InputEvent::Wheel { delta_y } => vec![ToolAction::Wheel { delta_y }],
        }
    }

    fn is_active(&self) -> bool {
        self.drag_start.is_some()
    }
}
