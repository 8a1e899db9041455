//! Interactive mindmap session.
//!
//! The session holds the authoritative tree plus everything the canvas needs
//! around it: expansion state, selection, view transform, and canvas size.
//! The layout is recomputed from scratch whenever the tree, the expansion set,
//! or the canvas size changes; it is never patched in place.

use crate::form::{EditForm, NodeDetail};
use crate::input::{InputEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{PanTool, Tool, ToolAction};
use mm_core::{
    ExpansionSet, FitConfig, Layout, LayoutConfig, MindMap, ModelError, Node, NodeId, NodeUpdate, Point,
    ViewTransform, Viewport, ZoomConfig, layout,
};
use mm_render::{DisplayList, Highlight, build_display_list, hit_test};
use serde::Serialize;

/// Offset of the tooltip from the pointer, in screen pixels.
pub const TOOLTIP_OFFSET: f32 = 15.0;

/// Tunables for layout and view behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionConfig {
    pub layout: LayoutConfig,
    pub zoom: ZoomConfig,
    pub fit: FitConfig,
}

/// Which nodes the UI is focused on. The IDs are weak references: they may
/// name nodes that no longer exist, and lookups then yield nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub selected: Option<NodeId>,
    pub hovered: Option<NodeId>,
    pub editing: Option<NodeId>,
}

/// Floating summary shown next to the pointer over a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub content: String,
    pub x: f32,
    pub y: f32,
}

/// A resolved shortcut and whether applying it changed anything visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    pub action: ShortcutAction,
    pub changed: bool,
}

pub struct Session {
    map: MindMap,
    expanded: ExpansionSet,
    viewport: Viewport,
    view: ViewTransform,
    selection: Selection,
    layout: Layout,
    config: SessionConfig,
    tooltip: Option<Tooltip>,
    /// Screen point of the last hover, for re-deriving the tooltip.
    hover_point: Point,
    form: Option<EditForm>,
    tool: PanTool,
}

impl Session {
    /// Start a session with every node expanded and the identity view.
    pub fn new(map: MindMap, viewport: Viewport) -> Self {
        Self::with_config(map, viewport, SessionConfig::default())
    }

    pub fn with_config(map: MindMap, viewport: Viewport, config: SessionConfig) -> Self {
        let expanded = ExpansionSet::all(map.root());
        let mut session = Self {
            map,
            expanded,
            viewport,
            view: ViewTransform::IDENTITY,
            selection: Selection::default(),
            layout: Layout::default(),
            config,
            tooltip: None,
            hover_point: Point::new(0.0, 0.0),
            form: None,
            tool: PanTool::new(),
        };
        session.relayout();
        session
    }

    pub fn from_json(text: &str, viewport: Viewport) -> Result<Self, ModelError> {
        Ok(Self::new(MindMap::from_json(text)?, viewport))
    }

    /// Replace the document. Expansion resets to all nodes; the view is kept.
    pub fn load(&mut self, map: MindMap) {
        self.expanded = ExpansionSet::all(map.root());
        self.map = map;
        self.selection = Selection::default();
        self.tooltip = None;
        self.form = None;
        self.relayout();
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn map(&self) -> &MindMap {
        &self.map
    }

    pub fn expanded(&self) -> &ExpansionSet {
        &self.expanded
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The open edit form, if editing.
    pub fn form(&self) -> Option<&EditForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut EditForm> {
        self.form.as_mut()
    }

    pub fn is_editing(&self) -> bool {
        self.form.is_some()
    }

    /// The selected node, or `None` if nothing is selected or it no longer exists.
    pub fn selected_node(&self) -> Option<&Node> {
        self.map.find(self.selection.selected?)
    }

    /// Detail-panel view of the selected node.
    pub fn detail(&self) -> Option<NodeDetail> {
        self.selected_node().map(NodeDetail::from_node)
    }

    pub fn display_list(&self) -> DisplayList {
        let highlight = Highlight {
            selected: self.selection.selected,
            hovered: self.selection.hovered,
        };
        build_display_list(
            self.map.root(),
            &self.expanded,
            &self.layout,
            highlight,
            &self.config.layout,
        )
    }

    // ─── Tree and selection ──────────────────────────────────────────────

    /// Select a node. Any edit in progress is dropped.
    pub fn select(&mut self, id: NodeId) {
        self.selection.selected = Some(id);
        self.selection.editing = None;
        self.form = None;
    }

    pub fn deselect(&mut self) {
        self.selection.selected = None;
        self.selection.editing = None;
        self.form = None;
    }

    /// Pointer is over `id` (or nothing) at screen point `pointer`.
    ///
    /// Entering a node with a summary shows a tooltip offset from the pointer;
    /// moving within the same node only moves the tooltip.
    pub fn hover(&mut self, id: Option<NodeId>, pointer: Point) -> Option<&Tooltip> {
        self.hover_point = pointer;
        if id == self.selection.hovered {
            if let Some(tip) = &mut self.tooltip {
                tip.x = pointer.x + TOOLTIP_OFFSET;
                tip.y = pointer.y + TOOLTIP_OFFSET;
            }
            return self.tooltip.as_ref();
        }
        self.selection.hovered = id;
        self.refresh_tooltip();
        self.tooltip.as_ref()
    }

    /// Re-derive the tooltip from the hovered node's current summary.
    fn refresh_tooltip(&mut self) {
        let (x, y) = (self.hover_point.x + TOOLTIP_OFFSET, self.hover_point.y + TOOLTIP_OFFSET);
        self.tooltip = self
            .selection
            .hovered
            .and_then(|id| self.map.find(id))
            .and_then(|node| node.summary.clone())
            .filter(|s| !s.is_empty())
            .map(|content| Tooltip { content, x, y });
    }

    /// Flip a node's expansion and re-layout. Returns the new state.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        let open = self.expanded.toggle(id);
        log::debug!("toggle `{id}` → {}", if open { "expanded" } else { "collapsed" });
        self.relayout();
        open
    }

    // ─── Editing ─────────────────────────────────────────────────────────

    /// Open the edit form for the selected node.
    pub fn begin_edit(&mut self) -> Option<&EditForm> {
        let node = self.selected_node()?;
        let form = EditForm::from_node(node);
        self.selection.editing = Some(form.id);
        self.form = Some(form);
        self.form.as_ref()
    }

    /// Merge `patch` into the node being edited and close the form.
    /// Returns `false` if nothing was being edited.
    pub fn save_edit(&mut self, patch: &NodeUpdate) -> bool {
        let Some(id) = self.selection.editing.take() else {
            return false;
        };
        self.form = None;
        self.map = self.map.update(id, patch);
        self.relayout();
        true
    }

    /// Save whatever the edit form currently holds.
    pub fn commit_form(&mut self) -> bool {
        let patch = match (&self.form, self.selection.editing) {
            (Some(form), Some(id)) => match self.map.find(id) {
                Some(node) => form.to_update(node),
                None => NodeUpdate::default(),
            },
            _ => return false,
        };
        self.save_edit(&patch)
    }

    pub fn cancel_edit(&mut self) {
        self.selection.editing = None;
        self.form = None;
    }

    // ─── View ────────────────────────────────────────────────────────────

    /// New canvas size. The layout re-centers on the new height.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.relayout();
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.view = self.view.pan(dx, dy);
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.view = self.view.zoom_wheel(delta_y, &self.config.zoom);
    }

    pub fn zoom_in(&mut self) {
        self.view = self.view.zoom_in(&self.config.zoom);
    }

    pub fn zoom_out(&mut self) {
        self.view = self.view.zoom_out(&self.config.zoom);
    }

    pub fn fit_to_view(&mut self) {
        self.view = self
            .view
            .fit_to_view(&self.layout, self.viewport, &self.config.layout, &self.config.fit);
    }

    pub fn reset_view(&mut self) {
        self.view = self.view.reset();
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route a pointer or wheel event through the pan tool.
    /// Returns `true` if anything visible changed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let hit = event
            .position()
            .and_then(|p| hit_test(&self.display_list(), &self.view, p));
        let actions = self.tool.handle(event, hit, &self.view);
        let mut changed = false;
        for action in actions {
            changed |= self.apply(action);
        }
        changed
    }

    fn apply(&mut self, action: ToolAction) -> bool {
        match action {
            ToolAction::SetOffset { x, y } => {
                let before = self.view;
                self.view = ViewTransform { x, y, ..self.view };
                self.view != before
            }
            ToolAction::Select(id) => {
                let before = self.selection;
                self.select(id);
                self.selection != before
            }
            ToolAction::Toggle(id) => {
                self.toggle(id);
                true
            }
            ToolAction::Hover { id, x, y } => {
                let before = (self.selection.hovered, self.tooltip.clone());
                self.hover(id, Point::new(x, y));
                before != (self.selection.hovered, self.tooltip.clone())
            }
            ToolAction::Wheel { delta_y } => {
                let before = self.view;
                self.wheel(delta_y);
                self.view != before
            }
        }
    }

    /// Resolve and apply a keyboard shortcut.
    ///
    /// View, tree, and edit actions are applied here. Export actions are
    /// returned for the host to run since they produce files, and never
    /// count as a change.
    pub fn handle_key(&mut self, key: &str, mods: Modifiers) -> Option<KeyOutcome> {
        let action = ShortcutMap::resolve(key, mods, self.is_editing())?;
        let view = self.view;
        let changed = match action {
            ShortcutAction::ZoomIn => {
                self.zoom_in();
                self.view != view
            }
            ShortcutAction::ZoomOut => {
                self.zoom_out();
                self.view != view
            }
            ShortcutAction::FitToView => {
                self.fit_to_view();
                self.view != view
            }
            ShortcutAction::ResetView => {
                self.reset_view();
                self.view != view
            }
            ShortcutAction::ToggleSelected => {
                match self.selected_node().filter(|n| n.has_children()).map(|n| n.id) {
                    Some(id) => {
                        self.toggle(id);
                        true
                    }
                    None => false,
                }
            }
            ShortcutAction::Deselect => {
                let before = self.selection;
                self.deselect();
                self.selection != before
            }
            ShortcutAction::BeginEdit => self.begin_edit().is_some(),
            ShortcutAction::SaveEdit => self.commit_form(),
            ShortcutAction::CancelEdit => {
                let was_editing = self.is_editing();
                self.cancel_edit();
                was_editing
            }
            ShortcutAction::ExportJson | ShortcutAction::ExportImage => false,
        };
        Some(KeyOutcome { action, changed })
    }

    fn relayout(&mut self) {
        self.layout = layout(
            self.map.root(),
            &self.expanded,
            self.viewport.height,
            &self.config.layout,
        );
        log::debug!(
            "relayout: {} visible nodes at canvas height {}",
            self.layout.len(),
            self.viewport.height
        );
        if let Some(id) = self.selection.hovered {
            if !self.layout.contains(id) {
                self.selection.hovered = None;
            }
            self.refresh_tooltip();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let root = Node::new("root", "Root").with_children([
            Node::new("a", "A").with_summary("About A"),
            Node::new("b", "B").with_children([Node::new("b1", "B1")]),
        ]);
        Session::new(MindMap::new(root).unwrap(), Viewport::default())
    }

    #[test]
    fn starts_fully_expanded() {
        let s = session();
        assert_eq!(s.expanded().len(), 4);
        assert_eq!(s.layout().len(), 4);
    }

    #[test]
    fn toggle_relayouts() {
        let mut s = session();
        assert!(!s.toggle(NodeId::intern("b")));
        assert!(!s.layout().contains(NodeId::intern("b1")));
        assert!(s.toggle(NodeId::intern("b")));
        assert!(s.layout().contains(NodeId::intern("b1")));
    }

    #[test]
    fn hover_tooltip_follows_pointer() {
        let mut s = session();
        let tip = s.hover(Some(NodeId::intern("a")), Point::new(100.0, 50.0)).cloned();
        assert_eq!(
            tip,
            Some(Tooltip { content: "About A".into(), x: 115.0, y: 65.0 })
        );
        let tip = s.hover(Some(NodeId::intern("a")), Point::new(110.0, 50.0)).cloned();
        assert_eq!(tip.map(|t| t.x), Some(125.0));
        assert!(s.hover(None, Point::new(0.0, 0.0)).is_none());
        assert_eq!(s.selection().hovered, None);
    }

    #[test]
    fn hover_without_summary_has_no_tooltip() {
        let mut s = session();
        assert!(s.hover(Some(NodeId::intern("b")), Point::new(0.0, 0.0)).is_none());
        assert_eq!(s.selection().hovered, Some(NodeId::intern("b")));
    }

    #[test]
    fn collapsing_ancestor_clears_hover() {
        let mut s = session();
        s.hover(Some(NodeId::intern("b1")), Point::new(10.0, 10.0));
        assert_eq!(s.selection().hovered, Some(NodeId::intern("b1")));
        s.toggle(NodeId::intern("b"));
        assert_eq!(s.selection().hovered, None);
        assert!(s.tooltip().is_none());
    }

    #[test]
    fn tooltip_tracks_edited_summary() {
        let mut s = session();
        s.hover(Some(NodeId::intern("a")), Point::new(100.0, 50.0));
        s.select(NodeId::intern("a"));
        s.begin_edit();
        s.save_edit(&NodeUpdate {
            summary: Some("Revised".into()),
            ..NodeUpdate::default()
        });
        assert_eq!(
            s.tooltip().cloned(),
            Some(Tooltip { content: "Revised".into(), x: 115.0, y: 65.0 })
        );

        s.hover(Some(NodeId::intern("b")), Point::new(0.0, 0.0));
        assert!(s.tooltip().is_none());
        s.select(NodeId::intern("b"));
        s.begin_edit();
        s.save_edit(&NodeUpdate {
            summary: Some("Now B".into()),
            ..NodeUpdate::default()
        });
        assert_eq!(s.tooltip().map(|t| t.content.as_str()), Some("Now B"));
    }

    #[test]
    fn select_cancels_edit() {
        let mut s = session();
        s.select(NodeId::intern("a"));
        assert!(s.begin_edit().is_some());
        s.select(NodeId::intern("b"));
        assert!(!s.is_editing());
        assert_eq!(s.selection().editing, None);
    }

    #[test]
    fn begin_edit_needs_existing_selection() {
        let mut s = session();
        assert!(s.begin_edit().is_none());
        s.select(NodeId::intern("gone"));
        assert!(s.begin_edit().is_none());
        assert!(s.detail().is_none());
    }

    #[test]
    fn resize_recenters_root() {
        let mut s = session();
        s.resize(Viewport { width: 800.0, height: 1000.0 });
        let root = s.layout().get(NodeId::intern("root")).unwrap();
        assert_eq!(root.y, 500.0 - 22.0);
    }
}
