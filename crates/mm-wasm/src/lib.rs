//! WASM bridge for the mindmap canvas: exposes the editor session to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards pointer,
//! wheel, and key events, redraws when a handler returns `true`, and reads
//! panel state back as JSON strings.

mod render2d;

use mm_core::{MindMap, NodeId, Point, Viewport};
use mm_editor::export::ExportGuard;
use mm_editor::form::FormField;
use mm_editor::input::{InputEvent, Modifiers};
use mm_editor::session::Session;
use mm_editor::shortcuts::ShortcutAction;
use mm_render::svg::{SvgFrame, render_svg};
use mm_render::{RasterOptions, Theme};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// Margin around content in SVG exports.
const SVG_EXPORT_PADDING: f32 = 50.0;

/// The main WASM-facing canvas controller.
#[wasm_bindgen]
pub struct MindmapCanvas {
    session: Session,
    exports: ExportGuard,
    theme: Theme,
    raster: RasterOptions,
}

#[wasm_bindgen]
impl MindmapCanvas {
    /// Create a controller for a canvas of the given size, holding a
    /// single-node placeholder until `load_json` is called.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();
        let viewport = Viewport {
            width: width as f32,
            height: height as f32,
        };
        Self {
            session: Session::new(MindMap::leaf("root", "Mindmap"), viewport),
            exports: ExportGuard::new(),
            theme: Theme::dark(),
            raster: RasterOptions::default(),
        }
    }

    /// Load a JSON mindmap. Returns `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn load_json(&mut self, text: &str) -> String {
        match MindMap::from_json(text) {
            Ok(map) => {
                self.session.load(map);
                serde_json::json!({ "ok": true }).to_string()
            }
            Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
        }
    }

    /// Pretty JSON of the current tree, or `undefined` if the export failed.
    pub fn export_json(&self) -> Option<String> {
        self.exports
            .json_bytes(&self.session)
            .map_err(|e| report_error(&format!("Failed to export JSON: {e}")))
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// SVG document framing all visible content.
    pub fn export_svg(&self) -> String {
        render_svg(
            &self.session.display_list(),
            SvgFrame::Content {
                padding: SVG_EXPORT_PADDING,
            },
            &self.theme,
        )
    }

    /// PNG bytes of the current view at twice the canvas size, or `undefined` on failure.
    pub fn export_png(&self) -> Option<Vec<u8>> {
        self.exports
            .png_bytes(&self.session, &self.theme, &self.raster)
            .map_err(|e| report_error(&format!("Failed to export image: {e}")))
            .ok()
    }

    /// Render the current frame to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        render2d::render_scene(
            ctx,
            &self.session.display_list(),
            &self.session.view(),
            self.session.viewport(),
            &self.theme,
            self.session.tooltip(),
        );
    }

    /// Resize the canvas. The layout re-centers on the new height.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.session.resize(Viewport {
            width: width as f32,
            height: height as f32,
        });
    }

    // ─── Pointer API ─────────────────────────────────────────────────────

    /// Handle pointer down event. Returns true if a redraw is needed.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.session.handle_input(&InputEvent::PointerDown { x, y })
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.session.handle_input(&InputEvent::PointerMove { x, y })
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.session.handle_input(&InputEvent::PointerUp { x, y })
    }

    pub fn handle_pointer_leave(&mut self) -> bool {
        self.session.handle_input(&InputEvent::PointerLeave)
    }

    pub fn handle_wheel(&mut self, delta_y: f32) -> bool {
        self.session.handle_input(&InputEvent::Wheel { delta_y })
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"changed":bool, "action":"<action_name>"}`
    ///
    /// Export actions are reported but not run; the page calls the export
    /// methods and downloads the result.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let mods = Modifiers {
            ctrl,
            shift,
            alt,
            meta,
        };
        match self.session.handle_key(key, mods) {
            Some(outcome) => {
                serde_json::json!({ "action": action_to_name(outcome.action), "changed": outcome.changed })
                    .to_string()
            }
            None => r#"{"changed":false,"action":"none"}"#.to_string(),
        }
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn fit_to_view(&mut self) {
        self.session.fit_to_view();
    }

    pub fn reset_view(&mut self) {
        self.session.reset_view();
    }

    /// `{"x":..,"y":..,"scale":..}`
    pub fn view_json(&self) -> String {
        serde_json::to_string(&self.session.view()).unwrap_or_else(|_| "null".to_string())
    }

    // ─── Tree ────────────────────────────────────────────────────────────

    /// Flip a node's expansion. Returns the new state.
    pub fn toggle(&mut self, node_id: &str) -> bool {
        self.session.toggle(NodeId::intern(node_id))
    }

    /// Select a node by ID. Returns false if no such node exists.
    pub fn select_by_id(&mut self, node_id: &str) -> bool {
        let id = NodeId::intern(node_id);
        if !self.session.map().contains(id) {
            return false;
        }
        self.session.select(id);
        true
    }

    pub fn deselect(&mut self) {
        self.session.deselect();
    }

    /// Selected node ID, or empty string.
    pub fn get_selected_id(&self) -> String {
        self.session
            .selection()
            .selected
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// Detail-panel model for the selected node, or `null`.
    pub fn detail_json(&self) -> String {
        serde_json::to_string(&self.session.detail()).unwrap_or_else(|_| "null".to_string())
    }

    /// Tooltip `{content, x, y}` for the hovered node, or `null`.
    pub fn tooltip_json(&self) -> String {
        serde_json::to_string(&self.session.tooltip()).unwrap_or_else(|_| "null".to_string())
    }

    /// Layout positions keyed by node ID: `{"id":{"x":..,"y":..,"parentId":..}}`.
    pub fn positions_json(&self) -> String {
        serde_json::to_string(self.session.layout()).unwrap_or_else(|_| "{}".to_string())
    }

    // ─── Editing ─────────────────────────────────────────────────────────

    /// Open the edit form for the selected node. Returns the form as JSON, or `null`.
    pub fn begin_edit(&mut self) -> String {
        serde_json::to_string(&self.session.begin_edit()).unwrap_or_else(|_| "null".to_string())
    }

    /// Set one form field (`label`, `summary`, `description`).
    pub fn set_form_field(&mut self, field: &str, value: &str) -> bool {
        match (FormField::parse(field), self.session.form_mut()) {
            (Some(field), Some(form)) => {
                form.set(field, value);
                true
            }
            _ => false,
        }
    }

    pub fn save_edit(&mut self) -> bool {
        self.session.commit_form()
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel_edit();
    }

    /// Hover a node programmatically (e.g. from a tree list). Empty ID clears.
    pub fn hover_by_id(&mut self, node_id: &str, x: f32, y: f32) -> bool {
        let id = (!node_id.is_empty()).then(|| NodeId::intern(node_id));
        self.session.hover(id, Point::new(x, y));
        true
    }
}

fn action_to_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::ZoomIn => "zoom_in",
        ShortcutAction::ZoomOut => "zoom_out",
        ShortcutAction::FitToView => "fit_to_view",
        ShortcutAction::ResetView => "reset_view",
        ShortcutAction::ToggleSelected => "toggle",
        ShortcutAction::Deselect => "deselect",
        ShortcutAction::BeginEdit => "edit",
        ShortcutAction::SaveEdit => "save",
        ShortcutAction::CancelEdit => "cancel",
        ShortcutAction::ExportJson => "export_json",
        ShortcutAction::ExportImage => "export_image",
    }
}

fn report_error(msg: &str) {
    log::error!("{msg}");
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&msg.into());
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Mindmap WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
  "id": "root",
  "label": "Root",
  "summary": "Top",
  "children": [
    {
      "id": "a",
      "label": "A"
    }
  ]
}"#;

    fn canvas() -> MindmapCanvas {
        let mut c = MindmapCanvas::new(800.0, 600.0);
        assert_eq!(c.load_json(SAMPLE), r#"{"ok":true}"#);
        c
    }

    #[test]
    fn load_rejects_duplicates() {
        let mut c = MindmapCanvas::new(800.0, 600.0);
        let out = c.load_json(r#"{"id":"x","label":"X","children":[{"id":"x","label":"Y"}]}"#);
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["ok"], false);
        assert!(v["error"].as_str().unwrap().contains("x"));
    }

    #[test]
    fn export_json_round_trips() {
        assert_eq!(canvas().export_json().as_deref(), Some(SAMPLE));
    }

    #[test]
    fn select_unknown_id_fails() {
        let mut c = canvas();
        assert!(!c.select_by_id("missing"));
        assert!(c.select_by_id("a"));
        assert_eq!(c.get_selected_id(), "a");
        assert_eq!(
            c.detail_json(),
            r#"{"id":"a","label":"A","summary":null,"description":null,"metadata":[],"children":null}"#
        );
    }

    #[test]
    fn positions_include_parent_ids() {
        let c = canvas();
        let v: serde_json::Value = serde_json::from_str(&c.positions_json()).unwrap();
        assert_eq!(v["root"]["parentId"], serde_json::Value::Null);
        assert_eq!(v["a"]["parentId"], "root");
        assert_eq!(v["a"]["x"], 340.0);
    }

    #[test]
    fn form_fields_round_trip_through_save() {
        let mut c = canvas();
        c.select_by_id("a");
        assert_ne!(c.begin_edit(), "null");
        assert!(c.set_form_field("label", "Alpha"));
        assert!(!c.set_form_field("metadata", "x"));
        assert!(c.save_edit());
        assert!(c.export_json().unwrap().contains("\"label\": \"Alpha\""));
    }

    #[test]
    fn key_reports_action_name() {
        let mut c = canvas();
        assert_eq!(c.handle_key("f", false, false, false, false), r#"{"action":"fit_to_view","changed":true}"#);
        assert_eq!(c.handle_key("q", false, false, false, false), r#"{"changed":false,"action":"none"}"#);
    }

    #[test]
    fn key_without_effect_is_unchanged() {
        let mut c = canvas();
        assert_eq!(c.handle_key("Escape", false, false, false, false), r#"{"action":"deselect","changed":false}"#);
        c.select_by_id("a");
        assert_eq!(c.handle_key(" ", false, false, false, false), r#"{"action":"toggle","changed":false}"#);
        assert_eq!(c.handle_key("Escape", false, false, false, false), r#"{"action":"deselect","changed":true}"#);
        assert_eq!(c.handle_key("s", true, false, false, false), r#"{"action":"export_json","changed":false}"#);
    }

    #[test]
    fn svg_export_frames_content() {
        let svg = canvas().export_svg();
        assert!(svg.contains(">Root</text>"));
        assert_eq!(svg.matches("<path ").count(), 1);
    }
}
