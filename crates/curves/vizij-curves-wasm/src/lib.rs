use js_sys::{Array, Date};
use serde::Deserialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vizij_curves_core::{
    sampling::value_at, Axis, CurveId, EditorConfig, EditorSession, Modifiers, PointerButton,
    PointerTarget, SessionEvent, TangentMode, TokenPublisher, Vec2, ViewState,
};

/// Curve editor session plus debounced share-token publishing.
///
/// Every mutating call returns the session events as a JS array of
/// `{ type: "documentChanged" | ... }` objects.
#[wasm_bindgen]
pub struct VizijCurveEditor {
    session: EditorSession,
    publisher: TokenPublisher,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn from_js_or_default<T: for<'de> Deserialize<'de> + Default>(
    v: JsValue,
    what: &str,
) -> Result<T, JsError> {
    if jsvalue_is_undefined_or_null(&v) {
        Ok(T::default())
    } else {
        swb::from_value(v).map_err(|e| JsError::new(&format!("{what} error: {e}")))
    }
}

fn parse_curve_id(id: &str) -> Result<CurveId, JsError> {
    serde_json::from_value(serde_json::Value::String(id.to_string()))
        .map_err(|e| JsError::new(&format!("invalid curve id '{id}': {e}")))
}

fn button_from_u8(button: u8) -> PointerButton {
    // DOM MouseEvent.button numbering.
    match button {
        1 => PointerButton::Middle,
        2 => PointerButton::Secondary,
        _ => PointerButton::Primary,
    }
}

impl VizijCurveEditor {
    /// Feed events to the token publisher and hand them to JS.
    fn finish(&mut self, events: Vec<SessionEvent>) -> Result<JsValue, JsError> {
        self.publisher.observe(&events, Date::now());
        swb::to_value(&events).map_err(|e| JsError::new(&format!("events error: {e}")))
    }

    fn resolve_target(&self, pos: Vec2, target: JsValue) -> Result<PointerTarget, JsError> {
        if jsvalue_is_undefined_or_null(&target) {
            return Ok(self.session.hit_test(pos));
        }
        swb::from_value(target).map_err(|e| JsError::new(&format!("target error: {e}")))
    }
}

#[wasm_bindgen]
impl VizijCurveEditor {
    /// Create an editor over the starter document. Pass a JSON config object or
    /// undefined/null for defaults. Example:
    ///   new VizijCurveEditor({ history_capacity: 100 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VizijCurveEditor, JsError> {
        console_error_panic_hook::set_once();
        let cfg: EditorConfig = from_js_or_default(config, "config")?;
        let publisher = TokenPublisher::from_config(&cfg);
        Ok(VizijCurveEditor {
            session: EditorSession::new(cfg),
            publisher,
        })
    }

    // ----- pointer -----

    /// `target` is `{ kind: "background" | "point" | "handle", curve, point, side }`;
    /// pass undefined/null to pick with the built-in hit test.
    #[wasm_bindgen(js_name = pointer_down)]
    pub fn pointer_down(
        &mut self,
        x: f64,
        y: f64,
        button: u8,
        modifiers: JsValue,
        target: JsValue,
    ) -> Result<JsValue, JsError> {
        let pos = Vec2::new(x, y);
        let modifiers: Modifiers = from_js_or_default(modifiers, "modifiers")?;
        let target = self.resolve_target(pos, target)?;
        let events = self
            .session
            .pointer_down(pos, button_from_u8(button), modifiers, target);
        self.finish(events)
    }

    #[wasm_bindgen(js_name = pointer_move)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<JsValue, JsError> {
        let events = self.session.pointer_move(Vec2::new(x, y));
        self.finish(events)
    }

    #[wasm_bindgen(js_name = pointer_up)]
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Result<JsValue, JsError> {
        let events = self.session.pointer_up(Vec2::new(x, y));
        self.finish(events)
    }

    #[wasm_bindgen(js_name = cancel_gesture)]
    pub fn cancel_gesture(&mut self) -> Result<JsValue, JsError> {
        let events = self.session.cancel_gesture();
        self.finish(events)
    }

    #[wasm_bindgen(js_name = double_click)]
    pub fn double_click(&mut self, x: f64, y: f64, target: JsValue) -> Result<JsValue, JsError> {
        let pos = Vec2::new(x, y);
        let target = self.resolve_target(pos, target)?;
        let events = self.session.double_click(pos, target);
        self.finish(events)
    }

    /// Target under a screen position using the built-in glyph layout.
    #[wasm_bindgen(js_name = hit_test)]
    pub fn hit_test(&self, x: f64, y: f64) -> Result<JsValue, JsError> {
        let target = self.session.hit_test(Vec2::new(x, y));
        swb::to_value(&target).map_err(|e| JsError::new(&format!("hit test error: {e}")))
    }

    /// Current gesture phase: "idle", "panning", "boxSelecting", ...
    #[wasm_bindgen(js_name = gesture_phase)]
    pub fn gesture_phase(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.session.gesture_phase())
            .map_err(|e| JsError::new(&format!("phase error: {e}")))
    }

    /// Rubber band `{ min, max }` in screen space, or null.
    #[wasm_bindgen(js_name = selection_rect)]
    pub fn selection_rect(&self) -> Result<JsValue, JsError> {
        match self.session.selection_rect() {
            Some(r) => swb::to_value(&r).map_err(|e| JsError::new(&format!("rect error: {e}"))),
            None => Ok(JsValue::NULL),
        }
    }

    // ----- view -----

    /// Cursor-anchored zoom. `lock` is "x", "y" or undefined.
    #[wasm_bindgen]
    pub fn zoom(
        &mut self,
        x: f64,
        y: f64,
        factor: f64,
        lock: Option<String>,
    ) -> Result<JsValue, JsError> {
        let locked = match lock.as_deref() {
            None | Some("") => None,
            Some("x") => Some(Axis::X),
            Some("y") => Some(Axis::Y),
            Some(other) => return Err(JsError::new(&format!("unknown zoom axis '{other}'"))),
        };
        let events = self.session.zoom(Vec2::new(x, y), factor, locked);
        self.finish(events)
    }

    #[wasm_bindgen]
    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<JsValue, JsError> {
        let events = self.session.pan(Vec2::new(dx, dy));
        self.finish(events)
    }

    #[wasm_bindgen(js_name = fit_view)]
    pub fn fit_view(&mut self, width: f64, height: f64) -> Result<JsValue, JsError> {
        let events = self.session.fit_view(Vec2::new(width, height));
        self.finish(events)
    }

    #[wasm_bindgen]
    pub fn view(&self) -> Result<JsValue, JsError> {
        swb::to_value(self.session.view()).map_err(|e| JsError::new(&format!("view error: {e}")))
    }

    #[wasm_bindgen(js_name = set_view)]
    pub fn set_view(&mut self, view: JsValue) -> Result<JsValue, JsError> {
        let view: ViewState = swb::from_value(view)
            .map_err(|e| JsError::new(&format!("view parse error: {e}")))?;
        let events = self.session.set_view(view);
        self.finish(events)
    }

    // ----- edits -----

    /// `mode` is "auto", "linear", "break" or "constant".
    #[wasm_bindgen(js_name = set_tangent_mode)]
    pub fn set_tangent_mode(&mut self, mode: &str) -> Result<JsValue, JsError> {
        let mode = TangentMode::parse(mode)
            .ok_or_else(|| JsError::new(&format!("unknown tangent mode '{mode}'")))?;
        let events = self.session.set_tangent_mode(mode);
        self.finish(events)
    }

    #[wasm_bindgen(js_name = delete_selection)]
    pub fn delete_selection(&mut self) -> Result<JsValue, JsError> {
        let events = self.session.delete_selection();
        self.finish(events)
    }

    #[wasm_bindgen(js_name = select_all)]
    pub fn select_all(&mut self) -> Result<JsValue, JsError> {
        let events = self.session.select_all();
        self.finish(events)
    }

    #[wasm_bindgen(js_name = clear_selection)]
    pub fn clear_selection(&mut self) -> Result<JsValue, JsError> {
        let events = self.session.clear_selection();
        self.finish(events)
    }

    #[wasm_bindgen(js_name = add_curve)]
    pub fn add_curve(&mut self) -> Result<JsValue, JsError> {
        let events = self.session.add_curve();
        self.finish(events)
    }

    #[wasm_bindgen(js_name = delete_curve)]
    pub fn delete_curve(&mut self, id: &str) -> Result<JsValue, JsError> {
        let id = parse_curve_id(id)?;
        let events = self
            .session
            .delete_curve(id)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.finish(events)
    }

    #[wasm_bindgen(js_name = rename_curve)]
    pub fn rename_curve(&mut self, id: &str, name: String) -> Result<JsValue, JsError> {
        let id = parse_curve_id(id)?;
        let events = self
            .session
            .rename_curve(id, name)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.finish(events)
    }

    #[wasm_bindgen(js_name = toggle_visibility)]
    pub fn toggle_visibility(&mut self, id: &str) -> Result<JsValue, JsError> {
        let id = parse_curve_id(id)?;
        let events = self
            .session
            .toggle_visibility(id)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.finish(events)
    }

    #[wasm_bindgen(js_name = set_active_curve)]
    pub fn set_active_curve(&mut self, id: &str) -> Result<(), JsError> {
        let id = parse_curve_id(id)?;
        self.session
            .set_active_curve(id)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn undo(&mut self) -> Result<JsValue, JsError> {
        let events = self.session.undo();
        self.finish(events)
    }

    #[wasm_bindgen]
    pub fn redo(&mut self) -> Result<JsValue, JsError> {
        let events = self.session.redo();
        self.finish(events)
    }

    #[wasm_bindgen(js_name = can_undo)]
    pub fn can_undo(&self) -> bool {
        self.session.history().can_undo()
    }

    #[wasm_bindgen(js_name = can_redo)]
    pub fn can_redo(&self) -> bool {
        self.session.history().can_redo()
    }

    // ----- documents and persistence -----

    /// Replace the document with a share token; history restarts.
    #[wasm_bindgen(js_name = load_token)]
    pub fn load_token(&mut self, token: &str) -> Result<JsValue, JsError> {
        let events = self
            .session
            .load_token(token)
            .map_err(|e| JsError::new(&format!("load_token error: {e}")))?;
        // Freshly loaded state is already published by definition.
        swb::to_value(&events).map_err(|e| JsError::new(&format!("events error: {e}")))
    }

    #[wasm_bindgen(js_name = export_token)]
    pub fn export_token(&self) -> String {
        self.session.export_token()
    }

    /// Share token if the document changed and has been quiet long enough,
    /// otherwise undefined. Call from a timer or animation frame.
    #[wasm_bindgen(js_name = poll_token)]
    pub fn poll_token(&mut self) -> Option<String> {
        self.publisher.poll(Date::now(), self.session.document())
    }

    /// Import expanded or compact JSON text (file or clipboard).
    #[wasm_bindgen(js_name = import_text)]
    pub fn import_text(&mut self, text: &str) -> Result<JsValue, JsError> {
        let events = self
            .session
            .import_text(text)
            .map_err(|e| JsError::new(&format!("import error: {e}")))?;
        self.finish(events)
    }

    /// Expanded JSON text for file export or the clipboard.
    #[wasm_bindgen(js_name = export_text)]
    pub fn export_text(&self) -> Result<String, JsError> {
        self.session
            .export_text()
            .map_err(|e| JsError::new(&format!("export error: {e}")))
    }

    // ----- queries -----

    /// Full CurveSet with ids, for drawing lists and glyphs.
    #[wasm_bindgen]
    pub fn document(&self) -> Result<JsValue, JsError> {
        swb::to_value(self.session.document())
            .map_err(|e| JsError::new(&format!("document error: {e}")))
    }

    /// Selected points as `{ curve, point }` objects.
    #[wasm_bindgen]
    pub fn selection(&self) -> Result<Array, JsError> {
        let out = Array::new();
        for r in self.session.selection().iter() {
            let v = swb::to_value(r).map_err(|e| JsError::new(&format!("selection error: {e}")))?;
            out.push(&v);
        }
        Ok(out)
    }

    /// Screen-space draw commands for one curve.
    #[wasm_bindgen(js_name = curve_path)]
    pub fn curve_path(&self, id: &str) -> Result<JsValue, JsError> {
        let id = parse_curve_id(id)?;
        let path = self
            .session
            .curve_path(id)
            .ok_or_else(|| JsError::new(&format!("unknown curve {id}")))?;
        swb::to_value(&path).map_err(|e| JsError::new(&format!("path error: {e}")))
    }

    /// Value of one curve at time `x`; undefined for a curve without points.
    #[wasm_bindgen(js_name = value_at)]
    pub fn value_at(&self, id: &str, x: f64) -> Result<Option<f64>, JsError> {
        let id = parse_curve_id(id)?;
        let curve = self
            .session
            .document()
            .curve(id)
            .ok_or_else(|| JsError::new(&format!("unknown curve {id}")))?;
        Ok(value_at(curve, x))
    }

    /// `[[curveId, value], ...]` for every visible curve at time `x`.
    #[wasm_bindgen(js_name = value_preview)]
    pub fn value_preview(&self, x: f64) -> Result<JsValue, JsError> {
        swb::to_value(&self.session.value_preview(x))
            .map_err(|e| JsError::new(&format!("preview error: {e}")))
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
