//! Editor session: document ownership, interaction state machine and public API.
//!
//! The session owns the CurveSet, Selection, ViewState, History and the single
//! gesture slot. Hosts feed it pointer and command input; every method returns
//! the [`SessionEvent`]s it caused.
//!
//! Gesture origins (pointer down, no gesture active):
//! - secondary button anywhere, or primary + alt/ctrl/meta -> panning
//! - primary on background -> box selecting
//! - primary on a point -> moving the selection (clicked point joins or replaces it)
//! - primary on a handle -> moving that handle of that one point

use hashbrown::HashMap;
use log::{debug, info};

use crate::codec::{self, expanded, token};
use crate::config::EditorConfig;
use crate::data::{curve_name_for_index, Curve, CurveSet, HandleSide, Point, TangentMode, Vec2};
use crate::error::{CodecError, SessionError};
use crate::gesture::{Gesture, GestureKind, GesturePhase};
use crate::hit;
use crate::history::History;
use crate::ids::{CurveId, PointRef};
use crate::inputs::{Modifiers, PointerButton, PointerTarget};
use crate::outputs::{Events, SessionEvent};
use crate::path::{screen_path, PathCommand};
use crate::sampling;
use crate::selection::{points_in_screen_rect, Selection};
use crate::viewport::{Axis, Bounds, ViewState};

#[derive(Debug)]
pub struct EditorSession {
    cfg: EditorConfig,
    document: CurveSet,
    selection: Selection,
    view: ViewState,
    history: History,
    gesture: Option<Gesture>,
    /// Curve that receives double-click insertions.
    active_curve: Option<CurveId>,
}

impl EditorSession {
    /// Session over the starter document.
    pub fn new(cfg: EditorConfig) -> Self {
        let doc = CurveSet::default_document(&cfg);
        Self::with_document(cfg, doc)
    }

    /// Session over `document`, with a single history entry.
    pub fn with_document(cfg: EditorConfig, document: CurveSet) -> Self {
        let history = History::new(document.clone(), cfg.history_capacity);
        let active_curve = document.curves.first().map(|c| c.id);
        Self {
            view: cfg.default_view,
            cfg,
            document,
            selection: Selection::new(),
            history,
            gesture: None,
            active_curve,
        }
    }

    // ----- accessors -----

    pub fn config(&self) -> &EditorConfig {
        &self.cfg
    }

    pub fn document(&self) -> &CurveSet {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn active_curve(&self) -> Option<CurveId> {
        self.active_curve
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture
            .as_ref()
            .map(Gesture::phase)
            .unwrap_or_default()
    }

    /// Graph-space bounds of the selected points that still resolve.
    pub fn selection_bounds(&self) -> Option<Bounds> {
        self.selection.bounds(&self.document)
    }

    /// Rubber band rectangle (screen space) while box selecting.
    pub fn selection_rect(&self) -> Option<Bounds> {
        self.gesture.as_ref().and_then(Gesture::selection_rect)
    }

    // ----- view -----

    pub fn set_view(&mut self, view: ViewState) -> Vec<SessionEvent> {
        self.view = view;
        vec![SessionEvent::ViewChanged]
    }

    /// Cursor-anchored zoom. Ignored while a gesture is active.
    pub fn zoom(&mut self, pivot: Vec2, factor: f64, locked: Option<Axis>) -> Vec<SessionEvent> {
        if self.gesture.is_some() {
            debug!("zoom ignored: gesture in progress");
            return Vec::new();
        }
        self.view
            .zoom(pivot, factor, locked, self.cfg.min_scale, self.cfg.max_scale);
        vec![SessionEvent::ViewChanged]
    }

    pub fn pan(&mut self, delta: Vec2) -> Vec<SessionEvent> {
        self.view.pan(delta);
        vec![SessionEvent::ViewChanged]
    }

    /// Fit the selection, or every visible point when nothing resolvable is
    /// selected. An empty document resets to the default view.
    pub fn fit_view(&mut self, viewport: Vec2) -> Vec<SessionEvent> {
        let bounds = self.selection_bounds().or_else(|| {
            Bounds::from_points(self.document.visible_points().map(|(_, p)| p.position()))
        });
        self.view.fit_to_bounds(
            bounds,
            viewport,
            self.cfg.fit_padding_px,
            self.cfg.default_view,
        );
        vec![SessionEvent::ViewChanged]
    }

    // ----- pointer gestures -----

    pub fn pointer_down(
        &mut self,
        pos: Vec2,
        button: PointerButton,
        modifiers: Modifiers,
        target: PointerTarget,
    ) -> Vec<SessionEvent> {
        if self.gesture.is_some() {
            debug!("pointer down ignored: gesture already active");
            return Vec::new();
        }
        let mut events = Events::new();

        let wants_pan = button == PointerButton::Secondary
            || (button == PointerButton::Primary && modifiers.requests_pan());
        if wants_pan {
            self.gesture = Some(Gesture::new(
                GestureKind::Panning {
                    start_view: self.view,
                },
                pos,
            ));
            return events.into_vec();
        }
        if button != PointerButton::Primary {
            return events.into_vec();
        }

        let kind = match target {
            PointerTarget::Background => GestureKind::BoxSelecting { current: pos },
            PointerTarget::Point { curve, point } => {
                let r = PointRef::new(curve, point);
                if self.document.point(r).is_none() {
                    debug!("pointer down on stale point {r}");
                    return events.into_vec();
                }
                if !self.selection.contains(&r) {
                    self.selection.select_only(r);
                    events.push(SessionEvent::SelectionChanged);
                }
                GestureKind::MovingPoints {
                    originals: self.snapshot_selected(),
                }
            }
            PointerTarget::Handle { curve, point, side } => {
                let r = PointRef::new(curve, point);
                let Some(original) = self.document.point(r).cloned() else {
                    debug!("pointer down on handle of stale point {r}");
                    return events.into_vec();
                };
                if !self.selection.contains(&r) {
                    self.selection.select_only(r);
                    events.push(SessionEvent::SelectionChanged);
                }
                GestureKind::MovingHandle {
                    target: r,
                    side,
                    original,
                }
            }
        };
        self.gesture = Some(Gesture::new(kind, pos));
        events.into_vec()
    }

    /// Deep copy of every selected point, in one pass over the document.
    fn snapshot_selected(&self) -> HashMap<PointRef, Point> {
        let mut out = HashMap::with_capacity(self.selection.len());
        for curve in &self.document.curves {
            for p in &curve.points {
                let r = PointRef::new(curve.id, p.id);
                if self.selection.contains(&r) {
                    out.insert(r, p.clone());
                }
            }
        }
        out
    }

    pub fn pointer_move(&mut self, pos: Vec2) -> Vec<SessionEvent> {
        let mut events = Events::new();
        let threshold = self.cfg.drag_threshold_px;
        let Self {
            gesture,
            view,
            document,
            ..
        } = self;
        let Some(g) = gesture.as_mut() else {
            return events.into_vec();
        };
        g.track_movement(pos, threshold);
        let delta = g.delta(pos);
        let has_moved = g.has_moved;

        match &mut g.kind {
            GestureKind::Panning { start_view } => {
                *view = *start_view;
                view.pan(delta);
                events.push(SessionEvent::ViewChanged);
            }
            GestureKind::BoxSelecting { current } => {
                *current = pos;
            }
            GestureKind::MovingPoints { originals } => {
                if has_moved {
                    let d = view.delta_to_graph(delta);
                    for curve in document.curves.iter_mut() {
                        let curve_id = curve.id;
                        for p in curve.points.iter_mut() {
                            if let Some(o) = originals.get(&PointRef::new(curve_id, p.id)) {
                                p.set_position(o.position() + d);
                            }
                        }
                    }
                    events.push(SessionEvent::DocumentChanged);
                }
            }
            GestureKind::MovingHandle {
                target,
                side,
                original,
            } => {
                if has_moved {
                    let d = view.delta_to_graph(delta);
                    if let Some(p) = document.point_mut(*target) {
                        let t = original.tangent(*side) + d;
                        *p.tangent_mut(*side) = t;
                        if p.mode == TangentMode::Auto {
                            *p.tangent_mut(side.opposite()) = -t;
                        }
                        events.push(SessionEvent::DocumentChanged);
                    }
                }
            }
        }
        events.into_vec()
    }

    /// Finish the active gesture at `pos`. The gesture slot is always cleared.
    pub fn pointer_up(&mut self, pos: Vec2) -> Vec<SessionEvent> {
        let mut events = Events::new();
        for e in self.pointer_move(pos) {
            events.push(e);
        }
        let Some(g) = self.gesture.take() else {
            return events.into_vec();
        };

        match &g.kind {
            GestureKind::BoxSelecting { .. } => {
                if let Some(rect) = g.selection_rect() {
                    let hits = points_in_screen_rect(&self.document, &self.view, rect);
                    self.selection.replace(hits);
                    events.push(SessionEvent::SelectionChanged);
                }
            }
            GestureKind::Panning { .. } => {}
            GestureKind::MovingPoints { .. } | GestureKind::MovingHandle { .. } => {
                if g.commits_on_release() {
                    self.commit(&mut events);
                } else {
                    events.push(SessionEvent::GestureDiscarded);
                }
            }
        }
        events.into_vec()
    }

    /// Abort the active gesture, restoring whatever it changed. Never commits.
    pub fn cancel_gesture(&mut self) -> Vec<SessionEvent> {
        let mut events = Events::new();
        let Some(g) = self.gesture.take() else {
            return events.into_vec();
        };
        match g.kind {
            GestureKind::Panning { start_view } => {
                self.view = start_view;
                events.push(SessionEvent::ViewChanged);
            }
            GestureKind::BoxSelecting { .. } => {}
            GestureKind::MovingPoints { originals } => {
                if g.has_moved {
                    for curve in self.document.curves.iter_mut() {
                        let curve_id = curve.id;
                        for p in curve.points.iter_mut() {
                            if let Some(o) = originals.get(&PointRef::new(curve_id, p.id)) {
                                *p = o.clone();
                            }
                        }
                    }
                    events.push(SessionEvent::DocumentChanged);
                }
            }
            GestureKind::MovingHandle {
                target, original, ..
            } => {
                if g.has_moved {
                    if let Some(p) = self.document.point_mut(target) {
                        *p = original;
                        events.push(SessionEvent::DocumentChanged);
                    }
                }
            }
        }
        events.push(SessionEvent::GestureDiscarded);
        events.into_vec()
    }

    /// Insert a point on the active curve at a background double-click.
    pub fn double_click(&mut self, pos: Vec2, target: PointerTarget) -> Vec<SessionEvent> {
        let mut events = Events::new();
        if self.gesture.is_some() || target != PointerTarget::Background {
            return events.into_vec();
        }
        let Some(curve_id) = self.active_curve else {
            debug!("double click ignored: no active curve");
            return events.into_vec();
        };
        if self.document.curve(curve_id).is_some_and(|c| !c.is_visible) {
            debug!("double click ignored: active curve {curve_id} is hidden");
            return events.into_vec();
        }
        let at = self.view.to_graph(pos);
        let point = Point::new(
            at.x,
            at.y,
            self.cfg.default_tangent_length,
            TangentMode::Auto,
        );
        let r = PointRef::new(curve_id, point.id);
        let Some(curve) = self.document.curve_mut(curve_id) else {
            debug!("double click ignored: active curve {curve_id} is gone");
            return events.into_vec();
        };
        curve.points.push(point);
        self.selection.select_only(r);
        events.push(SessionEvent::SelectionChanged);
        self.commit(&mut events);
        events.into_vec()
    }

    // ----- point edits -----

    /// Apply `mode` to every selected point.
    ///
    /// Entering auto or break snaps any tangent whose x-offset is shorter than
    /// `min_tangent_length` to `default_tangent_length` on its own side;
    /// entering auto then mirrors right onto left.
    pub fn set_tangent_mode(&mut self, mode: TangentMode) -> Vec<SessionEvent> {
        let mut events = Events::new();
        if self.gesture.is_some() || self.selection.is_empty() {
            return events.into_vec();
        }
        let min_len = self.cfg.min_tangent_length;
        let default_len = self.cfg.default_tangent_length;
        let mut touched = false;
        for r in self.selection.iter() {
            let Some(p) = self.document.point_mut(*r) else {
                continue;
            };
            if mode.is_bezier() {
                for side in [HandleSide::Left, HandleSide::Right] {
                    let t = p.tangent_mut(side);
                    if t.x.abs() < min_len {
                        *t = Vec2::new(side.sign() * default_len, 0.0);
                    }
                }
            }
            p.mode = mode;
            p.enforce_symmetry();
            touched = true;
        }
        if touched {
            self.commit(&mut events);
        }
        events.into_vec()
    }

    pub fn delete_selection(&mut self) -> Vec<SessionEvent> {
        let mut events = Events::new();
        if self.gesture.is_some() || self.selection.is_empty() {
            return events.into_vec();
        }
        let mut removed = 0usize;
        for curve in self.document.curves.iter_mut() {
            let curve_id = curve.id;
            let before = curve.points.len();
            let selection = &self.selection;
            curve
                .points
                .retain(|p| !selection.contains(&PointRef::new(curve_id, p.id)));
            removed += before - curve.points.len();
        }
        self.selection.clear();
        events.push(SessionEvent::SelectionChanged);
        if removed > 0 {
            self.commit(&mut events);
        }
        events.into_vec()
    }

    // ----- selection -----

    /// Select every point on every visible curve.
    pub fn select_all(&mut self) -> Vec<SessionEvent> {
        let refs: Vec<PointRef> = self.document.visible_points().map(|(r, _)| r).collect();
        self.selection.replace(refs);
        vec![SessionEvent::SelectionChanged]
    }

    pub fn clear_selection(&mut self) -> Vec<SessionEvent> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        self.selection.clear();
        vec![SessionEvent::SelectionChanged]
    }

    // ----- curve edits -----

    /// Append an empty curve named and colored by its index; it becomes active.
    pub fn add_curve(&mut self) -> Vec<SessionEvent> {
        let mut events = Events::new();
        let index = self.document.curves.len();
        let curve = Curve::new(curve_name_for_index(index), self.cfg.color_for_index(index));
        self.active_curve = Some(curve.id);
        self.document.curves.push(curve);
        self.commit(&mut events);
        events.into_vec()
    }

    pub fn delete_curve(&mut self, id: CurveId) -> Result<Vec<SessionEvent>, SessionError> {
        let index = self
            .document
            .curve_index(id)
            .ok_or(SessionError::UnknownCurve(id))?;
        let mut events = Events::new();
        self.document.curves.remove(index);
        self.selection.remove_curve(id);
        events.push(SessionEvent::SelectionChanged);
        self.repair_active_curve();
        self.commit(&mut events);
        Ok(events.into_vec())
    }

    pub fn rename_curve(
        &mut self,
        id: CurveId,
        name: impl Into<String>,
    ) -> Result<Vec<SessionEvent>, SessionError> {
        let name = name.into();
        let curve = self
            .document
            .curve_mut(id)
            .ok_or(SessionError::UnknownCurve(id))?;
        let mut events = Events::new();
        if curve.name != name {
            curve.name = name;
            self.commit(&mut events);
        }
        Ok(events.into_vec())
    }

    /// Flip visibility. Hiding a curve drops its points from the selection.
    pub fn toggle_visibility(&mut self, id: CurveId) -> Result<Vec<SessionEvent>, SessionError> {
        let curve = self
            .document
            .curve_mut(id)
            .ok_or(SessionError::UnknownCurve(id))?;
        curve.is_visible = !curve.is_visible;
        let hidden = !curve.is_visible;
        let mut events = Events::new();
        if hidden {
            self.selection.remove_curve(id);
            events.push(SessionEvent::SelectionChanged);
        }
        self.commit(&mut events);
        Ok(events.into_vec())
    }

    /// Choose the curve that receives double-click insertions.
    pub fn set_active_curve(&mut self, id: CurveId) -> Result<(), SessionError> {
        if self.document.curve(id).is_none() {
            return Err(SessionError::UnknownCurve(id));
        }
        self.active_curve = Some(id);
        Ok(())
    }

    // ----- history -----

    pub fn undo(&mut self) -> Vec<SessionEvent> {
        if self.gesture.is_some() {
            debug!("undo ignored: gesture in progress");
            return Vec::new();
        }
        match self.history.undo() {
            Some(snapshot) => {
                self.document = snapshot.clone();
                self.after_history_jump()
            }
            None => {
                debug!("undo ignored: at oldest entry");
                Vec::new()
            }
        }
    }

    pub fn redo(&mut self) -> Vec<SessionEvent> {
        if self.gesture.is_some() {
            debug!("redo ignored: gesture in progress");
            return Vec::new();
        }
        match self.history.redo() {
            Some(snapshot) => {
                self.document = snapshot.clone();
                self.after_history_jump()
            }
            None => {
                debug!("redo ignored: at newest entry");
                Vec::new()
            }
        }
    }

    fn after_history_jump(&mut self) -> Vec<SessionEvent> {
        self.selection.clear();
        self.repair_active_curve();
        vec![
            SessionEvent::DocumentChanged,
            SessionEvent::SelectionChanged,
            SessionEvent::HistoryMoved {
                cursor: self.history.cursor(),
            },
        ]
    }

    fn commit(&mut self, events: &mut Events) {
        self.history.commit(self.document.clone());
        events.push(SessionEvent::DocumentChanged);
        events.push(SessionEvent::HistoryCommitted {
            len: self.history.len(),
            cursor: self.history.cursor(),
        });
    }

    /// Keep a live active curve, falling back to the first visible one.
    fn repair_active_curve(&mut self) {
        let alive = self
            .active_curve
            .is_some_and(|id| self.document.curve(id).is_some());
        if !alive {
            let curves = &self.document.curves;
            self.active_curve = curves
                .iter()
                .find(|c| c.is_visible)
                .or_else(|| curves.first())
                .map(|c| c.id);
        }
    }

    fn replace_document(&mut self, document: CurveSet) {
        self.document = document;
        self.selection.clear();
        self.gesture = None;
        self.active_curve = None;
        self.repair_active_curve();
    }

    // ----- persistence / exchange -----

    /// Load a share token, replacing the document and restarting history.
    /// On error the session is unchanged.
    pub fn load_token(&mut self, token: &str) -> Result<Vec<SessionEvent>, CodecError> {
        let document = token::decode(token)?;
        info!(
            "loaded token document: {} curves, {} points",
            document.curves.len(),
            document.point_count()
        );
        self.history.reset(document.clone());
        self.replace_document(document);
        Ok(vec![
            SessionEvent::DocumentChanged,
            SessionEvent::SelectionChanged,
        ])
    }

    pub fn export_token(&self) -> String {
        token::encode(&self.document)
    }

    /// Import file or clipboard text (expanded or compact JSON). Replaces the
    /// document and commits it. On error the session is unchanged.
    pub fn import_text(&mut self, text: &str) -> Result<Vec<SessionEvent>, CodecError> {
        let document = codec::decode_any_str(text, &self.cfg.palette)?;
        info!("imported {} curves", document.curves.len());
        self.replace_document(document);
        let mut events = Events::new();
        events.push(SessionEvent::SelectionChanged);
        self.commit(&mut events);
        Ok(events.into_vec())
    }

    /// Expanded JSON text for file export or the clipboard.
    pub fn export_text(&self) -> Result<String, CodecError> {
        expanded::encode_string(&self.document)
    }

    // ----- queries -----

    /// Values of every visible curve at time `x`.
    pub fn value_preview(&self, x: f64) -> Vec<(CurveId, f64)> {
        sampling::value_preview(&self.document, x)
    }

    /// Screen-space draw commands for one curve.
    pub fn curve_path(&self, id: CurveId) -> Option<Vec<PathCommand>> {
        self.document
            .curve(id)
            .map(|c| screen_path(&c.points, &self.view))
    }

    /// Pick the target under `pos` using the standard glyph layout.
    pub fn hit_test(&self, pos: Vec2) -> PointerTarget {
        hit::hit_test(
            &self.document,
            &self.selection,
            &self.view,
            pos,
            self.cfg.hit_radius_px,
        )
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
