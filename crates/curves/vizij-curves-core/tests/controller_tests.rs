use vizij_curves_core::{
    config::EditorConfig,
    data::{Curve, CurveSet, HandleSide, Point, TangentMode, Vec2},
    gesture::GesturePhase,
    ids::PointRef,
    inputs::{Modifiers, PointerButton, PointerTarget},
    outputs::SessionEvent,
    session::EditorSession,
    viewport::ViewState,
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn approx_v(a: Vec2, b: Vec2, eps: f64) {
    approx(a.x, b.x, eps);
    approx(a.y, b.y, eps);
}

/// One curve with the given points under the default (100 px/unit) view.
fn session_with(points: Vec<Point>) -> (EditorSession, Vec<PointRef>) {
    let curve = Curve::new("c", "#fff").with_points(points);
    let refs = curve
        .points
        .iter()
        .map(|p| PointRef::new(curve.id, p.id))
        .collect();
    let session = EditorSession::with_document(EditorConfig::default(), CurveSet::new(vec![curve]));
    (session, refs)
}

fn screen_of(s: &EditorSession, r: PointRef) -> Vec2 {
    let p = s.document().point(r).expect("point resolves");
    s.view().to_screen(p.position())
}

fn click(s: &mut EditorSession, pos: Vec2, target: PointerTarget) -> Vec<SessionEvent> {
    let mut events = s.pointer_down(pos, PointerButton::Primary, Modifiers::NONE, target);
    events.extend(s.pointer_up(pos));
    events
}

fn drag(s: &mut EditorSession, from: Vec2, to: Vec2, target: PointerTarget) -> Vec<SessionEvent> {
    let mut events = s.pointer_down(from, PointerButton::Primary, Modifiers::NONE, target);
    let mid = Vec2::new(0.5 * (from.x + to.x), 0.5 * (from.y + to.y));
    events.extend(s.pointer_move(mid));
    events.extend(s.pointer_move(to));
    events.extend(s.pointer_up(to));
    events
}

#[test]
fn box_select_picks_points_inside_rect() {
    let (mut s, refs) = session_with(vec![
        Point::new(10.0, -10.0, 0.25, TangentMode::Auto),
        Point::new(50.0, -50.0, 0.25, TangentMode::Auto),
        Point::new(200.0, -200.0, 0.25, TangentMode::Auto),
    ]);
    s.set_view(ViewState {
        offset_x: 0.0,
        offset_y: 0.0,
        scale_x: 1.0,
        scale_y: -1.0,
    });
    assert_eq!(screen_of(&s, refs[0]), Vec2::new(10.0, 10.0));

    s.pointer_down(
        Vec2::new(0.0, 0.0),
        PointerButton::Primary,
        Modifiers::NONE,
        PointerTarget::Background,
    );
    s.pointer_move(Vec2::new(30.0, 30.0));
    assert_eq!(s.gesture_phase(), GesturePhase::BoxSelecting);
    assert!(s.selection_rect().is_some());
    let events = s.pointer_up(Vec2::new(60.0, 60.0));

    assert!(events.contains(&SessionEvent::SelectionChanged));
    assert_eq!(s.selection().len(), 2);
    assert!(s.selection().contains(&refs[0]));
    assert!(s.selection().contains(&refs[1]));
    assert!(!s.selection().contains(&refs[2]));
    assert_eq!(s.gesture_phase(), GesturePhase::Idle);
    // Box selection never touches history.
    assert_eq!(s.history().len(), 1);
}

#[test]
fn moving_points_commits_once_on_release() {
    let (mut s, refs) = session_with(vec![
        Point::new(0.0, 0.0, 0.25, TangentMode::Auto),
        Point::new(1.0, 1.0, 0.25, TangentMode::Auto),
    ]);
    s.select_all();
    let from = screen_of(&s, refs[0]);
    let to = from + Vec2::new(100.0, -100.0);
    let events = drag(&mut s, from, to, PointerTarget::point(refs[0]));

    assert!(events.contains(&SessionEvent::HistoryCommitted { len: 2, cursor: 1 }));
    assert_eq!(s.history().len(), 2);
    approx_v(s.document().point(refs[0]).unwrap().position(), Vec2::new(1.0, 1.0), 1e-9);
    approx_v(s.document().point(refs[1]).unwrap().position(), Vec2::new(2.0, 2.0), 1e-9);
}

#[test]
fn moves_are_recomputed_from_press_snapshot() {
    let (mut s, refs) = session_with(vec![Point::new(0.0, 0.0, 0.25, TangentMode::Auto)]);
    let from = screen_of(&s, refs[0]);
    s.pointer_down(
        from,
        PointerButton::Primary,
        Modifiers::NONE,
        PointerTarget::point(refs[0]),
    );
    for i in 1..=50 {
        s.pointer_move(from + Vec2::new(i as f64 * 3.0, 0.0));
    }
    s.pointer_move(from + Vec2::new(50.0, 0.0));
    approx_v(s.document().point(refs[0]).unwrap().position(), Vec2::new(0.5, 0.0), 1e-12);
    s.pointer_up(from + Vec2::new(50.0, 0.0));
    assert_eq!(s.history().len(), 2);
}

#[test]
fn clicking_unselected_point_replaces_selection() {
    let (mut s, refs) = session_with(vec![
        Point::new(0.0, 0.0, 0.25, TangentMode::Auto),
        Point::new(1.0, 1.0, 0.25, TangentMode::Auto),
    ]);
    s.select_all();
    assert_eq!(s.selection().len(), 2);

    // A click on an already selected point keeps the group.
    let pos = screen_of(&s, refs[1]);
    click(&mut s, pos, PointerTarget::point(refs[1]));
    assert_eq!(s.selection().len(), 2);

    s.clear_selection();
    let pos = screen_of(&s, refs[0]);
    click(&mut s, pos, PointerTarget::point(refs[0]));
    assert_eq!(s.selection().len(), 1);
    assert!(s.selection().contains(&refs[0]));
}

#[test]
fn sub_threshold_release_discards_without_commit() {
    let (mut s, refs) = session_with(vec![Point::new(0.0, 0.0, 0.25, TangentMode::Auto)]);
    let from = screen_of(&s, refs[0]);
    let before = s.document().clone();
    let events = drag(
        &mut s,
        from,
        from + Vec2::new(1.5, -2.0),
        PointerTarget::point(refs[0]),
    );
    assert!(events.contains(&SessionEvent::GestureDiscarded));
    assert!(!events.contains(&SessionEvent::DocumentChanged));
    assert_eq!(s.history().len(), 1);
    assert_eq!(s.document(), &before);
    assert!(s.selection().contains(&refs[0]));
}

#[test]
fn dragging_auto_handle_mirrors_opposite_tangent() {
    let (mut s, refs) = session_with(vec![Point::new(0.0, 0.0, 0.25, TangentMode::Auto)]);
    let handle = s.view().to_screen(Vec2::new(0.25, 0.0));
    drag(
        &mut s,
        handle,
        handle + Vec2::new(25.0, -50.0),
        PointerTarget::handle(refs[0], HandleSide::Right),
    );
    let p = s.document().point(refs[0]).unwrap();
    approx_v(p.right_tangent, Vec2::new(0.5, 0.5), 1e-9);
    approx_v(p.left_tangent, Vec2::new(-0.5, -0.5), 1e-9);
    assert_eq!(p.position(), Vec2::new(0.0, 0.0));
    assert_eq!(s.history().len(), 2);
}

#[test]
fn dragging_break_handle_leaves_opposite_alone() {
    let (mut s, refs) = session_with(vec![Point::new(0.0, 0.0, 0.25, TangentMode::Break)]);
    let handle = s.view().to_screen(Vec2::new(-0.25, 0.0));
    drag(
        &mut s,
        handle,
        handle + Vec2::new(0.0, -25.0),
        PointerTarget::handle(refs[0], HandleSide::Left),
    );
    let p = s.document().point(refs[0]).unwrap();
    approx_v(p.left_tangent, Vec2::new(-0.25, 0.25), 1e-9);
    approx_v(p.right_tangent, Vec2::new(0.25, 0.0), 1e-12);
}

#[test]
fn modifier_or_secondary_button_pans_without_commit() {
    let (mut s, refs) = session_with(vec![Point::new(0.0, 0.0, 0.25, TangentMode::Auto)]);
    let start = *s.view();
    let from = screen_of(&s, refs[0]);
    let alt = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };
    s.pointer_down(from, PointerButton::Primary, alt, PointerTarget::point(refs[0]));
    assert_eq!(s.gesture_phase(), GesturePhase::Panning);
    s.pointer_move(from + Vec2::new(30.0, 10.0));
    s.pointer_up(from + Vec2::new(30.0, 10.0));
    approx(s.view().offset_x, start.offset_x + 30.0, 1e-12);
    approx(s.view().offset_y, start.offset_y + 10.0, 1e-12);
    assert_eq!(s.document().point(refs[0]).unwrap().position(), Vec2::new(0.0, 0.0));
    assert_eq!(s.history().len(), 1);

    s.pointer_down(
        from,
        PointerButton::Secondary,
        Modifiers::NONE,
        PointerTarget::Background,
    );
    assert_eq!(s.gesture_phase(), GesturePhase::Panning);
    s.pointer_up(from);
}

#[test]
fn second_press_is_ignored_while_gesture_active() {
    let (mut s, refs) = session_with(vec![Point::new(0.0, 0.0, 0.25, TangentMode::Auto)]);
    s.pointer_down(
        Vec2::new(500.0, 500.0),
        PointerButton::Primary,
        Modifiers::NONE,
        PointerTarget::Background,
    );
    let events = s.pointer_down(
        screen_of(&s, refs[0]),
        PointerButton::Primary,
        Modifiers::NONE,
        PointerTarget::point(refs[0]),
    );
    assert!(events.is_empty());
    assert_eq!(s.gesture_phase(), GesturePhase::BoxSelecting);
}

#[test]
fn cancel_restores_moved_points() {
    let (mut s, refs) = session_with(vec![Point::new(0.0, 0.0, 0.25, TangentMode::Auto)]);
    let from = screen_of(&s, refs[0]);
    s.pointer_down(
        from,
        PointerButton::Primary,
        Modifiers::NONE,
        PointerTarget::point(refs[0]),
    );
    s.pointer_move(from + Vec2::new(80.0, 0.0));
    assert_ne!(s.document().point(refs[0]).unwrap().x, 0.0);
    let events = s.cancel_gesture();
    assert!(events.contains(&SessionEvent::GestureDiscarded));
    assert_eq!(s.document().point(refs[0]).unwrap().x, 0.0);
    assert_eq!(s.gesture_phase(), GesturePhase::Idle);
    assert_eq!(s.history().len(), 1);
}

#[test]
fn double_click_on_background_inserts_auto_point() {
    let mut s = EditorSession::new(EditorConfig::default());
    let curve_id = s.active_curve().expect("default document has a curve");
    let pos = s.view().to_screen(Vec2::new(0.5, 0.25));
    let events = s.double_click(pos, PointerTarget::Background);

    assert!(events.contains(&SessionEvent::SelectionChanged));
    assert_eq!(s.history().len(), 2);
    let curve = s.document().curve(curve_id).unwrap();
    assert_eq!(curve.points.len(), 3);
    let inserted = s.selection().iter().next().copied().unwrap();
    let p = s.document().point(inserted).unwrap();
    approx_v(p.position(), Vec2::new(0.5, 0.25), 1e-9);
    assert_eq!(p.mode, TangentMode::Auto);
    assert_eq!(p.left_tangent, Vec2::new(-0.25, 0.0));
    assert_eq!(p.right_tangent, Vec2::new(0.25, 0.0));
}

#[test]
fn double_click_is_ignored_while_active_curve_is_hidden() {
    let mut s = EditorSession::new(EditorConfig::default());
    let curve_id = s.active_curve().unwrap();
    s.toggle_visibility(curve_id).unwrap();
    let history_len = s.history().len();

    let pos = s.view().to_screen(Vec2::new(0.5, 0.25));
    let events = s.double_click(pos, PointerTarget::Background);

    assert!(events.is_empty());
    assert_eq!(s.document().curve(curve_id).unwrap().points.len(), 2);
    assert!(s.selection().is_empty());
    assert_eq!(s.history().len(), history_len);
}

#[test]
fn deleting_active_curve_prefers_a_visible_successor() {
    let mut s = EditorSession::new(EditorConfig::default());
    let first = s.active_curve().unwrap();
    s.add_curve();
    s.add_curve();
    let second = s.document().curves[1].id;
    let third = s.document().curves[2].id;
    s.toggle_visibility(first).unwrap();
    s.set_active_curve(second).unwrap();

    s.delete_curve(second).unwrap();
    assert_eq!(s.active_curve(), Some(third));
}

#[test]
fn double_click_on_point_does_not_insert() {
    let (mut s, refs) = session_with(vec![Point::new(0.0, 0.0, 0.25, TangentMode::Auto)]);
    let events = s.double_click(screen_of(&s, refs[0]), PointerTarget::point(refs[0]));
    assert!(events.is_empty());
    assert_eq!(s.document().point_count(), 1);
}

#[test]
fn switching_to_bezier_mode_snaps_short_tangents() {
    let (mut s, refs) = session_with(vec![
        Point::new(0.0, 0.0, 0.05, TangentMode::Linear),
        Point::new(1.0, 1.0, 0.5, TangentMode::Linear),
    ]);
    s.select_all();
    s.set_tangent_mode(TangentMode::Break);

    let short = s.document().point(refs[0]).unwrap();
    assert_eq!(short.mode, TangentMode::Break);
    assert_eq!(short.left_tangent, Vec2::new(-0.25, 0.0));
    assert_eq!(short.right_tangent, Vec2::new(0.25, 0.0));
    let long = s.document().point(refs[1]).unwrap();
    assert_eq!(long.left_tangent, Vec2::new(-0.5, 0.0));
    assert_eq!(long.right_tangent, Vec2::new(0.5, 0.0));
    assert_eq!(s.history().len(), 2);
}

#[test]
fn switching_to_auto_enforces_symmetry() {
    let mut p = Point::new(0.0, 0.0, 0.25, TangentMode::Break);
    p.left_tangent = Vec2::new(-0.7, 0.3);
    p.right_tangent = Vec2::new(0.4, 0.2);
    let (mut s, refs) = session_with(vec![p]);
    s.select_all();
    s.set_tangent_mode(TangentMode::Auto);
    let p = s.document().point(refs[0]).unwrap();
    assert_eq!(p.right_tangent, Vec2::new(0.4, 0.2));
    assert_eq!(p.left_tangent, Vec2::new(-0.4, -0.2));
}

#[test]
fn switching_to_linear_keeps_tangents() {
    let (mut s, refs) = session_with(vec![Point::new(0.0, 0.0, 0.05, TangentMode::Auto)]);
    s.select_all();
    s.set_tangent_mode(TangentMode::Linear);
    let p = s.document().point(refs[0]).unwrap();
    assert_eq!(p.mode, TangentMode::Linear);
    assert_eq!(p.right_tangent, Vec2::new(0.05, 0.0));
}

#[test]
fn delete_selection_removes_points_and_commits() {
    let (mut s, refs) = session_with(vec![
        Point::new(0.0, 0.0, 0.25, TangentMode::Auto),
        Point::new(1.0, 1.0, 0.25, TangentMode::Auto),
    ]);
    let pos = screen_of(&s, refs[0]);
    click(&mut s, pos, PointerTarget::point(refs[0]));
    s.delete_selection();
    assert!(s.document().point(refs[0]).is_none());
    assert!(s.document().point(refs[1]).is_some());
    assert!(s.selection().is_empty());
    assert_eq!(s.history().len(), 2);
}

#[test]
fn hidden_curves_are_not_selectable() {
    let mut s = EditorSession::new(EditorConfig::default());
    let id = s.active_curve().unwrap();
    s.select_all();
    assert_eq!(s.selection().len(), 2);
    s.toggle_visibility(id).unwrap();
    assert!(s.selection().is_empty());
    s.select_all();
    assert!(s.selection().is_empty());
}

#[test]
fn curve_management_round_trip() {
    let mut s = EditorSession::new(EditorConfig::default());
    s.add_curve();
    assert_eq!(s.document().curves.len(), 2);
    let added = s.document().curves[1].id;
    assert_eq!(s.active_curve(), Some(added));
    assert_eq!(s.document().curves[1].name, "Curve 2");

    s.rename_curve(added, "Opacity").unwrap();
    assert_eq!(s.document().curves[1].name, "Opacity");
    s.delete_curve(added).unwrap();
    assert_eq!(s.document().curves.len(), 1);
    assert_eq!(s.active_curve(), Some(s.document().curves[0].id));
    assert!(s.delete_curve(added).is_err());
    assert!(s.set_active_curve(added).is_err());
    assert_eq!(s.history().len(), 4);
}

#[test]
fn hit_test_prefers_selected_handles() {
    let (mut s, refs) = session_with(vec![Point::new(0.0, 0.0, 0.25, TangentMode::Auto)]);
    let point_px = screen_of(&s, refs[0]);
    let handle_px = s.view().to_screen(Vec2::new(0.25, 0.0));
    assert_eq!(s.hit_test(point_px), PointerTarget::point(refs[0]));
    // Handles only exist for selected points.
    assert_eq!(s.hit_test(handle_px), PointerTarget::Background);
    s.select_all();
    assert_eq!(
        s.hit_test(handle_px),
        PointerTarget::handle(refs[0], HandleSide::Right)
    );
}

#[test]
fn zoom_is_ignored_during_gesture() {
    let mut s = EditorSession::new(EditorConfig::default());
    let before = *s.view();
    s.pointer_down(
        Vec2::new(5.0, 5.0),
        PointerButton::Primary,
        Modifiers::NONE,
        PointerTarget::Background,
    );
    assert!(s.zoom(Vec2::new(5.0, 5.0), 2.0, None).is_empty());
    assert_eq!(*s.view(), before);
}

#[test]
fn fit_view_frames_all_visible_points() {
    let mut s = EditorSession::new(EditorConfig::default());
    s.fit_view(Vec2::new(880.0, 480.0));
    let v = *s.view();
    // Bounds (0,0)-(1,1) in an 800x400 usable area, centered.
    approx(v.scale_x, 800.0, 1e-9);
    approx(v.scale_y, -400.0, 1e-9);
    approx_v(v.to_screen(Vec2::new(0.5, 0.5)), Vec2::new(440.0, 240.0), 1e-9);
}

#[test]
fn value_preview_reports_visible_curves() {
    let s = EditorSession::new(EditorConfig::default());
    let preview = s.value_preview(2.0);
    assert_eq!(preview.len(), 1);
    approx(preview[0].1, 1.0, 1e-12);
}
