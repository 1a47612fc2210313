use std::time::{Duration, Instant};

use super::*;
use crate::config::StripConfig;
use crate::core::Rect;
use crate::strip::{FRAME_INTERVAL, MonoShaper, StripRequest};

// Three "Tab N" tabs at 96 DPI: [0,106) [106,212) [212,318), close squares
// are the trailing 37 px of each.
fn strip(slide: bool) -> TabStrip {
    let mut config = StripConfig {
        initial_tabs: vec!["Tab 1".into(), "Tab 2".into(), "Tab 3".into()],
        ..StripConfig::default()
    };
    config.behavior.slide_animation = slide;
    let mut strip = TabStrip::new(Box::new(MonoShaper::new()), &config, 96, true, 800);
    strip.take_requests();
    strip
}

fn order(strip: &TabStrip) -> Vec<&str> {
    strip.titles().iter().map(String::as_str).collect()
}

fn position(requests: &[StripRequest], wanted: &StripRequest) -> usize {
    requests
        .iter()
        .position(|r| r == wanted)
        .unwrap_or_else(|| panic!("{wanted:?} missing from {requests:?}"))
}

/// Presses tab `tab` body at x, moves past the threshold and on to `to_x`.
fn drag(strip: &mut TabStrip, from_x: i32, to_x: i32, now: Instant) {
    strip.on_pointer_down(from_x, 10);
    strip.on_pointer_move(from_x + 10, 10, now);
    strip.on_pointer_move(to_x, 10, now);
}

#[test]
fn press_on_body_selects_and_captures() {
    let mut s = strip(false);
    s.on_pointer_down(120, 10);
    assert_eq!(s.selected_index(), Some(1));
    assert!(matches!(s.pointer_state(), PointerState::PressArmed { tab: 1, .. }));
    assert_eq!(
        s.take_requests(),
        vec![
            StripRequest::SelectionChanged(Some(1)),
            StripRequest::CapturePointer,
        ]
    );
}

#[test]
fn click_without_motion_releases_capture() {
    let mut s = strip(false);
    s.on_pointer_down(120, 10);
    s.on_pointer_up(120, 10);
    let requests = s.take_requests();
    assert_eq!(requests.last(), Some(&StripRequest::ReleasePointer));
    assert!(!requests.iter().any(|r| matches!(r, StripRequest::TabMoved { .. })));
    assert!(matches!(s.pointer_state(), PointerState::Idle));
}

#[test]
fn small_motion_stays_armed() {
    let mut s = strip(false);
    let now = Instant::now();
    s.on_pointer_down(20, 10);
    s.on_pointer_move(24, 14, now);
    assert!(!s.is_dragging());
    s.on_pointer_move(25, 10, now);
    assert!(s.is_dragging());
}

#[test]
fn drag_first_tab_onto_last_reorders() {
    let mut s = strip(false);
    drag(&mut s, 10, 250, Instant::now());
    assert!(s.is_dragging());
    s.on_pointer_up(250, 10);

    assert_eq!(order(&s), ["Tab 2", "Tab 3", "Tab 1"]);
    assert_eq!(s.selected_index(), Some(2));
    assert!(!s.is_dragging());

    let requests = s.take_requests();
    assert!(requests.contains(&StripRequest::ShowDragPreview {
        tab: 0,
        width: 106,
        height: 37
    }));
    assert!(requests.contains(&StripRequest::TabMoved { from: 0, to: 2 }));
    let hide = position(&requests, &StripRequest::HideDragPreview);
    let release = position(&requests, &StripRequest::ReleasePointer);
    let moved = position(&requests, &StripRequest::TabMoved { from: 0, to: 2 });
    assert!(hide < moved && release < moved);
}

#[test]
fn drop_past_strip_end_lands_last() {
    let mut s = strip(false);
    drag(&mut s, 10, 700, Instant::now());
    s.on_pointer_up(700, 10);
    assert_eq!(order(&s), ["Tab 2", "Tab 3", "Tab 1"]);
}

#[test]
fn drop_before_strip_start_lands_first() {
    let mut s = strip(false);
    drag(&mut s, 230, -30, Instant::now());
    s.on_pointer_up(-30, 10);
    assert_eq!(order(&s), ["Tab 3", "Tab 1", "Tab 2"]);
    assert_eq!(s.selected_index(), Some(0));
}

#[test]
fn drop_on_own_slot_is_a_no_op() {
    let mut s = strip(false);
    drag(&mut s, 120, 150, Instant::now());
    s.on_pointer_up(150, 10);
    assert_eq!(order(&s), ["Tab 1", "Tab 2", "Tab 3"]);
    assert_eq!(s.selected_index(), Some(1));
    assert!(
        !s.take_requests()
            .iter()
            .any(|r| matches!(r, StripRequest::TabMoved { .. }))
    );
}

#[test]
fn preview_follows_pointer_centred() {
    let mut s = strip(false);
    drag(&mut s, 10, 250, Instant::now());
    let requests = s.take_requests();
    assert_eq!(
        requests.last(),
        Some(&StripRequest::MoveDragPreview { x: 250 - 53, y: 10 - 18 })
    );
}

#[test]
fn instant_model_opens_gap_and_indicator() {
    let mut s = strip(false);
    drag(&mut s, 10, 250, Instant::now());
    let (scene, _) = s.scene();
    let view = scene.drag.expect("drag view");
    assert_eq!(view.source, 0);
    assert_eq!(view.offsets, vec![0, -106, -106]);
    // Dragging rightwards: indicator on the right edge of the shifted target.
    assert_eq!(view.indicator, Some(Rect::new(210, 5, 2, 27)));
    assert_eq!(view.ghost, None);
}

#[test]
fn leftward_drag_marks_left_edge() {
    let mut s = strip(false);
    drag(&mut s, 230, 20, Instant::now());
    let (scene, _) = s.scene();
    let view = scene.drag.expect("drag view");
    assert_eq!(view.offsets, vec![106, 106, 0]);
    assert_eq!(view.indicator, Some(Rect::new(106, 5, 2, 27)));
}

#[test]
fn inline_ghost_is_centred_on_pointer() {
    let mut s = strip(false);
    s.set_inline_drag_ghost(true);
    drag(&mut s, 10, 250, Instant::now());
    let (scene, _) = s.scene();
    let view = scene.drag.expect("drag view");
    assert_eq!(view.ghost, Some(Rect::new(250 - 53, 10 - 18, 106, 37)));
}

#[test]
fn slide_animation_eases_and_stops_before_release() {
    let mut s = strip(true);
    let t0 = Instant::now();
    drag(&mut s, 10, 250, t0);
    let requests = s.take_requests();
    assert!(requests.contains(&StripRequest::StartAnimation));
    assert_eq!(s.next_deadline(), Some(t0 + FRAME_INTERVAL));

    s.on_timer(t0 + FRAME_INTERVAL);
    {
        let (scene, _) = s.scene();
        let view = scene.drag.expect("drag view");
        assert_eq!(view.offsets, vec![0, -21, -21]);
    }

    s.on_pointer_up(250, 10);
    let requests = s.take_requests();
    let stop = position(&requests, &StripRequest::StopAnimation);
    let release = position(&requests, &StripRequest::ReleasePointer);
    assert!(stop < release);
    assert_eq!(s.next_deadline(), None);

    // A late tick after release changes nothing.
    s.take_redraw();
    s.on_timer(t0 + FRAME_INTERVAL * 5);
    assert!(!s.take_redraw());
    assert_eq!(order(&s), ["Tab 2", "Tab 3", "Tab 1"]);
}

#[test]
fn settled_slide_stops_timer() {
    let mut s = strip(true);
    let t0 = Instant::now();
    drag(&mut s, 10, 250, t0);
    s.take_requests();
    s.on_timer(t0 + FRAME_INTERVAL * 60);
    assert_eq!(s.take_requests(), vec![StripRequest::StopAnimation]);
    assert_eq!(s.next_deadline(), None);
    assert!(s.is_dragging());
}

#[test]
fn close_press_release_mismatch_keeps_tabs() {
    let mut s = strip(false);
    s.on_pointer_down(200, 10);
    assert!(matches!(s.pointer_state(), PointerState::CloseArmed { tab: 1, over: true }));
    s.on_pointer_up(310, 10);
    assert_eq!(s.tab_count(), 3);
    let requests = s.take_requests();
    assert!(!requests.iter().any(|r| matches!(r, StripRequest::TabClosed(_))));
    assert_eq!(requests.last(), Some(&StripRequest::ReleasePointer));
}

#[test]
fn close_press_release_match_removes() {
    let mut s = strip(false);
    s.on_pointer_down(200, 10);
    s.on_pointer_up(205, 20);
    assert_eq!(order(&s), ["Tab 1", "Tab 3"]);
    assert!(s.take_requests().contains(&StripRequest::TabClosed(1)));
}

#[test]
fn close_press_does_not_select() {
    let mut s = strip(false);
    s.on_pointer_down(300, 10);
    assert_eq!(s.selected_index(), Some(0));
    let (scene, _) = s.scene();
    assert_eq!(scene.pressed_close, Some(2));
}

#[test]
fn focus_loss_cancels_drag_without_reorder() {
    let mut s = strip(true);
    drag(&mut s, 10, 250, Instant::now());
    s.take_requests();
    s.on_focus_lost();
    assert!(!s.is_dragging());
    assert_eq!(order(&s), ["Tab 1", "Tab 2", "Tab 3"]);
    assert_eq!(
        s.take_requests(),
        vec![
            StripRequest::StopAnimation,
            StripRequest::HideDragPreview,
            StripRequest::ReleasePointer,
        ]
    );
}

#[test]
fn leave_clears_hover_but_keeps_drag() {
    let mut s = strip(false);
    let now = Instant::now();
    s.on_pointer_move(50, 10, now);
    assert_eq!(s.hovered(), StripHit::Tab(0));
    s.on_pointer_leave();
    assert_eq!(s.hovered(), StripHit::Empty);

    drag(&mut s, 10, 250, now);
    s.on_pointer_leave();
    assert!(s.is_dragging());
}

#[test]
fn hover_settle_shows_full_title_once() {
    let mut s = strip(false);
    let t0 = Instant::now();
    s.on_pointer_move(50, 10, t0);
    s.on_timer(t0 + Duration::from_millis(400));
    assert_eq!(
        s.take_requests(),
        vec![StripRequest::ShowTooltip {
            text: "Tab 1".into(),
            x: 60,
            y: 30,
            width: 53 + 12,
            height: 21 + 6,
        }]
    );
    assert_eq!(s.tooltip().map(|t| t.tab), Some(0));

    s.on_hover_settle(52, 10);
    assert!(s.take_requests().is_empty());
}

#[test]
fn hover_settle_over_close_glyph_shows_nothing() {
    let mut s = strip(false);
    s.on_hover_settle(100, 10);
    assert!(s.take_requests().is_empty());
    assert!(s.tooltip().is_none());
}

#[test]
fn press_and_leave_hide_tooltip() {
    let mut s = strip(false);
    s.on_hover_settle(50, 10);
    s.take_requests();
    s.on_pointer_down(50, 10);
    assert_eq!(s.take_requests()[0], StripRequest::HideTooltip);
    s.on_pointer_up(50, 10);

    s.on_hover_settle(150, 10);
    s.take_requests();
    s.on_pointer_leave();
    assert_eq!(s.take_requests(), vec![StripRequest::HideTooltip]);
}

#[test]
fn moving_to_another_tab_hides_tooltip() {
    let mut s = strip(false);
    s.on_hover_settle(50, 10);
    s.take_requests();
    s.on_pointer_move(150, 10, Instant::now());
    assert_eq!(s.take_requests(), vec![StripRequest::HideTooltip]);
}

#[test]
fn scroll_button_press_neither_selects_nor_captures() {
    let titles: Vec<String> = (1..=9).map(|i| format!("Tab {i}")).collect();
    let config = StripConfig {
        initial_tabs: titles,
        ..StripConfig::default()
    };
    let mut s = TabStrip::new(Box::new(MonoShaper::new()), &config, 96, true, 914);
    s.on_pointer_down(890, 10);
    assert_eq!(s.scroll_offset(), 50);
    assert_eq!(s.selected_index(), Some(0));
    assert!(s.take_requests().is_empty());
    s.on_pointer_down(860, 10);
    assert_eq!(s.scroll_offset(), 0);
}

#[test]
fn wheel_scrolls_by_step() {
    let titles: Vec<String> = (1..=9).map(|i| format!("Tab {i}")).collect();
    let config = StripConfig {
        initial_tabs: titles,
        ..StripConfig::default()
    };
    let mut s = TabStrip::new(Box::new(MonoShaper::new()), &config, 96, true, 914);
    s.on_wheel(-1.0);
    assert_eq!(s.scroll_offset(), 50);
    s.on_wheel(-3.0);
    assert_eq!(s.scroll_offset(), 100);
    s.on_wheel(1.0);
    assert_eq!(s.scroll_offset(), 50);
}

#[test]
fn close_press_loses_pressed_look_on_leave() {
    let mut s = strip(false);
    s.on_pointer_down(100, 10);
    assert_eq!(s.scene().0.pressed_close, Some(0));

    s.on_pointer_leave();
    assert_eq!(s.scene().0.pressed_close, None);
    assert!(matches!(s.pointer_state(), PointerState::CloseArmed { tab: 0, over: false }));

    // Capture is kept, so releasing back on the glyph still closes.
    s.on_pointer_up(100, 10);
    assert_eq!(order(&s), ["Tab 2", "Tab 3"]);
}

#[test]
fn close_press_looks_pressed_only_over_its_glyph() {
    let mut s = strip(false);
    let now = Instant::now();
    s.on_pointer_down(200, 10);
    s.on_pointer_move(310, 10, now);
    assert_eq!(s.scene().0.pressed_close, None);
    s.on_pointer_move(-40, 10, now);
    assert_eq!(s.scene().0.pressed_close, None);
    s.on_pointer_move(195, 12, now);
    assert_eq!(s.scene().0.pressed_close, Some(1));
}

#[test]
fn removing_a_tab_hides_its_tooltip() {
    let mut s = strip(false);
    s.on_hover_settle(250, 10);
    assert_eq!(s.tooltip().map(|t| t.tab), Some(2));
    s.take_requests();

    s.remove_tab(0);
    let requests = s.take_requests();
    assert!(
        position(&requests, &StripRequest::HideTooltip)
            < position(&requests, &StripRequest::TabClosed(0))
    );
    assert!(s.tooltip().is_none());
    assert_eq!(s.next_deadline(), None);
}

#[test]
fn reorder_and_add_hide_tooltip() {
    let mut s = strip(false);
    s.on_hover_settle(50, 10);
    s.take_requests();
    s.reorder(0, 2);
    assert!(s.take_requests().contains(&StripRequest::HideTooltip));
    assert!(s.tooltip().is_none());

    s.on_hover_settle(50, 10);
    s.take_requests();
    s.add_tab("Tab 4");
    assert_eq!(s.take_requests(), vec![StripRequest::HideTooltip]);
    assert!(s.tooltip().is_none());
}

#[test]
fn dpi_change_hides_tooltip() {
    let mut s = strip(false);
    s.on_hover_settle(50, 10);
    s.take_requests();
    s.on_dpi_changed(144);
    let requests = s.take_requests();
    assert!(
        position(&requests, &StripRequest::HideTooltip)
            < position(&requests, &StripRequest::RefreshPopups)
    );
    assert!(s.tooltip().is_none());
}

#[test]
fn huge_wheel_deltas_clamp_to_the_ends() {
    let titles: Vec<String> = (1..=9).map(|i| format!("Tab {i}")).collect();
    let config = StripConfig {
        initial_tabs: titles,
        ..StripConfig::default()
    };
    let mut s = TabStrip::new(Box::new(MonoShaper::new()), &config, 96, true, 914);
    s.on_wheel(-1.0e9);
    assert_eq!(s.scroll_offset(), 100);
    s.on_wheel(f32::MAX);
    assert_eq!(s.scroll_offset(), 0);
    s.on_wheel(-f32::MAX);
    assert_eq!(s.scroll_offset(), 100);
}
