use std::time::Instant;

use super::*;
use crate::config::StripConfig;
use crate::render::{Frame, PREVIEW_OPACITY, blend_rgb, paint_drag_preview};
use crate::strip::{MonoShaper, TabStrip};

fn strip(count: usize, width: i32) -> TabStrip {
    let mut config = StripConfig {
        initial_tabs: (1..=count).map(|i| format!("Tab {i}")).collect(),
        ..StripConfig::default()
    };
    config.behavior.slide_animation = false;
    TabStrip::new(Box::new(MonoShaper::new()), &config, 96, true, width)
}

fn paint(strip: &mut TabStrip, width: usize) -> Frame {
    let mut frame = Frame::new(width, strip.height() as usize);
    let (scene, shaper) = strip.scene();
    paint_strip(&scene, shaper, &mut frame.target());
    frame
}

fn at(frame: &Frame, x: usize, y: usize) -> u32 {
    frame.pixels()[y * frame.width() + x]
}

#[test]
fn empty_area_shows_background() {
    let mut s = strip(3, 800);
    let frame = paint(&mut s, 800);
    assert_eq!(at(&frame, 700, 10), ThemePalette::dark().background.to_pixel());
}

#[test]
fn active_tab_uses_active_fill() {
    let mut s = strip(3, 800);
    let frame = paint(&mut s, 800);
    assert_eq!(at(&frame, 40, 20), ThemePalette::dark().active_tab.to_pixel());
}

#[test]
fn inactive_tab_has_separator_border() {
    let mut s = strip(3, 800);
    let frame = paint(&mut s, 800);
    let palette = ThemePalette::dark();
    assert_eq!(at(&frame, 106, 20), palette.separator.to_pixel());
    assert_eq!(at(&frame, 150, 20), palette.background.to_pixel());
}

#[test]
fn hovered_tab_uses_hover_fill() {
    let mut s = strip(3, 800);
    s.on_pointer_move(150, 10, Instant::now());
    let frame = paint(&mut s, 800);
    assert_eq!(at(&frame, 150, 20), ThemePalette::dark().hover.to_pixel());
}

#[test]
fn hovered_close_glyph_gets_backing_circle() {
    let mut s = strip(3, 800);
    s.on_pointer_move(193, 18, Instant::now());
    let frame = paint(&mut s, 800);
    assert_eq!(at(&frame, 199, 18), ThemePalette::dark().close_hover_bg.to_pixel());
}

#[test]
fn idle_close_glyph_has_no_backing() {
    let mut s = strip(3, 800);
    let frame = paint(&mut s, 800);
    assert_ne!(at(&frame, 199, 18), ThemePalette::dark().close_hover_bg.to_pixel());
}

#[test]
fn drag_draws_insertion_indicator() {
    let mut s = strip(3, 800);
    let now = Instant::now();
    s.on_pointer_down(10, 10);
    s.on_pointer_move(20, 10, now);
    s.on_pointer_move(250, 10, now);
    let frame = paint(&mut s, 800);
    assert_eq!(at(&frame, 210, 10), ThemePalette::dark().insertion.to_pixel());
    // The dragged tab's slot is not painted with its active fill.
    assert_ne!(at(&frame, 250, 20), ThemePalette::dark().active_tab.to_pixel());
}

#[test]
fn scroll_buttons_paint_hover_and_glyph() {
    let mut s = strip(9, 914);
    s.on_pointer_move(890, 10, Instant::now());
    let frame = paint(&mut s, 914);
    let palette = ThemePalette::dark();
    assert_eq!(at(&frame, 885, 1), palette.scroll_hover.to_pixel());
    assert_eq!(at(&frame, 898, 18), palette.scroll_glyph.to_pixel());
    assert_eq!(at(&frame, 855, 1), palette.background.to_pixel());
}

#[test]
fn tabs_do_not_bleed_under_scroll_buttons() {
    let mut s = strip(9, 914);
    let frame = paint(&mut s, 914);
    // Tab 8 extends to 954 but the display region ends at 854.
    assert_eq!(at(&frame, 860, 20), ThemePalette::dark().background.to_pixel());
}

#[test]
fn drag_preview_is_faded_active_tab() {
    let mut s = strip(3, 800);
    let now = Instant::now();
    s.on_pointer_down(10, 10);
    s.on_pointer_move(20, 10, now);
    let mut frame = Frame::new(106, 37);
    let (scene, shaper) = s.scene();
    paint_drag_preview(&scene, shaper, &mut frame.target());

    let palette = ThemePalette::dark();
    let expected = blend_rgb(
        palette.background.to_pixel(),
        palette.active_tab.to_pixel(),
        PREVIEW_OPACITY,
    );
    assert_eq!(at(&frame, 40, 20), expected);
}
