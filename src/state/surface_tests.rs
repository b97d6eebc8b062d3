//! Tests for per-surface state.

use super::*;
use crate::model::ContentMeta;
use crate::view_state::FixedAdvanceMeasure;

// 1000×1000 canvas, font 10% → 100px, line 160px, gap 20px, pinned title 122px.
// Every verse fits on one line, so block i starts at 180·i.
fn surface() -> SurfaceState {
    let style = PresentationStyle {
        font_size_fraction: 10.0,
        ..Default::default()
    };
    SurfaceState::new(
        style,
        ViewportDimensions::new(1000.0, 1000.0),
        Arc::new(FixedAdvanceMeasure::new(10.0)),
    )
}

fn passage(end: u32) -> ContentPayload {
    ContentPayload::new(
        ContentMeta {
            book_code: "PS".to_string(),
            book_name: "Psalms".to_string(),
            chapter_number: 119,
            range: [1, end],
        },
        (1..=end).map(|n| Verse::new(n, "x")).collect(),
    )
}

#[test]
fn new_surface_is_empty_and_unscrollable() {
    let s = surface();
    assert_eq!(s.verse_count(), 0);
    assert_eq!(s.layout().total_height(), 0.0);
    assert_eq!(s.scroll().max(), 0.0);
    assert_eq!(s.active_index(), None);
    assert!(s.content().is_none());
}

#[test]
fn replace_content_resets_scroll_and_highlight() {
    let mut s = surface();
    s.replace_content(passage(10));
    s.set_scroll_offset(500.0);
    assert!(s.set_highlight(Some(3)));

    s.replace_content(passage(10));
    assert_eq!(s.scroll_offset(), 0.0);
    assert_eq!(s.active_index(), None);
    assert_eq!(s.content_revision(), 2);
}

#[test]
fn receive_content_appends_when_passage_grows() {
    let mut s = surface();
    s.receive_content(passage(10));
    s.set_scroll_offset(500.0);
    s.set_highlight(Some(4));

    assert_eq!(s.receive_content(passage(11)), ContentChange::Appended);
    assert_eq!(s.scroll_offset(), 500.0);
    assert_eq!(s.active_index(), Some(4));
    assert_eq!(s.layout().len(), 11);
    assert_eq!(s.layout().title(), Some("Psalms 119:1-11"));
}

#[test]
fn receive_content_same_payload_replaces() {
    let mut s = surface();
    s.receive_content(passage(10));
    s.set_scroll_offset(500.0);
    s.set_highlight(Some(4));

    assert_eq!(s.receive_content(passage(10)), ContentChange::Replaced);
    assert_eq!(s.scroll_offset(), 0.0);
    assert_eq!(s.active_index(), None);
}

#[test]
fn appended_layout_matches_full_recompute() {
    let mut appended = surface();
    appended.replace_content(passage(3));
    assert!(appended.append_verse(Verse::new(4, "x")));

    let mut full = surface();
    full.replace_content(passage(4));

    assert_eq!(appended.layout().blocks(), full.layout().blocks());
    assert_eq!(appended.layout().total_height(), full.layout().total_height());
    assert_eq!(appended.content().map(|c| c.meta.range), Some([1, 4]));
}

#[test]
fn append_verse_without_content_is_refused() {
    let mut s = surface();
    assert!(!s.append_verse(Verse::new(1, "x")));
    assert_eq!(s.content_revision(), 0);
}

#[test]
fn out_of_range_highlight_is_rejected() {
    let mut s = surface();
    s.replace_content(passage(3));
    assert!(s.set_highlight(Some(1)));
    assert!(!s.set_highlight(Some(3)));
    assert_eq!(s.active_index(), Some(1));
    assert!(s.set_highlight(None));
    assert_eq!(s.active_index(), None);
}

#[test]
fn animations_without_content_are_noops() {
    let mut s = surface();
    assert!(s.start_highlight_blend(0.0, None, Some(0)).is_none());
    assert!(s.start_scroll_to(0.0, 100.0).is_none());
    assert!(!s.is_animating());
}

#[test]
fn blend_lands_on_target() {
    let mut s = surface();
    s.replace_content(passage(5));
    s.set_highlight(Some(0));
    s.start_highlight_blend(0.0, Some(0), Some(1));

    s.tick(150.0);
    assert_eq!(s.highlight_intensity(0, 150.0), 0.5);
    assert_eq!(s.highlight_intensity(1, 150.0), 0.5);
    assert_eq!(s.highlight_intensity(2, 150.0), 0.0);
    assert_eq!(s.active_index(), Some(0));
    assert_eq!(s.highlight_target(), Some(1));

    s.tick(300.0);
    assert_eq!(s.active_index(), Some(1));
    assert!(!s.is_animating());
}

#[test]
fn new_blend_cancels_in_flight_one() {
    let mut s = surface();
    s.replace_content(passage(10));
    s.start_highlight_blend(0.0, None, Some(1));
    s.tick(100.0);
    s.start_highlight_blend(100.0, Some(1), Some(5));

    s.tick(400.0);
    assert_eq!(s.active_index(), Some(5));
}

#[test]
fn blend_to_out_of_range_target_is_refused() {
    let mut s = surface();
    s.replace_content(passage(3));
    assert!(s.start_highlight_blend(0.0, None, Some(7)).is_none());
    assert!(!s.animations().is_blending());
}

#[test]
fn verse_colors_follow_intensity() {
    let mut s = surface();
    s.replace_content(passage(3));
    s.set_highlight(Some(2));
    let style = s.style().clone();

    let lit = s.verse_colors(2, 0.0);
    assert_eq!(lit.text, style.highlight_text_color);
    let bg = lit.background.expect("highlighted verse has a background");
    assert!((bg.a - HIGHLIGHT_BACKGROUND_ALPHA).abs() < 1e-9);

    let unlit = s.verse_colors(0, 0.0);
    assert_eq!(unlit.background, None);
    assert_eq!(unlit.text, style.text_color);
}

#[test]
fn apply_setting_reports_layout_changes() {
    let mut s = surface();
    s.replace_content(passage(3));

    assert_eq!(s.apply_setting("textColor", &serde_json::json!("#123456")), Ok(false));
    assert_eq!(s.style().text_color, Color::rgb(0x12, 0x34, 0x56));

    assert_eq!(s.apply_setting("fontSizeFraction", &serde_json::json!(5)), Ok(true));
    assert_eq!(s.layout().params().font_size_px(), 50.0);
}

#[test]
fn bad_settings_leave_style_unchanged() {
    let mut s = surface();
    let before = s.style().clone();

    assert!(matches!(
        s.apply_setting("fontFamily", &serde_json::json!("serif")),
        Err(StyleError::UnknownKey(_))
    ));
    assert!(s.apply_setting("scrollSpeed", &serde_json::json!("fast")).is_err());
    assert!(s.set_font_size(-4.0).is_err());
    assert_eq!(s.style(), &before);
}

#[test]
fn set_style_relayouts_only_for_geometry() {
    let mut s = surface();
    s.replace_content(passage(3));

    let recolored = PresentationStyle {
        background_color: Color::rgb(1, 2, 3),
        ..s.style().clone()
    };
    s.set_style(recolored).unwrap();
    assert_eq!(s.layout().params().font_size_px(), 100.0);

    let scrolled_title = PresentationStyle {
        fixed_title: false,
        ..s.style().clone()
    };
    s.set_style(scrolled_title).unwrap();
    assert_eq!(s.layout().params().pinned_title_height(), 0.0);
    assert!(s.layout().blocks()[0].top_offset > 0.0);
}

#[test]
fn resize_reclamps_scroll() {
    let mut s = surface();
    s.replace_content(passage(10));
    s.set_scroll_offset(f64::MAX);
    let max_before = s.scroll().max();
    assert_eq!(s.scroll_offset(), max_before);

    assert!(!s.set_viewport(ViewportDimensions::new(1000.0, 1000.0)));
    assert!(s.set_viewport(ViewportDimensions::new(1000.0, 3000.0)));
    assert!(s.scroll_offset() <= s.scroll().max());
}

#[test]
fn wheel_scroll_stops_tween() {
    let mut s = surface();
    s.replace_content(passage(10));
    s.start_scroll_to(0.0, 900.0);
    assert!(s.animations().is_scrolling());

    assert_eq!(s.scroll_by(40.0), 40.0);
    assert!(!s.animations().is_scrolling());
    assert!(s.tick(100.0).scroll.is_none());
}

#[test]
fn scroll_tween_moves_offset() {
    let mut s = surface();
    s.replace_content(passage(10));
    s.start_scroll_to(0.0, 800.0);

    s.tick(150.0);
    assert_eq!(s.scroll_offset(), 700.0);
    s.tick(300.0);
    assert_eq!(s.scroll_offset(), 800.0);
}

#[test]
fn scroll_target_is_clamped() {
    let mut s = surface();
    s.replace_content(passage(10));
    assert_eq!(s.scroll_target_for(0), 0.0);
    assert!(s.scroll_target_for(9) <= s.scroll().max());
}

#[test]
fn clicks_map_to_verses_below_pinned_title() {
    let mut s = surface();
    s.replace_content(passage(10));

    assert_eq!(s.verse_at(100.0), None);
    assert_eq!(s.verse_at(122.0 + 180.0 * 3.0 + 50.0), Some(3));
    assert_eq!(s.verse_at(122.0 + 170.0), None, "gap between blocks");

    s.set_scroll_offset(180.0);
    assert_eq!(s.verse_at(122.0 + 50.0), Some(1));
}

#[test]
fn snapshot_uses_camel_case() {
    let mut s = surface();
    s.replace_content(passage(2));
    s.set_highlight(Some(1));

    let json = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(json["verseCount"], 2);
    assert_eq!(json["activeIndex"], 1);
    assert_eq!(json["title"], "Psalms 119:1-2");
    assert_eq!(json["blocks"][1]["lines"][0], "2. x");
    assert_eq!(json["fontSizePx"], 100.0);
}
